use std::io::Read;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::assets::refs::AssetRef;
use crate::foundation::error::{SchemaPath, ShowError, ShowResult};
use crate::foundation::seq::{iter_pairs, slice};
use crate::spec::validate::{ValidationOptions, validate_show_specification};

/// Validated drone show specification.
///
/// Values of this type only come out of the constructors below, which run
/// [`validate_show_specification`] before decoding. Only the fields the validator checks are
/// typed; everything else stays as JSON (in `extra` maps or behind accessors) so any document
/// that validates also decodes, and its fields survive a decode/encode cycle.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShowSpecification {
    pub version: u64,
    pub swarm: Swarm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    /// Free-form show metadata (`title`, authoring info, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Swarm {
    pub drones: Vec<Drone>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Drone {
    pub settings: DroneSettings,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Drone {
    /// Drone model, e.g. `"generic"`.
    pub fn kind(&self) -> Option<&str> {
        self.extra.get("type").and_then(Value::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroneSettings {
    pub trajectory: Trajectory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lights: Option<LightProgram>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaw_control: Option<YawControl>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DroneSettings {
    pub fn name(&self) -> Option<&str> {
        self.extra.get("name").and_then(Value::as_str)
    }

    /// Takeoff position in show coordinates.
    pub fn home(&self) -> Option<[f64; 3]> {
        self.extra.get("home").and_then(float_array)
    }
}

/// Per-drone motion description.
///
/// Points are kept in file order. Interpreting the curve between points is left to the playback
/// side; this type only exposes the points and their pairing into segments.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trajectory {
    pub version: u64,
    #[serde(default)]
    pub points: Vec<TrajectoryPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub takeoff_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landing_time: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One trajectory keyframe, encoded on the wire as `[time, [x, y, z], [[cx, cy, cz], ...]]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "RawPoint", into = "RawPoint")]
pub struct TrajectoryPoint {
    /// Seconds since the start of the show.
    pub time: f64,
    pub position: [f64; 3],
    /// Bezier control points of the segment ending at this point.
    pub controls: Vec<[f64; 3]>,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct RawPoint(f64, [f64; 3], Vec<[f64; 3]>);

impl From<RawPoint> for TrajectoryPoint {
    fn from(RawPoint(time, position, controls): RawPoint) -> Self {
        Self {
            time,
            position,
            controls,
        }
    }
}

impl From<TrajectoryPoint> for RawPoint {
    fn from(p: TrajectoryPoint) -> Self {
        RawPoint(p.time, p.position, p.controls)
    }
}

/// Two consecutive trajectory points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectorySegment<'a> {
    pub start: &'a TrajectoryPoint,
    pub end: &'a TrajectoryPoint,
}

impl TrajectorySegment<'_> {
    pub fn duration(&self) -> f64 {
        self.end.time - self.start.time
    }

    pub fn controls(&self) -> &[[f64; 3]] {
        &self.end.controls
    }
}

impl Trajectory {
    /// Consecutive point pairs in file order.
    pub fn segments(&self) -> impl Iterator<Item = TrajectorySegment<'_>> + Clone {
        iter_pairs(self.points.iter()).map(|(start, end)| TrajectorySegment { start, end })
    }

    /// Points whose timestamps fall in `[from, to]`, assuming points are sorted by time.
    pub fn points_between(
        &self,
        from: f64,
        to: f64,
    ) -> impl Iterator<Item = &TrajectoryPoint> + Clone {
        slice(
            self.points.iter(),
            move |p: &&TrajectoryPoint| p.time >= from,
            move |p: &&TrajectoryPoint| p.time > to,
        )
    }

    /// Timestamp of the last point, or `0.0` for an empty trajectory.
    pub fn end_time(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.time)
    }
}

/// Compiled light program. The payload stays opaque.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LightProgram {
    pub version: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LightProgram {
    /// Base64-encoded bytecode.
    pub fn data(&self) -> Option<&str> {
        self.extra.get("data").and_then(Value::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct YawControl {
    pub version: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Environment {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EnvironmentType>,
    #[serde(default)]
    pub cameras: Vec<Camera>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentType {
    Outdoor,
    Indoor,
}

/// Viewpoint suggested by the show author.
///
/// Cameras are carried exactly as written; no per-camera checks are made, so the accessors
/// return `None` for fields that are absent or have an unexpected shape.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Camera(Value);

/// Projection named by a camera's `type` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraType<'a> {
    Perspective,
    Other(&'a str),
}

impl Camera {
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn kind(&self) -> Option<CameraType<'_>> {
        match self.0.get("type")?.as_str()? {
            "perspective" => Some(CameraType::Perspective),
            other => Some(CameraType::Other(other)),
        }
    }

    pub fn position(&self) -> Option<[f64; 3]> {
        self.0.get("position").and_then(float_array)
    }

    /// Quaternion, stored as `[w, x, y, z]`.
    pub fn orientation(&self) -> Option<[f64; 4]> {
        self.0.get("orientation").and_then(float_array)
    }

    pub fn is_default(&self) -> bool {
        self.0.get("default").and_then(Value::as_bool) == Some(true)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Camera {
    fn from(v: Value) -> Self {
        Self(v)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Media {
    pub fields: Map<String, Value>,
}

impl Media {
    /// Soundtrack reference, when `audio` is a `{"$ref": ...}` object.
    pub fn audio(&self) -> Option<AssetRef> {
        AssetRef::deserialize(self.fields.get("audio")?).ok()
    }
}

fn float_array<const N: usize>(v: &Value) -> Option<[f64; N]> {
    let items = v.as_array()?;
    if items.len() != N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = item.as_f64()?;
    }
    Some(out)
}

impl ShowSpecification {
    /// Validate a parsed JSON document and decode it.
    pub fn from_value(doc: Value, opts: &ValidationOptions) -> ShowResult<Self> {
        validate_show_specification(&doc, opts)?;
        Self::decode_validated(doc)
    }

    /// Decode a document that already passed [`validate_show_specification`].
    ///
    /// The validator checks every field this model types, so an error here means the two have
    /// drifted apart.
    pub(crate) fn decode_validated(doc: Value) -> ShowResult<Self> {
        serde_json::from_value(doc).map_err(|e| {
            ShowError::invalid(
                SchemaPath::root(),
                format!("decode show specification: {e}"),
            )
        })
    }

    /// Parse, validate and decode a JSON string.
    pub fn from_json_str(s: &str, opts: &ValidationOptions) -> ShowResult<Self> {
        let doc: Value = serde_json::from_str(s)
            .map_err(|e| ShowError::invalid(SchemaPath::root(), format!("parse show JSON: {e}")))?;
        Self::from_value(doc, opts)
    }

    /// Parse, validate and decode JSON from a reader.
    pub fn from_reader<R: Read>(r: R, opts: &ValidationOptions) -> ShowResult<Self> {
        let doc: Value = serde_json::from_reader(r)
            .map_err(|e| ShowError::invalid(SchemaPath::root(), format!("parse show JSON: {e}")))?;
        Self::from_value(doc, opts)
    }

    pub fn drone_count(&self) -> usize {
        self.swarm.drones.len()
    }

    pub fn title(&self) -> Option<&str> {
        self.meta
            .as_ref()
            .and_then(|m| m.get("title"))
            .and_then(Value::as_str)
    }

    pub fn environment_type(&self) -> Option<EnvironmentType> {
        self.environment.as_ref().and_then(|e| e.kind)
    }

    /// Cameras declared by the author, in document order.
    pub fn cameras(&self) -> &[Camera] {
        self.environment
            .as_ref()
            .map_or(&[][..], |e| e.cameras.as_slice())
    }

    /// The camera flagged as default, falling back to the first declared camera.
    pub fn default_camera(&self) -> Option<&Camera> {
        let cameras = self.cameras();
        cameras
            .iter()
            .find(|c| c.is_default())
            .or_else(|| cameras.first())
    }

    /// Latest trajectory end time across the swarm, in seconds.
    pub fn duration_sec(&self) -> f64 {
        self.swarm
            .drones
            .iter()
            .map(|d| d.settings.trajectory.end_time())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/spec/model.rs"]
mod tests;
