use serde::Deserialize;
use serde_json::Value;

use crate::foundation::error::{SchemaPath, ShowError, ShowResult};
use crate::spec::model::TrajectoryPoint;
use crate::spec::version::{
    DEFAULT_MAX_DRONE_COUNT, ENVIRONMENT_TYPES, SUPPORTED_LIGHTS_VERSIONS, SUPPORTED_SHOW_VERSIONS,
    SUPPORTED_TRAJECTORY_VERSIONS, SUPPORTED_YAW_CONTROL_VERSIONS, is_supported,
};

/// Tunables for [`validate_show_specification`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Hard cap on the number of drones in `swarm.drones`.
    pub max_drone_count: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            max_drone_count: DEFAULT_MAX_DRONE_COUNT,
        }
    }
}

/// Check a raw show document and fail on the first violated rule.
///
/// Rules run in a fixed order: show version, presence of drones, drone count limit, trajectory
/// presence for every drone, trajectory versions, environment shape, environment type, camera
/// list shape, per-drone trajectory points and timing, optional light and yaw sections, and
/// finally the media section. The document is only inspected, never modified.
///
/// Every field that [`ShowSpecification`](crate::spec::model::ShowSpecification) decodes into a
/// typed value is covered here, so a document that passes always decodes.
pub fn validate_show_specification(doc: &Value, opts: &ValidationOptions) -> ShowResult<()> {
    validate_version(doc)?;
    let drones = validate_drone_list(doc, opts)?;

    let drones_path = SchemaPath::fields(&["swarm", "drones"]);
    for (i, drone) in drones.iter().enumerate() {
        if settings_section(drone, "trajectory").is_none() {
            return Err(ShowError::missing(
                drones_path.index(i).field("settings").field("trajectory"),
                "drone without trajectory",
            ));
        }
    }
    for (i, drone) in drones.iter().enumerate() {
        let path = drones_path.index(i).field("settings").field("trajectory");
        if let Some(trajectory) = settings_section(drone, "trajectory") {
            validate_section_version(
                trajectory,
                &path,
                "trajectory",
                SUPPORTED_TRAJECTORY_VERSIONS,
            )?;
        }
    }

    validate_environment(doc)?;

    for (i, drone) in drones.iter().enumerate() {
        let settings = drones_path.index(i).field("settings");
        if let Some(trajectory) = settings_section(drone, "trajectory") {
            validate_trajectory_body(trajectory, &settings.field("trajectory"))?;
        }
        if let Some(lights) = settings_section(drone, "lights") {
            validate_section_version(
                lights,
                &settings.field("lights"),
                "light program",
                SUPPORTED_LIGHTS_VERSIONS,
            )?;
        }
        if let Some(yaw) = settings_section(drone, "yawControl") {
            validate_section_version(
                yaw,
                &settings.field("yawControl"),
                "yaw control",
                SUPPORTED_YAW_CONTROL_VERSIONS,
            )?;
        }
    }

    if let Some(media) = doc.get("media")
        && !media.is_object()
    {
        return Err(ShowError::invalid(
            SchemaPath::fields(&["media"]),
            "media must be an object",
        ));
    }

    tracing::debug!(drones = drones.len(), "show specification is valid");
    Ok(())
}

fn validate_version(doc: &Value) -> ShowResult<()> {
    let path = SchemaPath::fields(&["version"]);
    let Some(version) = doc.get("version") else {
        return Err(ShowError::missing(path, "no version"));
    };
    match version.as_u64() {
        Some(v) if v > 0 && is_supported(SUPPORTED_SHOW_VERSIONS, v) => Ok(()),
        _ => Err(ShowError::invalid(
            path,
            format!(
                "invalid version {version}; supported: {}",
                fmt_versions(SUPPORTED_SHOW_VERSIONS)
            ),
        )),
    }
}

fn validate_drone_list<'a>(doc: &'a Value, opts: &ValidationOptions) -> ShowResult<&'a [Value]> {
    let path = SchemaPath::fields(&["swarm", "drones"]);
    let Some(drones) = doc.get("swarm").and_then(|s| s.get("drones")) else {
        return Err(ShowError::missing(path, "no drones"));
    };
    let Some(drones) = drones.as_array() else {
        return Err(ShowError::invalid(path, "drones must be an array"));
    };
    if drones.is_empty() {
        return Err(ShowError::missing(path, "no drones"));
    }
    if drones.len() > opts.max_drone_count {
        return Err(ShowError::limit(
            path,
            format!(
                "too many drones: {} exceeds the limit of {}",
                drones.len(),
                opts.max_drone_count
            ),
        ));
    }
    Ok(drones)
}

fn validate_environment(doc: &Value) -> ShowResult<()> {
    let path = SchemaPath::fields(&["environment"]);
    let Some(env) = doc.get("environment") else {
        return Ok(());
    };
    if !env.is_object() {
        return Err(ShowError::invalid(
            path,
            "invalid environment: expected an object",
        ));
    }

    if let Some(ty) = env.get("type") {
        let known = ty
            .as_str()
            .is_some_and(|s| ENVIRONMENT_TYPES.contains(&s));
        if !known {
            return Err(ShowError::invalid(
                path.field("type"),
                format!(
                    "invalid environment type {ty}; expected one of {}",
                    ENVIRONMENT_TYPES.join(", ")
                ),
            ));
        }
    }

    if let Some(cameras) = env.get("cameras")
        && !cameras.is_array()
    {
        return Err(ShowError::invalid(
            path.field("cameras"),
            "environment.cameras must be an array",
        ));
    }

    Ok(())
}

fn validate_section_version(
    section: &Value,
    path: &SchemaPath,
    what: &str,
    supported: &[u64],
) -> ShowResult<()> {
    let Some(version) = section.get("version") else {
        return Err(ShowError::missing(
            path.field("version"),
            format!("{what} has no version"),
        ));
    };
    match version.as_u64() {
        Some(v) if is_supported(supported, v) => Ok(()),
        _ => Err(ShowError::invalid(
            path.field("version"),
            format!(
                "unsupported {what} version {version}; supported: {}",
                fmt_versions(supported)
            ),
        )),
    }
}

fn validate_trajectory_body(trajectory: &Value, path: &SchemaPath) -> ShowResult<()> {
    for key in ["takeoffTime", "landingTime"] {
        if let Some(t) = trajectory.get(key)
            && !(t.is_null() || t.is_number())
        {
            return Err(ShowError::invalid(
                path.field(key),
                format!("{key} must be a number, got {t}"),
            ));
        }
    }

    let Some(points) = trajectory.get("points") else {
        return Ok(());
    };
    let points_path = path.field("points");
    let Some(points) = points.as_array() else {
        return Err(ShowError::invalid(
            points_path,
            "trajectory points must be an array",
        ));
    };
    for (j, point) in points.iter().enumerate() {
        TrajectoryPoint::deserialize(point).map_err(|e| {
            ShowError::invalid(
                points_path.index(j),
                format!("invalid trajectory point: {e}; expected [t, [x, y, z], [controls...]]"),
            )
        })?;
    }
    Ok(())
}

fn settings_section<'a>(drone: &'a Value, name: &str) -> Option<&'a Value> {
    drone
        .get("settings")
        .and_then(|s| s.get(name))
        .filter(|v| !v.is_null())
}

fn fmt_versions(versions: &[u64]) -> String {
    versions
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "../../tests/unit/spec/validate.rs"]
mod tests;
