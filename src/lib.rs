//! Drone show specification schema, validation and compiled show loading.
//!
//! A show is a JSON document describing a swarm of drones (trajectories, light programs, yaw
//! control), the environment it flies in (type, cameras) and optional media. Shows are
//! distributed either as bare JSON or as a compiled `.skyc` container: a zip archive holding
//! `show.json` plus the binary assets it references.
//!
//! - [`validate_show_specification`] checks a raw document and fails on the first violated rule.
//! - [`ShowSpecification`] is the typed, validated form of a document.
//! - [`get_cameras_from_show_specification`] reads the camera list, even from partial documents.
//! - [`load_compiled_show`] unpacks a container into a [`LoadedShow`].
#![forbid(unsafe_code)]

mod assets;
mod container;
mod foundation;
mod spec;

pub use crate::assets::placeholder::{Asset, AssetPayload};
pub use crate::assets::refs::{AssetRef, REF_KEY};
pub use crate::container::loader::{
    AssetPolicy, LoadOptions, LoadedShow, META_VERSION_ENTRY, SPEC_ENTRY,
    SUPPORTED_CONTAINER_VERSIONS, is_container, load_compiled_show, load_show,
};
pub use crate::foundation::error::{ErrorKind, PathElem, SchemaPath, ShowError, ShowResult};
pub use crate::foundation::seq::{Pairs, Slice, iter_pairs, slice};
pub use crate::spec::cameras::get_cameras_from_show_specification;
pub use crate::spec::model::{
    Camera, CameraType, Drone, DroneSettings, Environment, EnvironmentType, LightProgram, Media,
    ShowSpecification, Swarm, Trajectory, TrajectoryPoint, TrajectorySegment, YawControl,
};
pub use crate::spec::validate::{ValidationOptions, validate_show_specification};
pub use crate::spec::version::{
    DEFAULT_MAX_DRONE_COUNT, ENVIRONMENT_TYPES, SUPPORTED_LIGHTS_VERSIONS, SUPPORTED_SHOW_VERSIONS,
    SUPPORTED_TRAJECTORY_VERSIONS, SUPPORTED_YAW_CONTROL_VERSIONS,
};
