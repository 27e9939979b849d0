/// Show specification versions this crate understands.
pub const SUPPORTED_SHOW_VERSIONS: &[u64] = &[1];

/// Trajectory encoding versions this crate understands.
pub const SUPPORTED_TRAJECTORY_VERSIONS: &[u64] = &[1];

/// Light program encoding versions this crate understands.
pub const SUPPORTED_LIGHTS_VERSIONS: &[u64] = &[1];

/// Yaw control encoding versions this crate understands.
pub const SUPPORTED_YAW_CONTROL_VERSIONS: &[u64] = &[1];

/// Recognized values of `environment.type`.
pub const ENVIRONMENT_TYPES: &[&str] = &["outdoor", "indoor"];

/// Default upper bound on `swarm.drones`.
pub const DEFAULT_MAX_DRONE_COUNT: usize = 5000;

pub(crate) fn is_supported(versions: &[u64], v: u64) -> bool {
    versions.contains(&v)
}
