use serde_json::Value;

use crate::foundation::error::{SchemaPath, ShowError, ShowResult};
use crate::spec::model::Camera;

/// Read `environment.cameras` from a show document.
///
/// Works on documents that have not been (or would not be) fully validated: a missing
/// `environment` or `cameras` key yields an empty list. A `cameras` value that is not an array is
/// rejected. Entries come back unchanged and in order; nothing about an individual camera is
/// checked here.
pub fn get_cameras_from_show_specification(doc: &Value) -> ShowResult<Vec<Camera>> {
    let Some(cameras) = doc.get("environment").and_then(|env| env.get("cameras")) else {
        return Ok(Vec::new());
    };
    let Some(cameras) = cameras.as_array() else {
        return Err(ShowError::invalid(
            SchemaPath::fields(&["environment", "cameras"]),
            "environment.cameras must be an array",
        ));
    };

    Ok(cameras.iter().cloned().map(Camera::from).collect())
}

#[cfg(test)]
#[path = "../../tests/unit/spec/cameras.rs"]
mod tests;
