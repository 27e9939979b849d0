use serde_json::Value;

use crate::foundation::error::{SchemaPath, ShowError, ShowResult};

/// JSON key marking an asset reference object.
pub const REF_KEY: &str = "$ref";

/// Reference to a binary asset stored next to the specification, written as
/// `{"$ref": "<relative path>"}`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssetRef {
    #[serde(rename = "$ref")]
    pub filename: String,
}

/// One asset reference found in a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoundRef {
    /// Where the reference object sits in the document.
    pub path: SchemaPath,
    /// Normalized container path of the referenced asset.
    pub filename: String,
}

/// Turn a `$ref` target into the archive entry name it points at.
///
/// Backslashes count as separators and empty or `.` segments are dropped. Targets that are
/// absolute, carry a drive prefix, or climb out with `..` cannot name an entry of the container.
pub(crate) fn normalize_ref_target(target: &str) -> Result<String, &'static str> {
    let unified = target.replace('\\', "/");
    if unified.starts_with('/') || unified.split('/').next().is_some_and(|s| s.ends_with(':')) {
        return Err("$ref must be relative to the container root");
    }

    let mut segments = Vec::new();
    for seg in unified.split('/').filter(|s| !s.is_empty() && *s != ".") {
        if seg == ".." {
            return Err("$ref must not contain '..'");
        }
        segments.push(seg);
    }
    if segments.is_empty() {
        return Err("$ref does not name an archive entry");
    }
    Ok(segments.join("/"))
}

/// Collect every `{"$ref": ...}` object in `doc`, depth-first in key order.
pub(crate) fn collect_asset_refs(doc: &Value) -> ShowResult<Vec<FoundRef>> {
    let mut out = Vec::new();
    walk(doc, &SchemaPath::root(), &mut out)?;
    Ok(out)
}

fn walk(v: &Value, path: &SchemaPath, out: &mut Vec<FoundRef>) -> ShowResult<()> {
    match v {
        Value::Object(map) => {
            if let Some(target) = map.get(REF_KEY) {
                let ref_path = path.key(REF_KEY);
                let Some(raw) = target.as_str() else {
                    return Err(ShowError::invalid(
                        ref_path,
                        "asset reference must be a string",
                    ));
                };
                let filename =
                    normalize_ref_target(raw).map_err(|msg| ShowError::invalid(ref_path, msg))?;
                out.push(FoundRef {
                    path: path.clone(),
                    filename,
                });
                return Ok(());
            }
            for (k, child) in map {
                walk(child, &path.key(k.as_str()), out)?;
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                walk(child, &path.index(i), out)?;
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/refs.rs"]
mod tests;
