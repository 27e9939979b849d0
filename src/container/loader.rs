use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek};
use std::sync::Arc;

use serde_json::Value;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::assets::placeholder::{Asset, AssetPayload};
use crate::assets::refs::collect_asset_refs;
use crate::foundation::error::{SchemaPath, ShowError, ShowResult};
use crate::spec::model::ShowSpecification;
use crate::spec::validate::{ValidationOptions, validate_show_specification};

/// Archive entry holding the show specification.
pub const SPEC_ENTRY: &str = "show.json";

/// Optional archive entry holding the container format version.
pub const META_VERSION_ENTRY: &str = "_meta/version";

/// Container format versions this crate can read.
pub const SUPPORTED_CONTAINER_VERSIONS: &[&str] = &["1"];

const ZIP_LOCAL_HEADER: &[u8] = b"PK\x03\x04";
const ZIP_EMPTY_ARCHIVE: &[u8] = b"PK\x05\x06";

/// What to do with asset references found in the specification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetPolicy {
    /// Read referenced entries from the container; references without an entry become
    /// placeholders.
    #[default]
    Load,
    /// Leave every reference as a placeholder.
    Skip,
}

/// Options for [`load_compiled_show`].
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    pub assets: AssetPolicy,
    pub validation: ValidationOptions,
}

/// A validated show together with its binary assets, keyed by normalized filename.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedShow {
    pub specification: ShowSpecification,
    pub assets: BTreeMap<String, AssetPayload>,
}

impl LoadedShow {
    pub fn asset(&self, filename: &str) -> Option<&AssetPayload> {
        self.assets.get(filename)
    }

    /// Assets that were referenced but not loaded.
    pub fn placeholders(&self) -> impl Iterator<Item = &Asset> {
        self.assets.values().filter_map(|a| match a {
            AssetPayload::Placeholder(p) => Some(p),
            AssetPayload::Loaded(_) => None,
        })
    }
}

/// Load a compiled show container from memory.
///
/// The archive must contain [`SPEC_ENTRY`]; the specification is validated before any asset is
/// read. Either the whole show is returned or an error is, never a partial result.
#[tracing::instrument(skip(bytes, opts), fields(len = bytes.len()))]
pub fn load_compiled_show(bytes: &[u8], opts: &LoadOptions) -> ShowResult<LoadedShow> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ShowError::container(format!("not a compiled show archive: {e}")))?;

    check_container_version(&mut archive)?;

    let raw = read_entry(&mut archive, SPEC_ENTRY)?.ok_or_else(|| {
        ShowError::missing_entry(format!("no show specification found ('{SPEC_ENTRY}')"))
    })?;
    let doc: Value = serde_json::from_slice(&raw).map_err(|e| {
        ShowError::container(format!("'{SPEC_ENTRY}' is not valid JSON: {e}"))
    })?;

    assemble(doc, opts, opts.assets, |name| read_entry(&mut archive, name))
}

/// Load either a compiled show container or a bare JSON specification.
///
/// Containers are recognized by the zip signature. A bare specification has nowhere to load
/// assets from, so all of its references become placeholders.
pub fn load_show(bytes: &[u8], opts: &LoadOptions) -> ShowResult<LoadedShow> {
    if is_container(bytes) {
        return load_compiled_show(bytes, opts);
    }

    let doc: Value = serde_json::from_slice(bytes).map_err(|e| {
        ShowError::invalid(SchemaPath::root(), format!("parse show JSON: {e}"))
    })?;
    assemble(doc, opts, AssetPolicy::Skip, |_| Ok(None))
}

/// Return `true` when `bytes` start like a zip archive.
pub fn is_container(bytes: &[u8]) -> bool {
    bytes.starts_with(ZIP_LOCAL_HEADER) || bytes.starts_with(ZIP_EMPTY_ARCHIVE)
}

fn assemble<F>(
    doc: Value,
    opts: &LoadOptions,
    policy: AssetPolicy,
    mut fetch: F,
) -> ShowResult<LoadedShow>
where
    F: FnMut(&str) -> ShowResult<Option<Vec<u8>>>,
{
    validate_show_specification(&doc, &opts.validation)?;

    let mut assets = BTreeMap::new();
    for found in collect_asset_refs(&doc)? {
        if assets.contains_key(&found.filename) {
            continue;
        }
        let payload = match policy {
            AssetPolicy::Skip => AssetPayload::Placeholder(Asset::new(found.filename.as_str())),
            AssetPolicy::Load => match fetch(&found.filename)? {
                Some(bytes) => {
                    tracing::debug!(asset = %found.filename, len = bytes.len(), "loaded asset");
                    AssetPayload::Loaded(Arc::from(bytes))
                }
                None => {
                    tracing::warn!(
                        asset = %found.filename,
                        at = %found.path,
                        "asset referenced by the show is missing from the container"
                    );
                    AssetPayload::Placeholder(Asset::new(found.filename.as_str()))
                }
            },
        };
        assets.insert(found.filename, payload);
    }

    let specification = ShowSpecification::decode_validated(doc)?;
    Ok(LoadedShow {
        specification,
        assets,
    })
}

fn check_container_version<R: Read + Seek>(archive: &mut ZipArchive<R>) -> ShowResult<()> {
    let Some(raw) = read_entry(archive, META_VERSION_ENTRY)? else {
        return Ok(());
    };
    let version = String::from_utf8_lossy(&raw);
    let version = version.trim();
    if SUPPORTED_CONTAINER_VERSIONS.contains(&version) {
        Ok(())
    } else {
        Err(ShowError::container(format!(
            "unsupported container version '{version}' in '{META_VERSION_ENTRY}'"
        )))
    }
}

fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> ShowResult<Option<Vec<u8>>> {
    let mut file = match archive.by_name(name) {
        Ok(f) => f,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(ShowError::container(format!("open entry '{name}': {e}"))),
    };
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)
        .map_err(|e| ShowError::container(format!("read entry '{name}': {e}")))?;
    Ok(Some(buf))
}

#[cfg(test)]
#[path = "../../tests/unit/container/loader.rs"]
mod tests;
