use serde_json::json;

use super::*;
use crate::foundation::error::ErrorKind;

#[test]
fn ref_targets_become_entry_names() {
    assert_eq!(normalize_ref_target("a/b.mp3").unwrap(), "a/b.mp3");
    assert_eq!(normalize_ref_target("a\\b.mp3").unwrap(), "a/b.mp3");
    assert_eq!(normalize_ref_target("./a//b.mp3").unwrap(), "a/b.mp3");
}

#[test]
fn ref_targets_outside_the_container_are_rejected() {
    assert!(normalize_ref_target("../x.mp3").unwrap_err().contains(".."));
    assert!(normalize_ref_target("/abs.mp3").unwrap_err().contains("relative"));
    assert!(normalize_ref_target("C:/music.mp3").unwrap_err().contains("relative"));
    assert!(normalize_ref_target("").is_err());
    assert!(normalize_ref_target("./.").is_err());
}

#[test]
fn finds_refs_in_nested_objects_and_arrays() {
    let doc = json!({
        "media": { "audio": { "$ref": "audio/track.mp3" } },
        "environment": {
            "textures": [ { "$ref": "tex/ground.png" }, { "name": "no ref" } ]
        }
    });
    let refs = collect_asset_refs(&doc).unwrap();
    let names: Vec<_> = refs.iter().map(|r| r.filename.as_str()).collect();
    assert_eq!(names, vec!["tex/ground.png", "audio/track.mp3"]);
    assert_eq!(refs[0].path.to_string(), "$.environment.textures[0]");
    assert_eq!(refs[1].path.to_string(), "$.media.audio");
}

#[test]
fn rejects_non_string_ref() {
    let doc = json!({ "media": { "audio": { "$ref": 3 } } });
    let err = collect_asset_refs(&doc).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
    assert_eq!(err.path().unwrap().to_string(), "$.media.audio.$ref");
}

#[test]
fn rejects_escaping_ref() {
    let doc = json!({ "media": { "audio": { "$ref": "../secret" } } });
    let err = collect_asset_refs(&doc).unwrap_err();
    assert!(err.to_string().contains("must not contain '..'"));
}

#[test]
fn asset_ref_uses_dollar_ref_key() {
    let r: AssetRef = serde_json::from_value(json!({ "$ref": "a.mp3" })).unwrap();
    assert_eq!(r.filename, "a.mp3");
}
