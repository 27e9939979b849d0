use serde_json::json;

use super::*;
use crate::foundation::error::ErrorKind;

fn drone() -> Value {
    json!({
        "type": "generic",
        "settings": {
            "trajectory": { "version": 1, "points": [] }
        }
    })
}

fn minimal_ok() -> Value {
    json!({
        "version": 1,
        "swarm": { "drones": [drone(), drone()] }
    })
}

fn check(doc: &Value) -> ShowResult<()> {
    validate_show_specification(doc, &ValidationOptions::default())
}

#[test]
fn ok_document_validates() {
    check(&minimal_ok()).unwrap();
}

#[test]
fn rejects_missing_version() {
    let mut doc = minimal_ok();
    doc.as_object_mut().unwrap().remove("version");
    let err = check(&doc).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingField);
    assert!(err.to_string().contains("$.version: no version"));
}

#[test]
fn rejects_unknown_version() {
    for bad in [json!(0), json!(2), json!(-1), json!("1"), json!(1.5)] {
        let mut doc = minimal_ok();
        doc["version"] = bad;
        let err = check(&doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(err.to_string().contains("invalid version"));
    }
}

#[test]
fn rejects_missing_or_empty_drones() {
    let no_swarm = json!({ "version": 1 });
    let err = check(&no_swarm).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingField);
    assert!(err.to_string().contains("no drones"));

    let empty = json!({ "version": 1, "swarm": { "drones": [] } });
    let err = check(&empty).unwrap_err();
    assert!(err.to_string().contains("no drones"));

    let scalar = json!({ "version": 1, "swarm": { "drones": 3 } });
    let err = check(&scalar).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}

#[test]
fn rejects_too_many_drones() {
    let opts = ValidationOptions { max_drone_count: 3 };
    let mut doc = minimal_ok();
    doc["swarm"]["drones"] = Value::Array(vec![drone(); 3]);
    validate_show_specification(&doc, &opts).unwrap();

    doc["swarm"]["drones"] = Value::Array(vec![drone(); 4]);
    let err = validate_show_specification(&doc, &opts).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LimitExceeded);
    assert!(err.to_string().contains("too many drones"));
}

#[test]
fn default_limit_is_enforced() {
    let limit = ValidationOptions::default().max_drone_count;
    let drones = vec![drone(); limit + 1];
    let doc = json!({ "version": 1, "swarm": { "drones": drones } });
    let err = check(&doc).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LimitExceeded);
}

#[test]
fn names_the_first_drone_without_trajectory() {
    let mut doc = minimal_ok();
    doc["swarm"]["drones"] = json!([drone(), { "settings": {} }, { "settings": {} }]);
    let err = check(&doc).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingField);
    assert_eq!(
        err.path().unwrap().to_string(),
        "$.swarm.drones[1].settings.trajectory"
    );
    assert!(err.to_string().contains("drone without trajectory"));
}

#[test]
fn missing_trajectory_wins_over_bad_trajectory_version() {
    let mut doc = minimal_ok();
    doc["swarm"]["drones"] = json!([
        { "settings": { "trajectory": { "version": 7 } } },
        { "settings": {} }
    ]);
    let err = check(&doc).unwrap_err();
    assert!(err.to_string().contains("drone without trajectory"));
}

#[test]
fn rejects_unknown_trajectory_version() {
    let mut doc = minimal_ok();
    doc["swarm"]["drones"][1]["settings"]["trajectory"]["version"] = json!(2);
    let err = check(&doc).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
    assert_eq!(
        err.path().unwrap().to_string(),
        "$.swarm.drones[1].settings.trajectory.version"
    );
    assert!(err.to_string().contains("trajectory version"));
}

#[test]
fn rejects_trajectory_without_version() {
    let mut doc = minimal_ok();
    doc["swarm"]["drones"][0]["settings"]["trajectory"] = json!({ "points": [] });
    let err = check(&doc).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingField);
    assert!(err.to_string().contains("trajectory has no version"));
}

#[test]
fn rejects_scalar_environment() {
    let mut doc = minimal_ok();
    doc["environment"] = json!("outdoor");
    let err = check(&doc).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
    assert!(err.to_string().contains("invalid environment"));
}

#[test]
fn environment_type_must_be_known() {
    let mut doc = minimal_ok();
    doc["environment"] = json!({ "type": "indoor" });
    check(&doc).unwrap();

    doc["environment"] = json!({ "type": "underwater" });
    let err = check(&doc).unwrap_err();
    assert!(err.to_string().contains("invalid environment type"));
    assert_eq!(err.path().unwrap().to_string(), "$.environment.type");
}

#[test]
fn environment_without_type_is_accepted() {
    let mut doc = minimal_ok();
    doc["environment"] = json!({ "cameras": [] });
    check(&doc).unwrap();
}

#[test]
fn cameras_must_be_an_array() {
    let mut doc = minimal_ok();
    doc["environment"] = json!({ "type": "outdoor", "cameras": "foo" });
    let err = check(&doc).unwrap_err();
    assert!(err.to_string().contains("must be an array"));
}

#[test]
fn optional_drone_sections_are_version_checked() {
    let mut doc = minimal_ok();
    doc["swarm"]["drones"][0]["settings"]["lights"] = json!({ "version": 1, "data": "" });
    doc["swarm"]["drones"][0]["settings"]["yawControl"] = json!({ "version": 1 });
    check(&doc).unwrap();

    doc["swarm"]["drones"][0]["settings"]["lights"]["version"] = json!(9);
    let err = check(&doc).unwrap_err();
    assert!(err.to_string().contains("light program version"));
}

#[test]
fn media_must_be_an_object() {
    let mut doc = minimal_ok();
    doc["media"] = json!([]);
    let err = check(&doc).unwrap_err();
    assert_eq!(err.path().unwrap().to_string(), "$.media");
}

#[test]
fn validation_does_not_touch_the_document() {
    let doc = minimal_ok();
    let before = doc.clone();
    check(&doc).unwrap();
    assert_eq!(doc, before);
}

#[test]
fn non_object_root_reports_missing_version() {
    let err = check(&json!([1, 2, 3])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingField);
}

#[test]
fn trajectory_points_are_checked_with_their_path() {
    let mut doc = minimal_ok();
    doc["swarm"]["drones"][1]["settings"]["trajectory"]["points"] = json!("x");
    let err = check(&doc).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
    assert_eq!(
        err.path().unwrap().to_string(),
        "$.swarm.drones[1].settings.trajectory.points"
    );

    doc["swarm"]["drones"][1]["settings"]["trajectory"]["points"] =
        json!([[0.0, [0.0, 0.0, 0.0], []], [1.0, [0.0, 0.0]]]);
    let err = check(&doc).unwrap_err();
    assert_eq!(
        err.path().unwrap().to_string(),
        "$.swarm.drones[1].settings.trajectory.points[1]"
    );
}

#[test]
fn environment_rules_win_over_trajectory_points() {
    let mut doc = minimal_ok();
    doc["swarm"]["drones"][0]["settings"]["trajectory"]["points"] = json!(3);
    doc["environment"] = json!("outdoor");
    let err = check(&doc).unwrap_err();
    assert_eq!(err.path().unwrap().to_string(), "$.environment");
}
