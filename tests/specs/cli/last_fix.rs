//! Fallback slot recovery specs
//!
//! `lt last-fix` reads the slot from disk; no daemon is involved.

use crate::prelude::*;

const SLOT: &str = r#"{
  "last_location_time": 1767225600000,
  "last_location_lat": 59.3293,
  "last_location_lng": 18.0686,
  "last_location_acc": 12.5,
  "last_location_source": "alarm_last_known",
  "recorded_at": 1767225601000
}"#;

#[test]
fn empty_slot_reports_nothing_recorded() {
    let temp = Project::empty();

    temp.lt()
        .args(&["last-fix"])
        .passes()
        .stdout_has("No fallback fix recorded");
}

#[test]
fn empty_slot_as_json_is_null() {
    let temp = Project::empty();

    temp.lt()
        .args(&["last-fix", "-o", "json"])
        .passes()
        .stdout_has("null");
}

#[test]
fn stored_fix_is_printed() {
    let temp = Project::empty();
    temp.file("location_cache.json", SLOT);

    temp.lt()
        .args(&["last-fix"])
        .passes()
        .stdout_has("Latitude: 59.329300")
        .stdout_has("Longitude: 18.068600")
        .stdout_has("Accuracy: 12.5 m")
        .stdout_has("Source: alarm_last_known")
        .stdout_has("Recorded: 2026-01-01T00:00:01Z");
}

#[test]
fn stored_fix_as_json() {
    let temp = Project::empty();
    temp.file("location_cache.json", SLOT);

    let run = temp.lt().args(&["last-fix", "--output", "json"]).passes();
    let json: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();

    assert_eq!(json["latitude"], 59.3293);
    assert_eq!(json["timestamp"], 1_767_225_600_000_i64);
    assert_eq!(json["source"], "alarm_last_known");
}

#[test]
fn corrupt_slot_is_an_error() {
    let temp = Project::empty();
    temp.file("location_cache.json", "{not json");

    temp.lt()
        .args(&["last-fix"])
        .fails()
        .stderr_has("location_cache.json");
}
