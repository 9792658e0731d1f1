// Integration tests for spatial document decoding and boundary queries.

use std::fs;

use glam::Vec3;
use tempfile::TempDir;
use varonia_backoffice::spatial::{self, transform, DecodeWarning, LoadError, Rotator};

const SCENARIO: &str = r#"{"ID":"A","Name":"Room","SyncPos":{"x":1,"y":2,"z":3},
    "Boundaries":[{"ID":"Main","MainBoundary":true,"Points":[{"x":0,"y":0,"z":1}]}]}"#;

fn write(dir: &TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn end_to_end_scenario() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "NewSpatial.json", SCENARIO);

    let decoded = spatial::load(&path).unwrap();
    let config = &decoded.config;
    assert_eq!(config.id, "A");
    assert_eq!(config.name, "Room");
    assert_eq!(config.sync_position, Vec3::new(300.0, 100.0, 200.0));
    assert_eq!(config.sync_rotation, Rotator::IDENTITY);
    assert_eq!(config.boundaries.len(), 1);
    assert_eq!(config.boundaries[0].points, vec![Vec3::new(100.0, 0.0, 0.0)]);
    assert_eq!(
        config.main_boundary().map(|b| b.id.as_str()),
        Some("Main")
    );
    assert!(config.sub_boundaries().is_empty());
}

#[test]
fn position_is_exact_permutation_times_hundred() {
    let samples = [
        (0.0, 0.0, 0.0),
        (1.5, -2.25, 3.75),
        (-7.5, 5.5, 0.125),
        (1234.5, -0.001, 42.0),
    ];
    for (x, y, z) in samples {
        let p = transform::position(x, y, z);
        assert_eq!(p, Vec3::new(z * 100.0, x * 100.0, y * 100.0));
    }
}

#[test]
fn identity_quaternion_stays_identity() {
    assert_eq!(transform::orientation(0.0, 0.0, 0.0, 1.0), Rotator::IDENTITY);
}

#[test]
fn queries_follow_array_order() {
    let decoded = spatial::decode_str(
        r#"{"Boundaries": [
            {"ID": "Door", "MainBoundary": false},
            {"ID": "Play", "MainBoundary": true},
            {"ID": "Pillar", "MainBoundary": false},
            {"ID": "Backup", "MainBoundary": true},
            {"ID": "Desk", "MainBoundary": false}
        ]}"#,
    )
    .unwrap();
    let config = decoded.config;
    assert_eq!(config.main_boundary().unwrap().id, "Play");
    let subs: Vec<_> = config.sub_boundaries().into_iter().map(|b| b.id).collect();
    assert_eq!(subs, ["Door", "Pillar", "Desk"]);
}

#[test]
fn missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = spatial::load(dir.path().join("absent.json")).unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn directory_path_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let err = spatial::load(dir.path()).unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }), "{err}");
}

#[test]
fn malformed_json_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.json", "{\"ID\": \"A\",");
    match spatial::load(&path) {
        Err(LoadError::ParseFailed { path: Some(p), .. }) => assert_eq!(p, path),
        other => panic!("expected parse failure, got {other:?}"),
    }
}

#[test]
fn partial_document_decodes_with_defaults() {
    let decoded = spatial::decode_str(r#"{"Name": "Partial"}"#).unwrap();
    assert_eq!(decoded.config.name, "Partial");
    assert_eq!(decoded.config.sync_position, Vec3::ZERO);
    assert!(decoded.config.boundaries.is_empty());
    assert!(decoded.warnings.is_empty());
}

#[test]
fn non_object_boundary_between_valid_ones_is_skipped() {
    let decoded = spatial::decode_str(
        r#"{"Boundaries": [{"ID": "First"}, "junk", {"ID": "Second"}]}"#,
    )
    .unwrap();
    let ids: Vec<_> = decoded
        .config
        .boundaries
        .iter()
        .map(|b| b.id.as_str())
        .collect();
    assert_eq!(ids, ["First", "Second"]);
    assert!(decoded
        .warnings
        .contains(&DecodeWarning::SkippedBoundary { index: 1 }));
}

#[test]
fn realistic_room_document() {
    let decoded = spatial::decode_str(
        r#"{
        "ID": "17", "Name": "Hostel", "AreaValue": "41.25 sqm {7.5x5.5}", "MaxRect": "7.5x5.5",
        "GroupName": "Hostel", "MaxPlayer": 4, "Multiplier": 0.5, "OrthoKey": "Hostel-BedRooms-Small_6",
        "SyncPos": {"x": 0.5, "y": 0, "z": -1.25},
        "SyncQuaterion": {"x": 0, "y": 0, "z": 0, "w": 1},
        "Boundaries": [
            {"ID": "BoundaryMain", "DisplayDistance": 1.5, "MainBoundary": true, "Visible": true,
             "BoundaryColor": {"x": 0, "y": 1, "z": 0},
             "Points": [{"x": 0, "y": 0, "z": 0}, {"x": 7.5, "y": 0, "z": 0},
                        {"x": 7.5, "y": 0, "z": 5.5}, {"x": 0, "y": 0, "z": 5.5}]},
            {"ID": "Boundary0", "Reverse": true, "MainBoundary": false,
             "Points": [{"x": 1, "y": 0, "z": 1}, {"x": 2, "y": 0, "z": 1}, {"x": 2, "y": 0, "z": 2}]}
        ]}"#,
    )
    .unwrap();
    assert!(decoded.warnings.is_empty(), "{:?}", decoded.warnings);

    let config = decoded.config;
    assert_eq!(config.max_player, 4);
    assert_eq!(config.sync_position, Vec3::new(-125.0, 50.0, 0.0));

    let main = config.main_boundary().unwrap();
    assert_eq!(main.points[2], Vec3::new(550.0, 750.0, 0.0));
    assert_eq!(main.perimeter(), 2600.0);
    assert_eq!(main.color.g, 1.0);
    assert_eq!(main.color.a, 1.0);

    let subs = config.sub_boundaries();
    assert_eq!(subs.len(), 1);
    assert!(subs[0].reverse);
    assert!(subs[0].is_polygon());
}
