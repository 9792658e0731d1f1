// Integration tests for the snapshot store and its load-status transitions.

use std::fs;
use std::sync::Arc;
use std::thread;

use tempfile::TempDir;
use varonia_backoffice::paths::FixedDirectory;
use varonia_backoffice::store::{LoadStatus, SpatialStore};

fn room(name: &str, main: &str) -> String {
    format!(
        r#"{{"Name": "{name}", "Boundaries": [
            {{"ID": "{main}", "MainBoundary": true,
              "Points": [{{"x": 0, "y": 0, "z": 0}}, {{"x": 1, "y": 0, "z": 0}}, {{"x": 1, "y": 0, "z": 1}}]}},
            {{"ID": "Door", "MainBoundary": false}}
        ]}}"#
    )
}

#[test]
fn starts_unloaded() {
    let store = SpatialStore::new();
    assert_eq!(store.status(), LoadStatus::Unloaded);
    assert!(store.snapshot().is_none());
    assert!(store.main_boundary().is_none());
    assert!(store.sub_boundaries().is_empty());
}

#[test]
fn missing_file_keeps_store_unloaded() {
    let dir = TempDir::new().unwrap();
    let store = SpatialStore::new();
    let err = store.reload(dir.path().join("NewSpatial.json")).unwrap_err();
    assert!(err.is_not_found());
    assert!(!store.is_loaded());
}

#[test]
fn success_then_failure_keeps_previous_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("NewSpatial.json");
    let store = SpatialStore::new();

    fs::write(&path, room("First", "Main")).unwrap();
    let first = store.reload(&path).unwrap();
    assert_eq!(store.status(), LoadStatus::Loaded);

    fs::write(&path, "{ not json").unwrap();
    assert!(store.reload(&path).unwrap_err().is_parse_failure());
    assert_eq!(store.status(), LoadStatus::Loaded);
    assert!(Arc::ptr_eq(&store.snapshot().unwrap(), &first));

    fs::remove_file(&path).unwrap();
    assert!(store.reload(&path).unwrap_err().is_not_found());
    assert_eq!(store.snapshot().unwrap().name, "First");
}

#[test]
fn reload_replaces_snapshot_without_touching_readers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("NewSpatial.json");
    let store = SpatialStore::new();

    fs::write(&path, room("First", "MainA")).unwrap();
    store.reload(&path).unwrap();
    let held = store.snapshot().unwrap();

    fs::write(&path, room("Second", "MainB")).unwrap();
    store.reload(&path).unwrap();

    assert_eq!(held.name, "First");
    assert_eq!(store.snapshot().unwrap().name, "Second");
    assert_eq!(store.main_boundary().unwrap().id, "MainB");
    assert_eq!(store.sub_boundaries()[0].id, "Door");
}

#[test]
fn warnings_follow_the_current_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("NewSpatial.json");
    let store = SpatialStore::new();

    fs::write(&path, room("Room", "Main")).unwrap();
    store.reload(&path).unwrap();
    // "Door" has no points
    assert_eq!(store.warnings().len(), 1);

    fs::write(&path, r#"{"Name": "Clean"}"#).unwrap();
    store.reload(&path).unwrap();
    assert!(store.warnings().is_empty());
}

#[test]
fn reload_from_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("NewSpatial.json"), room("Dir", "Main")).unwrap();
    let store = SpatialStore::new();
    let config = store.reload_from(&FixedDirectory::new(dir.path())).unwrap();
    assert_eq!(config.name, "Dir");
}

#[test]
fn concurrent_reloads_and_reads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("NewSpatial.json");
    fs::write(&path, room("Shared", "Main")).unwrap();

    let store = Arc::new(SpatialStore::new());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let path = path.clone();
            thread::spawn(move || {
                for _ in 0..10 {
                    store.reload(&path).unwrap();
                    let snapshot = store.snapshot().unwrap();
                    assert_eq!(snapshot.boundaries.len(), 2);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert!(store.is_loaded());
}
