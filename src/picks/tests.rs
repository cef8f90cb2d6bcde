use super::*;
use crate::phases::PhaseRegistry;
use crate::signal::synthetic::demo_start;
use chrono::Duration;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use tempfile::tempdir;

fn phases() -> PhaseRegistry {
    PhaseRegistry::from_strings(&["P", "S"], &["#7F0DFF", "#FF00FF"]).unwrap()
}

fn at(millis: i64) -> chrono::NaiveDateTime {
    demo_start() + Duration::milliseconds(millis)
}

fn distances(store: &PickStore) -> Vec<f64> {
    store.iter().map(|p| p.distance).collect()
}

fn triples(store: &PickStore) -> Vec<(chrono::NaiveDateTime, u64, String)> {
    let mut triples: Vec<_> = store
        .iter()
        .map(|p| (p.time, p.distance.to_bits(), p.phase.clone()))
        .collect();
    triples.sort();
    triples
}

#[test]
fn test_add_appends_active_picks() {
    let mut store = PickStore::new();
    assert_eq!(store.add(at(0), 100.0, "P").unwrap(), 0);
    assert_eq!(store.add(at(0), 100.0, "P").unwrap(), 1);

    assert_eq!(store.len(), 2);
    assert!(store.iter().all(|p| p.status == PickStatus::Active));
    assert_eq!(store.get(0), store.get(1));
}

#[test]
fn test_add_rejects_non_finite_distance() {
    let mut store = PickStore::new();
    store.add(at(0), 1.0, "P").unwrap();
    let generation = store.generation();

    for distance in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(matches!(
            store.add(at(0), distance, "P"),
            Err(PersistenceError::NonFiniteDistance(_))
        ));
    }
    assert_eq!(store.len(), 1);
    assert_eq!(store.generation(), generation);
}

#[test]
fn test_delete_where_uses_current_positions() {
    let mut store = PickStore::new();
    for d in [10.0, 20.0, 30.0, 40.0] {
        store.add(at(0), d, "P").unwrap();
    }
    let removed = store.delete_where(&BTreeSet::from([1, 3, 99]));

    assert_eq!(removed, 2);
    assert_eq!(distances(&store), vec![10.0, 30.0]);
    assert_eq!(store.delete_where(&BTreeSet::new()), 0);
}

#[test]
fn test_captured_selection_goes_stale() {
    let mut store = PickStore::new();
    store.add(at(0), 10.0, "P").unwrap();
    store.add(at(10), 20.0, "S").unwrap();

    let selection = store.capture_selection([0]);
    store.add(at(20), 30.0, "P").unwrap();
    let err = store.delete_selection(&selection).unwrap_err();
    assert!(matches!(err, PersistenceError::StaleSelection { .. }));
    assert_eq!(store.len(), 3);

    let selection = store.capture_selection([0, 2]);
    assert_eq!(store.delete_selection(&selection).unwrap(), 2);
    assert_eq!(distances(&store), vec![20.0]);
}

#[test]
fn test_reset_clears_everything() {
    let mut store = PickStore::new();
    store.add(at(0), 10.0, "P").unwrap();
    let generation = store.generation();
    store.reset();
    assert!(store.is_empty());
    assert!(store.generation() > generation);
}

#[test]
fn test_commit_stroke_replaces_overlapped_picks() {
    let mut store = PickStore::new();
    for (d, phase) in [(100.0, "P"), (200.0, "P"), (500.0, "P"), (150.0, "S")] {
        store.add(at(0), d, phase).unwrap();
    }
    store.commit_stroke("P");
    assert!(store.iter().all(|p| p.status == PickStatus::Inactive));

    store.add(at(5), 120.0, "P").unwrap();
    store.add(at(6), 250.0, "P").unwrap();
    let removed = store.commit_stroke("P");

    assert_eq!(removed, 1);
    assert_eq!(distances(&store), vec![100.0, 500.0, 150.0, 120.0, 250.0]);
    assert!(store.iter().all(|p| p.status == PickStatus::Inactive));
}

#[test]
fn test_commit_stroke_without_active_picks_removes_nothing() {
    let mut store = PickStore::new();
    store.add(at(0), 100.0, "P").unwrap();
    store.commit_stroke("P");
    assert_eq!(store.commit_stroke("P"), 0);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_save_load_round_trip() -> Result<(), PersistenceError> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("picks.csv");

    let mut store = PickStore::new();
    store.add(at(1_500), 20_250.5, "S").unwrap();
    store
        .add(at(0) + Duration::nanoseconds(123_456_789), 1.0 / 3.0, "P")
        .unwrap();
    store.add(at(-20), 70_000.0, "P").unwrap();
    store.save(&path)?;

    let mut loaded = PickStore::new();
    assert_eq!(loaded.load(&path, &phases())?, 3);

    assert_eq!(triples(&loaded), triples(&store));
    assert!(loaded.iter().all(|p| p.status == PickStatus::Inactive));
    // File order is by time
    let times: Vec<_> = loaded.iter().map(|p| p.time).collect();
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
    Ok(())
}

#[test]
fn test_saved_file_layout() -> Result<(), PersistenceError> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("picks.csv");

    let mut store = PickStore::new();
    store.add(at(1_000), 300.0, "S").unwrap();
    store.add(at(0), 200.0, "P").unwrap();
    store.save(&path)?;

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "time,distance,phase",
            "2021-11-13T01:41:00,200.0,P",
            "2021-11-13T01:41:01,300.0,S",
        ]
    );
    Ok(())
}

#[test]
fn test_empty_store_saves_header_only() -> Result<(), PersistenceError> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    PickStore::new().save(&path)?;

    assert_eq!(fs::read_to_string(&path).unwrap().trim(), "time,distance,phase");
    let mut store = PickStore::new();
    store.add(at(0), 1.0, "P").unwrap();
    assert_eq!(store.load(&path, &phases())?, 0);
    assert!(store.is_empty());
    Ok(())
}

#[test]
fn test_load_accepts_other_time_notations() -> Result<(), PersistenceError> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mixed.csv");
    fs::write(
        &path,
        "time,distance,phase,status\n\
         2021-11-13 01:41:00.500000,10.0,P,active\n\
         1636767660250,20.0,S,inactive\n",
    )
    .unwrap();

    let mut store = PickStore::new();
    store.load(&path, &phases())?;
    assert_eq!(store.get(0).map(|p| p.time), Some(at(500)));
    assert_eq!(store.get(1).map(|p| p.time), Some(at(250)));
    assert!(store.iter().all(|p| p.status == PickStatus::Inactive));
    Ok(())
}

#[test]
fn test_malformed_rows_fail_the_whole_load() {
    let dir = tempdir().unwrap();
    let cases = [
        (
            "time,distance,phase\n2021-11-13T01:41:00,1.0,P\n2021-11-13T01:41:01,far,P\n",
            "distance",
        ),
        ("time,distance,phase\nyesterday,1.0,P\n", "time"),
        ("time,distance,phase\n2021-11-13T01:41:00,1.0,X\n", "phase"),
        ("time,phase\n2021-11-13T01:41:00,P\n", "column"),
    ];

    for (contents, kind) in cases {
        let path = dir.path().join("bad.csv");
        fs::write(&path, contents).unwrap();

        let mut store = PickStore::new();
        store.add(at(0), 42.0, "S").unwrap();
        let before = store.clone();
        let err = store.load(&path, &phases()).unwrap_err();

        match (kind, &err) {
            ("distance", PersistenceError::InvalidDistance { line, text }) => {
                assert_eq!(*line, 3);
                assert_eq!(text, "far");
            }
            ("time", PersistenceError::InvalidTime { line, .. }) => assert_eq!(*line, 2),
            ("phase", PersistenceError::UnknownPhase { label, .. }) => assert_eq!(label, "X"),
            ("column", PersistenceError::MissingColumn(name)) => assert_eq!(*name, "distance"),
            _ => panic!("unexpected error for {}: {}", kind, err),
        }
        assert_eq!(store, before);
    }
}

#[test]
fn test_missing_file_leaves_store_unchanged() {
    let dir = tempdir().unwrap();
    let mut store = PickStore::new();
    store.add(at(0), 1.0, "P").unwrap();

    let err = store.load(dir.path().join("absent.csv"), &phases()).unwrap_err();
    assert!(matches!(err, PersistenceError::Io { .. }));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_failed_save_leaves_target_alone() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing_dir").join("picks.csv");
    let mut store = PickStore::new();
    store.add(at(0), 1.0, "P").unwrap();

    assert!(matches!(store.save(&path), Err(PersistenceError::Io { .. })));
    assert!(!path.exists());
}

#[test]
fn test_save_replaces_existing_file() -> Result<(), PersistenceError> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("picks.csv");
    fs::write(&path, "old contents that are much longer than the new ones\n").unwrap();

    let mut store = PickStore::new();
    store.add(at(0), 5.0, "P").unwrap();
    store.save(&path)?;

    let mut loaded = PickStore::new();
    assert_eq!(loaded.load(&path, &phases())?, 1);
    // No stray temporary file is left next to the target
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    Ok(())
}

proptest! {
    #[test]
    fn prop_delete_where_keeps_unselected_in_order(
        len in 0usize..40,
        selected in proptest::collection::btree_set(0usize..50, 0..20),
    ) {
        let mut store = PickStore::new();
        for i in 0..len {
            store.add(at(i as i64), i as f64, "P").unwrap();
        }
        let removed = store.delete_where(&selected);

        let expected: Vec<f64> = (0..len)
            .filter(|i| !selected.contains(i))
            .map(|i| i as f64)
            .collect();
        prop_assert_eq!(distances(&store), expected);
        prop_assert_eq!(removed, selected.iter().filter(|i| **i < len).count());
    }
}
