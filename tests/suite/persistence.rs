//! Persisted format and load behavior.

use dicebag_core::{GroupStore, StoreError};
use dicebag_types::Die;
use serde_json::json;

use crate::common::{ScriptedRoller, open_store, persisted_json, seed_groups_file, sides};

#[test]
fn reopening_restores_the_collection() {
    let dir = tempfile::tempdir().unwrap();
    let saved = {
        let mut store = open_store(dir.path());
        store.add_group();
        store.rename_group(0, "Attack").unwrap();
        store.add_die(0, sides(20)).unwrap();
        store.add_die(0, sides(8)).unwrap();
        store.roll_group(0, ScriptedRoller(vec![14, 2])).unwrap();
        store.add_group();
        store.rename_group(1, "").unwrap();
        store.add_die(1, sides(100)).unwrap();
        store.collection().clone()
    };

    let reopened = open_store(dir.path());
    assert_eq!(reopened.collection(), &saved);
}

#[test]
fn writes_the_documented_shape() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(dir.path());
    store.add_group();
    store.rename_group(0, "Saves").unwrap();
    store.add_die(0, sides(20)).unwrap();
    store.add_die(0, sides(6)).unwrap();
    store
        .replace_dice(0, vec![store.groups()[0].dice()[0], Die::new(sides(6))])
        .unwrap();
    store.roll_group(0, ScriptedRoller(vec![9, 6])).unwrap();
    store.remove_die(0, 1).unwrap();

    assert_eq!(
        persisted_json(dir.path()),
        json!([{ "name": "Saves", "dice": [{ "sidesCount": 20, "lastRoll": 9 }] }])
    );
}

#[test]
fn unrolled_dice_omit_last_roll() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(dir.path());
    store.add_group();
    store.add_die(0, sides(12)).unwrap();

    assert_eq!(
        persisted_json(dir.path()),
        json!([{ "name": "Unnamed group", "dice": [{ "sidesCount": 12 }] }])
    );
}

#[test]
fn legacy_groups_file_loads_and_upgrades() {
    let dir = tempfile::tempdir().unwrap();
    seed_groups_file(
        dir.path(),
        r#"[{"name":"Unnamed. Click to name","dice":[{"type":6},{"type":20}]},{"name":"","dice":[]}]"#,
    );

    let mut store = open_store(dir.path());
    assert_eq!(store.groups().len(), 2);
    assert_eq!(store.groups()[0].dice().len(), 2);
    assert_eq!(store.groups()[0].total(), None);
    assert_eq!(store.groups()[1].name(), "");

    store.roll_group(0, ScriptedRoller(vec![2, 19])).unwrap();
    assert_eq!(
        persisted_json(dir.path())[0]["dice"],
        json!([{ "sidesCount": 6, "lastRoll": 2 }, { "sidesCount": 20, "lastRoll": 19 }])
    );
}

#[test]
fn malformed_groups_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    seed_groups_file(dir.path(), "this is not json");

    let err = GroupStore::load(dicebag_core::FileStore::new(dir.path())).unwrap_err();
    assert!(matches!(err, StoreError::Decode { .. }));
}

#[test]
fn empty_directory_means_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir.path().join("never-created"));
    assert!(store.collection().is_empty());
}
