//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use dicebag_core::{FileStore, GROUPS_KEY, GroupStore};
use dicebag_types::{DieRoller, Sides};

/// Replays scripted results in order.
pub struct ScriptedRoller(pub Vec<u32>);

impl DieRoller for ScriptedRoller {
    fn roll(&mut self, sides: Sides) -> u32 {
        let value = self.0.remove(0);
        assert!(
            (1..=sides.get()).contains(&value),
            "scripted roll {value} does not fit {sides}"
        );
        value
    }
}

pub fn sides(n: u32) -> Sides {
    Sides::try_new(n).expect("test side counts are positive")
}

pub fn open_store(dir: &Path) -> GroupStore<FileStore> {
    GroupStore::load(FileStore::new(dir)).expect("store should load")
}

/// Raw JSON currently persisted under the groups key.
pub fn persisted_json(dir: &Path) -> serde_json::Value {
    let raw = fs::read_to_string(dir.join(format!("{GROUPS_KEY}.json"))).expect("groups file");
    serde_json::from_str(&raw).expect("groups file is JSON")
}

/// Seed the groups file directly, bypassing the store.
pub fn seed_groups_file(dir: &Path, contents: &str) {
    fs::create_dir_all(dir).expect("create data dir");
    fs::write(dir.join(format!("{GROUPS_KEY}.json")), contents).expect("seed groups file");
}
