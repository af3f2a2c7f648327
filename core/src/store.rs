//! The canonical, persisted collection of dice groups.

use tracing::{debug, info, warn};

use dicebag_types::{
    Collection, DEFAULT_GROUP_NAME, Die, DieRoller, EditError, EditOp, Group, Sides, transitions,
};

use crate::errors::StoreError;
use crate::storage::KeyValueStore;

/// Key the whole collection is stored under.
pub const GROUPS_KEY: &str = "groups";

/// Owns the current [`Collection`] and writes it through to `S` after every edit.
///
/// Writes are best-effort: if the backend rejects a write the edit still
/// takes effect in memory, the failure is logged, and the error is parked
/// until [`GroupStore::take_save_error`] collects it.
#[derive(Debug)]
pub struct GroupStore<S> {
    collection: Collection,
    backend: S,
    placeholder: String,
    save_error: Option<StoreError>,
}

impl<S: KeyValueStore> GroupStore<S> {
    /// Hydrate from `backend`. An absent key yields an empty collection;
    /// a value that fails to decode is an error.
    pub fn load(backend: S) -> Result<Self, StoreError> {
        let collection: Collection = match backend.get(GROUPS_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Decode {
                key: GROUPS_KEY,
                source,
            })?,
            None => Collection::new(),
        };
        info!(groups = collection.len(), "Loaded dice groups");

        Ok(Self {
            collection,
            backend,
            placeholder: DEFAULT_GROUP_NAME.to_string(),
            save_error: None,
        })
    }

    /// Name given to groups created by [`GroupStore::add_group`].
    pub fn with_placeholder(mut self, name: impl Into<String>) -> Self {
        self.placeholder = name.into();
        self
    }

    #[must_use]
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    #[must_use]
    pub fn groups(&self) -> &[Group] {
        self.collection.groups()
    }

    #[must_use]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Serialize the whole collection and write it under [`GROUPS_KEY`].
    pub fn save(&mut self) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(&self.collection).map_err(StoreError::Encode)?;
        self.backend.set(GROUPS_KEY, &encoded)?;
        Ok(())
    }

    /// The most recent write-through failure, if any, clearing it.
    pub fn take_save_error(&mut self) -> Option<StoreError> {
        self.save_error.take()
    }

    /// Apply `op` and write through.
    pub fn apply(&mut self, op: EditOp) -> Result<(), EditError> {
        let kind = op.kind();
        let next = transitions::apply(&self.collection, op)?;
        self.commit(kind, next);
        Ok(())
    }

    pub fn add_group(&mut self) {
        let next = transitions::add_named_group(&self.collection, self.placeholder.as_str());
        self.commit("add_group", next);
    }

    pub fn rename_group(&mut self, group: usize, name: impl Into<String>) -> Result<(), EditError> {
        self.apply(EditOp::RenameGroup {
            group,
            name: name.into(),
        })
    }

    pub fn add_die(&mut self, group: usize, sides: Sides) -> Result<(), EditError> {
        self.apply(EditOp::AddDie { group, sides })
    }

    pub fn remove_die(&mut self, group: usize, die: usize) -> Result<(), EditError> {
        self.apply(EditOp::RemoveDie { group, die })
    }

    pub fn replace_dice(&mut self, group: usize, dice: Vec<Die>) -> Result<(), EditError> {
        self.apply(EditOp::ReplaceDice { group, dice })
    }

    /// Roll every die in `group` and install the results in one edit.
    pub fn roll_group(&mut self, group: usize, roller: impl DieRoller) -> Result<(), EditError> {
        let Some(target) = self.collection.get(group) else {
            return Err(EditError::GroupOutOfRange {
                index: group,
                len: self.collection.len(),
            });
        };
        let rolled = transitions::roll_group(target.dice(), roller);
        self.replace_dice(group, rolled)
    }

    fn commit(&mut self, kind: &'static str, next: Collection) {
        self.collection = next;
        debug!(op = kind, groups = self.collection.len(), "Applied edit");

        if let Err(err) = self.save() {
            warn!(op = kind, "Failed to persist groups: {err}");
            self.save_error = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StorageError;
    use crate::storage::{FileStore, MemoryStore};

    struct Scripted(Vec<u32>);

    impl DieRoller for Scripted {
        fn roll(&mut self, sides: Sides) -> u32 {
            let next = self.0.remove(0);
            assert!(next >= 1 && next <= sides.get(), "scripted roll out of range");
            next
        }
    }

    /// Backend whose writes always fail.
    #[derive(Default)]
    struct ReadOnly;

    impl KeyValueStore for ReadOnly {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }

    fn sides(n: u32) -> Sides {
        Sides::try_new(n).unwrap()
    }

    fn stored(store: &GroupStore<MemoryStore>) -> Collection {
        let raw = store.backend().get(GROUPS_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn load_without_saved_data_is_empty() {
        let store = GroupStore::load(MemoryStore::new()).unwrap();
        assert!(store.collection().is_empty());
    }

    #[test]
    fn end_to_end_scenario() {
        let mut store = GroupStore::load(MemoryStore::new()).unwrap();

        store.add_group();
        assert_eq!(store.groups().len(), 1);
        assert_eq!(store.groups()[0].name(), DEFAULT_GROUP_NAME);
        assert!(store.groups()[0].dice().is_empty());

        store.add_die(0, sides(6)).unwrap();
        let dice = store.groups()[0].dice();
        assert_eq!(dice.len(), 1);
        assert_eq!(dice[0].sides().get(), 6);
        assert_eq!(dice[0].last_roll(), None);

        store.add_die(0, sides(20)).unwrap();
        assert_eq!(store.groups()[0].dice().len(), 2);
        assert_eq!(store.groups()[0].total(), None);

        store.roll_group(0, Scripted(vec![4, 17])).unwrap();
        let dice = store.groups()[0].dice();
        assert_eq!(dice[0].last_roll(), Some(4));
        assert_eq!(dice[1].last_roll(), Some(17));
        assert_eq!(store.groups()[0].total(), Some(21));

        store.remove_die(0, 0).unwrap();
        let dice = store.groups()[0].dice();
        assert_eq!(dice.len(), 1);
        assert_eq!(dice[0].sides().get(), 20);
        assert_eq!(dice[0].last_roll(), Some(17));
    }

    #[test]
    fn every_edit_writes_through() {
        let mut store = GroupStore::load(MemoryStore::new()).unwrap();

        store.add_group();
        assert_eq!(&stored(&store), store.collection());

        store.rename_group(0, "Fate Dice").unwrap();
        assert_eq!(stored(&store).groups()[0].name(), "Fate Dice");

        store.add_die(0, sides(3)).unwrap();
        store.roll_group(0, Scripted(vec![2])).unwrap();
        assert_eq!(stored(&store).groups()[0].total(), Some(2));
    }

    #[test]
    fn failed_edit_changes_nothing() {
        let mut store = GroupStore::load(MemoryStore::new()).unwrap();
        store.add_group();
        let before = store.collection().clone();

        assert!(store.add_die(3, sides(6)).is_err());
        assert!(store.remove_die(0, 0).is_err());
        assert!(store.roll_group(7, Scripted(Vec::new())).is_err());
        assert_eq!(store.collection(), &before);
    }

    #[test]
    fn placeholder_is_configurable() {
        let mut store = GroupStore::load(MemoryStore::new())
            .unwrap()
            .with_placeholder("New group");
        store.add_group();
        assert_eq!(store.groups()[0].name(), "New group");
    }

    #[test]
    fn round_trips_through_file_store() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = GroupStore::load(FileStore::new(dir.path())).unwrap();
        store.add_group();
        store.rename_group(0, "Attack").unwrap();
        store.add_die(0, sides(20)).unwrap();
        store.add_die(0, sides(4)).unwrap();
        store.roll_group(0, Scripted(vec![11, 3])).unwrap();
        store.add_group();
        store.add_die(1, sides(8)).unwrap();
        let saved = store.collection().clone();
        drop(store);

        let reloaded = GroupStore::load(FileStore::new(dir.path())).unwrap();
        assert_eq!(reloaded.collection(), &saved);
    }

    #[test]
    fn malformed_data_fails_to_load() {
        let mut backend = MemoryStore::new();
        backend.set(GROUPS_KEY, "{not json").unwrap();

        let err = GroupStore::load(backend).unwrap_err();
        assert!(matches!(err, StoreError::Decode { key: "groups", .. }));
    }

    #[test]
    fn legacy_records_load_unrolled() {
        let mut backend = MemoryStore::new();
        backend
            .set(
                GROUPS_KEY,
                r#"[{"name":"Unnamed. Click to name","dice":[{"type":6},{"type":10}]}]"#,
            )
            .unwrap();

        let mut store = GroupStore::load(backend).unwrap();
        assert_eq!(store.groups()[0].dice().len(), 2);
        assert_eq!(store.groups()[0].total(), None);

        store.roll_group(0, Scripted(vec![1, 10])).unwrap();
        let raw = store.backend().get(GROUPS_KEY).unwrap().unwrap();
        assert!(raw.contains(r#""sidesCount":10"#));
        assert!(!raw.contains(r#""type""#));
    }

    #[test]
    fn write_failures_are_parked_not_fatal() {
        let mut store = GroupStore::load(ReadOnly).unwrap();
        store.add_group();

        assert_eq!(store.groups().len(), 1);
        assert!(matches!(
            store.take_save_error(),
            Some(StoreError::Storage(StorageError::InvalidKey(_)))
        ));
        assert!(store.take_save_error().is_none());
    }
}
