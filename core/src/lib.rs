//! Core domain logic for dicebag.
//!
//! [`GroupStore`] owns the canonical collection of dice groups. Each edit
//! runs a pure transition from `dicebag-types` and writes the full
//! collection through to a [`KeyValueStore`].

pub mod errors;
mod roller;
pub mod storage;
mod store;

pub use errors::{StorageError, StoreError};
pub use roller::RandomRoller;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{GROUPS_KEY, GroupStore};
