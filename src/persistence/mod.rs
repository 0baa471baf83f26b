//! Saving and restoring chronicle state
//!
//! The chronicle is written as one JSON document under a storage key, the
//! way a browser app would use local storage. Restoring never fails: a
//! missing or damaged document, or any damaged field, falls back to defaults.

pub mod snapshot;
pub mod storage;
pub mod store;

pub use snapshot::{ChronicleSnapshot, SNAPSHOT_VERSION};
pub use storage::{FileStorage, MemoryStorage, StateStorage};
pub use store::{ChronicleStore, STORAGE_KEY};
