//! Loading and saving the chronicle through a storage backend

use crate::chronicle::Chronicle;
use crate::core::error::Result;
use crate::persistence::snapshot::{ChronicleSnapshot, SNAPSHOT_VERSION};
use crate::persistence::storage::StateStorage;
use serde_json::{json, Value};

/// Key the chronicle document is stored under
pub const STORAGE_KEY: &str = "admirals-chronicle-storage";

pub struct ChronicleStore<S: StateStorage> {
    storage: S,
    key: String,
}

impl<S: StateStorage> ChronicleStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the stored chronicle, or a fresh one
    ///
    /// Never fails: read errors, unparseable documents and malformed fields
    /// are logged and replaced by defaults. Both the `{state, version}`
    /// envelope and a bare state object are accepted.
    pub fn load(&self) -> Chronicle {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::info!(key = %self.key, "no stored chronicle; starting fresh");
                return Chronicle::new();
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read stored chronicle");
                return Chronicle::new();
            }
        };

        let document: Value = match serde_json::from_str(&raw) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "stored chronicle is not JSON; starting fresh");
                return Chronicle::new();
            }
        };

        let state = match document.get("state") {
            Some(state) => {
                let version = document.get("version").and_then(Value::as_u64);
                if version != Some(SNAPSHOT_VERSION as u64) {
                    tracing::warn!(?version, "unexpected stored chronicle version; reading anyway");
                }
                state
            }
            None => &document,
        };

        let chronicle = Chronicle::restore(ChronicleSnapshot::from_value_lenient(state));
        tracing::info!(
            key = %self.key,
            experience = chronicle.experience(),
            ships = chronicle.fleet_size(),
            "loaded stored chronicle"
        );
        chronicle
    }

    /// Write the chronicle inside a `{state, version}` envelope
    pub fn save(&mut self, chronicle: &Chronicle) -> Result<()> {
        let document = json!({
            "state": chronicle.snapshot(),
            "version": SNAPSHOT_VERSION,
        });
        let raw = serde_json::to_string(&document)?;
        self.storage.set_item(&self.key, &raw)?;
        tracing::debug!(key = %self.key, bytes = raw.len(), "saved chronicle");
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.storage.remove_item(&self.key)
    }
}
