//! Core type definitions used throughout the codebase

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wall-clock instant used for acquisitions, unlocks and signups
pub type Timestamp = DateTime<Utc>;

/// Unique identifier for ships
///
/// Serialized as the bare UUID string so stored fleets stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipId(pub Uuid);

impl ShipId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an id from its string form (as stored or typed at the console)
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s.trim()).ok().map(ShipId)
    }
}

impl Default for ShipId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ShipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
