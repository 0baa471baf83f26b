//! Content phases and the grow-only unlock set

use crate::core::error::ChronicleError;
use crate::progression::level::MAX_LEVEL;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Gated content sections, in curriculum order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModulePhase {
    /// Learning phase, open from the start
    Academy,
    /// Coding levels
    Helm,
    /// Fleet management
    Command,
    /// Endgame
    Loom,
}

impl ModulePhase {
    pub const ALL: [ModulePhase; 4] = [
        ModulePhase::Academy,
        ModulePhase::Helm,
        ModulePhase::Command,
        ModulePhase::Loom,
    ];

    /// Level at which the phase opens on its own
    ///
    /// The loom opens at the top tier (levels 9-10 share a rank), which is
    /// the highest level the thresholds can produce.
    pub fn auto_unlock_level(&self) -> u32 {
        match self {
            ModulePhase::Academy => 0,
            ModulePhase::Helm => 1,
            ModulePhase::Command => 5,
            ModulePhase::Loom => MAX_LEVEL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModulePhase::Academy => "academy",
            ModulePhase::Helm => "helm",
            ModulePhase::Command => "command",
            ModulePhase::Loom => "loom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s.trim())
    }
}

impl FromStr for ModulePhase {
    type Err = ChronicleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ChronicleError::UnknownPhase(s.to_string()))
    }
}

impl std::fmt::Display for ModulePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of unlocked phases
///
/// Always contains the academy. There is no removal operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseUnlockSet {
    phases: BTreeSet<ModulePhase>,
}

impl PhaseUnlockSet {
    pub fn new() -> Self {
        let mut phases = BTreeSet::new();
        phases.insert(ModulePhase::Academy);
        Self { phases }
    }

    /// Build from any collection of phases; the academy is added back in
    pub fn from_phases<I>(phases: I) -> Self
    where
        I: IntoIterator<Item = ModulePhase>,
    {
        let mut set = Self::new();
        set.phases.extend(phases);
        set
    }

    pub fn contains(&self, phase: ModulePhase) -> bool {
        self.phases.contains(&phase)
    }

    /// Add a phase; returns true if it was not already unlocked
    pub fn insert(&mut self, phase: ModulePhase) -> bool {
        self.phases.insert(phase)
    }

    /// Add every phase whose auto-unlock level is reached
    ///
    /// Returns the phases that were newly added, in order.
    pub fn unlock_for_level(&mut self, level: u32) -> Vec<ModulePhase> {
        ModulePhase::ALL
            .into_iter()
            .filter(|phase| level >= phase.auto_unlock_level())
            .filter(|phase| self.phases.insert(*phase))
            .collect()
    }

    /// Phases in curriculum order
    pub fn iter(&self) -> impl Iterator<Item = ModulePhase> + '_ {
        self.phases.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}

impl Default for PhaseUnlockSet {
    fn default() -> Self {
        Self::new()
    }
}
