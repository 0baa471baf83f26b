//! Admiral ranks, one per level

use serde::{Deserialize, Serialize};

/// Display rank derived from level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdmiralRank {
    NullNavigator,
    SyntaxSailor,
    DataDeckhand,
    AlgorithmAdventurer,
    SystemSeafarer,
    QuantumQuartermaster,
    FleetForger,
    PatternPathfinder,
    DigitalDreadnought,
    /// Levels 9 and above
    ConsciousnessCommander,
}

impl AdmiralRank {
    /// Ordinal table indexed by level
    pub const TABLE: [AdmiralRank; 10] = [
        AdmiralRank::NullNavigator,
        AdmiralRank::SyntaxSailor,
        AdmiralRank::DataDeckhand,
        AdmiralRank::AlgorithmAdventurer,
        AdmiralRank::SystemSeafarer,
        AdmiralRank::QuantumQuartermaster,
        AdmiralRank::FleetForger,
        AdmiralRank::PatternPathfinder,
        AdmiralRank::DigitalDreadnought,
        AdmiralRank::ConsciousnessCommander,
    ];

    /// Rank for a level; levels past the table clamp to the last entry
    pub fn for_level(level: u32) -> Self {
        let index = (level as usize).min(Self::TABLE.len() - 1);
        Self::TABLE[index]
    }

    /// Stable kebab-case identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            AdmiralRank::NullNavigator => "null-navigator",
            AdmiralRank::SyntaxSailor => "syntax-sailor",
            AdmiralRank::DataDeckhand => "data-deckhand",
            AdmiralRank::AlgorithmAdventurer => "algorithm-adventurer",
            AdmiralRank::SystemSeafarer => "system-seafarer",
            AdmiralRank::QuantumQuartermaster => "quantum-quartermaster",
            AdmiralRank::FleetForger => "fleet-forger",
            AdmiralRank::PatternPathfinder => "pattern-pathfinder",
            AdmiralRank::DigitalDreadnought => "digital-dreadnought",
            AdmiralRank::ConsciousnessCommander => "consciousness-commander",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AdmiralRank::NullNavigator => "Null Navigator",
            AdmiralRank::SyntaxSailor => "Syntax Sailor",
            AdmiralRank::DataDeckhand => "Data Deckhand",
            AdmiralRank::AlgorithmAdventurer => "Algorithm Adventurer",
            AdmiralRank::SystemSeafarer => "System Seafarer",
            AdmiralRank::QuantumQuartermaster => "Quantum Quartermaster",
            AdmiralRank::FleetForger => "Fleet Forger",
            AdmiralRank::PatternPathfinder => "Pattern Pathfinder",
            AdmiralRank::DigitalDreadnought => "Digital Dreadnought",
            AdmiralRank::ConsciousnessCommander => "Consciousness Commander",
        }
    }
}

impl std::fmt::Display for AdmiralRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
