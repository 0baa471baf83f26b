//! Ship classes and individual ships

use crate::core::error::ChronicleError;
use crate::core::types::{ShipId, Timestamp};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Ship tiers from lowest to highest prestige
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShipClass {
    Dinghy,
    Raft,
    Canoe,
    Sloop,
    Schooner,
    Brigantine,
    Frigate,
    Destroyer,
    Cruiser,
    Battleship,
    ConsciousnessCarrier,
}

impl ShipClass {
    pub const ALL: [ShipClass; 11] = [
        ShipClass::Dinghy,
        ShipClass::Raft,
        ShipClass::Canoe,
        ShipClass::Sloop,
        ShipClass::Schooner,
        ShipClass::Brigantine,
        ShipClass::Frigate,
        ShipClass::Destroyer,
        ShipClass::Cruiser,
        ShipClass::Battleship,
        ShipClass::ConsciousnessCarrier,
    ];

    /// Helm level at which this class joins the progression path
    pub fn required_level(&self) -> u32 {
        *self as u32
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipClass::Dinghy => "dinghy",
            ShipClass::Raft => "raft",
            ShipClass::Canoe => "canoe",
            ShipClass::Sloop => "sloop",
            ShipClass::Schooner => "schooner",
            ShipClass::Brigantine => "brigantine",
            ShipClass::Frigate => "frigate",
            ShipClass::Destroyer => "destroyer",
            ShipClass::Cruiser => "cruiser",
            ShipClass::Battleship => "battleship",
            ShipClass::ConsciousnessCarrier => "consciousness-carrier",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ShipClass::Dinghy => "Dinghy",
            ShipClass::Raft => "Raft",
            ShipClass::Canoe => "Canoe",
            ShipClass::Sloop => "Sloop",
            ShipClass::Schooner => "Schooner",
            ShipClass::Brigantine => "Brigantine",
            ShipClass::Frigate => "Frigate",
            ShipClass::Destroyer => "Destroyer",
            ShipClass::Cruiser => "Cruiser",
            ShipClass::Battleship => "Battleship",
            ShipClass::ConsciousnessCarrier => "Consciousness Carrier",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// Classes on the progression path at or below `level`
    pub fn available_at(level: u32) -> impl Iterator<Item = ShipClass> {
        Self::ALL.into_iter().filter(move |c| c.required_level() <= level)
    }
}

impl FromStr for ShipClass {
    type Err = ChronicleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ChronicleError::UnknownShipClass(s.to_string()))
    }
}

impl std::fmt::Display for ShipClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operational status of a ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipStatus {
    #[default]
    Active,
    Docked,
    Maintenance,
    Decommissioned,
}

/// A ship in the admiral's fleet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub name: String,
    pub class: ShipClass,
    /// When the ship joined the fleet
    pub acquired: Timestamp,
    pub status: ShipStatus,
    /// Per-ship experience, separate from the admiral's
    pub experience: u64,
}

impl Ship {
    /// Fresh active ship named after its class
    pub fn commission(class: ShipClass, acquired: Timestamp) -> Self {
        Self::from_template(ShipTemplate::of_class(class), acquired)
    }

    pub fn from_template(template: ShipTemplate, acquired: Timestamp) -> Self {
        Self {
            id: ShipId::new(),
            name: template.name,
            class: template.class,
            acquired,
            status: template.status,
            experience: template.experience,
        }
    }
}

/// Everything about a ship except its id and acquisition time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipTemplate {
    pub name: String,
    pub class: ShipClass,
    #[serde(default)]
    pub status: ShipStatus,
    #[serde(default)]
    pub experience: u64,
}

impl ShipTemplate {
    pub fn of_class(class: ShipClass) -> Self {
        Self {
            name: class.display_name().to_string(),
            class,
            status: ShipStatus::Active,
            experience: 0,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_class_order_is_prestige_order() {
        for pair in ShipClass::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].required_level() < pair[1].required_level());
        }
        assert_eq!(ShipClass::Dinghy.required_level(), 0);
        assert_eq!(ShipClass::ConsciousnessCarrier.required_level(), 10);
    }

    #[test]
    fn test_class_names_parse_back() {
        for class in ShipClass::ALL {
            assert_eq!(ShipClass::parse(class.as_str()), Some(class));
            let json = serde_json::to_string(&class).unwrap();
            assert_eq!(json, format!("\"{}\"", class.as_str()));
        }
        assert!("galleon".parse::<ShipClass>().is_err());
    }

    #[test]
    fn test_available_at_level() {
        let classes: Vec<_> = ShipClass::available_at(1).collect();
        assert_eq!(classes, vec![ShipClass::Dinghy, ShipClass::Raft]);
        assert_eq!(ShipClass::available_at(10).count(), 11);
    }

    #[test]
    fn test_commission_defaults() {
        let ship = Ship::commission(ShipClass::ConsciousnessCarrier, Utc::now());
        assert_eq!(ship.name, "Consciousness Carrier");
        assert_eq!(ship.status, ShipStatus::Active);
        assert_eq!(ship.experience, 0);
    }
}
