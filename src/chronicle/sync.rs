//! Reconciliation with subsystems that track progress on their own

use crate::chronicle::engine::Chronicle;
use crate::events::ChronicleEvent;
use crate::fleet::{Ship, ShipClass};
use serde::{Deserialize, Serialize};

/// Mastery percent credited per reported helm level
pub const MASTERY_PER_LEVEL: u32 = 10;

/// Progress report from the coding-levels terminal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelmReport {
    pub level: u32,
    pub experience: u64,
    /// Ship class names unlocked on the terminal side
    #[serde(default)]
    pub ships: Vec<String>,
}

/// Fleet report from the shipyard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipyardReport {
    /// Only the length is used
    #[serde(default)]
    pub fleet_composition: Vec<serde_json::Value>,
}

impl Chronicle {
    /// Merge externally tracked progress
    ///
    /// Experience only rises (max of both sides). The reported level is not
    /// trusted over experience: level and rank are re-derived from the merged
    /// experience. Each class missing from the fleet gets one new ship. Helm
    /// mastery is overwritten with `incoming_level * 10`, capped at 100.
    pub fn sync_from_external_progress(
        &mut self,
        incoming_level: u32,
        incoming_experience: u64,
        ship_classes: &[ShipClass],
    ) {
        let merged = self.experience.max(incoming_experience);
        self.gain_experience(merged - self.experience);

        let mut added = 0;
        for &class in ship_classes {
            if self.fleet.has_class(class) {
                continue;
            }
            self.add_ship(class);
            added += 1;
        }

        let mastery = incoming_level.saturating_mul(MASTERY_PER_LEVEL);
        self.update_helm_mastery(mastery);

        tracing::info!(
            incoming_level,
            incoming_experience,
            experience = self.experience,
            ships_added = added,
            helm_mastery = self.helm_mastery,
            "synced external progress"
        );
    }

    /// Overwrite the displayed fleet size with an external count
    ///
    /// The count is not checked against the fleet. A mismatch is logged and
    /// recorded as an event; the ship list stays authoritative.
    pub fn sync_fleet_size(&mut self, count: usize) {
        self.fleet.report_size(count);
        if !self.fleet.is_report_consistent() {
            let actual = self.fleet.len();
            tracing::warn!(reported = count, actual, "reported fleet size disagrees with fleet");
            self.events.record(ChronicleEvent::FleetSizeDiverged {
                reported: count,
                actual,
            });
        }
    }

    /// Apply a helm report; unknown class names are skipped
    pub fn sync_from_helm(&mut self, report: &HelmReport) {
        let classes: Vec<ShipClass> = report
            .ships
            .iter()
            .filter_map(|name| {
                let class = ShipClass::parse(name);
                if class.is_none() {
                    tracing::warn!(class = %name, "skipping unknown ship class in helm report");
                }
                class
            })
            .collect();
        self.sync_from_external_progress(report.level, report.experience, &classes);
    }

    pub fn sync_from_shipyard(&mut self, report: &ShipyardReport) {
        self.sync_fleet_size(report.fleet_composition.len());
    }

    /// Ships of a class, in acquisition order
    pub fn ships_of_class(&self, class: ShipClass) -> impl Iterator<Item = &Ship> {
        self.fleet.ships().iter().filter(move |s| s.class == class)
    }
}
