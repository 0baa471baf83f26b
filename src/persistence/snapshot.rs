//! Complete-state snapshot in stored form

use crate::achievements::{Achievement, AchievementBook};
use crate::admiral::AdmiralProfile;
use crate::chronicle::Chronicle;
use crate::core::types::ShipId;
use crate::events::EventLog;
use crate::fleet::{Fleet, Ship};
use crate::onboarding::{OnboardingProgress, OnboardingState, MAX_ONBOARDING_STEP};
use crate::progression::{level_for_experience, AdmiralRank, ModulePhase, PhaseUnlockSet};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Version written next to the state
pub const SNAPSHOT_VERSION: u32 = 0;

/// Every chronicle field, with phases as an ordered list
///
/// Level, rank and fleet size are written for readers of the stored
/// document; restoring re-derives level and rank from experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChronicleSnapshot {
    pub level: u32,
    pub experience: u64,
    pub rank: AdmiralRank,
    pub current_phase: ModulePhase,
    pub ships: Vec<Ship>,
    pub active_ship: Option<ShipId>,
    pub academy_completed: bool,
    pub helm_mastery: u8,
    pub fleet_size: usize,
    pub achievements: Vec<Achievement>,
    pub unlocked_phases: Vec<ModulePhase>,
    pub admiral_name: String,
    pub call_sign: String,
    pub has_completed_onboarding: bool,
    pub is_onboarding_active: bool,
    pub onboarding_step: u8,
    pub onboarding_progress: OnboardingProgress,
}

impl Default for ChronicleSnapshot {
    fn default() -> Self {
        Chronicle::new().snapshot()
    }
}

impl ChronicleSnapshot {
    /// Read a stored state object field by field
    ///
    /// Fields that are missing or have the wrong shape keep their default.
    /// Malformed ships are dropped individually. Unknown phase names are
    /// ignored; a missing or non-list phase field means academy only.
    pub fn from_value_lenient(value: &Value) -> Self {
        let mut snapshot = Self::default();
        let Some(obj) = value.as_object() else {
            tracing::warn!("stored chronicle state is not an object; using defaults");
            return snapshot;
        };

        set_field(obj, "level", &mut snapshot.level);
        set_field(obj, "experience", &mut snapshot.experience);
        set_field(obj, "rank", &mut snapshot.rank);
        set_field(obj, "currentPhase", &mut snapshot.current_phase);
        set_field(obj, "academyCompleted", &mut snapshot.academy_completed);
        set_field(obj, "fleetSize", &mut snapshot.fleet_size);
        set_field(obj, "admiralName", &mut snapshot.admiral_name);
        set_field(obj, "callSign", &mut snapshot.call_sign);
        set_field(obj, "hasCompletedOnboarding", &mut snapshot.has_completed_onboarding);
        set_field(obj, "isOnboardingActive", &mut snapshot.is_onboarding_active);
        set_field(obj, "onboardingProgress", &mut snapshot.onboarding_progress);

        // Out-of-range numbers clamp instead of falling back
        if let Some(mastery) = obj.get("helmMastery").and_then(Value::as_u64) {
            snapshot.helm_mastery = mastery.min(100) as u8;
        }
        if let Some(step) = obj.get("onboardingStep").and_then(Value::as_u64) {
            snapshot.onboarding_step = step.min(MAX_ONBOARDING_STEP as u64) as u8;
        }

        // Ship ids that are not UUIDs get a fresh id; the map carries the
        // active-ship reference across
        let mut reissued: HashMap<String, ShipId> = HashMap::new();
        if let Some(ships) = obj.get("ships").and_then(Value::as_array) {
            snapshot.ships = ships
                .iter()
                .filter_map(|raw| parse_ship(raw, &mut reissued))
                .collect();
        }
        snapshot.active_ship = match obj.get("activeShip") {
            Some(Value::String(id)) => reissued.get(id).copied().or_else(|| ShipId::parse(id)),
            Some(Value::Null) | None => None,
            Some(other) => {
                tracing::warn!(value = %other, "ignoring malformed stored field activeShip");
                None
            }
        };
        if let Some(achievements) = obj.get("achievements").and_then(Value::as_array) {
            snapshot.achievements = achievements
                .iter()
                .filter_map(parse_or_warn::<Achievement>)
                .collect();
        }

        snapshot.unlocked_phases = match obj.get("unlockedPhases").and_then(Value::as_array) {
            Some(names) => names
                .iter()
                .filter_map(Value::as_str)
                .filter_map(ModulePhase::parse)
                .collect(),
            None => vec![ModulePhase::Academy],
        };

        snapshot
    }
}

fn set_field<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str, slot: &mut T) {
    let Some(raw) = obj.get(key) else {
        return;
    };
    match serde_json::from_value::<T>(raw.clone()) {
        Ok(value) => *slot = value,
        Err(e) => tracing::warn!(field = key, error = %e, "ignoring malformed stored field"),
    }
}

fn parse_ship(raw: &Value, reissued: &mut HashMap<String, ShipId>) -> Option<Ship> {
    let legacy_id = raw
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| ShipId::parse(id).is_none());
    let Some(legacy_id) = legacy_id else {
        return parse_or_warn::<Ship>(raw);
    };

    let id = *reissued.entry(legacy_id.to_string()).or_insert_with(ShipId::new);
    let mut raw = raw.clone();
    if let Some(fields) = raw.as_object_mut() {
        fields.insert("id".into(), Value::String(id.to_string()));
    }
    let ship = parse_or_warn::<Ship>(&raw)?;
    tracing::info!(legacy_id, %id, "reissued stored ship id");
    Some(ship)
}

fn parse_or_warn<T: DeserializeOwned>(raw: &Value) -> Option<T> {
    match serde_json::from_value::<T>(raw.clone()) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, "dropping malformed stored entry");
            None
        }
    }
}

impl Chronicle {
    /// Complete state in stored form
    pub fn snapshot(&self) -> ChronicleSnapshot {
        ChronicleSnapshot {
            level: self.level(),
            experience: self.experience,
            rank: self.rank(),
            current_phase: self.current_phase,
            ships: self.fleet.ships().to_vec(),
            active_ship: self.fleet.active_id(),
            academy_completed: self.academy_completed,
            helm_mastery: self.helm_mastery,
            fleet_size: self.fleet.reported_size(),
            achievements: self.achievements.entries().to_vec(),
            unlocked_phases: self.phases.iter().collect(),
            admiral_name: self.admiral.name.clone(),
            call_sign: self.admiral.call_sign.clone(),
            has_completed_onboarding: self.onboarding.has_completed(),
            is_onboarding_active: self.onboarding.is_active(),
            onboarding_step: self.onboarding.step(),
            onboarding_progress: *self.onboarding.progress(),
        }
    }

    /// Rebuild a chronicle from a snapshot
    ///
    /// Stored level and rank are ignored in favour of experience. Phases the
    /// stored experience has earned are unlocked, an unresolvable active ship
    /// is dropped, and a current phase that is not unlocked falls back to the
    /// academy.
    pub fn restore(snapshot: ChronicleSnapshot) -> Self {
        let level = level_for_experience(snapshot.experience);
        if snapshot.level != level {
            tracing::warn!(
                stored_level = snapshot.level,
                experience = snapshot.experience,
                "stored level disagrees with experience; re-deriving"
            );
        }

        let mut phases = PhaseUnlockSet::from_phases(snapshot.unlocked_phases);
        phases.unlock_for_level(level);

        let current_phase = if phases.contains(snapshot.current_phase) {
            snapshot.current_phase
        } else {
            ModulePhase::Academy
        };

        Self {
            admiral: AdmiralProfile::new(snapshot.admiral_name, snapshot.call_sign),
            experience: snapshot.experience,
            current_phase,
            fleet: Fleet::from_parts(snapshot.ships, snapshot.active_ship, Some(snapshot.fleet_size)),
            academy_completed: snapshot.academy_completed,
            helm_mastery: snapshot.helm_mastery.min(100),
            achievements: AchievementBook::from_stored(&snapshot.achievements),
            phases,
            onboarding: OnboardingState::from_stored(
                snapshot.has_completed_onboarding,
                snapshot.is_onboarding_active,
                snapshot.onboarding_step,
                snapshot.onboarding_progress,
            ),
            events: EventLog::new(),
            clock: Utc::now,
        }
    }
}
