//! Change feed for collaborators that react to chronicle updates

use crate::core::types::ShipId;
use crate::fleet::ShipClass;
use crate::onboarding::Milestone;
use crate::progression::{AdmiralRank, ModulePhase};
use serde::Serialize;

/// Something that changed in the chronicle
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChronicleEvent {
    ExperienceGained { amount: u64, total: u64 },
    LevelChanged { from: u32, to: u32 },
    RankChanged { from: AdmiralRank, to: AdmiralRank },
    PhaseUnlocked { phase: ModulePhase },
    ShipAcquired { id: ShipId, class: ShipClass },
    ActiveShipChanged { id: Option<ShipId> },
    AchievementUnlocked { id: String },
    AcademyCompleted,
    AdmiralRenamed { name: String, call_sign: String },
    OnboardingStarted,
    OnboardingStepAdvanced { step: u8 },
    OnboardingMilestoneReached { milestone: String },
    OnboardingCompleted { skipped: bool },
    /// An external report put the displayed fleet size out of line with the fleet
    FleetSizeDiverged { reported: usize, actual: usize },
}

impl ChronicleEvent {
    pub fn milestone(milestone: Milestone) -> Self {
        ChronicleEvent::OnboardingMilestoneReached {
            milestone: milestone.as_str().to_string(),
        }
    }
}

/// Most events held between drains
pub const MAX_PENDING_EVENTS: usize = 1024;

/// Pending events, drained by the subscriber
///
/// Callers are expected to [`drain`](EventLog::drain) after each operation.
/// An undrained log keeps the newest [`MAX_PENDING_EVENTS`] and discards
/// older ones.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pending: Vec<ChronicleEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: ChronicleEvent) {
        tracing::debug!(?event, "chronicle event");
        if self.pending.len() >= MAX_PENDING_EVENTS {
            let dropped = self.pending.remove(0);
            tracing::warn!(?dropped, "event log full; discarding oldest event");
        }
        self.pending.push(event);
    }

    pub fn pending(&self) -> &[ChronicleEvent] {
        &self.pending
    }

    pub fn drain(&mut self) -> Vec<ChronicleEvent> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_log() {
        let mut log = EventLog::new();
        log.record(ChronicleEvent::AcademyCompleted);
        log.record(ChronicleEvent::OnboardingStarted);

        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert!(log.pending().is_empty());
    }

    #[test]
    fn test_undrained_log_keeps_newest() {
        let mut log = EventLog::new();
        for step in 0..MAX_PENDING_EVENTS + 5 {
            log.record(ChronicleEvent::OnboardingStepAdvanced { step: (step % 256) as u8 });
        }

        assert_eq!(log.pending().len(), MAX_PENDING_EVENTS);
        assert_eq!(
            log.pending()[0],
            ChronicleEvent::OnboardingStepAdvanced { step: 5 }
        );
        assert_eq!(
            log.pending().last(),
            Some(&ChronicleEvent::OnboardingStepAdvanced {
                step: ((MAX_PENDING_EVENTS + 4) % 256) as u8
            })
        );
    }

    #[test]
    fn test_event_json_is_tagged() {
        let event = ChronicleEvent::PhaseUnlocked {
            phase: ModulePhase::Helm,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "phase_unlocked");
        assert_eq!(json["phase"], "helm");
    }
}
