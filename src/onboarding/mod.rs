//! Onboarding state machine
//!
//! NotStarted --start--> Active(0) --advance--> Active(n <= 4)
//! Active --complete--> Completed
//! NotStarted | Active --finish/skip--> Completed
//!
//! Nothing leaves Completed. The five milestones are tracked alongside the
//! stage and only ever flip to true.

use crate::core::error::ChronicleError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Last step of the onboarding sequence
pub const MAX_ONBOARDING_STEP: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OnboardingStage {
    #[default]
    NotStarted,
    Active,
    Completed,
}

/// Named onboarding milestones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Milestone {
    WelcomeCeremony,
    InterfaceTour,
    FirstMission,
    ShipChristening,
    OpenWaters,
}

impl Milestone {
    pub const ALL: [Milestone; 5] = [
        Milestone::WelcomeCeremony,
        Milestone::InterfaceTour,
        Milestone::FirstMission,
        Milestone::ShipChristening,
        Milestone::OpenWaters,
    ];

    /// Field name used in stored state
    pub fn as_str(&self) -> &'static str {
        match self {
            Milestone::WelcomeCeremony => "welcomeCeremonyCompleted",
            Milestone::InterfaceTour => "interfaceTourCompleted",
            Milestone::FirstMission => "firstMissionCompleted",
            Milestone::ShipChristening => "shipChristeningCompleted",
            Milestone::OpenWaters => "openWatersReached",
        }
    }

    /// Accepts the stored field name or a short kebab-case alias
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let short = match s {
            "welcome-ceremony" => Some(Milestone::WelcomeCeremony),
            "interface-tour" => Some(Milestone::InterfaceTour),
            "first-mission" => Some(Milestone::FirstMission),
            "ship-christening" => Some(Milestone::ShipChristening),
            "open-waters" => Some(Milestone::OpenWaters),
            _ => None,
        };
        short.or_else(|| Self::ALL.into_iter().find(|m| m.as_str() == s))
    }
}

impl FromStr for Milestone {
    type Err = ChronicleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ChronicleError::UnknownMilestone(s.to_string()))
    }
}

impl std::fmt::Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Milestone flags, in stored form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnboardingProgress {
    pub welcome_ceremony_completed: bool,
    pub interface_tour_completed: bool,
    pub first_mission_completed: bool,
    pub ship_christening_completed: bool,
    pub open_waters_reached: bool,
}

impl OnboardingProgress {
    pub fn all_complete() -> Self {
        Self {
            welcome_ceremony_completed: true,
            interface_tour_completed: true,
            first_mission_completed: true,
            ship_christening_completed: true,
            open_waters_reached: true,
        }
    }

    pub fn get(&self, milestone: Milestone) -> bool {
        match milestone {
            Milestone::WelcomeCeremony => self.welcome_ceremony_completed,
            Milestone::InterfaceTour => self.interface_tour_completed,
            Milestone::FirstMission => self.first_mission_completed,
            Milestone::ShipChristening => self.ship_christening_completed,
            Milestone::OpenWaters => self.open_waters_reached,
        }
    }

    fn flag_mut(&mut self, milestone: Milestone) -> &mut bool {
        match milestone {
            Milestone::WelcomeCeremony => &mut self.welcome_ceremony_completed,
            Milestone::InterfaceTour => &mut self.interface_tour_completed,
            Milestone::FirstMission => &mut self.first_mission_completed,
            Milestone::ShipChristening => &mut self.ship_christening_completed,
            Milestone::OpenWaters => &mut self.open_waters_reached,
        }
    }

    pub fn completed_count(&self) -> usize {
        Milestone::ALL.iter().filter(|m| self.get(**m)).count()
    }
}

/// Where the admiral is in onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OnboardingState {
    stage: OnboardingStage,
    step: u8,
    progress: OnboardingProgress,
}

impl OnboardingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from the stored flags
    ///
    /// Completed wins over active; the step is clamped.
    pub fn from_stored(
        has_completed: bool,
        is_active: bool,
        step: u8,
        progress: OnboardingProgress,
    ) -> Self {
        let stage = if has_completed {
            OnboardingStage::Completed
        } else if is_active {
            OnboardingStage::Active
        } else {
            OnboardingStage::NotStarted
        };
        Self {
            stage,
            step: step.min(MAX_ONBOARDING_STEP),
            progress,
        }
    }

    pub fn stage(&self) -> OnboardingStage {
        self.stage
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn progress(&self) -> &OnboardingProgress {
        &self.progress
    }

    pub fn is_active(&self) -> bool {
        self.stage == OnboardingStage::Active
    }

    pub fn has_completed(&self) -> bool {
        self.stage == OnboardingStage::Completed
    }

    /// NotStarted -> Active(0)
    pub fn start(&mut self) -> bool {
        if self.stage != OnboardingStage::NotStarted {
            return false;
        }
        self.stage = OnboardingStage::Active;
        self.step = 0;
        true
    }

    /// Move one step forward, stopping at the last step
    ///
    /// Reaching the last step does not complete onboarding.
    pub fn advance_step(&mut self) -> bool {
        if !self.is_active() || self.step >= MAX_ONBOARDING_STEP {
            return false;
        }
        self.step += 1;
        true
    }

    /// Flip a milestone to done; true if it was not done before
    pub fn complete_milestone(&mut self, milestone: Milestone) -> bool {
        let flag = self.progress.flag_mut(milestone);
        let changed = !*flag;
        *flag = true;
        changed
    }

    /// Active -> Completed, leaving step and milestones as they are
    pub fn complete(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.stage = OnboardingStage::Completed;
        true
    }

    /// Complete with every milestone marked done
    pub fn finish(&mut self) -> bool {
        if self.has_completed() {
            return false;
        }
        self.stage = OnboardingStage::Completed;
        self.step = 0;
        self.progress = OnboardingProgress::all_complete();
        true
    }

    /// Complete without touching milestones
    pub fn skip(&mut self) -> bool {
        if self.has_completed() {
            return false;
        }
        self.stage = OnboardingStage::Completed;
        self.step = 0;
        true
    }
}
