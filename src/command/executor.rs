//! Console command execution against a chronicle

use crate::chronicle::Chronicle;
use crate::command::parser::{ConsoleCommand, OnboardingCommand, ShipSelector};
use crate::fleet::ShipTemplate;

/// Applies parsed console commands
pub struct CommandExecutor;

impl CommandExecutor {
    pub fn execute(chronicle: &mut Chronicle, command: &ConsoleCommand) -> ExecutionResult {
        match command {
            ConsoleCommand::GainExperience(amount) => {
                let before = chronicle.level();
                chronicle.gain_experience(*amount);
                let mut message = format!("+{} XP (total {})", amount, chronicle.experience());
                if chronicle.level() != before {
                    message.push_str(&format!(
                        " - promoted to level {}, {}",
                        chronicle.level(),
                        chronicle.rank().title()
                    ));
                }
                ExecutionResult::changed(message)
            }
            ConsoleCommand::AddShip { class, name } => {
                let id = match name {
                    Some(name) => {
                        chronicle.unlock_ship(ShipTemplate::of_class(*class).named(name.clone()))
                    }
                    None => chronicle.add_ship(*class),
                };
                ExecutionResult::changed(format!("Commissioned {} ({})", class.display_name(), id))
            }
            ConsoleCommand::SetActiveShip(selector) => {
                let id = match selector {
                    ShipSelector::None => None,
                    ShipSelector::Id(id) => Some(*id),
                    ShipSelector::Position(position) => {
                        match position
                            .checked_sub(1)
                            .and_then(|i| chronicle.ships().get(i))
                        {
                            Some(ship) => Some(ship.id),
                            None => {
                                return ExecutionResult::rejected(format!(
                                    "No ship at position {}",
                                    position
                                ))
                            }
                        }
                    }
                };
                if chronicle.set_active_ship(id) {
                    let name = chronicle
                        .active_ship()
                        .map(|s| s.name.clone())
                        .unwrap_or_else(|| "none".to_string());
                    ExecutionResult::changed(format!("Active ship: {}", name))
                } else {
                    ExecutionResult::rejected("No such ship in the fleet")
                }
            }
            ConsoleCommand::CompleteAcademy => {
                if chronicle.complete_academy() {
                    ExecutionResult::changed("Academy complete. The helm is open.")
                } else {
                    ExecutionResult::rejected("Academy already completed")
                }
            }
            ConsoleCommand::HelmMastery(percent) => {
                chronicle.update_helm_mastery(*percent);
                ExecutionResult::changed(format!("Helm mastery {}%", chronicle.helm_mastery()))
            }
            ConsoleCommand::UnlockPhase(phase) => {
                if chronicle.unlock_phase(*phase) {
                    ExecutionResult::changed(format!("Unlocked {}", phase))
                } else {
                    ExecutionResult::rejected(format!("{} already unlocked", phase))
                }
            }
            ConsoleCommand::SelectPhase(phase) => {
                if chronicle.select_phase(*phase) {
                    ExecutionResult::changed(format!("Now viewing {}", phase))
                } else {
                    ExecutionResult::rejected(format!("{} is locked", phase))
                }
            }
            ConsoleCommand::UnlockAchievement(id) => {
                if chronicle.unlock_achievement(id) {
                    ExecutionResult::changed(format!("Achievement unlocked: {}", id))
                } else {
                    ExecutionResult::rejected(format!("{} is unknown or already unlocked", id))
                }
            }
            ConsoleCommand::SetAdmiral { name, call_sign } => {
                chronicle.set_admiral_info(name.clone(), call_sign.clone());
                ExecutionResult::changed(format!("Admiral {} ({})", name, call_sign))
            }
            ConsoleCommand::Onboarding(step) => Self::onboarding(chronicle, step),
            ConsoleCommand::SyncHelm(report) => {
                chronicle.sync_from_helm(report);
                ExecutionResult::changed(format!(
                    "Synced helm: {} XP, level {}, mastery {}%",
                    chronicle.experience(),
                    chronicle.level(),
                    chronicle.helm_mastery()
                ))
            }
            ConsoleCommand::SyncFleetSize(count) => {
                chronicle.sync_fleet_size(*count);
                ExecutionResult::changed(format!(
                    "Displayed fleet size {} (actual {})",
                    chronicle.reported_fleet_size(),
                    chronicle.fleet_size()
                ))
            }
            ConsoleCommand::Status
            | ConsoleCommand::Ships
            | ConsoleCommand::Achievements
            | ConsoleCommand::Help
            | ConsoleCommand::Quit => ExecutionResult {
                changed: false,
                message: String::new(),
                error: None,
            },
        }
    }

    fn onboarding(chronicle: &mut Chronicle, step: &OnboardingCommand) -> ExecutionResult {
        let (accepted, what) = match step {
            OnboardingCommand::Start => (chronicle.start_onboarding(), "Onboarding started".to_string()),
            OnboardingCommand::Next => (
                chronicle.advance_onboarding_step(),
                format!("Onboarding step {}", chronicle.onboarding().step()),
            ),
            OnboardingCommand::Milestone(milestone) => (
                chronicle.complete_onboarding_phase(*milestone),
                format!("Milestone reached: {}", milestone),
            ),
            OnboardingCommand::Complete => (chronicle.complete_onboarding(), "Onboarding complete".to_string()),
            OnboardingCommand::Finish => (chronicle.finish_onboarding(), "Onboarding finished".to_string()),
            OnboardingCommand::Skip => (chronicle.skip_onboarding(), "Onboarding skipped".to_string()),
        };
        if accepted {
            ExecutionResult::changed(what)
        } else {
            ExecutionResult::rejected(format!(
                "Not allowed while onboarding is {:?}",
                chronicle.onboarding().stage()
            ))
        }
    }
}

/// Result of executing a command
#[derive(Debug)]
pub struct ExecutionResult {
    /// The chronicle may differ from before and should be saved
    pub changed: bool,
    pub message: String,
    pub error: Option<String>,
}

impl ExecutionResult {
    fn changed(message: impl Into<String>) -> Self {
        Self {
            changed: true,
            message: message.into(),
            error: None,
        }
    }

    fn rejected(error: impl Into<String>) -> Self {
        Self {
            changed: false,
            message: String::new(),
            error: Some(error.into()),
        }
    }
}
