//! Console input parsing

use crate::chronicle::HelmReport;
use crate::core::error::{ChronicleError, Result};
use crate::core::types::ShipId;
use crate::fleet::ShipClass;
use crate::onboarding::Milestone;
use crate::progression::ModulePhase;

/// How the console names a ship
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShipSelector {
    Id(ShipId),
    /// 1-based position in the fleet list
    Position(usize),
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingCommand {
    Start,
    Next,
    Milestone(Milestone),
    Complete,
    Finish,
    Skip,
}

/// One line of console input
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    GainExperience(u64),
    AddShip {
        class: ShipClass,
        name: Option<String>,
    },
    SetActiveShip(ShipSelector),
    CompleteAcademy,
    HelmMastery(u32),
    UnlockPhase(ModulePhase),
    SelectPhase(ModulePhase),
    UnlockAchievement(String),
    SetAdmiral {
        name: String,
        call_sign: String,
    },
    Onboarding(OnboardingCommand),
    SyncHelm(HelmReport),
    SyncFleetSize(usize),
    Status,
    Ships,
    Achievements,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  xp <amount>                  - Gain experience
  ship <class> [name]          - Commission a ship
  active <n|id|none>           - Select the active ship
  academy                      - Complete the academy
  mastery <percent>            - Set helm mastery
  unlock <phase>               - Unlock a phase
  select <phase>               - View an unlocked phase
  achieve <id>                 - Unlock an achievement
  admiral <name> <call-sign>   - Set admiral identity
  onboard start|next|complete|finish|skip
  onboard milestone <name>     - Complete an onboarding milestone
  sync-helm <json>             - Merge a helm progress report
  sync-fleet <count>           - Overwrite the displayed fleet size
  status / s                   - Show progression
  ships                        - List the fleet
  achievements                 - List achievements
  help / h                     - Show this help
  quit / q                     - Exit";

impl ConsoleCommand {
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let (word, rest) = match input.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (input, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "xp" | "gain" => ConsoleCommand::GainExperience(parse_number(word, rest)?),
            "ship" => {
                let (class, name) = match rest.split_once(char::is_whitespace) {
                    Some((class, name)) => (class, Some(name.trim().to_string())),
                    None => (rest, None),
                };
                ConsoleCommand::AddShip {
                    class: class.parse()?,
                    name: name.filter(|n| !n.is_empty()),
                }
            }
            "active" => ConsoleCommand::SetActiveShip(parse_selector(rest)?),
            "academy" => ConsoleCommand::CompleteAcademy,
            "mastery" => ConsoleCommand::HelmMastery(parse_number(word, rest)?),
            "unlock" => ConsoleCommand::UnlockPhase(rest.parse()?),
            "select" => ConsoleCommand::SelectPhase(rest.parse()?),
            "achieve" => ConsoleCommand::UnlockAchievement(require(word, rest)?.to_string()),
            "admiral" => {
                let (name, call_sign) = rest
                    .rsplit_once(char::is_whitespace)
                    .ok_or_else(|| usage("admiral <name> <call-sign>"))?;
                ConsoleCommand::SetAdmiral {
                    name: name.trim().to_string(),
                    call_sign: call_sign.to_string(),
                }
            }
            "onboard" => ConsoleCommand::Onboarding(parse_onboarding(rest)?),
            "sync-helm" => ConsoleCommand::SyncHelm(serde_json::from_str(require(word, rest)?)?),
            "sync-fleet" => ConsoleCommand::SyncFleetSize(parse_number(word, rest)?),
            "status" | "s" => ConsoleCommand::Status,
            "ships" => ConsoleCommand::Ships,
            "achievements" => ConsoleCommand::Achievements,
            "help" | "h" => ConsoleCommand::Help,
            "quit" | "q" => ConsoleCommand::Quit,
            "" => return Err(ChronicleError::InvalidCommand("empty input".into())),
            other => {
                return Err(ChronicleError::InvalidCommand(format!(
                    "unknown command '{}'",
                    other
                )))
            }
        };
        Ok(command)
    }

    /// Demo shortcuts hidden outside internal builds
    pub fn is_internal_tool(&self) -> bool {
        matches!(
            self,
            ConsoleCommand::CompleteAcademy
                | ConsoleCommand::UnlockPhase(_)
                | ConsoleCommand::UnlockAchievement(_)
        )
    }

    /// External sync commands, gated behind advanced features
    pub fn is_advanced(&self) -> bool {
        matches!(
            self,
            ConsoleCommand::SyncHelm(_) | ConsoleCommand::SyncFleetSize(_)
        )
    }
}

fn usage(form: &str) -> ChronicleError {
    ChronicleError::InvalidCommand(format!("usage: {}", form))
}

fn require<'a>(word: &str, rest: &'a str) -> Result<&'a str> {
    if rest.is_empty() {
        return Err(ChronicleError::InvalidCommand(format!(
            "'{}' needs an argument",
            word
        )));
    }
    Ok(rest)
}

fn parse_number<T: std::str::FromStr>(word: &str, rest: &str) -> Result<T> {
    require(word, rest)?.parse().map_err(|_| {
        ChronicleError::InvalidCommand(format!("'{}' expects a non-negative number", word))
    })
}

fn parse_selector(rest: &str) -> Result<ShipSelector> {
    if rest.eq_ignore_ascii_case("none") {
        return Ok(ShipSelector::None);
    }
    if let Ok(position) = rest.parse::<usize>() {
        return Ok(ShipSelector::Position(position));
    }
    ShipId::parse(rest)
        .map(ShipSelector::Id)
        .ok_or_else(|| usage("active <n|id|none>"))
}

fn parse_onboarding(rest: &str) -> Result<OnboardingCommand> {
    let (action, arg) = match rest.split_once(char::is_whitespace) {
        Some((action, arg)) => (action, arg.trim()),
        None => (rest, ""),
    };
    let command = match action {
        "start" => OnboardingCommand::Start,
        "next" => OnboardingCommand::Next,
        "milestone" => OnboardingCommand::Milestone(arg.parse()?),
        "complete" => OnboardingCommand::Complete,
        "finish" => OnboardingCommand::Finish,
        "skip" => OnboardingCommand::Skip,
        _ => return Err(usage("onboard start|next|milestone <name>|complete|finish|skip")),
    };
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_experience() {
        assert_eq!(
            ConsoleCommand::parse("xp 150").unwrap(),
            ConsoleCommand::GainExperience(150)
        );
        assert!(ConsoleCommand::parse("xp -5").is_err());
        assert!(ConsoleCommand::parse("xp").is_err());
    }

    #[test]
    fn test_parse_ship_with_name() {
        assert_eq!(
            ConsoleCommand::parse("ship frigate  Northern Star").unwrap(),
            ConsoleCommand::AddShip {
                class: ShipClass::Frigate,
                name: Some("Northern Star".into())
            }
        );
        assert!(matches!(
            ConsoleCommand::parse("ship hovercraft"),
            Err(ChronicleError::UnknownShipClass(_))
        ));
    }

    #[test]
    fn test_parse_active_selectors() {
        assert_eq!(
            ConsoleCommand::parse("active none").unwrap(),
            ConsoleCommand::SetActiveShip(ShipSelector::None)
        );
        assert_eq!(
            ConsoleCommand::parse("active 2").unwrap(),
            ConsoleCommand::SetActiveShip(ShipSelector::Position(2))
        );
        let id = ShipId::new();
        assert_eq!(
            ConsoleCommand::parse(&format!("active {}", id)).unwrap(),
            ConsoleCommand::SetActiveShip(ShipSelector::Id(id))
        );
    }

    #[test]
    fn test_parse_phases_and_admiral() {
        assert_eq!(
            ConsoleCommand::parse("unlock loom").unwrap(),
            ConsoleCommand::UnlockPhase(ModulePhase::Loom)
        );
        assert!(matches!(
            ConsoleCommand::parse("select bridge"),
            Err(ChronicleError::UnknownPhase(_))
        ));
        assert_eq!(
            ConsoleCommand::parse("admiral Grace Hopper ADM-0001-COBL").unwrap(),
            ConsoleCommand::SetAdmiral {
                name: "Grace Hopper".into(),
                call_sign: "ADM-0001-COBL".into()
            }
        );
    }

    #[test]
    fn test_parse_onboarding() {
        assert_eq!(
            ConsoleCommand::parse("onboard milestone first-mission").unwrap(),
            ConsoleCommand::Onboarding(OnboardingCommand::Milestone(Milestone::FirstMission))
        );
        assert!(ConsoleCommand::parse("onboard rewind").is_err());
    }

    #[test]
    fn test_parse_sync_helm_json() {
        let command =
            ConsoleCommand::parse(r#"sync-helm {"level": 3, "experience": 400, "ships": ["frigate"]}"#)
                .unwrap();
        match command {
            ConsoleCommand::SyncHelm(report) => {
                assert_eq!(report.level, 3);
                assert_eq!(report.ships, vec!["frigate".to_string()]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(matches!(
            ConsoleCommand::parse("sync-helm {"),
            Err(ChronicleError::SerdeError(_))
        ));
    }

    #[test]
    fn test_internal_tools() {
        assert!(ConsoleCommand::parse("academy").unwrap().is_internal_tool());
        assert!(!ConsoleCommand::parse("xp 10").unwrap().is_internal_tool());
    }

    #[test]
    fn test_advanced_commands() {
        assert!(ConsoleCommand::parse("sync-fleet 4").unwrap().is_advanced());
        assert!(ConsoleCommand::parse(r#"sync-helm {"level":1,"experience":150,"ships":[]}"#)
            .unwrap()
            .is_advanced());
        assert!(!ConsoleCommand::parse("academy").unwrap().is_advanced());
        assert!(!ConsoleCommand::parse("ship sloop").unwrap().is_advanced());
    }

    #[test]
    fn test_unknown_command() {
        assert!(matches!(
            ConsoleCommand::parse("launch"),
            Err(ChronicleError::InvalidCommand(_))
        ));
    }
}
