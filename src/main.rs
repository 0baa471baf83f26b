//! Admiral's Chronicle - Console
//!
//! Loads the stored chronicle, runs first contact, then reads commands from
//! stdin. State is saved after every command that changes it.

use admirals_chronicle::chronicle::{Chronicle, FirstContact};
use admirals_chronicle::command::{CommandExecutor, ConsoleCommand, HELP};
use admirals_chronicle::core::config::{config, set_config};
use admirals_chronicle::core::error::Result;
use admirals_chronicle::core::ChronicleConfig;
use admirals_chronicle::fleet::ShipClass;
use admirals_chronicle::persistence::{ChronicleStore, FileStorage};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

/// Drive the progression engine from the terminal
#[derive(Parser, Debug)]
#[command(name = "admirals-chronicle")]
#[command(about = "Console front end for the Admiral's Chronicle progression engine")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the storage directory
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Discard stored progress before starting
    #[arg(long)]
    reset: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let mut loaded = ChronicleConfig::load(args.config.as_deref())?;
    if let Some(dir) = args.storage_dir {
        loaded.storage_dir = dir;
    }
    if set_config(loaded).is_err() {
        tracing::warn!("config already initialized");
    }
    let cfg = config();
    let flags = cfg.feature_flags();

    tracing::info!(
        environment = ?cfg.environment,
        storage_dir = %cfg.storage_dir.display(),
        "{} starting",
        cfg.app_title
    );

    let mut store = ChronicleStore::new(FileStorage::new(cfg.storage_dir.clone()));
    if args.reset {
        store.clear()?;
        tracing::info!("stored progress discarded");
    }
    let mut chronicle = store.load();

    println!("\n=== {} ===", cfg.app_title.to_uppercase());
    if flags.show_version_selector {
        println!("Version {}", cfg.version);
    }
    if flags.show_powered_by {
        println!("Powered by {}", cfg.company_name);
    }
    match chronicle.first_contact(&mut rand::thread_rng()) {
        FirstContact::NewCadet { call_sign } => {
            println!("Welcome aboard, Admiral. Your call sign is {}.", call_sign);
        }
        FirstContact::ReturningAdmiral => {
            println!(
                "Welcome back, {} {}.",
                chronicle.rank().title(),
                chronicle.admiral().name
            );
        }
        FirstContact::InProgress => {}
    }
    print_events(&mut chronicle);
    store.save(&chronicle)?;

    println!("Type 'help' for commands.");

    loop {
        display_status(&chronicle);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let command = match ConsoleCommand::parse(input) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            ConsoleCommand::Quit => break,
            ConsoleCommand::Help => {
                println!("{}", HELP);
                continue;
            }
            ConsoleCommand::Status => {
                display_detailed_status(&chronicle);
                continue;
            }
            ConsoleCommand::Ships => {
                display_fleet(&chronicle);
                continue;
            }
            ConsoleCommand::Achievements => {
                display_achievements(&chronicle);
                continue;
            }
            _ => {}
        }

        if command.is_internal_tool() && !flags.show_internal_tools {
            println!("That command is not available in this build.");
            continue;
        }
        if command.is_advanced() && !flags.enable_advanced_features {
            println!("External sync is not enabled in this build.");
            continue;
        }

        let result = CommandExecutor::execute(&mut chronicle, &command);
        if let Some(error) = &result.error {
            println!("{}", error);
        } else {
            println!("{}", result.message);
        }
        print_events(&mut chronicle);

        if result.changed {
            if let Err(e) = store.save(&chronicle) {
                tracing::error!(error = %e, "failed to save chronicle");
            }
        }
    }

    store.save(&chronicle)?;
    println!(
        "\nFair winds, {}. Level {} with {} ship(s).",
        chronicle.admiral().name,
        chronicle.level(),
        chronicle.fleet_size()
    );
    Ok(())
}

fn print_events(chronicle: &mut Chronicle) {
    let show = config().feature_flags().show_debug_info;
    for event in chronicle.drain_events() {
        if show {
            match serde_json::to_string(&event) {
                Ok(json) => println!("  [event] {}", json),
                Err(e) => tracing::warn!(error = %e, "unprintable event"),
            }
        }
    }
}

/// One-line header
fn display_status(chronicle: &Chronicle) {
    println!();
    let next = chronicle
        .experience_to_next_level()
        .map(|xp| format!("{} XP to next", xp))
        .unwrap_or_else(|| "max level".to_string());
    println!(
        "--- {} {} | {} | Lv {} {} ({:.0}%, {}) | Fleet {} ---",
        chronicle.rank().title(),
        chronicle.admiral().name,
        chronicle.admiral().call_sign,
        chronicle.level(),
        chronicle.rank(),
        chronicle.level_progress_percent(),
        next,
        chronicle.reported_fleet_size()
    );
}

fn display_detailed_status(chronicle: &Chronicle) {
    let onboarding = chronicle.onboarding();
    println!();
    println!("=== Chronicle ===");
    println!(
        "Admiral: {} ({})",
        chronicle.admiral().name,
        chronicle.admiral().call_sign
    );
    println!(
        "Experience: {} | Level {} | {}",
        chronicle.experience(),
        chronicle.level(),
        chronicle.rank().title()
    );
    let phases: Vec<&str> = chronicle.unlocked_phases().iter().map(|p| p.as_str()).collect();
    println!(
        "Phases: {} | Viewing: {}",
        phases.join(", "),
        chronicle.current_phase()
    );
    println!(
        "Academy: {} | Helm mastery: {}%",
        if chronicle.academy_completed() { "complete" } else { "in progress" },
        chronicle.helm_mastery()
    );
    println!(
        "Onboarding: {:?}, step {}, {}/5 milestones",
        onboarding.stage(),
        onboarding.step(),
        onboarding.progress().completed_count()
    );
    if chronicle.reported_fleet_size() != chronicle.fleet_size() {
        println!(
            "Fleet: {} ship(s), shipyard reports {}",
            chronicle.fleet_size(),
            chronicle.reported_fleet_size()
        );
    }
}

fn display_fleet(chronicle: &Chronicle) {
    let active = chronicle.active_ship().map(|s| s.id);
    println!();
    let available: Vec<&str> = ShipClass::available_at(chronicle.level())
        .map(|c| c.as_str())
        .collect();
    println!("Available classes: {}", available.join(", "));
    if chronicle.ships().is_empty() {
        println!("No ships yet.");
        return;
    }
    for (i, ship) in chronicle.ships().iter().enumerate() {
        let marker = if Some(ship.id) == active { "*" } else { " " };
        println!(
            "{} {}. {} [{}] {:?}, {} XP",
            marker,
            i + 1,
            ship.name,
            ship.class.display_name(),
            ship.status,
            ship.experience
        );
    }
}

fn display_achievements(chronicle: &Chronicle) {
    println!();
    for achievement in chronicle.achievements() {
        let mark = if achievement.unlocked { "x" } else { " " };
        println!(
            "[{}] {} - {}",
            mark, achievement.title, achievement.description
        );
    }
}
