//! Console command pipeline
//!
//! Input line -> ConsoleCommand::parse -> CommandExecutor::execute -> ExecutionResult

pub mod executor;
pub mod parser;

pub use executor::{CommandExecutor, ExecutionResult};
pub use parser::{ConsoleCommand, OnboardingCommand, ShipSelector, HELP};
