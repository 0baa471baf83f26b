use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChronicleError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Unknown ship class: {0}")]
    UnknownShipClass(String),

    #[error("Unknown phase: {0}")]
    UnknownPhase(String),

    #[error("Unknown onboarding milestone: {0}")]
    UnknownMilestone(String),

    #[error("Invalid storage key: {0}")]
    InvalidStorageKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ChronicleError>;
