pub mod config;
pub mod error;
pub mod types;

pub use config::{ChronicleConfig, Environment, FeatureFlags};
pub use error::{ChronicleError, Result};
pub use types::{ShipId, Timestamp};
