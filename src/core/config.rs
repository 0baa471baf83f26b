//! Application configuration
//!
//! Settings come from three layers, later layers winning:
//! built-in defaults, an optional TOML file, then `CHRONICLE_*` environment
//! variables. Feature flags are never configured directly; they follow from
//! the deployment environment.

use crate::core::error::{ChronicleError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
    /// Open beta build handed to the public
    Public,
}

impl Environment {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Environment::Development),
            "staging" => Some(Environment::Staging),
            "production" | "prod" => Some(Environment::Production),
            "public" => Some(Environment::Public),
            _ => None,
        }
    }
}

/// Flags derived from the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Demo shortcuts such as "mark academy complete"
    pub show_internal_tools: bool,
    /// Verbose state dumps in the console
    pub show_debug_info: bool,
    pub enable_advanced_features: bool,
    pub show_version_selector: bool,
    /// "Powered by" branding line
    pub show_powered_by: bool,
}

impl FeatureFlags {
    pub fn for_environment(environment: Environment) -> Self {
        let is_public = environment == Environment::Public;
        Self {
            show_internal_tools: !is_public && environment != Environment::Production,
            show_debug_info: environment == Environment::Development,
            enable_advanced_features: !is_public,
            show_version_selector: !is_public,
            show_powered_by: is_public,
        }
    }
}

/// Configuration for the console and the waitlist server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChronicleConfig {
    /// Title shown in banners
    pub app_title: String,

    pub version: String,

    pub environment: Environment,

    /// Base URL the frontend uses to reach the waitlist endpoint
    pub api_base_url: String,

    /// Directory holding persisted chronicle state
    ///
    /// Each storage key becomes one `<key>.json` file in here.
    pub storage_dir: PathBuf,

    /// Address the waitlist server binds to
    pub waitlist_bind: String,

    pub company_name: String,
}

impl Default for ChronicleConfig {
    fn default() -> Self {
        Self {
            app_title: "Admiral's Chronicle".into(),
            version: "1.0.0".into(),
            environment: Environment::Development,
            api_base_url: "http://localhost:3000".into(),
            storage_dir: PathBuf::from(".chronicle"),
            waitlist_bind: "127.0.0.1:3000".into(),
            company_name: "OS1000 Educational Systems".into(),
        }
    }
}

impl ChronicleConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ChronicleConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load defaults, then the TOML file (if given), then env overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = fs::read_to_string(path)?;
                Self::from_toml_str(&content)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `CHRONICLE_*` overrides read through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(env) = lookup("CHRONICLE_ENVIRONMENT") {
            self.environment = Environment::parse(&env).ok_or_else(|| {
                ChronicleError::InvalidConfig(format!("unknown environment '{}'", env))
            })?;
        }
        if let Some(url) = lookup("CHRONICLE_API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(dir) = lookup("CHRONICLE_STORAGE_DIR") {
            self.storage_dir = PathBuf::from(dir);
        }
        if let Some(bind) = lookup("CHRONICLE_WAITLIST_BIND") {
            self.waitlist_bind = bind;
        }
        Ok(())
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.app_title.trim().is_empty() {
            return Err(ChronicleError::InvalidConfig("app_title must not be empty".into()));
        }
        if self.storage_dir.as_os_str().is_empty() {
            return Err(ChronicleError::InvalidConfig("storage_dir must not be empty".into()));
        }
        self.waitlist_addr()?;
        Ok(())
    }

    pub fn waitlist_addr(&self) -> Result<SocketAddr> {
        self.waitlist_bind.parse().map_err(|e| {
            ChronicleError::InvalidConfig(format!(
                "waitlist_bind '{}' is not a socket address: {}",
                self.waitlist_bind, e
            ))
        })
    }

    pub fn feature_flags(&self) -> FeatureFlags {
        FeatureFlags::for_environment(self.environment)
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<ChronicleConfig> = OnceLock::new();

/// Get the global config (initializes with defaults if not set)
pub fn config() -> &'static ChronicleConfig {
    CONFIG.get_or_init(ChronicleConfig::default)
}

/// Set the global config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: ChronicleConfig) -> std::result::Result<(), ChronicleConfig> {
    CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ChronicleConfig::default().validate().is_ok());
    }

    #[test]
    fn test_toml_overrides_only_given_keys() {
        let config = ChronicleConfig::from_toml_str(
            r#"
            environment = "public"
            waitlist_bind = "0.0.0.0:8080"
            "#,
        )
        .unwrap();

        assert_eq!(config.environment, Environment::Public);
        assert_eq!(config.waitlist_bind, "0.0.0.0:8080");
        assert_eq!(config.app_title, "Admiral's Chronicle");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let result = ChronicleConfig::from_toml_str("environment = ");
        assert!(matches!(result, Err(ChronicleError::TomlError(_))));
    }

    #[test]
    fn test_env_overrides_win() {
        let vars: HashMap<&str, &str> = [
            ("CHRONICLE_ENVIRONMENT", "production"),
            ("CHRONICLE_STORAGE_DIR", "/tmp/chronicle"),
        ]
        .into_iter()
        .collect();

        let mut config = ChronicleConfig::default();
        config
            .apply_env_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/chronicle"));
    }

    #[test]
    fn test_unknown_environment_rejected() {
        let mut config = ChronicleConfig::default();
        let result = config.apply_env_overrides(|key| {
            (key == "CHRONICLE_ENVIRONMENT").then(|| "moon".to_string())
        });
        assert!(matches!(result, Err(ChronicleError::InvalidConfig(_))));
    }

    #[test]
    fn test_bad_bind_address_fails_validation() {
        let config = ChronicleConfig {
            waitlist_bind: "not an address".into(),
            ..ChronicleConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_feature_flags_follow_environment() {
        let public = FeatureFlags::for_environment(Environment::Public);
        assert!(!public.show_internal_tools);
        assert!(!public.enable_advanced_features);
        assert!(public.show_powered_by);

        let production = FeatureFlags::for_environment(Environment::Production);
        assert!(!production.show_internal_tools);
        assert!(!production.show_debug_info);
        assert!(production.enable_advanced_features);

        let dev = FeatureFlags::for_environment(Environment::Development);
        assert!(dev.show_internal_tools);
        assert!(dev.show_debug_info);
        assert!(!dev.show_powered_by);
    }
}
