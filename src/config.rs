use std::path::Path;

use tracing::warn;

use crate::ai::AiConfig;
use crate::error::ConfigError;
use crate::session::{ScoringConfig, SessionConfig};

/// Deepest search the engine accepts; deeper trees stop being interactive.
pub const MAX_SEARCH_DEPTH: u32 = 8;

/// Longest artificial pause before the Computer replies.
pub const MAX_COMPUTER_DELAY_MS: u64 = 10_000;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ai: AiConfig,
    pub session: SessionConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SEARCH_DEPTH).contains(&self.ai.hard_depth) {
            return Err(ConfigError::Validation(format!(
                "ai.hard_depth must be in 1..={MAX_SEARCH_DEPTH}"
            )));
        }
        if !(1..=MAX_SEARCH_DEPTH).contains(&self.ai.medium_depth) {
            return Err(ConfigError::Validation(format!(
                "ai.medium_depth must be in 1..={MAX_SEARCH_DEPTH}"
            )));
        }
        if !(0.0..=1.0).contains(&self.ai.medium_search_probability) {
            return Err(ConfigError::Validation(
                "ai.medium_search_probability must be in [0, 1]".into(),
            ));
        }
        if self.session.computer_delay_ms > MAX_COMPUTER_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "session.computer_delay_ms must be <= {MAX_COMPUTER_DELAY_MS}"
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).unwrap_or_default()
    }
}
