//! Plugin configuration.

use std::path::Path;

use multiview_common::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Plugin-level settings, loaded from TOML. Every field has a default so
/// a partial file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Applied to created webviews whose options carry no user agent.
    pub default_user_agent: Option<String>,
    /// Bound of the lifecycle event broadcast channel.
    pub event_capacity: usize,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            default_user_agent: None,
            event_capacity: 64,
        }
    }
}

impl PluginConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("loaded plugin config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.event_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "event_capacity must be nonzero".into(),
            ));
        }
        Ok(())
    }
}
