use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Tunables for the generated script. Fields missing from a config file keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Pause after launching a browser, in seconds.
    pub settle_seconds: u64,
    /// User agent Chrome reports instead of its headless/automation default.
    pub user_agent: String,
    pub window_size: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            settle_seconds: 2,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            window_size: "1920,1080".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid generator config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GeneratorOptions {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }
}
