//! CLI configuration

use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use share_engine::SessionConfig;
use std::path::PathBuf;

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    /// Starting pool and add-mode defaults
    #[serde(default)]
    pub session: SessionConfig,

    /// Default output format
    pub output: Option<OutputFormat>,
}

impl CliConfig {
    /// Load configuration from file
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            Self::parse(&contents)
        } else {
            Ok(CliConfig::default())
        }
    }

    fn parse(contents: &str) -> CliResult<Self> {
        let config: CliConfig =
            toml::from_str(contents).map_err(|e| CliError::Config(e.to_string()))?;
        config
            .session
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Get the default configuration file path
    fn default_config_path() -> CliResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Cannot find config directory".into()))?;
        Ok(config_dir.join("share").join("config.toml"))
    }
}
