use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use super::interpolation::{
    interpolate_toml,
    InterpolationError,
};
use super::schema::SwitchboardConfig;

/// Overrides config discovery when set
pub const CONFIG_PATH_ENV: &str = "SWITCHBOARD_CONFIG_PATH";

const CONFIG_FILE_NAME: &str = "switchboard.toml";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Environment variable interpolation failed: {0}")]
    InterpolationError(#[from] InterpolationError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type ConfigLoadResult<T> = Result<T, ConfigLoadError>;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Environment override, then the user config dir, then the working directory
    pub fn discover_config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            tracing::debug!("Using config path from {CONFIG_PATH_ENV}: {path}");
            return PathBuf::from(path);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("switchboard").join("config.toml");
            if path.exists() {
                tracing::debug!("Using user config path: {}", path.display());
                return path;
            }
        }

        let fallback = PathBuf::from(CONFIG_FILE_NAME);
        tracing::debug!("Using fallback config path: {}", fallback.display());
        fallback
    }

    pub fn load_default() -> ConfigLoadResult<SwitchboardConfig> {
        Self::load(&Self::discover_config_path())
    }

    pub fn load(path: &Path) -> ConfigLoadResult<SwitchboardConfig> {
        if !path.exists() {
            return Err(ConfigLoadError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Interpolates, deserializes and validates
    pub fn parse(content: &str) -> ConfigLoadResult<SwitchboardConfig> {
        let mut value: toml::Value = toml::from_str(content)?;

        interpolate_toml(&mut value)?;

        let config: SwitchboardConfig = value.try_into().map_err(|e| {
            ConfigLoadError::InvalidConfig(format!("Failed to deserialize config: {e}"))
        })?;

        let errors = config.validation_errors();
        if !errors.is_empty() {
            return Err(ConfigLoadError::InvalidConfig(errors.join("; ")));
        }

        tracing::debug!(
            base_url = %config.platform.base_url,
            resource_types = config.export.resource_types.len(),
            "Loaded config"
        );

        Ok(config)
    }
}
