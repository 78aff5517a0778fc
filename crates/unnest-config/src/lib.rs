//! # unnest-config
//!
//! Layered configuration loading for unnest using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`UNNEST_*` prefix, `__` as separator)
//! 2. Project-level `.unnest/config.toml`
//! 3. User-level `~/.config/unnest/config.toml`
//! 4. Built-in defaults
//!
//! Command-line flags are applied on top by the CLI.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `UNNEST_TRANSFORM__COUNTER` -> `transform.counter`,
//! `UNNEST_OUTPUT__FORMAT` -> `output.format`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use unnest_config::UnnestConfig;
//!
//! let config = UnnestConfig::load_with_dotenv().expect("config");
//! println!("default ordinal: {}", config.transform.counter);
//! ```

mod error;
mod output;
mod transform;

pub use error::ConfigError;
pub use output::{OutputConfig, OutputFormat};
pub use transform::TransformConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const PROJECT_CONFIG_PATH: &str = ".unnest/config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UnnestConfig {
    #[serde(default)]
    pub transform: TransformConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl UnnestConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env`
    /// support.
    ///
    /// # Errors
    /// Returns [`ConfigError::Figment`] when a source cannot be read or has
    /// the wrong shape, and [`ConfigError::InvalidValue`] when a value is out
    /// of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the working directory.
    ///
    /// # Errors
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env file is not an error.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(PROJECT_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("UNNEST_").split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("unnest").join("config.toml"))
    }

    /// Reject values no run could use.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for a zero counter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transform.counter == 0 {
            return Err(ConfigError::InvalidValue {
                field: "transform.counter".to_string(),
                reason: "instance ordinals start at 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = UnnestConfig::default();
        assert_eq!(config.transform.counter, 1);
        assert!(config.transform.check_diagnostics);
        assert_eq!(config.output.format, OutputFormat::Raw);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_counter_is_invalid() {
        let mut config = UnnestConfig::default();
        config.transform.counter = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "transform.counter"));
    }

    #[test]
    fn global_path_ends_with_unnest_config() {
        if let Some(path) = UnnestConfig::global_config_path() {
            assert!(path.ends_with("unnest/config.toml"));
        }
    }
}
