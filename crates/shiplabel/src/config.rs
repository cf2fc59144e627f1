//! Configuration management for shiplabel.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "shiplabel";

/// Environment variable prefix. Nested keys are separated by `__`,
/// e.g. `SHIPLABEL_ENCODER__BASE_URL`.
const ENV_PREFIX: &str = "SHIPLABEL_";

/// Base URL of the order details view.
pub const DEFAULT_BASE_URL: &str = "https://nostalgic-kare5-smhcp.dev.tempolabs.ai/pedido";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `SHIPLABEL_`)
/// 2. TOML config file at `~/.config/shiplabel/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Identifier encoding configuration.
    pub encoder: EncoderConfig,
    /// Output configuration.
    pub output: OutputConfig,
}

/// Identifier encoding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Base URL identifiers are built on; the order number is appended as
    /// the last path segment.
    pub base_url: String,
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format for decoded and recovered records.
    pub format: OutputFormat,
}

/// Output format for records.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// JSON output
    Json,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let base_url = self.encoder.base_url.trim();
        if base_url.is_empty() {
            return Err(Error::config_validation("encoder.base_url must not be empty"));
        }

        let url = Url::parse(base_url).map_err(|e| {
            Error::config_validation(format!("encoder.base_url ({base_url}) is not a URL: {e}"))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config_validation(format!(
                "encoder.base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(Error::config_validation(
                "encoder.base_url must not carry a query or fragment",
            ));
        }

        Ok(())
    }
}
