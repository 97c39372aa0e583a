//! Application settings loaded from config.toml
//!
//! Every section and field has a default, so an absent or partial config file is
//! fine. Secrets never live here; see [`crate::config::api`] for the
//! environment-provided ones.

use crate::{
    core::{money::DEFAULT_CURRENCY_SYMBOL, receipt::RECEIPT_ROWS_PER_PAGE},
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming the config file to load.
pub const CONFIG_PATH_ENV: &str = "AUCTION_DESK_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote auction API
    pub api: ApiConfig,
    /// Display preferences
    pub display: DisplayConfig,
    /// Receipt document settings
    pub receipt: ReceiptConfig,
}

/// `[api]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, without a trailing slash
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_secs: 15,
        }
    }
}

/// `[display]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Symbol put in front of every amount
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

/// `[receipt]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReceiptConfig {
    /// Lines per receipt page
    pub rows_per_page: usize,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            rows_per_page: RECEIPT_ROWS_PER_PAGE,
        }
    }
}

impl AppConfig {
    /// Rejects values the rest of the desk cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(Error::Config {
                message: "api.base_url must not be empty".to_string(),
            });
        }
        if self.api.timeout_secs == 0 {
            return Err(Error::Config {
                message: "api.timeout_secs must be at least 1".to_string(),
            });
        }
        if self.receipt.rows_per_page == 0 {
            return Err(Error::Config {
                message: "receipt.rows_per_page must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Parses and validates configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A value fails validation
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Loads the application configuration.
///
/// Reads the file named by `AUCTION_DESK_CONFIG` (default `./config.toml`). A
/// missing default file falls back to built-in defaults; a missing file that was
/// asked for explicitly is an error. `AUCTION_API_URL` overrides `api.base_url`.
pub fn load_app_configuration() -> Result<AppConfig> {
    let explicit = std::env::var(CONFIG_PATH_ENV).ok();
    let path = explicit.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

    let mut config = if explicit.is_none() && !Path::new(path).exists() {
        info!("No {DEFAULT_CONFIG_PATH} found, using default configuration.");
        AppConfig::default()
    } else {
        load_config(path)?
    };

    if let Some(url) = crate::config::api::api_url_override() {
        info!("Using auction API URL from the environment.");
        config.api.base_url = url;
    }
    config.validate()?;
    Ok(config)
}
