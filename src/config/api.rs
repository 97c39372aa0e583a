//! Auction API connection settings.
//!
//! The base URL comes from config.toml (optionally overridden by
//! `AUCTION_API_URL`); the bearer token only ever comes from the environment.

use crate::{config::settings::ApiConfig, errors::Result};
use std::time::Duration;

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "AUCTION_API_URL";

/// Environment variable holding the API bearer token.
pub const API_TOKEN_ENV: &str = "AUCTION_API_TOKEN";

/// Returns the base URL override from the environment, if set and non-blank.
#[must_use]
pub fn api_url_override() -> Option<String> {
    std::env::var(API_URL_ENV)
        .ok()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
}

/// Returns the bearer token from the environment, if set and non-blank.
#[must_use]
pub fn get_api_token() -> Option<String> {
    std::env::var(API_TOKEN_ENV)
        .ok()
        .filter(|token| !token.trim().is_empty())
}

/// Normalizes a base URL so endpoint paths can be appended with `/`.
#[must_use]
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Builds the shared HTTP client used for every API call.
pub fn create_http_client(config: &ApiConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(concat!("auction-desk/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(Into::into)
}
