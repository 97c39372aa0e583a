/// Auction API connection settings and HTTP client construction
pub mod api;

/// Application settings loaded from config.toml
pub mod settings;

pub use settings::{AppConfig, load_app_configuration};
