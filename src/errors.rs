//! Unified error types and result handling.
//!
//! Core calculations only fail on contract violations (negative rates, malformed
//! money strings); everything else here comes from the outer layers.

use thiserror::Error;

/// Every error the desk can surface, from contract violations in the core to
/// transport failures talking to the auction API.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid amount {amount}: {reason}")]
    InvalidAmount { amount: String, reason: String },

    #[error("Invalid service charge {percent}%: must not be negative")]
    InvalidServiceCharge { percent: String },

    #[error("Malformed money value '{input}'")]
    MalformedMoney { input: String },

    #[error("Invalid page size {rows}: must be at least 1")]
    InvalidPageSize { rows: usize },

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("Auction API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
