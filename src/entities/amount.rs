//! Amounts as the API sends them: JSON numbers or locale-formatted strings.

use crate::{
    core::money::{self, Money},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A money or percentage value straight off the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireAmount {
    /// `"₱1,234.00"`, `"1234.00"`, `"10%"`
    Text(String),
    /// `1234`
    Integer(i64),
    /// `1234.5`
    Float(f64),
}

impl WireAmount {
    /// Parses the value as money.
    ///
    /// Floats go through their shortest decimal representation, so `1234.56`
    /// becomes exactly `1234.56`.
    pub fn to_money(&self) -> Result<Money> {
        match self {
            Self::Text(text) => money::parse_money(text),
            Self::Integer(value) => Ok(Money::from_units(*value)),
            Self::Float(value) => {
                let text = value.to_string();
                Decimal::from_str(&text)
                    .map(Money::new)
                    .map_err(|_| Error::MalformedMoney { input: text })
            }
        }
    }

    /// Parses the value as a percentage; a trailing `%` is allowed.
    pub fn to_percent(&self) -> Result<Decimal> {
        match self {
            Self::Text(text) => {
                let trimmed = text.trim();
                let bare = trimmed.strip_suffix('%').unwrap_or(trimmed);
                money::parse_money(bare).map(Money::amount)
            }
            other => other.to_money().map(Money::amount),
        }
    }
}
