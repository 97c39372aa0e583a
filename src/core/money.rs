//! Money handling - decimal amounts and their display form.
//!
//! Amounts are kept as `rust_decimal::Decimal` end to end so that the three-line
//! settlement breakdown never accumulates binary floating point error. Rounding
//! to centavos happens only in [`format_money`].

use crate::errors::{Error, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub},
    str::FromStr,
};

/// Currency symbol used when no display configuration is supplied.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₱";

/// Prefixes accepted (and ignored) in front of an amount when parsing.
const CURRENCY_MARKERS: [&str; 3] = ["PHP", "₱", "$"];

/// Number of decimal places shown to users.
const DISPLAY_SCALE: u32 = 2;

/// A decimal money amount. May be negative (refunds, over-payments).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero pesos.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wraps a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Builds an amount from whole currency units.
    #[must_use]
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// The underlying decimal value, unrounded.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Returns true for amounts strictly below zero.
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns true for exactly zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// `self * percent / 100`, without rounding.
    #[must_use]
    pub fn percent_of(self, percent: Decimal) -> Self {
        Self(self.0 * percent / Decimal::ONE_HUNDRED)
    }

    /// Rounded to centavos, half away from zero.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_money(*self, DEFAULT_CURRENCY_SYMBOL))
    }
}

impl FromStr for Money {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_money(s)
    }
}

/// Formats an amount for display, e.g. `₱1,234.50` or `-₱999.99`.
///
/// This is the only place amounts are rounded. A value that rounds to zero is
/// shown without a sign.
#[must_use]
pub fn format_money(amount: Money, symbol: &str) -> String {
    let mut rounded = amount.rounded().0;
    rounded.rescale(DISPLAY_SCALE);

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let digits = rounded.abs().to_string();
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{sign}{symbol}{}.{fraction}", group_thousands(whole))
}

/// Formats an amount with the default currency symbol.
#[must_use]
pub fn format_peso(amount: Money) -> String {
    format_money(amount, DEFAULT_CURRENCY_SYMBOL)
}

/// Parses a locale-formatted amount such as `"₱1,234.00"`, `"-999.99"` or
/// `"PHP 50"`.
///
/// Thousands separators must be well placed; anything else that is not a
/// plain decimal number is rejected with [`Error::MalformedMoney`].
pub fn parse_money(input: &str) -> Result<Money> {
    let malformed = || Error::MalformedMoney {
        input: input.to_string(),
    };

    let mut rest = input.trim();
    let mut negative = false;

    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped.trim_start();
    }
    for marker in CURRENCY_MARKERS {
        if let Some(stripped) = rest.strip_prefix(marker) {
            rest = stripped.trim_start();
            break;
        }
    }
    // Allow the sign after the symbol as well: "₱-50.00"
    if !negative {
        if let Some(stripped) = rest.strip_prefix('-') {
            negative = true;
            rest = stripped;
        }
    }

    let (whole, fraction) = match rest.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (rest, None),
    };

    let whole_digits = strip_thousands(whole).ok_or_else(malformed)?;
    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(malformed());
        }
    }
    if whole_digits.is_empty() && fraction.is_none() {
        return Err(malformed());
    }

    let normalized = match fraction {
        Some(fraction) if whole_digits.is_empty() => format!("0.{fraction}"),
        Some(fraction) => format!("{whole_digits}.{fraction}"),
        None => whole_digits,
    };

    let value = Decimal::from_str(&normalized).map_err(|_| malformed())?;
    Ok(Money(if negative { -value } else { value }))
}

/// Removes thousands separators from the integer part, validating their
/// placement. Returns `None` when the text is not a digit run.
fn strip_thousands(whole: &str) -> Option<String> {
    if !whole.contains(',') {
        return whole
            .chars()
            .all(|c| c.is_ascii_digit())
            .then(|| whole.to_string());
    }

    let mut groups = whole.split(',');
    let first = groups.next()?;
    if first.is_empty() || first.len() > 3 || !first.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let mut digits = first.to_string();
    for group in groups {
        if group.len() != 3 || !group.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn money(text: &str) -> Money {
        Money::new(Decimal::from_str(text).unwrap())
    }

    #[test]
    fn test_format_money_groups_thousands() {
        assert_eq!(format_money(money("1234.5"), "₱"), "₱1,234.50");
        assert_eq!(format_money(money("1234567.891"), "₱"), "₱1,234,567.89");
        assert_eq!(format_money(money("999"), "$"), "$999.00");
        assert_eq!(format_money(Money::ZERO, "₱"), "₱0.00");
    }

    #[test]
    fn test_format_money_negative() {
        assert_eq!(format_peso(money("-999.99")), "-₱999.99");
        assert_eq!(format_peso(money("-1500")), "-₱1,500.00");
    }

    #[test]
    fn test_format_money_rounds_half_away_from_zero() {
        assert_eq!(format_peso(money("1234.565")), "₱1,234.57");
        assert_eq!(format_peso(money("-0.005")), "-₱0.01");
        // Rounds to zero, so no sign is shown
        assert_eq!(format_peso(money("-0.001")), "₱0.00");
    }

    #[test]
    fn test_parse_money_accepts_display_forms() {
        assert_eq!(parse_money("₱1,234.00").unwrap(), money("1234"));
        assert_eq!(parse_money("1,234.00").unwrap(), money("1234.00"));
        assert_eq!(parse_money(" PHP 50 ").unwrap(), money("50"));
        assert_eq!(parse_money("-₱999.99").unwrap(), money("-999.99"));
        assert_eq!(parse_money("₱-999.99").unwrap(), money("-999.99"));
        assert_eq!(parse_money(".5").unwrap(), money("0.5"));
        assert_eq!(parse_money("1000000").unwrap(), money("1000000"));
    }

    #[test]
    fn test_parse_money_rejects_malformed_input() {
        for input in ["", "  ", "abc", "₱", "1,23", "12,3456", "1.2.3", "--5", "1.", "1e5", "₱1,000x"] {
            let result = parse_money(input);
            assert!(
                matches!(result, Err(Error::MalformedMoney { .. })),
                "expected '{input}' to be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn test_money_round_trip() {
        for text in ["0", "0.5", "1234.56", "-999.99"] {
            let value = money(text);
            assert_eq!(parse_money(&format_peso(value)).unwrap(), value, "{text}");
        }
    }

    #[test]
    fn test_money_arithmetic() {
        let total: Money = [money("1000"), money("500.25")].iter().sum();
        assert_eq!(total, money("1500.25"));
        assert_eq!(total - money("2000"), money("-499.75"));
        assert!((total - money("2000")).is_negative());
        assert_eq!(-money("5"), money("-5"));
        assert_eq!(money("1500").percent_of(Decimal::from(10)), money("150"));
        assert_eq!(
            money("333.33").percent_of(Decimal::from_str("12.5").unwrap()),
            money("41.66625")
        );
    }

    #[test]
    fn test_money_display_and_from_str() {
        assert_eq!(money("2500").to_string(), "₱2,500.00");
        assert_eq!("₱2,500.00".parse::<Money>().unwrap(), money("2500"));
    }
}
