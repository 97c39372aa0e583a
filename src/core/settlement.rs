//! Settlement business logic - what a bidder owes at pull-out time.
//!
//! ```text
//! total_item_price      = sum(price of UNPAID items)
//! service_charge_amount = total_item_price * service_charge_percent / 100
//! grand_total           = total_item_price + service_charge_amount
//!                         - (already consumed ? 0 : registration_fee)
//! balance               = grand_total - amount_paid
//! ```
//!
//! Every screen that shows a breakdown goes through [`compute_settlement`] so the
//! figures agree everywhere. Nothing is rounded here; see
//! [`crate::core::money::format_money`].

use crate::{
    core::{bidder::UnpaidItem, money::Money},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use serde::Serialize;

/// Derived settlement figures for one bidder registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettlementResult {
    /// Sum of unpaid item prices
    pub total_item_price: Money,
    /// Service charge on the item total
    pub service_charge_amount: Money,
    /// Registration fee taken off this settlement (zero once consumed)
    pub registration_deduction: Money,
    /// Item total plus service charge, less the registration deduction
    pub grand_total: Money,
    /// What remains after `amount_paid`; negative means a refund is owed
    pub balance: Money,
}

impl SettlementResult {
    /// True when the bidder is owed money back.
    #[must_use]
    pub fn is_refund(&self) -> bool {
        self.balance.is_negative()
    }
}

/// Computes the settlement for a set of items.
///
/// Only items with status `UNPAID` are counted. An empty item list is valid and
/// yields a grand total of `-registration_fee` when the fee has not been
/// consumed yet (a refund-only settlement).
///
/// # Errors
/// * [`Error::InvalidServiceCharge`] for a negative percentage
/// * [`Error::InvalidAmount`] for a negative item price or registration fee
pub fn compute_settlement(
    items: &[UnpaidItem],
    service_charge_percent: Decimal,
    registration_fee: Money,
    already_consumed: bool,
    amount_paid: Money,
) -> Result<SettlementResult> {
    if service_charge_percent < Decimal::ZERO {
        return Err(Error::InvalidServiceCharge {
            percent: service_charge_percent.to_string(),
        });
    }
    if registration_fee.is_negative() {
        return Err(Error::InvalidAmount {
            amount: registration_fee.amount().to_string(),
            reason: "registration fee must not be negative".to_string(),
        });
    }
    if let Some(item) = items.iter().find(|item| item.price.is_negative()) {
        return Err(Error::InvalidAmount {
            amount: item.price.amount().to_string(),
            reason: format!("item {} has a negative price", item.id),
        });
    }

    let total_item_price: Money = items
        .iter()
        .filter(|item| item.is_outstanding())
        .map(|item| item.price)
        .sum();
    let service_charge_amount = total_item_price.percent_of(service_charge_percent);
    let registration_deduction = if already_consumed {
        Money::ZERO
    } else {
        registration_fee
    };
    let grand_total = total_item_price + service_charge_amount - registration_deduction;

    Ok(SettlementResult {
        total_item_price,
        service_charge_amount,
        registration_deduction,
        grand_total,
        balance: grand_total - amount_paid,
    })
}
