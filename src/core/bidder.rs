//! Bidder-side domain types: items assigned to a bidder and the bidder's
//! registration for a single auction.

use crate::{
    core::{
        money::Money,
        settlement::{self, SettlementResult},
    },
    errors::Result,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

/// Where an assigned item stands in the bidder's account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    /// Won or assigned, not yet paid for
    Unpaid,
    /// Included in a settled pull-out
    Paid,
    /// Cancelled; no longer owed
    Cancelled,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unpaid => "UNPAID",
            Self::Paid => "PAID",
            Self::Cancelled => "CANCELLED",
        };
        f.write_str(label)
    }
}

/// An auction inventory item assigned to a bidder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpaidItem {
    /// Auction inventory id
    pub id: i64,
    /// Hammer price
    pub price: Money,
    /// Payment status
    pub status: ItemStatus,
    /// Printed barcode, if the item has been tagged
    pub barcode: Option<String>,
    /// Supplier control number
    pub control_number: Option<String>,
    /// Free-text description from the manifest
    pub description: String,
}

impl UnpaidItem {
    /// Whether this item still counts toward the bidder's balance.
    #[must_use]
    pub fn is_outstanding(&self) -> bool {
        self.status == ItemStatus::Unpaid
    }
}

/// A bidder's registration in one auction, with the items assigned under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidderRegistration {
    /// Registration id (bidder x auction)
    pub auction_bidders_id: i64,
    /// Bidder id
    pub bidder_id: i64,
    /// Bidder paddle number shown on receipts
    pub bidder_number: String,
    /// Bidder display name
    pub full_name: String,
    /// Service charge rate, in percent
    pub service_charge_percent: Decimal,
    /// One-time registration fee
    pub registration_fee: Money,
    /// Set once the registration fee has been applied to a settlement
    pub already_consumed_registration: bool,
    /// Items assigned under this registration, in any status
    pub items: Vec<UnpaidItem>,
}

impl BidderRegistration {
    /// Items still owed by the bidder.
    pub fn unpaid_items(&self) -> impl Iterator<Item = &UnpaidItem> {
        self.items.iter().filter(|item| item.is_outstanding())
    }

    /// Looks up assigned items by id, keeping the requested order.
    ///
    /// Ids that are not assigned to this registration are skipped, and an id
    /// given more than once selects its item only once.
    #[must_use]
    pub fn select_items(&self, ids: &[i64]) -> Vec<UnpaidItem> {
        let mut seen = HashSet::with_capacity(ids.len());
        ids.iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| self.items.iter().find(|item| item.id == *id))
            .cloned()
            .collect()
    }

    /// Settlement over every unpaid item of this registration.
    pub fn settlement(&self, amount_paid: Money) -> Result<SettlementResult> {
        settlement::compute_settlement(
            &self.items,
            self.service_charge_percent,
            self.registration_fee,
            self.already_consumed_registration,
            amount_paid,
        )
    }
}
