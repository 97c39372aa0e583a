//! Payment record - `GET /payments/{id}` and `GET /bidders/{id}/payments`.

use crate::{
    core::{
        bidder::UnpaidItem,
        payment::{Payment, PaymentPurpose},
    },
    entities::{amount::WireAmount, registration::InventoryRecord},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A payment as the API reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Payment id
    pub payment_id: i64,
    /// Registration the payment was taken under
    #[serde(default)]
    pub auction_bidders_id: Option<i64>,
    /// What the payment was for
    pub purpose: PaymentPurpose,
    /// Receipt number
    pub receipt_number: String,
    /// Amount received
    pub amount_paid: WireAmount,
    /// Recording time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Items covered
    #[serde(default)]
    pub auction_inventories: Vec<InventoryRecord>,
}

impl TryFrom<PaymentRecord> for Payment {
    type Error = Error;

    fn try_from(record: PaymentRecord) -> Result<Self> {
        let auction_inventories = record
            .auction_inventories
            .into_iter()
            .map(UnpaidItem::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            payment_id: record.payment_id,
            auction_bidders_id: record.auction_bidders_id,
            purpose: record.purpose,
            receipt_number: record.receipt_number.trim().to_string(),
            amount_paid: record.amount_paid.to_money()?,
            created_at: record.created_at,
            auction_inventories,
        })
    }
}

/// Converts a whole history, failing on the first bad record.
pub fn into_payments(records: Vec<PaymentRecord>) -> Result<Vec<Payment>> {
    records.into_iter().map(Payment::try_from).collect()
}
