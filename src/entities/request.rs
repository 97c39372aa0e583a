//! Intents submitted to the API. The API decides; the desk re-fetches after.

use crate::core::{money::Money, payment::PaymentPurpose};
use serde::{Deserialize, Serialize};

/// `POST /auction-bidders/{id}/pull-out`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullOutRequest {
    /// Auction inventory ids being paid for
    pub item_ids: Vec<i64>,
    /// Amount tendered
    pub amount_paid: Money,
    /// `PULL_OUT` for a full settlement, `PARTIAL` otherwise
    pub purpose: PaymentPurpose,
}
