//! Payment records and their reconciliation against a bidder's history.
//!
//! A PARTIAL payment is settled once a PULL_OUT with the same receipt number
//! shows up anywhere in the bidder's transactions. That is a join over the whole
//! history, not a stored flag, so it is recomputed on every fetch.

use crate::core::{bidder::UnpaidItem, money::Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

/// Why a payment was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentPurpose {
    /// Full settlement; the bidder collects the items
    PullOut,
    /// Registration fee paid on joining an auction
    Registration,
    /// Registration fee handed back
    Refunded,
    /// Part of a balance, to be settled by a later pull-out
    Partial,
    /// Deduction applied against the balance
    Less,
}

impl PaymentPurpose {
    /// Human-readable label used on receipts and in lists.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PullOut => "Pull-out",
            Self::Registration => "Registration",
            Self::Refunded => "Refunded",
            Self::Partial => "Partial",
            Self::Less => "Less",
        }
    }
}

impl fmt::Display for PaymentPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A payment as recorded by the auction system. Read-only on this side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Payment id
    pub payment_id: i64,
    /// Registration the payment was taken under, when the API reports it
    pub auction_bidders_id: Option<i64>,
    /// What the payment was for
    pub purpose: PaymentPurpose,
    /// Receipt number; shared by a PARTIAL and the PULL_OUT that settles it
    pub receipt_number: String,
    /// Amount received (or handed back, for refunds)
    pub amount_paid: Money,
    /// When the payment was recorded, if the API reported it
    pub created_at: Option<DateTime<Utc>>,
    /// Items covered by this payment
    pub auction_inventories: Vec<UnpaidItem>,
}

/// Reconciled state of a payment within a history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementState {
    /// A PARTIAL that has a matching PULL_OUT
    Settled,
    /// A PARTIAL still waiting for its PULL_OUT
    Outstanding,
    /// Any other purpose; settlement does not apply
    NotApplicable,
}

/// A payment paired with its reconciled state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentWithState<'a> {
    /// The payment record
    pub payment: &'a Payment,
    /// Its state within the history it came from
    pub state: SettlementState,
}

/// Returns true iff `all_transactions` contains a PULL_OUT with the target's
/// receipt number. Order does not matter; an empty history is never settled.
#[must_use]
pub fn is_settled(target: &Payment, all_transactions: &[Payment]) -> bool {
    all_transactions.iter().any(|tx| {
        tx.purpose == PaymentPurpose::PullOut && tx.receipt_number == target.receipt_number
    })
}

/// Tags every payment in a history with its [`SettlementState`].
///
/// Output order matches input order.
#[must_use]
pub fn annotate_history(all_transactions: &[Payment]) -> Vec<PaymentWithState<'_>> {
    let pulled_out: HashSet<&str> = all_transactions
        .iter()
        .filter(|tx| tx.purpose == PaymentPurpose::PullOut)
        .map(|tx| tx.receipt_number.as_str())
        .collect();

    all_transactions
        .iter()
        .map(|payment| {
            let state = match payment.purpose {
                PaymentPurpose::Partial if pulled_out.contains(payment.receipt_number.as_str()) => {
                    SettlementState::Settled
                }
                PaymentPurpose::Partial => SettlementState::Outstanding,
                _ => SettlementState::NotApplicable,
            };
            PaymentWithState { payment, state }
        })
        .collect()
}

/// Sum of PARTIAL payments not yet settled by a pull-out, across every
/// registration in the history.
#[must_use]
pub fn outstanding_partial_total(all_transactions: &[Payment]) -> Money {
    outstanding_partials(all_transactions, |_| true)
}

/// Sum of unsettled PARTIAL payments taken under one registration.
///
/// This is the amount already paid toward that registration's next pull-out.
/// Partials without a registration id are not counted.
#[must_use]
pub fn outstanding_partial_total_for(
    all_transactions: &[Payment],
    auction_bidders_id: i64,
) -> Money {
    outstanding_partials(all_transactions, |payment| {
        payment.auction_bidders_id == Some(auction_bidders_id)
    })
}

fn outstanding_partials(
    all_transactions: &[Payment],
    belongs: impl Fn(&Payment) -> bool,
) -> Money {
    annotate_history(all_transactions)
        .iter()
        .filter(|entry| entry.state == SettlementState::Outstanding && belongs(entry.payment))
        .map(|entry| entry.payment.amount_paid)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::payment;

    #[test]
    fn test_is_settled_empty_history() {
        let partial = payment(1, PaymentPurpose::Partial, "A-1", 500);
        assert!(!is_settled(&partial, &[]));
    }

    #[test]
    fn test_is_settled_scenario() {
        let history = vec![
            payment(1, PaymentPurpose::Partial, "A-1", 500),
            payment(2, PaymentPurpose::PullOut, "A-1", 950),
        ];
        assert!(is_settled(&history[0], &history));
    }

    #[test]
    fn test_is_settled_ignores_order() {
        let history = vec![
            payment(2, PaymentPurpose::PullOut, "A-1", 950),
            payment(3, PaymentPurpose::Registration, "R-9", 200),
            payment(1, PaymentPurpose::Partial, "A-1", 500),
        ];
        assert!(is_settled(&history[2], &history));
    }

    #[test]
    fn test_is_settled_requires_pull_out_and_matching_receipt() {
        let partial = payment(1, PaymentPurpose::Partial, "A-1", 500);
        let history = vec![
            partial.clone(),
            payment(2, PaymentPurpose::Partial, "A-1", 100),
            payment(3, PaymentPurpose::Refunded, "A-1", 200),
            payment(4, PaymentPurpose::PullOut, "A-2", 800),
        ];
        assert!(!is_settled(&partial, &history));
    }

    #[test]
    fn test_is_settled_does_not_touch_input() {
        let history = vec![
            payment(2, PaymentPurpose::PullOut, "B-7", 950),
            payment(1, PaymentPurpose::Partial, "B-7", 500),
        ];
        let before = history.clone();
        let _ = is_settled(&history[1], &history);
        assert_eq!(history, before);
    }

    #[test]
    fn test_annotate_history_states() {
        let history = vec![
            payment(1, PaymentPurpose::Partial, "A-1", 500),
            payment(2, PaymentPurpose::Partial, "A-2", 300),
            payment(3, PaymentPurpose::PullOut, "A-1", 950),
            payment(4, PaymentPurpose::Registration, "R-1", 200),
        ];
        let states: Vec<(i64, SettlementState)> = annotate_history(&history)
            .iter()
            .map(|entry| (entry.payment.payment_id, entry.state))
            .collect();

        assert_eq!(
            states,
            vec![
                (1, SettlementState::Settled),
                (2, SettlementState::Outstanding),
                (3, SettlementState::NotApplicable),
                (4, SettlementState::NotApplicable),
            ]
        );
    }

    #[test]
    fn test_outstanding_partial_total() {
        let history = vec![
            payment(1, PaymentPurpose::Partial, "A-1", 500),
            payment(2, PaymentPurpose::Partial, "A-2", 300),
            payment(3, PaymentPurpose::Partial, "A-3", 150),
            payment(4, PaymentPurpose::PullOut, "A-1", 950),
        ];
        assert_eq!(outstanding_partial_total(&history), Money::from_units(450));
        assert_eq!(outstanding_partial_total(&[]), Money::ZERO);
    }

    #[test]
    fn test_outstanding_partial_total_for_one_registration() {
        let mut other = payment(5, PaymentPurpose::Partial, "B-1", 700);
        other.auction_bidders_id = Some(52);
        let mut unlinked = payment(6, PaymentPurpose::Partial, "C-1", 90);
        unlinked.auction_bidders_id = None;
        let history = vec![
            payment(1, PaymentPurpose::Partial, "A-1", 500),
            payment(2, PaymentPurpose::Partial, "A-2", 300),
            payment(3, PaymentPurpose::PullOut, "A-1", 950),
            other,
            unlinked,
        ];

        assert_eq!(
            outstanding_partial_total_for(&history, 41),
            Money::from_units(300)
        );
        assert_eq!(
            outstanding_partial_total_for(&history, 52),
            Money::from_units(700)
        );
        assert_eq!(outstanding_partial_total(&history), Money::from_units(1090));
    }

    #[test]
    fn test_purpose_wire_names() {
        let purposes: Vec<PaymentPurpose> =
            serde_json::from_str(r#"["PULL_OUT","REGISTRATION","REFUNDED","PARTIAL","LESS"]"#)
                .unwrap_or_default();
        assert_eq!(
            purposes,
            vec![
                PaymentPurpose::PullOut,
                PaymentPurpose::Registration,
                PaymentPurpose::Refunded,
                PaymentPurpose::Partial,
                PaymentPurpose::Less,
            ]
        );
        assert_eq!(PaymentPurpose::PullOut.to_string(), "Pull-out");
    }
}
