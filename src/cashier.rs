//! Cashier workflows - fetch, compute, and (for pull-outs) submit then re-fetch.
//!
//! These are the operations the presentation layer calls. Each one reads the
//! latest snapshot from the auction API and derives everything else through the
//! pure functions in [`crate::core`]; nothing is cached between calls.

use crate::{
    api::AuctionApi,
    core::{
        BidderRegistration, Money, Payment, PaymentPurpose, SettlementResult, SettlementState,
        payment,
        receipt::{self, ReceiptLine, ReceiptTotals, RefundLine},
        settlement,
    },
    entities::PullOutRequest,
    errors::{Error, Result},
};
use tracing::{debug, info, instrument};

/// A registration with its current settlement.
#[derive(Debug, Clone)]
pub struct SettlementView {
    /// Registration as fetched
    pub registration: BidderRegistration,
    /// Unsettled PARTIAL payments already received from this bidder
    pub amount_already_paid: Money,
    /// Settlement over every unpaid item
    pub settlement: SettlementResult,
}

/// Result of submitting a pull-out.
#[derive(Debug, Clone)]
pub struct PullOutOutcome {
    /// The payment the API recorded
    pub payment: Payment,
    /// Settlement of the selected items, as submitted
    pub submitted: SettlementResult,
    /// Registration re-fetched after the API applied the payment
    pub registration_after: BidderRegistration,
}

/// One entry of a bidder's reconciled history.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// The payment
    pub payment: Payment,
    /// Whether a PARTIAL has been settled by a pull-out
    pub state: SettlementState,
}

/// A projected pull-out receipt.
#[derive(Debug, Clone)]
pub struct ReceiptDocument {
    /// Payment the receipt is for
    pub payment: Payment,
    /// Numbered lines
    pub lines: Vec<ReceiptLine>,
    /// Footer totals
    pub totals: ReceiptTotals,
}

/// A projected refund slip.
#[derive(Debug, Clone)]
pub struct RefundDocument {
    /// Payment the refund is for
    pub payment: Payment,
    /// Numbered lines
    pub lines: Vec<RefundLine>,
    /// Footer totals
    pub totals: ReceiptTotals,
}

/// Fetches a registration and the bidder's history and computes what is owed.
///
/// Unsettled PARTIAL payments taken under this registration count as already
/// paid toward the balance; partials from the bidder's other registrations do
/// not.
#[instrument(skip(api))]
pub async fn settlement_for<A: AuctionApi>(
    api: &A,
    auction_bidders_id: i64,
) -> Result<SettlementView> {
    let registration = api.registration(auction_bidders_id).await?;
    let history = api.transactions(registration.bidder_id).await?;
    let amount_already_paid =
        payment::outstanding_partial_total_for(&history, registration.auction_bidders_id);
    let settlement = registration.settlement(amount_already_paid)?;

    debug!(
        "Registration {auction_bidders_id}: grand total {}, balance {}",
        settlement.grand_total, settlement.balance
    );

    Ok(SettlementView {
        registration,
        amount_already_paid,
        settlement,
    })
}

/// Submits a pull-out for the given items (all unpaid items when `item_ids` is
/// empty) and re-fetches the registration.
///
/// The intent is sent as `PULL_OUT` when `amount_tendered` covers the balance
/// and as `PARTIAL` otherwise.
///
/// # Errors
/// * [`Error::InvalidAmount`] for a negative tendered amount
/// * [`Error::NotFound`] when an id is not an unpaid item of this registration
#[instrument(skip(api))]
pub async fn pull_out<A: AuctionApi>(
    api: &A,
    auction_bidders_id: i64,
    item_ids: &[i64],
    amount_tendered: Money,
) -> Result<PullOutOutcome> {
    if amount_tendered.is_negative() {
        return Err(Error::InvalidAmount {
            amount: amount_tendered.amount().to_string(),
            reason: "tendered amount must not be negative".to_string(),
        });
    }

    let registration = api.registration(auction_bidders_id).await?;
    let selected = if item_ids.is_empty() {
        registration.unpaid_items().cloned().collect()
    } else {
        let selected = registration.select_items(item_ids);
        if let Some(missing) = item_ids.iter().find(|id| {
            !selected
                .iter()
                .any(|item| item.id == **id && item.is_outstanding())
        }) {
            return Err(Error::NotFound {
                what: format!("Unpaid item {missing} under registration {auction_bidders_id}"),
            });
        }
        selected
    };

    let history = api.transactions(registration.bidder_id).await?;
    let already_paid =
        payment::outstanding_partial_total_for(&history, registration.auction_bidders_id);
    let submitted = settlement::compute_settlement(
        &selected,
        registration.service_charge_percent,
        registration.registration_fee,
        registration.already_consumed_registration,
        already_paid,
    )?;

    let purpose = if amount_tendered >= submitted.balance {
        PaymentPurpose::PullOut
    } else {
        PaymentPurpose::Partial
    };
    let request = PullOutRequest {
        item_ids: selected.iter().map(|item| item.id).collect(),
        amount_paid: amount_tendered,
        purpose,
    };

    let payment = api.submit_pull_out(auction_bidders_id, &request).await?;
    info!(
        "Recorded {} payment {} ({}) for registration {auction_bidders_id}",
        payment.purpose, payment.payment_id, payment.receipt_number
    );

    let registration_after = api.registration(auction_bidders_id).await?;

    Ok(PullOutOutcome {
        payment,
        submitted,
        registration_after,
    })
}

/// Fetches a bidder's payments and reconciles each against the whole history.
#[instrument(skip(api))]
pub async fn history<A: AuctionApi>(api: &A, bidder_id: i64) -> Result<Vec<HistoryEntry>> {
    let payments = api.transactions(bidder_id).await?;
    let states: Vec<SettlementState> = payment::annotate_history(&payments)
        .iter()
        .map(|entry| entry.state)
        .collect();

    Ok(payments
        .into_iter()
        .zip(states)
        .map(|(payment, state)| HistoryEntry { payment, state })
        .collect())
}

/// Fetches a payment and projects its receipt.
#[instrument(skip(api))]
pub async fn receipt<A: AuctionApi>(api: &A, payment_id: i64) -> Result<ReceiptDocument> {
    let payment = api.payment(payment_id).await?;
    let lines = receipt::project_receipt_lines(&payment);
    let totals = ReceiptTotals::of_receipt(&lines);
    Ok(ReceiptDocument {
        payment,
        lines,
        totals,
    })
}

/// Fetches a payment and projects its refund slip.
#[instrument(skip(api))]
pub async fn refund_slip<A: AuctionApi>(api: &A, payment_id: i64) -> Result<RefundDocument> {
    let payment = api.payment(payment_id).await?;
    if payment.purpose != PaymentPurpose::Refunded {
        debug!(
            "Projecting a refund slip for a {} payment {payment_id}",
            payment.purpose
        );
    }
    let lines = receipt::project_refund_lines(&payment);
    let totals = ReceiptTotals::of_refund(&lines);
    Ok(RefundDocument {
        payment,
        lines,
        totals,
    })
}
