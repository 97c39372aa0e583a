//! Shared test utilities for the auction desk.
//!
//! Builders with sensible defaults for core records, and an in-memory
//! [`AuctionApi`] that behaves like the real API for the calls the desk makes.

#![allow(clippy::unwrap_used)]

use crate::{
    api::AuctionApi,
    core::{BidderRegistration, ItemStatus, Money, Payment, PaymentPurpose, UnpaidItem},
    entities::PullOutRequest,
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use std::{
    collections::HashMap,
    str::FromStr,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};
use tracing_subscriber::EnvFilter;

pub(crate) fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with_test_writer()
        .try_init();
}

/// Creates an item priced in whole pesos.
///
/// # Defaults
/// * description: `"Item {id}"`
/// * barcode, control number: None
pub fn item(id: i64, price: i64, status: ItemStatus) -> UnpaidItem {
    UnpaidItem {
        id,
        price: Money::from_units(price),
        status,
        barcode: None,
        control_number: None,
        description: format!("Item {id}"),
    }
}

/// Creates an unpaid item with a decimal price such as `"333.33"`.
pub fn item_with_price(id: i64, price: &str) -> UnpaidItem {
    UnpaidItem {
        price: Money::new(Decimal::from_str(price).unwrap()),
        ..item(id, 0, ItemStatus::Unpaid)
    }
}

/// Creates a registration holding `items`.
///
/// # Defaults
/// * `auction_bidders_id`: 41
/// * `bidder_id`: 7 (paddle `"0007"`)
/// * service charge: 10%
/// * registration fee: 200, not yet consumed
pub fn registration(items: Vec<UnpaidItem>) -> BidderRegistration {
    BidderRegistration {
        auction_bidders_id: 41,
        bidder_id: 7,
        bidder_number: "0007".to_string(),
        full_name: "Dela Cruz, Ana".to_string(),
        service_charge_percent: Decimal::from(10),
        registration_fee: Money::from_units(200),
        already_consumed_registration: false,
        items,
    }
}

/// Creates a payment without items, taken under registration 41.
pub fn payment(id: i64, purpose: PaymentPurpose, receipt: &str, amount: i64) -> Payment {
    payment_with_items(id, purpose, receipt, amount, Vec::new())
}

/// Creates a payment covering `items`.
pub fn payment_with_items(
    id: i64,
    purpose: PaymentPurpose,
    receipt: &str,
    amount: i64,
    items: Vec<UnpaidItem>,
) -> Payment {
    Payment {
        payment_id: id,
        auction_bidders_id: Some(41),
        purpose,
        receipt_number: receipt.to_string(),
        amount_paid: Money::from_units(amount),
        created_at: None,
        auction_inventories: items,
    }
}

#[derive(Default)]
struct FakeState {
    registrations: HashMap<i64, BidderRegistration>,
    histories: HashMap<i64, Vec<Payment>>,
    payments: HashMap<i64, Payment>,
    submitted: Vec<PullOutRequest>,
}

/// In-memory stand-in for the auction API.
///
/// Pull-outs are applied the way the real API applies them: a `PULL_OUT`
/// marks the items paid and consumes the registration fee, and every recorded
/// payment is appended to the bidder's history.
#[derive(Default)]
pub struct FakeAuctionApi {
    state: Mutex<FakeState>,
    registration_fetches: AtomicUsize,
}

impl FakeAuctionApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registration(self, registration: BidderRegistration) -> Self {
        self.state
            .lock()
            .unwrap()
            .registrations
            .insert(registration.auction_bidders_id, registration);
        self
    }

    pub fn with_payments(self, bidder_id: i64, payments: Vec<Payment>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            for payment in &payments {
                state.payments.insert(payment.payment_id, payment.clone());
            }
            state.histories.insert(bidder_id, payments);
        }
        self
    }

    pub fn with_payment(self, payment: Payment) -> Self {
        self.state
            .lock()
            .unwrap()
            .payments
            .insert(payment.payment_id, payment);
        self
    }

    /// Every pull-out request received so far.
    pub fn submitted(&self) -> Vec<PullOutRequest> {
        self.state.lock().unwrap().submitted.clone()
    }

    /// How many times a registration was fetched.
    pub fn registration_fetches(&self) -> usize {
        self.registration_fetches.load(Ordering::SeqCst)
    }

    fn record_pull_out(
        &self,
        auction_bidders_id: i64,
        request: &PullOutRequest,
    ) -> Result<Payment> {
        let mut state = self.state.lock().unwrap();
        let next_id = i64::try_from(state.payments.len()).unwrap() + 1000;

        let registration = state
            .registrations
            .get_mut(&auction_bidders_id)
            .ok_or_else(|| not_found("Registration", auction_bidders_id))?;

        if request.purpose == PaymentPurpose::PullOut {
            for item in &mut registration.items {
                if request.item_ids.contains(&item.id) {
                    item.status = ItemStatus::Paid;
                }
            }
            registration.already_consumed_registration = true;
        }

        let covered = registration
            .items
            .iter()
            .filter(|item| request.item_ids.contains(&item.id))
            .cloned()
            .collect();
        let bidder_id = registration.bidder_id;

        let payment = Payment {
            payment_id: next_id,
            auction_bidders_id: Some(auction_bidders_id),
            purpose: request.purpose,
            receipt_number: format!("FAKE-{next_id}"),
            amount_paid: request.amount_paid,
            created_at: None,
            auction_inventories: covered,
        };

        state.submitted.push(request.clone());
        state.payments.insert(next_id, payment.clone());
        state
            .histories
            .entry(bidder_id)
            .or_default()
            .push(payment.clone());
        Ok(payment)
    }
}

fn not_found(what: &str, id: i64) -> Error {
    Error::NotFound {
        what: format!("{what} {id}"),
    }
}

impl AuctionApi for FakeAuctionApi {
    async fn registration(&self, auction_bidders_id: i64) -> Result<BidderRegistration> {
        self.registration_fetches.fetch_add(1, Ordering::SeqCst);
        self.state
            .lock()
            .unwrap()
            .registrations
            .get(&auction_bidders_id)
            .cloned()
            .ok_or_else(|| not_found("Registration", auction_bidders_id))
    }

    async fn transactions(&self, bidder_id: i64) -> Result<Vec<Payment>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .histories
            .get(&bidder_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn payment(&self, payment_id: i64) -> Result<Payment> {
        self.state
            .lock()
            .unwrap()
            .payments
            .get(&payment_id)
            .cloned()
            .ok_or_else(|| not_found("Payment", payment_id))
    }

    async fn submit_pull_out(
        &self,
        auction_bidders_id: i64,
        request: &PullOutRequest,
    ) -> Result<Payment> {
        self.record_pull_out(auction_bidders_id, request)
    }
}
