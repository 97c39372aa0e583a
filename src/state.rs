//! Per-domain state containers.
//!
//! Each domain keeps the last snapshot fetched from the API behind a
//! `tokio::sync::RwLock`, and the only way to change it is to dispatch an
//! action through that domain's reducer. The bot reads these snapshots for
//! autocomplete; every calculation still goes back to the API first.

use crate::core::{BidderRegistration, Payment};
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{debug, trace};

/// A state value with a pure transition function.
pub trait Reducer: Default {
    /// Transitions this state understands.
    type Action: std::fmt::Debug;

    /// Applies `action`, returning the next state.
    #[must_use]
    fn reduce(self, action: Self::Action) -> Self;
}

/// Shared, observable state for one domain.
#[derive(Debug)]
pub struct Store<S> {
    state: Arc<RwLock<S>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: Reducer> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: Reducer> Store<S> {
    /// Wraps an initial state.
    #[must_use]
    pub fn new(initial: S) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
        }
    }

    /// Runs the reducer on the current state.
    pub async fn dispatch(&self, action: S::Action) {
        trace!("Dispatching {:?}", action);
        let mut guard = self.state.write().await;
        let current = std::mem::take(&mut *guard);
        *guard = current.reduce(action);
    }

    /// Reads a value out of the current state.
    pub async fn select<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        let guard = self.state.read().await;
        f(&*guard)
    }
}

/// Registrations fetched so far, keyed by `auction_bidders_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BidderState {
    /// Latest snapshot of each registration
    pub registrations: BTreeMap<i64, BidderRegistration>,
    /// Message of the last failed fetch, cleared by the next success
    pub last_error: Option<String>,
}

/// Transitions of [`BidderState`].
#[derive(Debug, Clone)]
pub enum BidderAction {
    /// A registration was fetched
    Loaded(BidderRegistration),
    /// A fetch failed
    Failed {
        /// Registration that was requested
        auction_bidders_id: i64,
        /// Error shown to the cashier
        message: String,
    },
}

impl Reducer for BidderState {
    type Action = BidderAction;

    fn reduce(mut self, action: BidderAction) -> Self {
        match action {
            BidderAction::Loaded(registration) => {
                debug!(
                    "Caching registration {}",
                    registration.auction_bidders_id
                );
                self.registrations
                    .insert(registration.auction_bidders_id, registration);
                self.last_error = None;
                self
            }
            BidderAction::Failed {
                auction_bidders_id,
                message,
            } => {
                self.registrations.remove(&auction_bidders_id);
                self.last_error = Some(message);
                self
            }
        }
    }
}

impl BidderState {
    /// Registration ids whose id, paddle number or name contains `partial`.
    #[must_use]
    pub fn matching_ids(&self, partial: &str) -> Vec<i64> {
        let needle = partial.trim().to_lowercase();
        self.registrations
            .values()
            .filter(|reg| {
                needle.is_empty()
                    || reg.auction_bidders_id.to_string().contains(&needle)
                    || reg.bidder_number.to_lowercase().contains(&needle)
                    || reg.full_name.to_lowercase().contains(&needle)
            })
            .map(|reg| reg.auction_bidders_id)
            .collect()
    }
}

/// Payment histories fetched so far, keyed by bidder id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentState {
    /// Latest history of each bidder
    pub histories: BTreeMap<i64, Vec<Payment>>,
    /// Message of the last failed fetch, cleared by the next success
    pub last_error: Option<String>,
}

/// Transitions of [`PaymentState`].
#[derive(Debug, Clone)]
pub enum PaymentAction {
    /// A bidder's full history was fetched
    HistoryLoaded {
        /// Bidder the history belongs to
        bidder_id: i64,
        /// Every payment, as returned
        payments: Vec<Payment>,
    },
    /// The API recorded a new payment for a bidder
    Recorded {
        /// Bidder the payment belongs to
        bidder_id: i64,
        /// The recorded payment
        payment: Payment,
    },
    /// A fetch failed
    Failed {
        /// Error shown to the cashier
        message: String,
    },
}

impl Reducer for PaymentState {
    type Action = PaymentAction;

    fn reduce(mut self, action: PaymentAction) -> Self {
        match action {
            PaymentAction::HistoryLoaded {
                bidder_id,
                payments,
            } => {
                self.histories.insert(bidder_id, payments);
                self.last_error = None;
                self
            }
            PaymentAction::Recorded { bidder_id, payment } => {
                let history = self.histories.entry(bidder_id).or_default();
                history.retain(|existing| existing.payment_id != payment.payment_id);
                history.push(payment);
                self
            }
            PaymentAction::Failed { message } => {
                self.last_error = Some(message);
                self
            }
        }
    }
}

impl PaymentState {
    /// Payment ids across all cached histories whose id or receipt number
    /// contains `partial`, newest id first.
    #[must_use]
    pub fn matching_payment_ids(&self, partial: &str) -> Vec<i64> {
        let needle = partial.trim().to_lowercase();
        let mut ids: Vec<i64> = self
            .histories
            .values()
            .flatten()
            .filter(|payment| {
                needle.is_empty()
                    || payment.payment_id.to_string().contains(&needle)
                    || payment.receipt_number.to_lowercase().contains(&needle)
            })
            .map(|payment| payment.payment_id)
            .collect();
        ids.sort_unstable_by(|a, b| b.cmp(a));
        ids.dedup();
        ids
    }
}
