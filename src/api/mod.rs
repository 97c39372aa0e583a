//! Auction API access.
//!
//! The remote API owns every balance, item status and ledger entry. This module
//! only reads those resources and submits intents; callers re-fetch afterwards
//! and recompute from the fresh snapshot.

/// `reqwest`-backed implementation of [`AuctionApi`]
pub mod client;

use crate::{
    core::{BidderRegistration, Payment},
    entities::PullOutRequest,
    errors::Result,
};
use std::future::Future;

pub use client::HttpAuctionApi;

/// Operations the desk needs from the auction API.
///
/// Implementations convert wire records into core types before returning, so
/// callers never see unvalidated amounts.
pub trait AuctionApi: Send + Sync {
    /// A bidder's registration in one auction, with all assigned items.
    fn registration(
        &self,
        auction_bidders_id: i64,
    ) -> impl Future<Output = Result<BidderRegistration>> + Send;

    /// Every payment recorded for a bidder, in whatever order the API keeps.
    fn transactions(&self, bidder_id: i64) -> impl Future<Output = Result<Vec<Payment>>> + Send;

    /// A single payment with its items.
    fn payment(&self, payment_id: i64) -> impl Future<Output = Result<Payment>> + Send;

    /// Submits a pull-out (or partial payment) intent and returns the payment
    /// the API recorded for it.
    fn submit_pull_out(
        &self,
        auction_bidders_id: i64,
        request: &PullOutRequest,
    ) -> impl Future<Output = Result<Payment>> + Send;
}
