//! Core business logic - pure settlement, reconciliation and receipt rules.
//!
//! Nothing in here performs I/O. Every function works on data already fetched
//! from the auction API, so the bot and the cashier workflows all derive the
//! same figures from the same snapshot.

/// Bidder registrations and assigned items
pub mod bidder;
/// Decimal money, formatting and parsing
pub mod money;
/// Payment records and settlement-by-receipt reconciliation
pub mod payment;
/// Receipt and refund line projections, page chunking
pub mod receipt;
/// Case-insensitive filtering over items and payments
pub mod search;
/// The settlement formula
pub mod settlement;

pub use bidder::{BidderRegistration, ItemStatus, UnpaidItem};
pub use money::Money;
pub use payment::{Payment, PaymentPurpose, SettlementState};
pub use settlement::{SettlementResult, compute_settlement};
