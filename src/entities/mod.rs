//! Entity module - explicit record types for every auction API resource.
//!
//! These mirror the JSON the API sends and receives. Nothing outside this module
//! and the API client handles them directly: each record is validated and
//! converted into the core types with `TryFrom` before any calculation runs.

pub mod amount;
pub mod payment;
pub mod registration;
pub mod request;

use serde::{Deserialize, Serialize};

/// Every API response wraps its payload in a `data` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// The resource itself
    pub data: T,
}

pub use amount::WireAmount;
pub use payment::PaymentRecord;
pub use registration::{InventoryRecord, RegistrationRecord};
pub use request::PullOutRequest;
