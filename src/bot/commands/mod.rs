//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// General utility commands
pub mod general;

/// Payment history, receipt and refund slip commands
pub mod payments;

/// Settlement and pull-out commands
pub mod settlement;

// Export commands
pub use general::*;
pub use payments::*;
pub use settlement::*;
