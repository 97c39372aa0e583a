//! In-memory search over fetched items and payments.

use crate::core::{bidder::UnpaidItem, payment::Payment};

/// Items whose barcode, control number or description contains `query`
/// (case-insensitive). A blank query keeps everything, in input order.
#[must_use]
pub fn filter_items<'a>(items: &'a [UnpaidItem], query: &str) -> Vec<&'a UnpaidItem> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| {
            needle.is_empty()
                || contains(item.barcode.as_deref(), &needle)
                || contains(item.control_number.as_deref(), &needle)
                || item.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Payments whose receipt number or purpose label contains `query`
/// (case-insensitive). A blank query keeps everything, in input order.
#[must_use]
pub fn filter_payments<'a>(payments: &'a [Payment], query: &str) -> Vec<&'a Payment> {
    let needle = query.trim().to_lowercase();
    payments
        .iter()
        .filter(|payment| {
            needle.is_empty()
                || payment.receipt_number.to_lowercase().contains(&needle)
                || payment.purpose.label().to_lowercase().contains(&needle)
        })
        .collect()
}

fn contains(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|value| value.to_lowercase().contains(needle))
}
