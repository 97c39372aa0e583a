//! Receipt and refund projections.
//!
//! Turns a payment and its items into the flat, numbered lines an invoice or
//! refund slip is rendered from. Layout is left to the presentation layer; only
//! the page size lives here so page breaks can be tested on their own.

use crate::{
    core::{
        bidder::{ItemStatus, UnpaidItem},
        money::Money,
        payment::Payment,
    },
    errors::{Error, Result},
};
use serde::Serialize;

/// Rows printed per receipt page.
pub const RECEIPT_ROWS_PER_PAGE: usize = 25;

/// One line of a pull-out receipt or invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLine {
    /// 1-based position on the document
    pub line_number: usize,
    /// Auction inventory id
    pub auction_inventory_id: i64,
    /// Barcode, empty when the item was never tagged
    pub barcode: String,
    /// Supplier control number, empty when unknown
    pub control_number: String,
    /// Item description
    pub description: String,
    /// Price charged
    pub price: Money,
}

/// One line of a refund slip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefundLine {
    /// 1-based position on the document
    pub line_number: usize,
    /// Auction inventory id
    pub auction_inventory_id: i64,
    /// Barcode, empty when the item was never tagged
    pub barcode: String,
    /// Item description
    pub description: String,
    /// Status of the item at refund time
    pub status: ItemStatus,
    /// Amount handed back for this item
    pub refund_amount: Money,
}

/// Footer figures for a projected document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReceiptTotals {
    /// Number of lines
    pub line_count: usize,
    /// Sum of the line amounts
    pub item_total: Money,
}

impl ReceiptTotals {
    /// Totals of receipt lines.
    #[must_use]
    pub fn of_receipt(lines: &[ReceiptLine]) -> Self {
        Self {
            line_count: lines.len(),
            item_total: lines.iter().map(|line| line.price).sum(),
        }
    }

    /// Totals of refund lines.
    #[must_use]
    pub fn of_refund(lines: &[RefundLine]) -> Self {
        Self {
            line_count: lines.len(),
            item_total: lines.iter().map(|line| line.refund_amount).sum(),
        }
    }
}

/// Projects a payment's items into receipt lines, numbered from 1 in the order
/// the API returned them.
#[must_use]
pub fn project_receipt_lines(payment: &Payment) -> Vec<ReceiptLine> {
    payment
        .auction_inventories
        .iter()
        .enumerate()
        .map(|(index, item)| ReceiptLine {
            line_number: index + 1,
            auction_inventory_id: item.id,
            barcode: text_or_empty(item.barcode.as_ref()),
            control_number: text_or_empty(item.control_number.as_ref()),
            description: item.description.clone(),
            price: item.price,
        })
        .collect()
}

/// Projects a payment's items into refund lines.
///
/// Each item is refunded at its recorded price.
#[must_use]
pub fn project_refund_lines(payment: &Payment) -> Vec<RefundLine> {
    payment
        .auction_inventories
        .iter()
        .enumerate()
        .map(|(index, item)| refund_line(index + 1, item))
        .collect()
}

fn refund_line(line_number: usize, item: &UnpaidItem) -> RefundLine {
    RefundLine {
        line_number,
        auction_inventory_id: item.id,
        barcode: text_or_empty(item.barcode.as_ref()),
        description: item.description.clone(),
        status: item.status,
        refund_amount: item.price,
    }
}

fn text_or_empty(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

/// Splits lines into pages of `rows_per_page`.
///
/// An empty document still has one (empty) page so a header and totals can be
/// rendered.
///
/// # Errors
/// [`Error::InvalidPageSize`] when `rows_per_page` is zero.
pub fn paginate<T>(lines: &[T], rows_per_page: usize) -> Result<Vec<&[T]>> {
    if rows_per_page == 0 {
        return Err(Error::InvalidPageSize { rows: rows_per_page });
    }
    if lines.is_empty() {
        return Ok(vec![lines]);
    }
    Ok(lines.chunks(rows_per_page).collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::payment::PaymentPurpose,
        test_utils::{item, payment_with_items},
    };

    #[test]
    fn test_project_receipt_lines_numbers_and_copies_fields() {
        let mut first = item(31, 1000, ItemStatus::Paid);
        first.barcode = Some("BC-0031".to_string());
        first.control_number = Some("CN-12".to_string());
        first.description = "Rice cooker".to_string();
        let second = item(32, 450, ItemStatus::Paid);

        let pay = payment_with_items(9, PaymentPurpose::PullOut, "A-1", 1450, vec![first, second]);
        let lines = project_receipt_lines(&pay);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line_number, 1);
        assert_eq!(lines[0].auction_inventory_id, 31);
        assert_eq!(lines[0].barcode, "BC-0031");
        assert_eq!(lines[0].control_number, "CN-12");
        assert_eq!(lines[0].description, "Rice cooker");
        assert_eq!(lines[0].price, Money::from_units(1000));
        assert_eq!(lines[1].line_number, 2);
        assert_eq!(lines[1].barcode, "");

        let totals = ReceiptTotals::of_receipt(&lines);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.item_total, Money::from_units(1450));
    }

    #[test]
    fn test_project_refund_lines() {
        let pay = payment_with_items(
            4,
            PaymentPurpose::Refunded,
            "R-4",
            300,
            vec![
                item(1, 200, ItemStatus::Cancelled),
                item(2, 100, ItemStatus::Cancelled),
            ],
        );
        let lines = project_refund_lines(&pay);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].line_number, 2);
        assert_eq!(lines[1].status, ItemStatus::Cancelled);
        assert_eq!(lines[1].refund_amount, Money::from_units(100));
        assert_eq!(
            ReceiptTotals::of_refund(&lines).item_total,
            Money::from_units(300)
        );
    }

    #[test]
    fn test_project_lines_of_payment_without_items() {
        let pay = payment_with_items(5, PaymentPurpose::Registration, "R-5", 200, vec![]);
        assert!(project_receipt_lines(&pay).is_empty());
        assert!(project_refund_lines(&pay).is_empty());
    }

    #[test]
    fn test_paginate_breaks_every_25_rows() {
        let lines: Vec<usize> = (0..60).collect();
        let pages = paginate(&lines, RECEIPT_ROWS_PER_PAGE).unwrap();

        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), 25);
        assert_eq!(pages[1].len(), 25);
        assert_eq!(pages[2].len(), 10);
        assert_eq!(pages[2][0], 50);
    }

    #[test]
    fn test_paginate_exact_multiple_and_empty() {
        let lines: Vec<usize> = (0..50).collect();
        assert_eq!(paginate(&lines, 25).unwrap().len(), 2);

        let empty: Vec<usize> = Vec::new();
        let pages = paginate(&empty, 25).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_paginate_rejects_zero_rows() {
        let lines = vec![1, 2, 3];
        assert!(matches!(
            paginate(&lines, 0),
            Err(Error::InvalidPageSize { rows: 0 })
        ));
    }
}
