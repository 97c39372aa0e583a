//! Message rendering for the bot.
//!
//! Turns workflow results into Discord message text. Amounts are formatted here
//! and nowhere earlier.

use crate::{
    cashier::{HistoryEntry, ReceiptDocument, RefundDocument, SettlementView},
    core::{
        Money, SettlementState, UnpaidItem,
        money::format_money,
        receipt::{self, ReceiptLine, RefundLine},
    },
    errors::{Error, Result},
};
use std::fmt::Write;

/// Most rows listed in a single message before truncating.
pub const MAX_LIST_ROWS: usize = 25;

const DESCRIPTION_WIDTH: usize = 24;

/// Settlement breakdown for one registration.
///
/// A negative balance is shown as a refund due, never as a negative charge.
pub fn settlement_breakdown(view: &SettlementView, symbol: &str) -> Result<String> {
    let reg = &view.registration;
    let result = &view.settlement;
    let unpaid = reg.unpaid_items().count();
    let money = |amount: Money| format_money(amount, symbol);

    let mut text = String::new();
    writeln!(
        text,
        "**Bidder {} · {}** (registration {})",
        reg.bidder_number, reg.full_name, reg.auction_bidders_id
    )?;
    writeln!(
        text,
        "Items ({unpaid} unpaid): {}",
        money(result.total_item_price)
    )?;
    writeln!(
        text,
        "Service charge ({}%): {}",
        reg.service_charge_percent.normalize(),
        money(result.service_charge_amount)
    )?;
    if reg.already_consumed_registration {
        writeln!(text, "Registration fee: already applied")?;
    } else {
        writeln!(
            text,
            "Less registration fee: {}",
            money(-result.registration_deduction)
        )?;
    }
    writeln!(text, "**Grand total:** {}", money(result.grand_total))?;
    if !view.amount_already_paid.is_zero() {
        writeln!(
            text,
            "Already paid (partials): {}",
            money(view.amount_already_paid)
        )?;
    }
    write!(text, "{}", balance_line(result.balance, symbol))?;
    Ok(text)
}

/// `Balance: ₱x` or, for negative balances, `🔻 Refund due: ₱x`.
#[must_use]
pub fn balance_line(balance: Money, symbol: &str) -> String {
    if balance.is_negative() {
        format!("🔻 **Refund due:** {}", format_money(balance.abs(), symbol))
    } else {
        format!("**Balance:** {}", format_money(balance, symbol))
    }
}

/// One line per payment, with settled / outstanding markers on partials.
pub fn history_lines(entries: &[&HistoryEntry], symbol: &str) -> Result<String> {
    if entries.is_empty() {
        return Ok("No payments found.".to_string());
    }

    let mut text = String::new();
    for entry in entries.iter().take(MAX_LIST_ROWS) {
        let payment = &entry.payment;
        write!(
            text,
            "`#{}` {} · {} · {}",
            payment.payment_id,
            payment.receipt_number,
            payment.purpose,
            format_money(payment.amount_paid, symbol)
        )?;
        match entry.state {
            SettlementState::Settled => write!(text, " · ✅ settled")?,
            SettlementState::Outstanding => write!(text, " · ⏳ outstanding")?,
            SettlementState::NotApplicable => {}
        }
        if let Some(created_at) = payment.created_at {
            write!(text, " · {}", created_at.format("%Y-%m-%d"))?;
        }
        writeln!(text)?;
    }
    write_overflow(&mut text, entries.len())?;
    Ok(text)
}

/// Item list for search results.
pub fn item_lines(items: &[&UnpaidItem], symbol: &str) -> Result<String> {
    if items.is_empty() {
        return Ok("No matching items.".to_string());
    }

    let mut text = String::new();
    for item in items.iter().take(MAX_LIST_ROWS) {
        writeln!(
            text,
            "`{}` {} · {} · {} · {}",
            item.id,
            item.barcode.as_deref().unwrap_or("-"),
            clip(&item.description, DESCRIPTION_WIDTH),
            format_money(item.price, symbol),
            item.status
        )?;
    }
    write_overflow(&mut text, items.len())?;
    Ok(text)
}

/// One page of a receipt. `page` is 1-based.
pub fn receipt_page(
    doc: &ReceiptDocument,
    page: usize,
    rows_per_page: usize,
    symbol: &str,
) -> Result<String> {
    let pages = receipt::paginate(&doc.lines, rows_per_page)?;
    let rows = page_rows(&pages, page)?;

    let mut text = String::new();
    writeln!(
        text,
        "**Receipt {}** · {} · {}",
        doc.payment.receipt_number,
        doc.payment.purpose,
        format_money(doc.payment.amount_paid, symbol)
    )?;
    writeln!(text, "```")?;
    writeln!(
        text,
        "{:>3}  {:<12} {:<12} {:<DESCRIPTION_WIDTH$} {:>14}",
        "#", "Barcode", "Control", "Description", "Price"
    )?;
    for line in rows {
        write_receipt_row(&mut text, line, symbol)?;
    }
    writeln!(text, "```")?;
    if page == pages.len() {
        writeln!(
            text,
            "{} item(s) · Item total: {}",
            doc.totals.line_count,
            format_money(doc.totals.item_total, symbol)
        )?;
    }
    write!(text, "Page {page} of {}", pages.len())?;
    Ok(text)
}

/// One page of a refund slip. `page` is 1-based.
pub fn refund_page(
    doc: &RefundDocument,
    page: usize,
    rows_per_page: usize,
    symbol: &str,
) -> Result<String> {
    let pages = receipt::paginate(&doc.lines, rows_per_page)?;
    let rows = page_rows(&pages, page)?;

    let mut text = String::new();
    writeln!(
        text,
        "**Refund slip {}** · {}",
        doc.payment.receipt_number,
        format_money(doc.payment.amount_paid, symbol)
    )?;
    writeln!(text, "```")?;
    writeln!(
        text,
        "{:>3}  {:<12} {:<DESCRIPTION_WIDTH$} {:<10} {:>14}",
        "#", "Barcode", "Description", "Status", "Refund"
    )?;
    for line in rows {
        write_refund_row(&mut text, line, symbol)?;
    }
    writeln!(text, "```")?;
    if page == pages.len() {
        writeln!(
            text,
            "{} item(s) · Refund total: {}",
            doc.totals.line_count,
            format_money(doc.totals.item_total, symbol)
        )?;
    }
    write!(text, "Page {page} of {}", pages.len())?;
    Ok(text)
}

fn page_rows<'a, T>(pages: &[&'a [T]], page: usize) -> Result<&'a [T]> {
    page.checked_sub(1)
        .and_then(|index| pages.get(index))
        .copied()
        .ok_or_else(|| Error::NotFound {
            what: format!("Page {page} of {}", pages.len()),
        })
}

fn write_receipt_row(text: &mut String, line: &ReceiptLine, symbol: &str) -> Result<()> {
    writeln!(
        text,
        "{:>3}  {:<12} {:<12} {:<DESCRIPTION_WIDTH$} {:>14}",
        line.line_number,
        clip(&line.barcode, 12),
        clip(&line.control_number, 12),
        clip(&line.description, DESCRIPTION_WIDTH),
        format_money(line.price, symbol)
    )?;
    Ok(())
}

fn write_refund_row(text: &mut String, line: &RefundLine, symbol: &str) -> Result<()> {
    writeln!(
        text,
        "{:>3}  {:<12} {:<DESCRIPTION_WIDTH$} {:<10} {:>14}",
        line.line_number,
        clip(&line.barcode, 12),
        clip(&line.description, DESCRIPTION_WIDTH),
        line.status.to_string(),
        format_money(line.refund_amount, symbol)
    )?;
    Ok(())
}

fn write_overflow(text: &mut String, total: usize) -> Result<()> {
    if total > MAX_LIST_ROWS {
        writeln!(text, "…and {} more", total - MAX_LIST_ROWS)?;
    }
    Ok(())
}

/// Cuts `value` to at most `width` characters, marking the cut with `…`.
fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut clipped: String = value.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::{ItemStatus, PaymentPurpose, receipt::ReceiptTotals},
        test_utils::{item, payment, payment_with_items, registration},
    };

    fn view(amount_already_paid: i64, consumed: bool) -> SettlementView {
        let mut reg = registration(vec![
            item(1, 1000, ItemStatus::Unpaid),
            item(2, 500, ItemStatus::Unpaid),
        ]);
        reg.already_consumed_registration = consumed;
        let paid = Money::from_units(amount_already_paid);
        let settlement = reg.settlement(paid).unwrap();
        SettlementView {
            registration: reg,
            amount_already_paid: paid,
            settlement,
        }
    }

    #[test]
    fn test_settlement_breakdown_fresh() {
        let text = settlement_breakdown(&view(0, false), "₱").unwrap();
        assert!(text.contains("**Bidder 0007 · Dela Cruz, Ana** (registration 41)"));
        assert!(text.contains("Items (2 unpaid): ₱1,500.00"));
        assert!(text.contains("Service charge (10%): ₱150.00"));
        assert!(text.contains("Less registration fee: -₱200.00"));
        assert!(text.contains("**Grand total:** ₱1,450.00"));
        assert!(!text.contains("Already paid"));
        assert!(text.ends_with("**Balance:** ₱1,450.00"));
    }

    #[test]
    fn test_settlement_breakdown_consumed_with_partials() {
        let text = settlement_breakdown(&view(2000, true), "₱").unwrap();
        assert!(text.contains("Registration fee: already applied"));
        assert!(text.contains("**Grand total:** ₱1,650.00"));
        assert!(text.contains("Already paid (partials): ₱2,000.00"));
        assert!(text.ends_with("🔻 **Refund due:** ₱350.00"));
    }

    #[test]
    fn test_history_lines_markers() {
        let entries = [
            HistoryEntry {
                payment: payment(1, PaymentPurpose::Partial, "A-1", 500),
                state: SettlementState::Settled,
            },
            HistoryEntry {
                payment: payment(2, PaymentPurpose::Partial, "A-2", 300),
                state: SettlementState::Outstanding,
            },
            HistoryEntry {
                payment: payment(3, PaymentPurpose::PullOut, "A-1", 950),
                state: SettlementState::NotApplicable,
            },
        ];
        let refs: Vec<&HistoryEntry> = entries.iter().collect();
        let text = history_lines(&refs, "₱").unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "`#1` A-1 · Partial · ₱500.00 · ✅ settled");
        assert_eq!(lines[1], "`#2` A-2 · Partial · ₱300.00 · ⏳ outstanding");
        assert_eq!(lines[2], "`#3` A-1 · Pull-out · ₱950.00");
        assert_eq!(history_lines(&[], "₱").unwrap(), "No payments found.");
    }

    #[test]
    fn test_item_lines_truncates_long_lists() {
        let items: Vec<UnpaidItem> = (1..=30)
            .map(|id| item(id, 100, ItemStatus::Unpaid))
            .collect();
        let refs: Vec<&UnpaidItem> = items.iter().collect();
        let text = item_lines(&refs, "₱").unwrap();

        assert_eq!(text.lines().count(), MAX_LIST_ROWS + 1);
        assert!(text.starts_with("`1` - · Item 1 · ₱100.00 · UNPAID"));
        assert!(text.ends_with("…and 5 more\n"));
    }

    #[test]
    fn test_item_lines_fit_in_one_message() {
        let items: Vec<UnpaidItem> = (1..=25)
            .map(|id| UnpaidItem {
                description: "Vintage narra dining set with six chairs and glass top".repeat(4),
                ..item(id, 125_000, ItemStatus::Unpaid)
            })
            .collect();
        let refs: Vec<&UnpaidItem> = items.iter().collect();
        let text = item_lines(&refs, "₱").unwrap();

        assert!(text.chars().count() < 2000, "{} chars", text.chars().count());
        assert!(text.starts_with("`1` - · Vintage narra dining se… · ₱125,000.00 · UNPAID"));
    }

    #[test]
    fn test_receipt_pages() {
        let items: Vec<UnpaidItem> = (1..=30)
            .map(|id| item(id, 50, ItemStatus::Paid))
            .collect();
        let pay = payment_with_items(8, PaymentPurpose::PullOut, "A-8", 1650, items);
        let lines = receipt::project_receipt_lines(&pay);
        let doc = ReceiptDocument {
            totals: ReceiptTotals::of_receipt(&lines),
            payment: pay,
            lines,
        };

        let first = receipt_page(&doc, 1, 25, "₱").unwrap();
        assert!(first.starts_with("**Receipt A-8** · Pull-out · ₱1,650.00"));
        assert!(!first.contains("Item total"));
        assert!(first.ends_with("Page 1 of 2"));

        let last = receipt_page(&doc, 2, 25, "₱").unwrap();
        assert!(last.contains("30 item(s) · Item total: ₱1,500.00"));
        assert!(last.ends_with("Page 2 of 2"));

        assert!(matches!(
            receipt_page(&doc, 3, 25, "₱"),
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(
            receipt_page(&doc, 0, 25, "₱"),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_refund_page_single() {
        let pay = payment_with_items(
            9,
            PaymentPurpose::Refunded,
            "R-9",
            200,
            vec![item(4, 200, ItemStatus::Cancelled)],
        );
        let lines = receipt::project_refund_lines(&pay);
        let doc = RefundDocument {
            totals: ReceiptTotals::of_refund(&lines),
            payment: pay,
            lines,
        };

        let text = refund_page(&doc, 1, 25, "₱").unwrap();
        assert!(text.contains("CANCELLED"));
        assert!(text.contains("1 item(s) · Refund total: ₱200.00"));
        assert!(text.ends_with("Page 1 of 1"));
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("Electric stand fan", 8), "Electri…");
    }
}
