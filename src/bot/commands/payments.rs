//! Payment Discord commands - payment history, receipts and refund slips.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, input, render},
        cashier::{self, HistoryEntry},
        core::{money, payment, search},
        errors::{Error, Result},
        state::PaymentAction,
    };
    use tracing::warn;

    /// Lists a bidder's payments, marking which partial payments are settled.
    #[poise::command(slash_command, prefix_command)]
    pub async fn payments(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Bidder id"] bidder_id: i64,
        #[description = "Filter by receipt number or purpose"] search: Option<String>,
    ) -> Result<()> {
        ctx.defer().await?;
        let data = ctx.data();

        let entries = match cashier::history(&data.api, bidder_id).await {
            Ok(entries) => entries,
            Err(e) => {
                data.payments
                    .dispatch(PaymentAction::Failed {
                        message: e.to_string(),
                    })
                    .await;
                return Err(e);
            }
        };
        data.payments
            .dispatch(PaymentAction::HistoryLoaded {
                bidder_id,
                payments: entries.iter().map(|entry| entry.payment.clone()).collect(),
            })
            .await;

        let query = search.unwrap_or_default();
        let all: Vec<_> = entries.iter().map(|entry| entry.payment.clone()).collect();
        let matching_ids: Vec<i64> = search::filter_payments(&all, &query)
            .into_iter()
            .map(|payment| payment.payment_id)
            .collect();
        let shown: Vec<&HistoryEntry> = entries
            .iter()
            .filter(|entry| matching_ids.contains(&entry.payment.payment_id))
            .collect();

        let symbol = data.config.display.currency_symbol.as_str();
        let text = render::history_lines(&shown, symbol)?;
        let outstanding = money::format_money(payment::outstanding_partial_total(&all), symbol);

        ctx.say(format!(
            "**Payments for bidder {bidder_id}**\n{text}\nOutstanding partial payments: {outstanding}"
        ))
        .await?;
        Ok(())
    }

    /// Shows one page of a pull-out receipt.
    #[poise::command(slash_command, prefix_command)]
    pub async fn receipt(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Payment id"]
        #[autocomplete = "autocomplete::autocomplete_payment"]
        payment: String,
        #[description = "Page number (default 1)"]
        #[min = 1]
        page: Option<u32>,
    ) -> Result<()> {
        let Some(payment_id) = input::parse_id(&payment) else {
            ctx.say(format!("❌ '{payment}' is not a payment id.")).await?;
            return Ok(());
        };

        ctx.defer().await?;
        let data = ctx.data();

        let doc = cashier::receipt(&data.api, payment_id).await?;
        let page = page.unwrap_or(1) as usize;
        let text = match render::receipt_page(
            &doc,
            page,
            data.config.receipt.rows_per_page,
            &data.config.display.currency_symbol,
        ) {
            Ok(text) => text,
            Err(Error::NotFound { what }) => {
                warn!("Receipt page out of range for payment {payment_id}: {what}");
                format!("❌ {what} not found.")
            }
            Err(e) => return Err(e),
        };

        ctx.say(text).await?;
        Ok(())
    }

    /// Shows one page of a refund slip.
    #[poise::command(slash_command, prefix_command)]
    pub async fn refund(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Payment id"]
        #[autocomplete = "autocomplete::autocomplete_payment"]
        payment: String,
        #[description = "Page number (default 1)"]
        #[min = 1]
        page: Option<u32>,
    ) -> Result<()> {
        let Some(payment_id) = input::parse_id(&payment) else {
            ctx.say(format!("❌ '{payment}' is not a payment id.")).await?;
            return Ok(());
        };

        ctx.defer().await?;
        let data = ctx.data();

        let doc = cashier::refund_slip(&data.api, payment_id).await?;
        let page = page.unwrap_or(1) as usize;
        let text = match render::refund_page(
            &doc,
            page,
            data.config.receipt.rows_per_page,
            &data.config.display.currency_symbol,
        ) {
            Ok(text) => text,
            Err(Error::NotFound { what }) => {
                warn!("Refund page out of range for payment {payment_id}: {what}");
                format!("❌ {what} not found.")
            }
            Err(e) => return Err(e),
        };

        ctx.say(text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
