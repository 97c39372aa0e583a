//! Settlement Discord commands - `settlement`, `pullout` and `items`.
//!
//! Each command fetches the registration fresh, recomputes through the core
//! settlement function, and records the snapshot in the bidder store for
//! autocomplete.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        api::AuctionApi,
        bot::{BotData, handlers::autocomplete, input, render},
        cashier,
        core::{Money, money, search},
        errors::{Error, Result},
        state::{BidderAction, PaymentAction},
    };
    use std::fmt::Write;
    use tracing::info;

    /// Shows what a bidder owes for one auction.
    ///
    /// Lists the unpaid item total, service charge, registration fee deduction,
    /// grand total and balance. A negative balance is shown as a refund due.
    #[poise::command(slash_command, prefix_command)]
    pub async fn settlement(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Registration id (auction bidder)"]
        #[autocomplete = "autocomplete::autocomplete_registration"]
        registration: String,
    ) -> Result<()> {
        let Some(auction_bidders_id) = input::parse_id(&registration) else {
            ctx.say(format!("❌ '{registration}' is not a registration id."))
                .await?;
            return Ok(());
        };

        ctx.defer().await?;
        let data = ctx.data();

        let view = match cashier::settlement_for(&data.api, auction_bidders_id).await {
            Ok(view) => view,
            Err(e) => {
                data.bidders
                    .dispatch(BidderAction::Failed {
                        auction_bidders_id,
                        message: e.to_string(),
                    })
                    .await;
                return Err(e);
            }
        };
        data.bidders
            .dispatch(BidderAction::Loaded(view.registration.clone()))
            .await;

        let text = render::settlement_breakdown(&view, &data.config.display.currency_symbol)?;
        ctx.say(text).await?;
        Ok(())
    }

    /// Records a pull-out for a bidder.
    ///
    /// Pays for the listed items, or for every unpaid item when none are given.
    /// If the amount does not cover the balance the payment is recorded as a
    /// partial payment instead. The registration is fetched again afterwards so
    /// the reply shows what the auction system now holds.
    #[poise::command(slash_command, prefix_command)]
    pub async fn pullout(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Registration id (auction bidder)"]
        #[autocomplete = "autocomplete::autocomplete_registration"]
        registration: String,
        #[description = "Amount received, e.g. 1,450.00"] amount: String,
        #[description = "Item ids separated by commas (default: all unpaid items)"]
        items: Option<String>,
    ) -> Result<()> {
        let Some(auction_bidders_id) = input::parse_id(&registration) else {
            ctx.say(format!("❌ '{registration}' is not a registration id."))
                .await?;
            return Ok(());
        };

        let amount_tendered = match money::parse_money(&amount) {
            Ok(value) if !value.is_negative() => value,
            Ok(_) => {
                ctx.say("❌ Invalid amount: must not be negative").await?;
                return Ok(());
            }
            Err(e) => {
                ctx.say(format!("❌ {e}")).await?;
                return Ok(());
            }
        };

        let item_ids = match input::parse_id_list(items.as_deref().unwrap_or_default()) {
            Ok(ids) => ids,
            Err(token) => {
                ctx.say(format!("❌ '{token}' is not an item id.")).await?;
                return Ok(());
            }
        };

        ctx.defer().await?;
        let data = ctx.data();
        let symbol = data.config.display.currency_symbol.as_str();

        let outcome =
            match cashier::pull_out(&data.api, auction_bidders_id, &item_ids, amount_tendered)
                .await
            {
                Ok(outcome) => outcome,
                Err(Error::NotFound { what }) => {
                    ctx.say(format!("❌ {what} not found.")).await?;
                    return Ok(());
                }
                Err(e) => return Err(e),
            };

        info!(
            "{} recorded payment {} for registration {auction_bidders_id}",
            ctx.author().name,
            outcome.payment.payment_id
        );

        let after = &outcome.registration_after;
        data.bidders
            .dispatch(BidderAction::Loaded(after.clone()))
            .await;
        data.payments
            .dispatch(PaymentAction::Recorded {
                bidder_id: after.bidder_id,
                payment: outcome.payment.clone(),
            })
            .await;

        let remaining = after.settlement(Money::ZERO)?;

        let mut text = String::new();
        writeln!(
            text,
            "✅ Recorded **{}** payment `#{}` · receipt {}",
            outcome.payment.purpose, outcome.payment.payment_id, outcome.payment.receipt_number
        )?;
        writeln!(
            text,
            "Received {} against {} due",
            money::format_money(outcome.payment.amount_paid, symbol),
            money::format_money(outcome.submitted.balance, symbol)
        )?;
        let change = outcome.payment.amount_paid - outcome.submitted.balance;
        if !change.is_negative() && !change.is_zero() {
            writeln!(text, "Change: {}", money::format_money(change, symbol))?;
        }
        writeln!(
            text,
            "Still unpaid under registration {}: {} item(s), {}",
            after.auction_bidders_id,
            after.unpaid_items().count(),
            money::format_money(remaining.grand_total, symbol)
        )?;

        ctx.say(text).await?;
        Ok(())
    }

    /// Lists a bidder's assigned items, optionally filtered.
    ///
    /// The search matches barcode, control number or description.
    #[poise::command(slash_command, prefix_command)]
    pub async fn items(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Registration id (auction bidder)"]
        #[autocomplete = "autocomplete::autocomplete_registration"]
        registration: String,
        #[description = "Text to search for"] search: Option<String>,
    ) -> Result<()> {
        let Some(auction_bidders_id) = input::parse_id(&registration) else {
            ctx.say(format!("❌ '{registration}' is not a registration id."))
                .await?;
            return Ok(());
        };

        ctx.defer().await?;
        let data = ctx.data();

        let reg = data.api.registration(auction_bidders_id).await?;
        let query = search.unwrap_or_default();
        let matches = search::filter_items(&reg.items, &query);
        let text = render::item_lines(&matches, &data.config.display.currency_symbol)?;

        data.bidders.dispatch(BidderAction::Loaded(reg.clone())).await;

        ctx.say(format!(
            "**Items for bidder {} (registration {})**\n{text}",
            reg.bidder_number, reg.auction_bidders_id
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
