//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions come from the registrations and payment histories the desk has
//! already fetched this session; nothing here calls the API.

use crate::{bot::BotData, errors::Error};

/// Discord's limit on autocomplete suggestions.
const MAX_SUGGESTIONS: usize = 25;

/// Suggests registration ids matching the id, paddle number or bidder name.
pub async fn autocomplete_registration(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let ids = ctx
        .data()
        .bidders
        .select(|state| state.matching_ids(partial))
        .await;

    ids.into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|id| id.to_string())
        .collect()
}

/// Suggests payment ids matching the id or receipt number, newest first.
pub async fn autocomplete_payment(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let ids = ctx
        .data()
        .payments
        .select(|state| state.matching_payment_ids(partial))
        .await;

    ids.into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|id| id.to_string())
        .collect()
}
