//! Bot layer - Discord-specific interface and command handlers
//!
//! This module is the cashier's front end: slash commands for settlements,
//! pull-outs, payment history and receipts, the autocomplete handlers, and the
//! shared context every command receives.

/// Discord command implementations (settlement, payments, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;
/// Parsing of free-text command arguments
pub mod input;
/// Markdown rendering of settlements, histories and receipts
pub mod render;

use crate::{
    api::HttpAuctionApi,
    config::AppConfig,
    errors::{Error, Result},
    state::{BidderState, PaymentState, Store},
};
use poise::serenity_prelude as serenity;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// Holds the auction API client, the loaded configuration and the session
/// stores that back autocomplete.
pub struct BotData {
    /// Client for the remote auction API
    pub api: HttpAuctionApi,
    /// Application configuration
    pub config: AppConfig,
    /// Registrations fetched this session
    pub bidders: Store<BidderState>,
    /// Payment histories fetched this session
    pub payments: Store<PaymentState>,
}

impl BotData {
    /// Creates a new `BotData` with empty session stores.
    #[must_use]
    pub fn new(api: HttpAuctionApi, config: AppConfig) -> Self {
        Self {
            api,
            config,
            bidders: Store::default(),
            payments: Store::default(),
        }
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the poise framework and runs the Discord client until it stops.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::settlement(),
                commands::pullout(),
                commands::items(),
                commands::payments(),
                commands::receipt(),
                commands::refund(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}
