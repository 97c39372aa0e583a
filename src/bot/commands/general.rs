//! General Discord commands - ping and help.
//!
//! These commands never reach the auction API: `ping` checks that the bot is
//! up, and `help` lists the cashier commands with their arguments.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Auction Desk Help**\n\
        Cashier commands for bidder settlements and receipts.\n\n\
        **Settlement**\n\
        • `/settlement <registration>` - Shows what a bidder owes for an auction.\n\
        • `/pullout <registration> <amount> [items]` - Records a pull-out (or a partial payment if the amount is short).\n\
        • `/items <registration> [search]` - Lists and searches a bidder's assigned items.\n\n\
        **Payments**\n\
        • `/payments <bidder> [search]` - Lists a bidder's payments with settled markers.\n\
        • `/receipt <payment> [page]` - Shows a pull-out receipt.\n\
        • `/refund <payment> [page]` - Shows a refund slip.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
