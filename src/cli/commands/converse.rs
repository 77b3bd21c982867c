//! Implementation of the `simloop converse` command.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::commands::open_harness;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

/// Arguments of `simloop converse`.
#[derive(Args, Debug)]
pub struct ConverseArgs {
    /// Message cap per conversation (defaults to harness.default_max_messages)
    #[arg(short, long)]
    pub max_messages: Option<u32>,

    /// Number of conversations (defaults to harness.default_conversation_count)
    #[arg(long, conflicts_with = "reset")]
    pub count: Option<u32>,

    /// Release pending decisions first, then run the default number of conversations
    #[arg(long)]
    pub reset: bool,
}

/// Result of `simloop converse`.
#[derive(Debug, serde::Serialize)]
pub struct ConverseOutput {
    /// Whether pending decisions were released first.
    pub reset: bool,
    /// Conversations run.
    pub conversations: u32,
    /// Per-conversation message cap in effect.
    pub max_messages: u32,
}

impl CommandOutput for ConverseOutput {
    fn to_human(&self) -> String {
        let prefix = if self.reset { "Reset pending decisions. " } else { "" };
        format!(
            "{prefix}Ran {} conversation(s) of up to {} message(s).",
            self.conversations, self.max_messages
        )
    }
}

pub async fn execute(args: ConverseArgs, config: &Config, json_mode: bool) -> Result<()> {
    let harness = open_harness(config).await?;

    let conversations = if args.reset {
        harness.reset_and_converse(args.max_messages).await
    } else {
        harness.converse(args.max_messages, args.count).await
    }
    .context("Conversation failed")?;

    output(
        &ConverseOutput {
            reset: args.reset,
            conversations,
            max_messages: args.max_messages.unwrap_or(config.harness.default_max_messages),
        },
        json_mode,
    );
    Ok(())
}
