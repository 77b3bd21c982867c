//! Implementation of the `simloop messages` command.

use anyhow::{Context, Result};

use crate::cli::commands::open_harness;
use crate::cli::output::{list_table, output, render_list, truncate, CommandOutput};
use crate::domain::models::{ClientMessage, Config};

/// Result of `simloop messages`.
#[derive(Debug, serde::Serialize)]
pub struct MessagesOutput {
    /// Messages oldest first.
    pub messages: Vec<ClientMessage>,
    /// Number of messages listed.
    pub total: usize,
}

impl CommandOutput for MessagesOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["time", "from", "conversation", "message"]);
        for message in &self.messages {
            table.add_row(vec![
                message.ts.format("%H:%M:%S%.3f").to_string(),
                message.from_name.clone(),
                truncate(&message.conversation_id.to_string(), 11),
                truncate(&message.content, 60),
            ]);
        }
        render_list("message", &table, self.total)
    }
}

pub async fn execute(config: &Config, json_mode: bool) -> Result<()> {
    let harness = open_harness(config).await?;
    let messages = harness.list_messages().await.context("Failed to list messages")?;
    let total = messages.len();
    output(&MessagesOutput { messages, total }, json_mode);
    Ok(())
}
