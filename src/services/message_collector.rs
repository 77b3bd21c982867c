//! Collects every chat message of the latest world in time order.

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::domain::errors::DomainResult;
use crate::domain::models::ClientMessage;
use crate::domain::ports::{JournalRepository, MessageMapper, WorldRepository};

/// Gathers every talking entry of the latest roster for display.
pub struct MessageCollector {
    worlds: Arc<dyn WorldRepository>,
    journal: Arc<dyn JournalRepository>,
    mapper: Arc<dyn MessageMapper>,
}

impl MessageCollector {
    /// Collector reading the roster from `worlds` and entries from `journal`.
    pub fn new(
        worlds: Arc<dyn WorldRepository>,
        journal: Arc<dyn JournalRepository>,
        mapper: Arc<dyn MessageMapper>,
    ) -> Self {
        Self { worlds, journal, mapper }
    }

    /// All `talking` entries of the latest world's players, mapped for display
    /// and sorted by timestamp. Equal timestamps keep roster-then-journal order.
    ///
    /// Returns an empty list when no world exists.
    #[instrument(skip(self), err)]
    pub async fn list_messages(&self) -> DomainResult<Vec<ClientMessage>> {
        let Some(world) = self.worlds.latest_world().await? else {
            debug!("no world yet; no messages");
            return Ok(Vec::new());
        };

        let mut entries = Vec::new();
        for player in self.worlds.roster_of(world.id).await? {
            entries.extend(self.journal.talking_entries_of(player.id).await?);
        }

        let mut messages = Vec::with_capacity(entries.len());
        for entry in &entries {
            messages.push(self.mapper.to_client_message(entry).await?);
        }

        // Vec::sort_by_key is stable.
        messages.sort_by_key(|m| m.ts);
        Ok(messages)
    }
}
