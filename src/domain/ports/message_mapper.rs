//! Display-mapping and player-state resolution ports.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{ClientMessage, JournalEntry, Player, PlayerSnapshot};

/// Maps a `talking` journal entry to the form shown to clients.
#[async_trait]
pub trait MessageMapper: Send + Sync {
    /// Display form of a `talking` entry.
    async fn to_client_message(&self, entry: &JournalEntry) -> DomainResult<ClientMessage>;
}

/// Derives a player's display state (agent, thinking, motion).
#[async_trait]
pub trait PlayerStateResolver: Send + Sync {
    /// Snapshot of `player` with its thinking flag and current motion.
    async fn resolve(&self, player: &Player) -> DomainResult<PlayerSnapshot>;
}
