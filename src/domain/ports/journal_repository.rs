//! Journal repository port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{EntryKind, JournalEntry};

/// Append-only store of player journal entries.
#[async_trait]
pub trait JournalRepository: Send + Sync {
    /// Append an entry.
    async fn append(&self, entry: &JournalEntry) -> DomainResult<()>;

    /// Entries of one kind for a player, in append order.
    async fn entries_of(&self, player_id: Uuid, kind: EntryKind) -> DomainResult<Vec<JournalEntry>>;

    /// The player's most recent `stopped` or `walking` entry.
    async fn latest_movement_of(&self, player_id: Uuid) -> DomainResult<Option<JournalEntry>>;

    /// Everything the player has said.
    async fn talking_entries_of(&self, player_id: Uuid) -> DomainResult<Vec<JournalEntry>> {
        self.entries_of(player_id, EntryKind::Talking).await
    }
}
