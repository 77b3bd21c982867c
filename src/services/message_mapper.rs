//! Maps `talking` journal entries to client messages.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{ClientMessage, EntryData, JournalEntry};
use crate::domain::ports::{MessageMapper, WorldRepository};

/// Resolves the speaker's name through the world store.
pub struct ClientMessageMapper {
    worlds: Arc<dyn WorldRepository>,
}

impl ClientMessageMapper {
    /// Mapper resolving speaker names through `worlds`.
    pub fn new(worlds: Arc<dyn WorldRepository>) -> Self {
        Self { worlds }
    }
}

#[async_trait]
impl MessageMapper for ClientMessageMapper {
    async fn to_client_message(&self, entry: &JournalEntry) -> DomainResult<ClientMessage> {
        let EntryData::Talking {
            audience,
            content,
            conversation_id,
        } = &entry.data
        else {
            return Err(DomainError::ValidationFailed(format!(
                "journal entry {} is {}, not talking",
                entry.id,
                entry.kind().as_str()
            )));
        };

        let speaker = self
            .worlds
            .player_by_id(entry.player_id)
            .await?
            .ok_or(DomainError::PlayerNotFound(entry.player_id))?;

        Ok(ClientMessage {
            ts: entry.ts,
            from: entry.player_id,
            from_name: speaker.name,
            to: audience.clone(),
            content: content.clone(),
            conversation_id: *conversation_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::models::{Player, Position, World};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_maps_talking_entry_with_speaker_name() {
        let store = Arc::new(InMemoryStore::new());
        let world = World::new("town");
        store.create_world(&world).await.unwrap();
        let player = Player::new(world.id, "Lucky");
        store.create_player(&player).await.unwrap();

        let listener = Uuid::new_v4();
        let conversation_id = Uuid::new_v4();
        let entry = JournalEntry::new(
            player.id,
            EntryData::Talking {
                audience: vec![listener],
                content: "Nice weather".into(),
                conversation_id,
            },
        );

        let mapper = ClientMessageMapper::new(store);
        let message = mapper.to_client_message(&entry).await.unwrap();
        assert_eq!(message.from_name, "Lucky");
        assert_eq!(message.to, vec![listener]);
        assert_eq!(message.ts, entry.ts);
        assert_eq!(message.conversation_id, conversation_id);
    }

    #[tokio::test]
    async fn test_rejects_non_talking_entry() {
        let mapper = ClientMessageMapper::new(Arc::new(InMemoryStore::new()));
        let entry = JournalEntry::new(
            Uuid::new_v4(),
            EntryData::Stopped { reason: None, position: Position::default() },
        );

        let err = mapper.to_client_message(&entry).await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationFailed(_)));
    }
}
