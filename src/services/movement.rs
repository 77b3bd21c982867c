//! Movement executor that records intents in the player journal.
//!
//! Path-finding is not performed: a `walk` records where the player is
//! heading, and a `stop` records the last position the player stood at.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{EntryData, EntryKind, JournalEntry, Position};
use crate::domain::ports::{AgentRepository, JournalRepository, MovementExecutor, WorldRepository};

/// Movement executor that records intents in the journal.
pub struct JournalMovementExecutor {
    worlds: Arc<dyn WorldRepository>,
    agents: Arc<dyn AgentRepository>,
    journal: Arc<dyn JournalRepository>,
}

impl JournalMovementExecutor {
    /// Executor appending to `journal`; walks resolve the agent's player first.
    pub fn new(
        worlds: Arc<dyn WorldRepository>,
        agents: Arc<dyn AgentRepository>,
        journal: Arc<dyn JournalRepository>,
    ) -> Self {
        Self { worlds, agents, journal }
    }

    async fn last_position(&self, player_id: Uuid) -> DomainResult<Position> {
        let stops = self.journal.entries_of(player_id, EntryKind::Stopped).await?;
        Ok(stops
            .iter()
            .rev()
            .find_map(|entry| match entry.data {
                EntryData::Stopped { position, .. } => Some(position),
                _ => None,
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl MovementExecutor for JournalMovementExecutor {
    async fn stop(&self, player_id: Uuid) -> DomainResult<()> {
        self.worlds
            .player_by_id(player_id)
            .await?
            .ok_or(DomainError::PlayerNotFound(player_id))?;

        let position = self.last_position(player_id).await?;
        self.journal
            .append(&JournalEntry::new(
                player_id,
                EntryData::Stopped { reason: None, position },
            ))
            .await?;

        debug!(%player_id, x = position.x, y = position.y, "player stopped");
        Ok(())
    }

    async fn walk(&self, agent_id: Uuid, ignore: &[Uuid], destination: Uuid) -> DomainResult<()> {
        let agent = self
            .agents
            .get(agent_id)
            .await?
            .ok_or(DomainError::AgentNotFound(agent_id))?;
        self.worlds
            .player_by_id(destination)
            .await?
            .ok_or(DomainError::PlayerNotFound(destination))?;

        self.journal
            .append(&JournalEntry::new(
                agent.player_id,
                EntryData::Walking {
                    target: destination,
                    ignore: ignore.to_vec(),
                },
            ))
            .await?;

        debug!(%agent_id, player_id = %agent.player_id, %destination, "player walking");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::models::{Agent, Motion, Player, World};
    use crate::domain::ports::PlayerStateResolver;
    use crate::services::JournalPlayerStateResolver;

    async fn seed(store: &InMemoryStore) -> (Player, Agent, Player) {
        let world = World::new("town");
        store.create_world(&world).await.unwrap();

        let mut walker = Player::new(world.id, "Walker");
        let agent = Agent::new(world.id, walker.id);
        walker.agent_id = Some(agent.id);
        store.create_player(&walker).await.unwrap();
        AgentRepository::create(store, &agent).await.unwrap();

        let target = Player::new(world.id, "Target");
        store.create_player(&target).await.unwrap();
        (walker, agent, target)
    }

    fn executor(store: &Arc<InMemoryStore>) -> JournalMovementExecutor {
        JournalMovementExecutor::new(store.clone(), store.clone(), store.clone())
    }

    #[tokio::test]
    async fn test_walk_then_stop_updates_motion() {
        let store = Arc::new(InMemoryStore::new());
        let (walker, agent, target) = seed(&store).await;
        let movement = executor(&store);
        let resolver = JournalPlayerStateResolver::new(store.clone(), store.clone());

        movement.walk(agent.id, &[], target.id).await.unwrap();
        let snapshot = resolver.resolve(&walker).await.unwrap();
        assert_eq!(snapshot.motion, Motion::Walking { target: target.id, ignore: vec![] });

        movement.stop(walker.id).await.unwrap();
        let snapshot = resolver.resolve(&walker).await.unwrap();
        assert_eq!(snapshot.motion.as_str(), "stopped");
    }

    #[tokio::test]
    async fn test_stop_keeps_last_position() {
        let store = Arc::new(InMemoryStore::new());
        let (walker, _agent, _target) = seed(&store).await;
        store
            .append(&JournalEntry::new(
                walker.id,
                EntryData::Stopped { reason: None, position: Position::new(3.0, 4.0) },
            ))
            .await
            .unwrap();

        executor(&store).stop(walker.id).await.unwrap();

        let stops = store.entries_of(walker.id, EntryKind::Stopped).await.unwrap();
        assert_eq!(stops.len(), 2);
        assert_eq!(
            stops[1].data,
            EntryData::Stopped { reason: None, position: Position::new(3.0, 4.0) }
        );
    }

    #[tokio::test]
    async fn test_single_id_lookups_propagate_missing_references() {
        let store = Arc::new(InMemoryStore::new());
        let (_walker, agent, _target) = seed(&store).await;
        let movement = executor(&store);

        let missing = Uuid::new_v4();
        assert!(matches!(
            movement.stop(missing).await,
            Err(DomainError::PlayerNotFound(id)) if id == missing
        ));
        assert!(matches!(
            movement.walk(missing, &[], missing).await,
            Err(DomainError::AgentNotFound(_))
        ));
        assert!(matches!(
            movement.walk(agent.id, &[], missing).await,
            Err(DomainError::PlayerNotFound(_))
        ));
    }
}
