//! In-memory store implementing the world, agent and journal ports.
//!
//! Backs in-memory harnesses and unit tests. Records are kept in insertion
//! order so roster ordering matches the SQLite adapter.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Agent, EntryKind, JournalEntry, Player, World};
use crate::domain::ports::{AgentRepository, JournalRepository, WorldRepository};

#[derive(Debug, Default)]
struct Tables {
    worlds: Vec<World>,
    players: Vec<Player>,
    agents: Vec<Agent>,
    journal: Vec<JournalEntry>,
}

/// Shared in-memory store. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> DomainResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| DomainError::DatabaseError("in-memory store lock poisoned".to_string()))
    }
}

/// Last element with the greatest key; ties go to the later insertion.
fn latest_by<T: Clone, K: Ord>(items: &[T], key: impl Fn(&T) -> K) -> Option<T> {
    items
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| key(a).cmp(&key(b)).then(ia.cmp(ib)))
        .map(|(_, item)| item.clone())
}

#[async_trait]
impl WorldRepository for InMemoryStore {
    async fn create_world(&self, world: &World) -> DomainResult<()> {
        self.lock()?.worlds.push(world.clone());
        Ok(())
    }

    async fn latest_world(&self) -> DomainResult<Option<World>> {
        Ok(latest_by(&self.lock()?.worlds, |w| w.created_at))
    }

    async fn create_player(&self, player: &Player) -> DomainResult<()> {
        self.lock()?.players.push(player.clone());
        Ok(())
    }

    async fn roster_of(&self, world_id: Uuid) -> DomainResult<Vec<Player>> {
        let mut roster: Vec<Player> = self
            .lock()?
            .players
            .iter()
            .filter(|p| p.world_id == world_id)
            .cloned()
            .collect();
        roster.sort_by_key(|p| p.created_at);
        Ok(roster)
    }

    async fn player_by_id(&self, id: Uuid) -> DomainResult<Option<Player>> {
        Ok(self.lock()?.players.iter().find(|p| p.id == id).cloned())
    }

    async fn all_players(&self) -> DomainResult<Vec<Player>> {
        let mut players = self.lock()?.players.clone();
        players.sort_by_key(|p| p.created_at);
        Ok(players)
    }

    async fn latest_player(&self) -> DomainResult<Option<Player>> {
        Ok(latest_by(&self.lock()?.players, |p| p.created_at))
    }
}

#[async_trait]
impl AgentRepository for InMemoryStore {
    async fn create(&self, agent: &Agent) -> DomainResult<()> {
        self.lock()?.agents.push(agent.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<Agent>> {
        Ok(self.lock()?.agents.iter().find(|a| a.id == id).cloned())
    }

    async fn set_thinking(&self, id: Uuid, thinking: bool) -> DomainResult<()> {
        let mut tables = self.lock()?;
        let agent = tables
            .agents
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(DomainError::AgentNotFound(id))?;
        agent.thinking = thinking;
        agent.updated_at = Utc::now();
        Ok(())
    }

    async fn list_by_world(&self, world_id: Uuid) -> DomainResult<Vec<Agent>> {
        Ok(self
            .lock()?
            .agents
            .iter()
            .filter(|a| a.world_id == world_id)
            .cloned()
            .collect())
    }

    async fn clear_thinking(&self, world_id: Uuid) -> DomainResult<u64> {
        let mut cleared = 0;
        for agent in self
            .lock()?
            .agents
            .iter_mut()
            .filter(|a| a.world_id == world_id && a.thinking)
        {
            agent.thinking = false;
            agent.updated_at = Utc::now();
            cleared += 1;
        }
        Ok(cleared)
    }
}

#[async_trait]
impl JournalRepository for InMemoryStore {
    async fn append(&self, entry: &JournalEntry) -> DomainResult<()> {
        self.lock()?.journal.push(entry.clone());
        Ok(())
    }

    async fn entries_of(&self, player_id: Uuid, kind: EntryKind) -> DomainResult<Vec<JournalEntry>> {
        Ok(self
            .lock()?
            .journal
            .iter()
            .filter(|e| e.player_id == player_id && e.kind() == kind)
            .cloned()
            .collect())
    }

    async fn latest_movement_of(&self, player_id: Uuid) -> DomainResult<Option<JournalEntry>> {
        let tables = self.lock()?;
        let movements: Vec<JournalEntry> = tables
            .journal
            .iter()
            .filter(|e| e.player_id == player_id && e.kind().is_movement())
            .cloned()
            .collect();
        Ok(latest_by(&movements, |e| e.ts))
    }
}
