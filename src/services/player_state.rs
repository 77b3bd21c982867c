//! Resolves players into display snapshots from the agent store and journal.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::models::{EntryData, Motion, Player, PlayerSnapshot};
use crate::domain::ports::{AgentRepository, JournalRepository, PlayerStateResolver};

/// Derives player display state from agents and the journal.
pub struct JournalPlayerStateResolver {
    agents: Arc<dyn AgentRepository>,
    journal: Arc<dyn JournalRepository>,
}

impl JournalPlayerStateResolver {
    /// Resolver reading flags from `agents` and motion from `journal`.
    pub fn new(agents: Arc<dyn AgentRepository>, journal: Arc<dyn JournalRepository>) -> Self {
        Self { agents, journal }
    }
}

#[async_trait]
impl PlayerStateResolver for JournalPlayerStateResolver {
    async fn resolve(&self, player: &Player) -> DomainResult<PlayerSnapshot> {
        let mut snapshot = PlayerSnapshot::idle(player);

        // A dangling agent id reads as "not thinking"; it is not an error here.
        if let Some(agent_id) = player.agent_id {
            snapshot.thinking = self
                .agents
                .get(agent_id)
                .await?
                .is_some_and(|agent| agent.thinking);
        }

        if let Some(entry) = self.journal.latest_movement_of(player.id).await? {
            match entry.data {
                EntryData::Stopped { position, .. } => snapshot.motion = Motion::Stopped { position },
                EntryData::Walking { target, ignore } => snapshot.motion = Motion::Walking { target, ignore },
                EntryData::Talking { .. } => {}
            }
        }

        Ok(snapshot)
    }
}
