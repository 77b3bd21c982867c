//! Marks agents busy ahead of a batch dispatch.

use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::{AgentRepository, WorldRepository};

/// Marks agents busy before a decision batch.
pub struct ThinkingGate {
    worlds: Arc<dyn WorldRepository>,
    agents: Arc<dyn AgentRepository>,
}

impl ThinkingGate {
    /// Gate resolving players through `worlds` and flagging through `agents`.
    pub fn new(worlds: Arc<dyn WorldRepository>, agents: Arc<dyn AgentRepository>) -> Self {
        Self { worlds, agents }
    }

    /// Set `thinking` on the agent of every listed player.
    ///
    /// Ids that do not resolve to a player with an existing agent are skipped.
    /// Returns how many agents were marked.
    #[instrument(skip(self, player_ids), fields(players = player_ids.len()), err)]
    pub async fn mark_busy(&self, player_ids: &[Uuid]) -> DomainResult<usize> {
        let mut marked = 0;

        for &player_id in player_ids {
            let Some(player) = self.worlds.player_by_id(player_id).await? else {
                debug!(%player_id, "skipping unknown player");
                continue;
            };
            let Some(agent_id) = player.agent_id else {
                debug!(%player_id, "skipping player without agent");
                continue;
            };

            match self.agents.set_thinking(agent_id, true).await {
                Ok(()) => marked += 1,
                Err(DomainError::AgentNotFound(_)) => {
                    debug!(%player_id, %agent_id, "skipping dangling agent reference");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(marked)
    }
}
