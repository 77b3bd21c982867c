//! Scripted decision maker.
//!
//! A decision turn does no reasoning: it releases the agent by clearing its
//! `thinking` flag and counts the turn.

use async_trait::async_trait;
use futures::future::try_join_all;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::DispatchMode;
use crate::domain::ports::{AgentRepository, DecisionMaker, WorldRepository};

/// Decision maker that completes each player's turn locally by clearing
/// the agent's thinking flag.
#[derive(Clone)]
pub struct ScriptedDecisionMaker {
    worlds: Arc<dyn WorldRepository>,
    agents: Arc<dyn AgentRepository>,
    turns: Arc<AtomicU64>,
}

impl ScriptedDecisionMaker {
    /// Decision maker over the given stores.
    pub fn new(worlds: Arc<dyn WorldRepository>, agents: Arc<dyn AgentRepository>) -> Self {
        Self {
            worlds,
            agents,
            turns: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Decision turns completed so far, scheduled ones included.
    pub fn turns_completed(&self) -> u64 {
        self.turns.load(Ordering::SeqCst)
    }

    /// One turn for one player. Returns whether an agent took the turn.
    async fn take_turn(&self, player_id: Uuid) -> DomainResult<bool> {
        let Some(agent_id) = self
            .worlds
            .player_by_id(player_id)
            .await?
            .and_then(|player| player.agent_id)
        else {
            return Ok(false);
        };

        match self.agents.set_thinking(agent_id, false).await {
            Ok(()) => {
                self.turns.fetch_add(1, Ordering::SeqCst);
                Ok(true)
            }
            Err(DomainError::AgentNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn run_batch(&self, player_ids: &[Uuid]) -> DomainResult<usize> {
        let taken = try_join_all(player_ids.iter().map(|&id| self.take_turn(id))).await?;
        Ok(taken.into_iter().filter(|&t| t).count())
    }
}

#[async_trait]
impl DecisionMaker for ScriptedDecisionMaker {
    #[instrument(skip(self, player_ids), fields(players = player_ids.len(), mode = mode.as_str()), err)]
    async fn decide_batch(&self, player_ids: &[Uuid], mode: DispatchMode) -> DomainResult<()> {
        match mode {
            DispatchMode::Immediate => {
                let taken = self.run_batch(player_ids).await?;
                debug!(taken, "immediate batch complete");
            }
            DispatchMode::Scheduled => {
                let this = self.clone();
                let ids = player_ids.to_vec();
                tokio::spawn(async move {
                    match this.run_batch(&ids).await {
                        Ok(taken) => debug!(taken, "scheduled batch complete"),
                        Err(e) => warn!(error = %e, "scheduled batch failed"),
                    }
                });
            }
        }
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn reset_all_pending(&self) -> DomainResult<()> {
        let Some(world) = self.worlds.latest_world().await? else {
            debug!("no world; nothing pending");
            return Ok(());
        };
        let cleared = self.agents.clear_thinking(world.id).await?;
        debug!(world_id = %world.id, cleared, "pending decisions released");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::models::Player;
    use crate::services::{ThinkingGate, WorldSeeder};
    use std::time::Duration;

    async fn thinking_count(store: &InMemoryStore, world_id: Uuid) -> usize {
        store
            .list_by_world(world_id)
            .await
            .unwrap()
            .iter()
            .filter(|a| a.thinking)
            .count()
    }

    #[tokio::test]
    async fn test_immediate_batch_releases_every_agent() {
        let store = Arc::new(InMemoryStore::new());
        let seeded = WorldSeeder::new(store.clone(), store.clone(), store.clone())
            .seed("town", 3)
            .await
            .unwrap();
        let ids: Vec<_> = seeded.players.iter().map(|p| p.id).collect();
        ThinkingGate::new(store.clone(), store.clone()).mark_busy(&ids).await.unwrap();

        let decisions = ScriptedDecisionMaker::new(store.clone(), store.clone());
        decisions.decide_batch(&ids, DispatchMode::Immediate).await.unwrap();

        assert_eq!(thinking_count(&store, seeded.world.id).await, 0);
        assert_eq!(decisions.turns_completed(), 3);
    }

    #[tokio::test]
    async fn test_batch_skips_players_without_agents() {
        let store = Arc::new(InMemoryStore::new());
        let seeded = WorldSeeder::new(store.clone(), store.clone(), store.clone())
            .seed("town", 1)
            .await
            .unwrap();
        let human = Player::new(seeded.world.id, "Human");
        store.create_player(&human).await.unwrap();

        let decisions = ScriptedDecisionMaker::new(store.clone(), store.clone());
        let ids = vec![human.id, Uuid::new_v4(), seeded.players[0].id];
        decisions.decide_batch(&ids, DispatchMode::Immediate).await.unwrap();

        assert_eq!(decisions.turns_completed(), 1);
    }

    #[tokio::test]
    async fn test_scheduled_batch_completes_in_background() {
        let store = Arc::new(InMemoryStore::new());
        let seeded = WorldSeeder::new(store.clone(), store.clone(), store.clone())
            .seed("town", 2)
            .await
            .unwrap();
        let ids: Vec<_> = seeded.players.iter().map(|p| p.id).collect();

        let decisions = ScriptedDecisionMaker::new(store.clone(), store.clone());
        decisions.decide_batch(&ids, DispatchMode::Scheduled).await.unwrap();

        for _ in 0..50 {
            if decisions.turns_completed() == 2 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(decisions.turns_completed(), 2);
    }

    #[tokio::test]
    async fn test_reset_clears_latest_world_only() {
        let store = Arc::new(InMemoryStore::new());
        let seeder = WorldSeeder::new(store.clone(), store.clone(), store.clone());
        let gate = ThinkingGate::new(store.clone(), store.clone());

        let old = seeder.seed("old", 1).await.unwrap();
        gate.mark_busy(&[old.players[0].id]).await.unwrap();
        let new = seeder.seed("new", 2).await.unwrap();
        let ids: Vec<_> = new.players.iter().map(|p| p.id).collect();
        gate.mark_busy(&ids).await.unwrap();

        let decisions = ScriptedDecisionMaker::new(store.clone(), store.clone());
        decisions.reset_all_pending().await.unwrap();

        assert_eq!(thinking_count(&store, new.world.id).await, 0);
        assert_eq!(thinking_count(&store, old.world.id).await, 1);
        assert_eq!(decisions.turns_completed(), 0);
    }

    #[tokio::test]
    async fn test_reset_without_world_is_noop() {
        let store = Arc::new(InMemoryStore::new());
        let decisions = ScriptedDecisionMaker::new(store.clone(), store.clone());
        decisions.reset_all_pending().await.unwrap();
    }
}
