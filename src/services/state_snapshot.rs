//! Loads the current world and its resolved roster.

use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Agent, Player, PlayerSnapshot, SessionContext, World};
use crate::domain::ports::{AgentRepository, PlayerStateResolver, WorldRepository};

/// Read side of the harness. Every operation except `mark_player_thinking`
/// is free of side effects.
pub struct StateSnapshot {
    worlds: Arc<dyn WorldRepository>,
    agents: Arc<dyn AgentRepository>,
    resolver: Arc<dyn PlayerStateResolver>,
}

impl StateSnapshot {
    /// Snapshot loader over the given stores and resolver.
    pub fn new(
        worlds: Arc<dyn WorldRepository>,
        agents: Arc<dyn AgentRepository>,
        resolver: Arc<dyn PlayerStateResolver>,
    ) -> Self {
        Self { worlds, agents, resolver }
    }

    /// The most recently created world, or `NoWorld`.
    pub async fn load_latest_world(&self) -> DomainResult<World> {
        self.worlds.latest_world().await?.ok_or(DomainError::NoWorld)
    }

    /// The most recently created world, or `None` when nothing has been initialized.
    pub async fn find_latest_world(&self) -> DomainResult<Option<World>> {
        self.worlds.latest_world().await
    }

    /// Every player of the world, resolved, in roster order.
    pub async fn load_roster(&self, world: &World) -> DomainResult<Vec<PlayerSnapshot>> {
        let players = self.worlds.roster_of(world.id).await?;
        self.resolve_all(&players).await
    }

    /// Latest world plus roster.
    #[instrument(skip(self), err)]
    pub async fn load_session(&self) -> DomainResult<SessionContext> {
        let world = self.load_latest_world().await?;
        let roster = self.load_roster(&world).await?;
        debug!(world_id = %world.id, players = roster.len(), "session loaded");
        Ok(SessionContext { world, roster })
    }

    /// All agents of the latest world.
    pub async fn agent_state(&self) -> DomainResult<Vec<Agent>> {
        let world = self.load_latest_world().await?;
        self.agents.list_by_world(world.id).await
    }

    /// Every player across every world, resolved.
    pub async fn all_players(&self) -> DomainResult<Vec<PlayerSnapshot>> {
        let players = self.worlds.all_players().await?;
        self.resolve_all(&players).await
    }

    /// The most recently created player, if any.
    pub async fn latest_player(&self) -> DomainResult<Option<PlayerSnapshot>> {
        match self.worlds.latest_player().await? {
            Some(player) => Ok(Some(self.resolver.resolve(&player).await?)),
            None => Ok(None),
        }
    }

    /// One player by id. Unknown ids are an error.
    pub async fn player_snapshot(&self, player_id: Uuid) -> DomainResult<PlayerSnapshot> {
        let player = self.require_player(player_id).await?;
        self.resolver.resolve(&player).await
    }

    /// Set one player's agent thinking and return the refreshed snapshot.
    ///
    /// Unlike the batch gate, a missing player or agent is an error here.
    #[instrument(skip(self), err)]
    pub async fn mark_player_thinking(&self, player_id: Uuid) -> DomainResult<PlayerSnapshot> {
        let player = self.require_player(player_id).await?;
        let agent_id = player
            .agent_id
            .ok_or(DomainError::PlayerHasNoAgent(player_id))?;
        self.agents.set_thinking(agent_id, true).await?;
        self.resolver.resolve(&player).await
    }

    async fn require_player(&self, player_id: Uuid) -> DomainResult<Player> {
        self.worlds
            .player_by_id(player_id)
            .await?
            .ok_or(DomainError::PlayerNotFound(player_id))
    }

    async fn resolve_all(&self, players: &[Player]) -> DomainResult<Vec<PlayerSnapshot>> {
        let mut snapshots = Vec::with_capacity(players.len());
        for player in players {
            snapshots.push(self.resolver.resolve(player).await?);
        }
        Ok(snapshots)
    }
}
