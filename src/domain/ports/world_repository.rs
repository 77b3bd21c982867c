//! World and player store port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Player, World};

/// Repository interface for worlds and the players they own.
#[async_trait]
pub trait WorldRepository: Send + Sync {
    /// Create a new world.
    async fn create_world(&self, world: &World) -> DomainResult<()>;

    /// Get the most recently created world, if any.
    ///
    /// Ties on `created_at` are broken by insertion order (last wins).
    async fn latest_world(&self) -> DomainResult<Option<World>>;

    /// Create a new player.
    async fn create_player(&self, player: &Player) -> DomainResult<()>;

    /// All players of a world in creation order.
    ///
    /// Ordering is `created_at` ascending with ties broken by insertion order.
    /// Directors pick "the first player" from this order, so implementations
    /// must keep it stable.
    async fn roster_of(&self, world_id: Uuid) -> DomainResult<Vec<Player>>;

    /// Get a player by ID.
    async fn player_by_id(&self, id: Uuid) -> DomainResult<Option<Player>>;

    /// Every player of every world, in creation order.
    async fn all_players(&self) -> DomainResult<Vec<Player>>;

    /// The most recently created player across all worlds.
    async fn latest_player(&self) -> DomainResult<Option<Player>>;
}
