//! Movement executor port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::MovementIntent;

/// Carries out movement commands.
///
/// Both operations address a single id and propagate `PlayerNotFound` /
/// `AgentNotFound` when it does not resolve.
#[async_trait]
pub trait MovementExecutor: Send + Sync {
    /// Halt the player in place.
    async fn stop(&self, player_id: Uuid) -> DomainResult<()>;

    /// Walk the agent's player toward `destination`, ignoring `ignore` as obstacles.
    async fn walk(&self, agent_id: Uuid, ignore: &[Uuid], destination: Uuid) -> DomainResult<()>;

    /// Dispatch an intent to `stop` or `walk`.
    async fn apply(&self, intent: &MovementIntent) -> DomainResult<()> {
        match intent {
            MovementIntent::Stop { player_id } => self.stop(*player_id).await,
            MovementIntent::Walk {
                agent_id,
                ignore,
                destination,
            } => self.walk(*agent_id, ignore, *destination).await,
        }
    }
}
