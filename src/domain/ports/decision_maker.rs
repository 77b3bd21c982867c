//! Decision-making collaborator port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::DispatchMode;

/// Runs agent decision turns.
///
/// Implementations own the thinking flag once it has been set: they clear it
/// when an agent's turn completes.
#[async_trait]
pub trait DecisionMaker: Send + Sync {
    /// Request one decision turn for each player's agent.
    ///
    /// With [`DispatchMode::Immediate`] the call returns only once every turn
    /// has been attempted. With [`DispatchMode::Scheduled`] it may return
    /// before any turn has run.
    async fn decide_batch(&self, player_ids: &[Uuid], mode: DispatchMode) -> DomainResult<()>;

    /// Release all in-flight decision state.
    async fn reset_all_pending(&self) -> DomainResult<()>;
}
