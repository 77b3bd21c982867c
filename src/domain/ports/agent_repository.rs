//! Agent repository port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::Agent;

/// Repository interface for Agent persistence.
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Create a new agent.
    async fn create(&self, agent: &Agent) -> DomainResult<()>;

    /// Get an agent by ID.
    async fn get(&self, id: Uuid) -> DomainResult<Option<Agent>>;

    /// Set or clear the thinking flag.
    ///
    /// Returns `AgentNotFound` when no agent has this id.
    async fn set_thinking(&self, id: Uuid, thinking: bool) -> DomainResult<()>;

    /// All agents of a world.
    async fn list_by_world(&self, world_id: Uuid) -> DomainResult<Vec<Agent>>;

    /// Clear the thinking flag of every agent in a world. Returns how many were cleared.
    async fn clear_thinking(&self, world_id: Uuid) -> DomainResult<u64>;
}
