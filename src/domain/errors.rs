//! Domain errors for the simloop harness.

use thiserror::Error;
use uuid::Uuid;

/// Domain-level errors that can occur while driving a simulation.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No world has been created yet.
    #[error("No worlds exist yet: initialize a world first (try `simloop init --players 2`)")]
    NoWorld,

    /// The latest world has no players.
    #[error("World {0} has no players to converge")]
    EmptyRoster(Uuid),

    /// A player id did not resolve.
    #[error("Player not found: {0}")]
    PlayerNotFound(Uuid),

    /// An agent id did not resolve.
    #[error("Agent not found: {0}")]
    AgentNotFound(Uuid),

    /// The player is not driven by an agent.
    #[error("Player {0} has no agent")]
    PlayerHasNoAgent(Uuid),

    /// A negative repetition count was requested.
    #[error("Iteration count must not be negative, got {0}")]
    InvalidIterations(i64),

    /// Another loop run is in progress.
    #[error("Loop is already running")]
    LoopAlreadyRunning,

    /// A decision or interaction collaborator failed.
    #[error("Collaborator failed: {0}")]
    Collaborator(String),

    /// Input rejected before reaching storage.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Storage failure.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Payload could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DomainError {
    /// True for errors raised because a referenced player or agent id does not resolve.
    pub fn is_missing_reference(&self) -> bool {
        matches!(
            self,
            Self::PlayerNotFound(_) | Self::AgentNotFound(_) | Self::PlayerHasNoAgent(_)
        )
    }
}

/// Result alias used across the domain and service layers.
pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_world_message_is_operator_directed() {
        let msg = DomainError::NoWorld.to_string();
        assert!(msg.contains("initialize a world first"));
    }

    #[test]
    fn test_missing_reference_classification() {
        let id = Uuid::new_v4();
        assert!(DomainError::PlayerNotFound(id).is_missing_reference());
        assert!(DomainError::AgentNotFound(id).is_missing_reference());
        assert!(DomainError::PlayerHasNoAgent(id).is_missing_reference());
        assert!(!DomainError::NoWorld.is_missing_reference());
        assert!(!DomainError::Collaborator("boom".into()).is_missing_reference());
    }
}
