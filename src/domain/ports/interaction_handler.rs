//! Interaction-handler collaborator port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{ConversationOptions, PlayerSnapshot};

/// Callback receiving `(agent_id, activity)` as agents finish their part.
pub type ActivitySink<'a> = &'a (dyn Fn(Uuid, &str) + Send + Sync);

/// Plays out one conversation among a roster.
#[async_trait]
pub trait InteractionHandler: Send + Sync {
    /// Run a single conversation among `roster`, reporting each agent's
    /// activity through `on_activity`.
    async fn run_one_conversation(
        &self,
        roster: &[PlayerSnapshot],
        options: ConversationOptions,
        on_activity: ActivitySink<'_>,
    ) -> DomainResult<()>;
}
