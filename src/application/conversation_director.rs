//! ConversationDirector - repeats simulated conversations over the roster.

use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::ConversationOptions;
use crate::domain::ports::InteractionHandler;
use crate::services::StateSnapshot;

/// Runs scripted conversations over the latest roster.
pub struct ConversationDirector {
    snapshot: Arc<StateSnapshot>,
    handler: Arc<dyn InteractionHandler>,
}

impl ConversationDirector {
    /// Director that loads rosters from `snapshot` and delegates to `handler`.
    pub fn new(snapshot: Arc<StateSnapshot>, handler: Arc<dyn InteractionHandler>) -> Self {
        Self { snapshot, handler }
    }

    /// Run `count` conversations one after another with the full roster.
    ///
    /// The first failing conversation aborts the rest. Returns how many ran.
    #[instrument(skip(self), err)]
    pub async fn run_conversations(&self, count: u32, options: ConversationOptions) -> DomainResult<u32> {
        let session = self.snapshot.load_session().await?;
        let on_activity = |agent_id: Uuid, activity: &str| {
            info!(%agent_id, activity, "agent activity");
        };

        for index in 0..count {
            self.handler
                .run_one_conversation(&session.roster, options, &on_activity)
                .await?;
            info!(conversation = index + 1, of = count, "conversation finished");
        }

        Ok(count)
    }
}
