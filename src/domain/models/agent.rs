//! Agent domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Decision-making unit backing a player.
///
/// `thinking` is true while a decision request for this agent is
/// outstanding. The harness only ever sets it; the decision maker clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier.
    pub id: Uuid,
    /// World the agent lives in.
    pub world_id: Uuid,
    /// Player this agent controls.
    pub player_id: Uuid,
    /// Set while a decision is pending.
    pub thinking: bool,
    /// Last time the thinking flag changed.
    pub updated_at: DateTime<Utc>,
}

impl Agent {
    /// Idle agent for `player_id`.
    pub fn new(world_id: Uuid, player_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            world_id,
            player_id,
            thinking: false,
            updated_at: Utc::now(),
        }
    }
}
