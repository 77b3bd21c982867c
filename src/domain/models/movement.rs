//! Movement intents and batch dispatch modes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A command for the movement executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MovementIntent {
    /// Halt the player in place.
    Stop {
        /// Player to halt.
        player_id: Uuid,
    },
    /// Walk the agent's player toward `destination`, routing around `ignore`.
    Walk {
        /// Agent whose player walks.
        agent_id: Uuid,
        /// Players the path may pass through.
        ignore: Vec<Uuid>,
        /// Player to walk to.
        destination: Uuid,
    },
}

/// How a batch of decision turns is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Enqueue the turns and return at once; follow-on work may be scheduled.
    Scheduled,
    /// Run one turn per agent and return only after all have been attempted.
    Immediate,
}

impl DispatchMode {
    /// Stable name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Immediate => "immediate",
        }
    }
}
