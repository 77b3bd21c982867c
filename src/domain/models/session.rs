//! Session context: the world an operation runs against, loaded explicitly.

use serde::Serialize;
use uuid::Uuid;

use super::player::PlayerSnapshot;
use super::world::World;

/// The latest world together with its resolved roster.
///
/// Roster order is the world's creation order; directors rely on it.
#[derive(Debug, Clone, Serialize)]
pub struct SessionContext {
    /// The latest world.
    pub world: World,
    /// Players in creation order.
    pub roster: Vec<PlayerSnapshot>,
}

impl SessionContext {
    /// Ids of every roster player, in roster order.
    pub fn player_ids(&self) -> Vec<Uuid> {
        self.roster.iter().map(|p| p.id).collect()
    }

    /// Agent ids of the agent-backed players, in roster order.
    pub fn agent_ids(&self) -> Vec<Uuid> {
        self.roster.iter().filter_map(|p| p.agent_id).collect()
    }
}

/// Options handed to the interaction handler for one conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversationOptions {
    /// Upper bound on lines spoken.
    pub max_messages: u32,
}
