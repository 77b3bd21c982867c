//! Player domain model and its derived display state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A player belonging to a world.
///
/// Players controlled by the simulation carry the id of the agent that
/// makes their decisions. Human-controlled players have no agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier.
    pub id: Uuid,
    /// World the player belongs to.
    pub world_id: Uuid,
    /// Display name.
    pub name: String,
    /// `None` for players no agent drives.
    pub agent_id: Option<Uuid>,
    /// Determines roster order.
    pub created_at: DateTime<Utc>,
}

impl Player {
    /// Player without an agent, created now.
    pub fn new(world_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            world_id,
            name: name.into(),
            agent_id: None,
            created_at: Utc::now(),
        }
    }

    /// Attach an agent.
    pub fn with_agent(mut self, agent_id: Uuid) -> Self {
        self.agent_id = Some(agent_id);
        self
    }

    /// Override the creation time.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// A point on the world map.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Position at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// What a player is currently doing with its body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Motion {
    /// Standing still.
    Stopped {
        /// Where the player stands.
        position: Position,
    },
    /// Heading toward another player.
    Walking {
        /// Player walked toward.
        target: Uuid,
        /// Players the path may pass through.
        #[serde(default)]
        ignore: Vec<Uuid>,
    },
}

impl Default for Motion {
    fn default() -> Self {
        Self::Stopped {
            position: Position::default(),
        }
    }
}

impl Motion {
    /// Stable name used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stopped { .. } => "stopped",
            Self::Walking { .. } => "walking",
        }
    }
}

/// Player record resolved with the state a client would display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Player id.
    pub id: Uuid,
    /// World the player belongs to.
    pub world_id: Uuid,
    /// Display name.
    pub name: String,
    /// Driving agent, if any.
    pub agent_id: Option<Uuid>,
    /// Whether the agent has a decision pending.
    pub thinking: bool,
    /// Last recorded movement.
    pub motion: Motion,
}

impl PlayerSnapshot {
    /// Snapshot with no journal history: stopped at the origin, not thinking.
    pub fn idle(player: &Player) -> Self {
        Self {
            id: player.id,
            world_id: player.world_id,
            name: player.name.clone(),
            agent_id: player.agent_id,
            thinking: false,
            motion: Motion::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_snapshot_copies_identity() {
        let agent_id = Uuid::new_v4();
        let player = Player::new(Uuid::new_v4(), "Lucky").with_agent(agent_id);

        let snapshot = PlayerSnapshot::idle(&player);
        assert_eq!(snapshot.id, player.id);
        assert_eq!(snapshot.agent_id, Some(agent_id));
        assert!(!snapshot.thinking);
        assert_eq!(snapshot.motion.as_str(), "stopped");
    }

    #[test]
    fn test_motion_serializes_with_type_tag() {
        let target = Uuid::new_v4();
        let motion = Motion::Walking { target, ignore: vec![] };
        let json = serde_json::to_value(&motion).unwrap();
        assert_eq!(json["type"], "walking");
        assert_eq!(json["target"], target.to_string());
    }
}
