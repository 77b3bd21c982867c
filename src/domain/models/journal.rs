//! Journal domain model.
//!
//! The journal is the append-only event log of every player. Movement and
//! speech are both recorded here; display state is derived from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::player::Position;

/// Discriminant of a journal entry, used for indexed lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Speech.
    Talking,
    /// Halt.
    Stopped,
    /// Walk start.
    Walking,
}

impl EntryKind {
    /// Stable name used for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Talking => "talking",
            Self::Stopped => "stopped",
            Self::Walking => "walking",
        }
    }

    /// Inverse of [`EntryKind::as_str`].
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "talking" => Some(Self::Talking),
            "stopped" => Some(Self::Stopped),
            "walking" => Some(Self::Walking),
            _ => None,
        }
    }

    /// Whether entries of this kind change a player's motion.
    pub fn is_movement(&self) -> bool {
        matches!(self, Self::Stopped | Self::Walking)
    }
}

/// Payload of a journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryData {
    /// A line of speech addressed to `audience`.
    Talking {
        /// Listening players.
        audience: Vec<Uuid>,
        /// The spoken line.
        content: String,
        /// Groups the lines of one conversation.
        conversation_id: Uuid,
    },
    /// The player halted at `position`.
    Stopped {
        /// Why the player stopped, e.g. `spawned`.
        #[serde(default)]
        reason: Option<String>,
        /// Where the player stands.
        position: Position,
    },
    /// The player started walking toward `target`, routing around `ignore`.
    Walking {
        /// Player walked toward.
        target: Uuid,
        /// Players the path may pass through.
        #[serde(default)]
        ignore: Vec<Uuid>,
    },
}

impl EntryData {
    /// Discriminant of this payload.
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Talking { .. } => EntryKind::Talking,
            Self::Stopped { .. } => EntryKind::Stopped,
            Self::Walking { .. } => EntryKind::Walking,
        }
    }
}

/// One event in a player's journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: Uuid,
    /// Player whose journal holds the entry.
    pub player_id: Uuid,
    /// What happened.
    pub data: EntryData,
    /// When the event happened.
    pub ts: DateTime<Utc>,
}

impl JournalEntry {
    /// Entry stamped with the current time.
    pub fn new(player_id: Uuid, data: EntryData) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_id,
            data,
            ts: Utc::now(),
        }
    }

    /// Override the timestamp.
    pub fn at(mut self, ts: DateTime<Utc>) -> Self {
        self.ts = ts;
        self
    }

    /// Discriminant of the payload.
    pub fn kind(&self) -> EntryKind {
        self.data.kind()
    }
}

/// Display form of a `talking` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientMessage {
    /// When the line was spoken.
    pub ts: DateTime<Utc>,
    /// Speaking player.
    pub from: Uuid,
    /// Display name of the speaker.
    pub from_name: String,
    /// Listening players.
    pub to: Vec<Uuid>,
    /// The spoken line.
    pub content: String,
    /// Conversation the line belongs to.
    pub conversation_id: Uuid,
}
