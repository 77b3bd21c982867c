//! World domain model.
//!
//! A world is one simulation session instance. The harness only ever
//! operates on the most recently created one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A simulated world; the most recently created one is the active world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Creation time; the newest world is the latest one.
    pub created_at: DateTime<Utc>,
}

impl World {
    /// World created now.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    /// Override the creation time.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}
