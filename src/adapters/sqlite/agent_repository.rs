//! SQLite implementation of the AgentRepository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Agent;
use crate::domain::ports::AgentRepository;

use super::{format_datetime, parse_datetime, parse_uuid};

/// SQLite-backed agent store.
#[derive(Clone)]
pub struct SqliteAgentRepository {
    pool: SqlitePool,
}

impl SqliteAgentRepository {
    /// Repository over an already migrated pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AgentRepository for SqliteAgentRepository {
    async fn create(&self, agent: &Agent) -> DomainResult<()> {
        sqlx::query(
            r#"INSERT INTO agents (id, world_id, player_id, thinking, updated_at)
               VALUES (?, ?, ?, ?, ?)"#
        )
        .bind(agent.id.to_string())
        .bind(agent.world_id.to_string())
        .bind(agent.player_id.to_string())
        .bind(i32::from(agent.thinking))
        .bind(format_datetime(&agent.updated_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<Agent>> {
        let row: Option<AgentRow> = sqlx::query_as("SELECT * FROM agents WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.try_into()).transpose()
    }

    async fn set_thinking(&self, id: Uuid, thinking: bool) -> DomainResult<()> {
        let result = sqlx::query("UPDATE agents SET thinking = ?, updated_at = ? WHERE id = ?")
            .bind(i32::from(thinking))
            .bind(format_datetime(&Utc::now()))
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AgentNotFound(id));
        }

        Ok(())
    }

    async fn list_by_world(&self, world_id: Uuid) -> DomainResult<Vec<Agent>> {
        let rows: Vec<AgentRow> = sqlx::query_as(
            "SELECT * FROM agents WHERE world_id = ? ORDER BY rowid ASC"
        )
        .bind(world_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn clear_thinking(&self, world_id: Uuid) -> DomainResult<u64> {
        let result = sqlx::query(
            "UPDATE agents SET thinking = 0, updated_at = ? WHERE world_id = ? AND thinking != 0"
        )
        .bind(format_datetime(&Utc::now()))
        .bind(world_id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[derive(sqlx::FromRow)]
struct AgentRow {
    id: String,
    world_id: String,
    player_id: String,
    thinking: i32,
    updated_at: String,
}

impl TryFrom<AgentRow> for Agent {
    type Error = DomainError;

    fn try_from(row: AgentRow) -> Result<Self, Self::Error> {
        Ok(Agent {
            id: parse_uuid(&row.id)?,
            world_id: parse_uuid(&row.world_id)?,
            player_id: parse_uuid(&row.player_id)?,
            thinking: row.thinking != 0,
            updated_at: parse_datetime(&row.updated_at)?,
        })
    }
}
