//! SQLite implementation of the JournalRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{EntryData, EntryKind, JournalEntry};
use crate::domain::ports::JournalRepository;

use super::{format_datetime, parse_datetime, parse_uuid};

/// SQLite-backed journal.
#[derive(Clone)]
pub struct SqliteJournalRepository {
    pool: SqlitePool,
}

impl SqliteJournalRepository {
    /// Repository over an already migrated pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JournalRepository for SqliteJournalRepository {
    async fn append(&self, entry: &JournalEntry) -> DomainResult<()> {
        let data_json = serde_json::to_string(&entry.data)?;

        sqlx::query(
            r#"INSERT INTO journal (id, player_id, entry_type, data, ts)
               VALUES (?, ?, ?, ?, ?)"#
        )
        .bind(entry.id.to_string())
        .bind(entry.player_id.to_string())
        .bind(entry.kind().as_str())
        .bind(&data_json)
        .bind(format_datetime(&entry.ts))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn entries_of(&self, player_id: Uuid, kind: EntryKind) -> DomainResult<Vec<JournalEntry>> {
        let rows: Vec<JournalRow> = sqlx::query_as(
            "SELECT * FROM journal WHERE player_id = ? AND entry_type = ? ORDER BY rowid ASC"
        )
        .bind(player_id.to_string())
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn latest_movement_of(&self, player_id: Uuid) -> DomainResult<Option<JournalEntry>> {
        let row: Option<JournalRow> = sqlx::query_as(
            r#"SELECT * FROM journal
               WHERE player_id = ? AND entry_type IN ('stopped', 'walking')
               ORDER BY ts DESC, rowid DESC LIMIT 1"#
        )
        .bind(player_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.try_into()).transpose()
    }
}

#[derive(sqlx::FromRow)]
struct JournalRow {
    id: String,
    player_id: String,
    entry_type: String,
    data: String,
    ts: String,
}

impl TryFrom<JournalRow> for JournalEntry {
    type Error = DomainError;

    fn try_from(row: JournalRow) -> Result<Self, Self::Error> {
        let data: EntryData = serde_json::from_str(&row.data)?;

        let kind = EntryKind::parse_str(&row.entry_type)
            .ok_or_else(|| DomainError::SerializationError(format!("Invalid entry type: {}", row.entry_type)))?;
        if kind != data.kind() {
            return Err(DomainError::SerializationError(format!(
                "Entry type {} does not match payload {}",
                row.entry_type,
                data.kind().as_str()
            )));
        }

        Ok(JournalEntry {
            id: parse_uuid(&row.id)?,
            player_id: parse_uuid(&row.player_id)?,
            data,
            ts: parse_datetime(&row.ts)?,
        })
    }
}
