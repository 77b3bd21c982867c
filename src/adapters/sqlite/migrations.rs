//! SQLite database migration management.

use sqlx::{Executor, SqlitePool};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while applying migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// A migration script failed.
    #[error("Failed to execute migration {version}: {source}")]
    ExecutionError {
        /// Version of the failing migration.
        version: i64,
        /// Underlying driver error.
        #[source]
        source: sqlx::Error,
    },
    /// The schema version could not be read.
    #[error("Failed to get schema version: {0}")]
    VersionCheckError(#[source] sqlx::Error),
}

/// One embedded SQL migration.
#[derive(Debug, Clone)]
pub struct Migration {
    /// Monotonic schema version.
    pub version: i64,
    /// Human-readable summary stored alongside the version.
    pub description: String,
    /// Script executed as a single unprepared batch.
    pub sql: String,
}

/// Applies embedded migrations and records them in `schema_migrations`.
pub struct Migrator {
    pool: SqlitePool,
}

impl Migrator {
    /// Migrator over `pool`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply every migration newer than the recorded schema version.
    ///
    /// Returns how many were applied.
    pub async fn run_embedded_migrations(&self, migrations: Vec<Migration>) -> Result<usize, MigrationError> {
        self.ensure_migrations_table().await?;
        let current_version = self.get_current_version().await?;
        let pending: Vec<_> = migrations.into_iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            debug!(current_version, "schema up to date");
            return Ok(0);
        }

        for migration in &pending {
            self.apply_migration(migration).await?;
            info!(version = migration.version, description = %migration.description, "applied migration");
        }

        Ok(pending.len())
    }

    async fn ensure_migrations_table(&self) -> Result<(), MigrationError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT (datetime('now')),
                description TEXT
            )"
        )
        .execute(&self.pool)
        .await
        .map_err(|e| MigrationError::ExecutionError { version: 0, source: e })?;
        Ok(())
    }

    /// Highest applied version, or 0 on a fresh database.
    pub async fn get_current_version(&self) -> Result<i64, MigrationError> {
        let result: Option<(i64,)> = sqlx::query_as("SELECT COALESCE(MAX(version), 0) FROM schema_migrations")
            .fetch_optional(&self.pool)
            .await
            .map_err(MigrationError::VersionCheckError)?;
        Ok(result.map(|(v,)| v).unwrap_or(0))
    }

    async fn apply_migration(&self, migration: &Migration) -> Result<(), MigrationError> {
        // Unprepared execution so multi-statement scripts run in one call.
        self.pool
            .execute(migration.sql.as_str())
            .await
            .map_err(|e| MigrationError::ExecutionError { version: migration.version, source: e })?;

        sqlx::query("INSERT INTO schema_migrations (version, description) VALUES (?, ?)")
            .bind(migration.version)
            .bind(&migration.description)
            .execute(&self.pool)
            .await
            .map_err(|e| MigrationError::ExecutionError { version: migration.version, source: e })?;
        Ok(())
    }
}

/// Version 1: worlds, players, agents and journal.
pub fn initial_schema_migration() -> Migration {
    Migration {
        version: 1,
        description: "Worlds, players, agents and journal".to_string(),
        sql: include_str!("../../../migrations/001_initial_schema.sql").to_string(),
    }
}

/// Every migration shipped with the binary, in version order.
pub fn all_embedded_migrations() -> Vec<Migration> {
    vec![initial_schema_migration()]
}
