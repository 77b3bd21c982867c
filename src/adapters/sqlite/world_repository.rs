//! SQLite implementation of the WorldRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Player, World};
use crate::domain::ports::WorldRepository;

use super::{format_datetime, parse_datetime, parse_optional_uuid, parse_uuid};

/// SQLite-backed world and player store.
#[derive(Clone)]
pub struct SqliteWorldRepository {
    pool: SqlitePool,
}

impl SqliteWorldRepository {
    /// Repository over an already migrated pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorldRepository for SqliteWorldRepository {
    async fn create_world(&self, world: &World) -> DomainResult<()> {
        sqlx::query("INSERT INTO worlds (id, name, created_at) VALUES (?, ?, ?)")
            .bind(world.id.to_string())
            .bind(&world.name)
            .bind(format_datetime(&world.created_at))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn latest_world(&self) -> DomainResult<Option<World>> {
        let row: Option<WorldRow> = sqlx::query_as(
            "SELECT id, name, created_at FROM worlds ORDER BY created_at DESC, rowid DESC LIMIT 1"
        )
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.try_into()).transpose()
    }

    async fn create_player(&self, player: &Player) -> DomainResult<()> {
        sqlx::query(
            r#"INSERT INTO players (id, world_id, name, agent_id, created_at)
               VALUES (?, ?, ?, ?, ?)"#
        )
        .bind(player.id.to_string())
        .bind(player.world_id.to_string())
        .bind(&player.name)
        .bind(player.agent_id.map(|id| id.to_string()))
        .bind(format_datetime(&player.created_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn roster_of(&self, world_id: Uuid) -> DomainResult<Vec<Player>> {
        let rows: Vec<PlayerRow> = sqlx::query_as(
            "SELECT * FROM players WHERE world_id = ? ORDER BY created_at ASC, rowid ASC"
        )
        .bind(world_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn player_by_id(&self, id: Uuid) -> DomainResult<Option<Player>> {
        let row: Option<PlayerRow> = sqlx::query_as("SELECT * FROM players WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.try_into()).transpose()
    }

    async fn all_players(&self) -> DomainResult<Vec<Player>> {
        let rows: Vec<PlayerRow> = sqlx::query_as(
            "SELECT * FROM players ORDER BY created_at ASC, rowid ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn latest_player(&self) -> DomainResult<Option<Player>> {
        let row: Option<PlayerRow> = sqlx::query_as(
            "SELECT * FROM players ORDER BY created_at DESC, rowid DESC LIMIT 1"
        )
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.try_into()).transpose()
    }
}

#[derive(sqlx::FromRow)]
struct WorldRow {
    id: String,
    name: String,
    created_at: String,
}

impl TryFrom<WorldRow> for World {
    type Error = DomainError;

    fn try_from(row: WorldRow) -> Result<Self, Self::Error> {
        Ok(World {
            id: parse_uuid(&row.id)?,
            name: row.name,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PlayerRow {
    id: String,
    world_id: String,
    name: String,
    agent_id: Option<String>,
    created_at: String,
}

impl TryFrom<PlayerRow> for Player {
    type Error = DomainError;

    fn try_from(row: PlayerRow) -> Result<Self, Self::Error> {
        Ok(Player {
            id: parse_uuid(&row.id)?,
            world_id: parse_uuid(&row.world_id)?,
            name: row.name,
            agent_id: parse_optional_uuid(row.agent_id)?,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;
    use chrono::{Duration, Utc};

    async fn setup_test_repo() -> SqliteWorldRepository {
        let pool = create_migrated_test_pool().await.unwrap();
        SqliteWorldRepository::new(pool)
    }

    #[tokio::test]
    async fn test_latest_world_none_when_empty() {
        let repo = setup_test_repo().await;
        assert!(repo.latest_world().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_latest_world_picks_newest() {
        let repo = setup_test_repo().await;
        let now = Utc::now();

        let old = World::new("old").with_created_at(now - Duration::seconds(10));
        let new = World::new("new").with_created_at(now);
        repo.create_world(&new).await.unwrap();
        repo.create_world(&old).await.unwrap();

        let latest = repo.latest_world().await.unwrap().unwrap();
        assert_eq!(latest.id, new.id);
    }

    #[tokio::test]
    async fn test_latest_world_tie_broken_by_insertion() {
        let repo = setup_test_repo().await;
        let now = Utc::now();

        let first = World::new("first").with_created_at(now);
        let second = World::new("second").with_created_at(now);
        repo.create_world(&first).await.unwrap();
        repo.create_world(&second).await.unwrap();

        assert_eq!(repo.latest_world().await.unwrap().unwrap().id, second.id);
    }

    #[tokio::test]
    async fn test_roster_in_creation_order() {
        let repo = setup_test_repo().await;
        let world = World::new("town");
        repo.create_world(&world).await.unwrap();

        let now = Utc::now();
        let late = Player::new(world.id, "Late").with_created_at(now + Duration::seconds(5));
        let early = Player::new(world.id, "Early").with_created_at(now);
        let tied = Player::new(world.id, "Tied").with_created_at(now);
        repo.create_player(&late).await.unwrap();
        repo.create_player(&early).await.unwrap();
        repo.create_player(&tied).await.unwrap();

        let names: Vec<_> = repo
            .roster_of(world.id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Early", "Tied", "Late"]);
    }

    #[tokio::test]
    async fn test_player_round_trip_keeps_agent() {
        let repo = setup_test_repo().await;
        let world = World::new("town");
        repo.create_world(&world).await.unwrap();

        let agent_id = Uuid::new_v4();
        let player = Player::new(world.id, "Kurt").with_agent(agent_id);
        repo.create_player(&player).await.unwrap();

        let found = repo.player_by_id(player.id).await.unwrap().unwrap();
        assert_eq!(found.agent_id, Some(agent_id));
        assert_eq!(repo.latest_player().await.unwrap().unwrap().id, player.id);
        assert!(repo.player_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }
}
