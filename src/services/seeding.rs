//! Creates a fresh world populated with agent-backed players.
//!
//! Stand-in for the world initializer the `NoWorld` error points operators at.

use chrono::Duration;
use std::sync::Arc;
use tracing::info;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Agent, EntryData, JournalEntry, Player, Position, World};
use crate::domain::ports::{AgentRepository, JournalRepository, WorldRepository};

/// Horizontal spacing between seeded players.
pub const PLAYER_SPACING: f64 = 25.0;

const PLAYER_NAMES: &[&str] = &[
    "Lucky", "Bob", "Stella", "Alice", "Pete", "Kurt", "Alex", "Kira",
];

/// What [`WorldSeeder::seed`] created.
#[derive(Debug, Clone)]
pub struct SeededWorld {
    /// The created world.
    pub world: World,
    /// Players in creation order.
    pub players: Vec<Player>,
    /// One agent per player, in the same order.
    pub agents: Vec<Agent>,
}

/// Creates worlds populated with agent-backed players.
pub struct WorldSeeder {
    worlds: Arc<dyn WorldRepository>,
    agents: Arc<dyn AgentRepository>,
    journal: Arc<dyn JournalRepository>,
}

impl WorldSeeder {
    /// Seeder writing to the given stores.
    pub fn new(
        worlds: Arc<dyn WorldRepository>,
        agents: Arc<dyn AgentRepository>,
        journal: Arc<dyn JournalRepository>,
    ) -> Self {
        Self { worlds, agents, journal }
    }

    /// Create a world with `player_count` players, each with an agent, standing
    /// in a row. Player creation times are strictly increasing so roster order
    /// is the seeding order.
    pub async fn seed(&self, world_name: &str, player_count: usize) -> DomainResult<SeededWorld> {
        if world_name.trim().is_empty() {
            return Err(DomainError::ValidationFailed("world name cannot be empty".to_string()));
        }

        let world = World::new(world_name);
        self.worlds.create_world(&world).await?;

        let mut players = Vec::with_capacity(player_count);
        let mut agents = Vec::with_capacity(player_count);

        for index in 0..player_count {
            let offset = i64::try_from(index)
                .map_err(|_| DomainError::ValidationFailed(format!("too many players: {player_count}")))?;

            let mut player = Player::new(world.id, player_name(index))
                .with_created_at(world.created_at + Duration::microseconds(offset + 1));
            let agent = Agent::new(world.id, player.id);
            player.agent_id = Some(agent.id);

            self.worlds.create_player(&player).await?;
            self.agents.create(&agent).await?;

            #[allow(clippy::cast_precision_loss)]
            let position = Position::new(PLAYER_SPACING * index as f64, 0.0);
            self.journal
                .append(&JournalEntry::new(
                    player.id,
                    EntryData::Stopped {
                        reason: Some("spawned".to_string()),
                        position,
                    },
                ))
                .await?;

            players.push(player);
            agents.push(agent);
        }

        info!(world_id = %world.id, players = players.len(), "world seeded");
        Ok(SeededWorld { world, players, agents })
    }
}

fn player_name(index: usize) -> String {
    let base = PLAYER_NAMES[index % PLAYER_NAMES.len()];
    let round = index / PLAYER_NAMES.len();
    if round == 0 {
        base.to_string()
    } else {
        format!("{base} {}", round + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::models::EntryKind;

    #[test]
    fn test_player_names_unique_past_the_list() {
        assert_eq!(player_name(0), "Lucky");
        assert_eq!(player_name(PLAYER_NAMES.len()), "Lucky 2");
    }

    #[tokio::test]
    async fn test_seed_creates_linked_players_and_agents() {
        let store = Arc::new(InMemoryStore::new());
        let seeder = WorldSeeder::new(store.clone(), store.clone(), store.clone());

        let seeded = seeder.seed("town", 2).await.unwrap();
        assert_eq!(seeded.players.len(), 2);
        for (player, agent) in seeded.players.iter().zip(&seeded.agents) {
            assert_eq!(player.agent_id, Some(agent.id));
            assert_eq!(agent.player_id, player.id);
            assert!(!agent.thinking);
        }

        let spawn = store.entries_of(seeded.players[1].id, EntryKind::Stopped).await.unwrap();
        assert_eq!(
            spawn[0].data,
            EntryData::Stopped {
                reason: Some("spawned".into()),
                position: Position::new(PLAYER_SPACING, 0.0)
            }
        );
    }

    #[tokio::test]
    async fn test_seed_empty_roster_allowed() {
        let store = Arc::new(InMemoryStore::new());
        let seeder = WorldSeeder::new(store.clone(), store.clone(), store.clone());

        let seeded = seeder.seed("empty", 0).await.unwrap();
        assert!(seeded.players.is_empty());
        assert_eq!(store.latest_world().await.unwrap().unwrap().id, seeded.world.id);
    }

    #[tokio::test]
    async fn test_seed_rejects_blank_name() {
        let store = Arc::new(InMemoryStore::new());
        let seeder = WorldSeeder::new(store.clone(), store.clone(), store.clone());
        assert!(matches!(seeder.seed("  ", 1).await, Err(DomainError::ValidationFailed(_))));
    }
}
