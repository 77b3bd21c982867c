//! ConvergenceDirector - gathers every agent at one player.

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{MovementIntent, PlayerSnapshot};
use crate::domain::ports::MovementExecutor;
use crate::services::StateSnapshot;

/// Summary of an issued convergence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvergenceReport {
    /// Player everyone walks to.
    pub target: Uuid,
    /// Agents sent walking.
    pub walkers: usize,
    /// Non-target players skipped for lacking an agent.
    pub skipped: usize,
}

/// Movement plan for a roster: stop the first player, walk every other
/// agent-backed player to it. An empty roster yields an empty plan.
pub fn plan_convergence(roster: &[PlayerSnapshot]) -> Vec<MovementIntent> {
    let Some((target, rest)) = roster.split_first() else {
        return Vec::new();
    };

    let mut plan = Vec::with_capacity(roster.len());
    plan.push(MovementIntent::Stop { player_id: target.id });
    plan.extend(rest.iter().filter_map(|player| {
        player.agent_id.map(|agent_id| MovementIntent::Walk {
            agent_id,
            ignore: Vec::new(),
            destination: target.id,
        })
    }));
    plan
}

/// Sends every agent to the first player of the roster.
pub struct ConvergenceDirector {
    snapshot: Arc<StateSnapshot>,
    movement: Arc<dyn MovementExecutor>,
}

impl ConvergenceDirector {
    /// Director that loads rosters from `snapshot` and applies intents through `movement`.
    pub fn new(snapshot: Arc<StateSnapshot>, movement: Arc<dyn MovementExecutor>) -> Self {
        Self { snapshot, movement }
    }

    /// Stop the first roster player and walk everyone else to them.
    ///
    /// Intents are applied in plan order; the first failure propagates.
    #[instrument(skip(self), err)]
    pub async fn converge(&self) -> DomainResult<ConvergenceReport> {
        let session = self.snapshot.load_session().await?;
        let Some(target) = session.roster.first() else {
            return Err(DomainError::EmptyRoster(session.world.id));
        };

        let plan = plan_convergence(&session.roster);
        for intent in &plan {
            self.movement.apply(intent).await?;
        }

        let walkers = plan.len() - 1;
        let report = ConvergenceReport {
            target: target.id,
            walkers,
            skipped: session.roster.len() - 1 - walkers,
        };
        info!(target = %report.target, walkers, skipped = report.skipped, "convergence issued");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::models::Player;
    use crate::domain::ports::WorldRepository;
    use crate::services::{JournalPlayerStateResolver, WorldSeeder};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingMovement {
        calls: Mutex<Vec<MovementIntent>>,
    }

    #[async_trait]
    impl MovementExecutor for RecordingMovement {
        async fn stop(&self, player_id: Uuid) -> DomainResult<()> {
            self.calls.lock().unwrap().push(MovementIntent::Stop { player_id });
            Ok(())
        }

        async fn walk(&self, agent_id: Uuid, ignore: &[Uuid], destination: Uuid) -> DomainResult<()> {
            self.calls.lock().unwrap().push(MovementIntent::Walk {
                agent_id,
                ignore: ignore.to_vec(),
                destination,
            });
            Ok(())
        }
    }

    fn director(store: &Arc<InMemoryStore>, movement: Arc<RecordingMovement>) -> ConvergenceDirector {
        let resolver = Arc::new(JournalPlayerStateResolver::new(store.clone(), store.clone()));
        let snapshot = Arc::new(StateSnapshot::new(store.clone(), store.clone(), resolver));
        ConvergenceDirector::new(snapshot, movement)
    }

    #[tokio::test]
    async fn test_stop_first_then_walk_the_rest() {
        let store = Arc::new(InMemoryStore::new());
        let seeded = WorldSeeder::new(store.clone(), store.clone(), store.clone())
            .seed("town", 3)
            .await
            .unwrap();
        let movement = Arc::new(RecordingMovement::default());

        let report = director(&store, movement.clone()).converge().await.unwrap();

        let target = seeded.players[0].id;
        assert_eq!(report, ConvergenceReport { target, walkers: 2, skipped: 0 });
        let calls = movement.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                MovementIntent::Stop { player_id: target },
                MovementIntent::Walk { agent_id: seeded.agents[1].id, ignore: vec![], destination: target },
                MovementIntent::Walk { agent_id: seeded.agents[2].id, ignore: vec![], destination: target },
            ]
        );
    }

    #[tokio::test]
    async fn test_players_without_agents_are_skipped() {
        let store = Arc::new(InMemoryStore::new());
        let seeded = WorldSeeder::new(store.clone(), store.clone(), store.clone())
            .seed("town", 1)
            .await
            .unwrap();
        store.create_player(&Player::new(seeded.world.id, "Human")).await.unwrap();
        let movement = Arc::new(RecordingMovement::default());

        let report = director(&store, movement.clone()).converge().await.unwrap();

        assert_eq!(report.walkers, 0);
        assert_eq!(report.skipped, 1);
        assert_eq!(movement.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_roster_and_missing_world() {
        let store = Arc::new(InMemoryStore::new());
        let movement = Arc::new(RecordingMovement::default());
        let director = director(&store, movement.clone());

        assert!(matches!(director.converge().await, Err(DomainError::NoWorld)));

        WorldSeeder::new(store.clone(), store.clone(), store.clone())
            .seed("empty", 0)
            .await
            .unwrap();
        assert!(matches!(director.converge().await, Err(DomainError::EmptyRoster(_))));
        assert!(movement.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_single_player_plan_is_one_stop() {
        let player = Player::new(Uuid::new_v4(), "Solo").with_agent(Uuid::new_v4());
        let plan = plan_convergence(&[PlayerSnapshot::idle(&player)]);
        assert_eq!(plan, vec![MovementIntent::Stop { player_id: player.id }]);
    }
}
