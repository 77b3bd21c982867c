//! SimulationHarness - operator-facing facade over the loop and scenario drivers.
//!
//! Every operation loads the latest world explicitly; nothing is cached
//! between calls.

use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::adapters::memory::InMemoryStore;
use crate::adapters::scripted::{ScriptedDecisionMaker, ScriptedInteractionHandler};
use crate::adapters::sqlite::{SqliteAgentRepository, SqliteJournalRepository, SqliteWorldRepository};
use crate::domain::errors::DomainResult;
use crate::domain::models::{Agent, ClientMessage, ConversationOptions, HarnessConfig, PlayerSnapshot, SessionContext, World};
use crate::domain::ports::{
    AgentRepository, DecisionMaker, InteractionHandler, JournalRepository, MessageMapper, MovementExecutor,
    PlayerStateResolver, WorldRepository,
};
use crate::services::{
    ClientMessageMapper, JournalMovementExecutor, JournalPlayerStateResolver, MessageCollector, SeededWorld,
    StateSnapshot, ThinkingGate, WorldSeeder,
};

use super::convergence_director::{ConvergenceDirector, ConvergenceReport};
use super::conversation_director::ConversationDirector;
use super::loop_controller::{LoopController, LoopOutcome};

/// Stores and collaborators a harness is assembled from.
#[derive(Clone)]
pub struct HarnessPorts {
    /// Worlds and players.
    pub worlds: Arc<dyn WorldRepository>,
    /// Agents and their thinking flags.
    pub agents: Arc<dyn AgentRepository>,
    /// Movement and speech log.
    pub journal: Arc<dyn JournalRepository>,
    /// Resolves a player's displayed state.
    pub resolver: Arc<dyn PlayerStateResolver>,
    /// Turns talking entries into client messages.
    pub mapper: Arc<dyn MessageMapper>,
    /// Applies stop and walk intents.
    pub movement: Arc<dyn MovementExecutor>,
    /// Dispatches decision batches.
    pub decisions: Arc<dyn DecisionMaker>,
    /// Runs one conversation at a time.
    pub interactions: Arc<dyn InteractionHandler>,
}

impl HarnessPorts {
    /// Journal-backed services and scripted collaborators over the given stores.
    pub fn scripted(
        worlds: Arc<dyn WorldRepository>,
        agents: Arc<dyn AgentRepository>,
        journal: Arc<dyn JournalRepository>,
    ) -> Self {
        Self {
            resolver: Arc::new(JournalPlayerStateResolver::new(agents.clone(), journal.clone())),
            mapper: Arc::new(ClientMessageMapper::new(worlds.clone())),
            movement: Arc::new(JournalMovementExecutor::new(
                worlds.clone(),
                agents.clone(),
                journal.clone(),
            )),
            decisions: Arc::new(ScriptedDecisionMaker::new(worlds.clone(), agents.clone())),
            interactions: Arc::new(ScriptedInteractionHandler::new(journal.clone())),
            worlds,
            agents,
            journal,
        }
    }
}

/// Facade over the loop controller, the directors and the message collector.
///
/// Every operation works on the latest world.
pub struct SimulationHarness {
    config: HarnessConfig,
    decisions: Arc<dyn DecisionMaker>,
    snapshot: Arc<StateSnapshot>,
    seeder: WorldSeeder,
    loop_controller: LoopController,
    convergence: ConvergenceDirector,
    conversations: ConversationDirector,
    collector: MessageCollector,
}

impl SimulationHarness {
    /// Wire a harness from explicit ports.
    pub fn new(ports: HarnessPorts, config: HarnessConfig) -> Self {
        let snapshot = Arc::new(StateSnapshot::new(
            ports.worlds.clone(),
            ports.agents.clone(),
            ports.resolver.clone(),
        ));
        let gate = Arc::new(ThinkingGate::new(ports.worlds.clone(), ports.agents.clone()));

        Self {
            config,
            seeder: WorldSeeder::new(ports.worlds.clone(), ports.agents.clone(), ports.journal.clone()),
            loop_controller: LoopController::new(gate, ports.decisions.clone()),
            convergence: ConvergenceDirector::new(snapshot.clone(), ports.movement),
            conversations: ConversationDirector::new(snapshot.clone(), ports.interactions),
            collector: MessageCollector::new(ports.worlds, ports.journal, ports.mapper),
            decisions: ports.decisions,
            snapshot,
        }
    }

    /// Scripted harness over the SQLite store.
    pub fn with_sqlite(pool: SqlitePool, config: HarnessConfig) -> Self {
        let ports = HarnessPorts::scripted(
            Arc::new(SqliteWorldRepository::new(pool.clone())),
            Arc::new(SqliteAgentRepository::new(pool.clone())),
            Arc::new(SqliteJournalRepository::new(pool)),
        );
        Self::new(ports, config)
    }

    /// Scripted harness over a fresh in-memory store.
    pub fn in_memory(config: HarnessConfig) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::new(HarnessPorts::scripted(store.clone(), store.clone(), store), config)
    }

    /// Defaults applied when an operation omits an argument.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Create a new world; it becomes the latest one.
    pub async fn seed_world(&self, world_name: &str, players: usize) -> DomainResult<SeededWorld> {
        self.seeder.seed(world_name, players).await
    }

    /// Release pending decisions, then loop over the whole roster.
    #[instrument(skip(self), err)]
    pub async fn reset_and_loop(&self, iterations: Option<i64>) -> DomainResult<LoopOutcome> {
        self.drive_loop(iterations, true).await
    }

    /// Loop over the whole roster.
    #[instrument(skip(self), err)]
    pub async fn run_loop(&self, iterations: Option<i64>) -> DomainResult<LoopOutcome> {
        self.drive_loop(iterations, false).await
    }

    async fn drive_loop(&self, iterations: Option<i64>, reset: bool) -> DomainResult<LoopOutcome> {
        let session = self.snapshot.load_session().await?;
        let iterations = iterations.unwrap_or(self.config.default_iterations);
        self.loop_controller
            .run(iterations, &session.player_ids(), reset)
            .await
    }

    /// Release pending decisions, then run one conversation.
    #[instrument(skip(self), err)]
    pub async fn reset_and_converse(&self, max_messages: Option<u32>) -> DomainResult<u32> {
        self.snapshot.load_latest_world().await?;
        self.decisions.reset_all_pending().await?;
        self.converse(max_messages, None).await
    }

    /// Run `conversation_count` conversations capped at `max_messages` each.
    #[instrument(skip(self), err)]
    pub async fn converse(&self, max_messages: Option<u32>, conversation_count: Option<u32>) -> DomainResult<u32> {
        let options = ConversationOptions {
            max_messages: max_messages.unwrap_or(self.config.default_max_messages),
        };
        let count = conversation_count.unwrap_or(self.config.default_conversation_count);
        self.conversations.run_conversations(count, options).await
    }

    /// Stop the first player and send every other agent toward them.
    pub async fn converge(&self) -> DomainResult<ConvergenceReport> {
        self.convergence.converge().await
    }

    /// Talking entries of the latest roster as client messages, oldest first.
    pub async fn list_messages(&self) -> DomainResult<Vec<ClientMessage>> {
        self.collector.list_messages().await
    }

    /// The latest world, or `None` before any has been created.
    pub async fn latest_world(&self) -> DomainResult<Option<World>> {
        self.snapshot.find_latest_world().await
    }

    /// Latest world and its resolved roster.
    pub async fn debug_players(&self) -> DomainResult<SessionContext> {
        self.snapshot.load_session().await
    }

    /// Agents of the latest world.
    pub async fn agent_state(&self) -> DomainResult<Vec<Agent>> {
        self.snapshot.agent_state().await
    }

    /// Every player in every world, resolved.
    pub async fn all_players(&self) -> DomainResult<Vec<PlayerSnapshot>> {
        self.snapshot.all_players().await
    }

    /// The most recently created player, if any.
    pub async fn latest_player(&self) -> DomainResult<Option<PlayerSnapshot>> {
        self.snapshot.latest_player().await
    }

    /// Resolve one player; a missing player is an error.
    pub async fn player_snapshot(&self, player_id: Uuid) -> DomainResult<PlayerSnapshot> {
        self.snapshot.player_snapshot(player_id).await
    }

    /// Set one player's agent thinking and return the refreshed snapshot.
    pub async fn mark_player_thinking(&self, player_id: Uuid) -> DomainResult<PlayerSnapshot> {
        self.snapshot.mark_player_thinking(player_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use crate::domain::models::Motion;

    #[tokio::test]
    async fn test_every_operation_but_messages_needs_a_world() {
        let harness = SimulationHarness::in_memory(HarnessConfig::default());

        assert!(matches!(harness.run_loop(Some(1)).await, Err(DomainError::NoWorld)));
        assert!(matches!(harness.reset_and_loop(None).await, Err(DomainError::NoWorld)));
        assert!(matches!(harness.converse(None, None).await, Err(DomainError::NoWorld)));
        assert!(matches!(harness.reset_and_converse(None).await, Err(DomainError::NoWorld)));
        assert!(matches!(harness.converge().await, Err(DomainError::NoWorld)));
        assert!(matches!(harness.debug_players().await, Err(DomainError::NoWorld)));
        assert!(harness.list_messages().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_loop_uses_configured_default() {
        let config = HarnessConfig {
            default_iterations: 7,
            ..HarnessConfig::default()
        };
        let harness = SimulationHarness::in_memory(config);
        harness.seed_world("town", 2).await.unwrap();

        let outcome = harness.reset_and_loop(None).await.unwrap();
        assert_eq!(outcome, LoopOutcome { iterations: 7, players: 2 });

        let agents = harness.agent_state().await.unwrap();
        assert!(agents.iter().all(|a| !a.thinking));
    }

    #[tokio::test]
    async fn test_converse_then_list_messages() {
        let harness = SimulationHarness::in_memory(HarnessConfig::default());
        let seeded = harness.seed_world("town", 2).await.unwrap();

        assert_eq!(harness.converse(Some(3), Some(2)).await.unwrap(), 2);

        let messages = harness.list_messages().await.unwrap();
        assert_eq!(messages.len(), 6);
        assert!(messages.windows(2).all(|w| w[0].ts <= w[1].ts));
        assert_eq!(messages[0].from, seeded.players[0].id);
        assert_eq!(messages[0].to, vec![seeded.players[1].id]);
    }

    #[tokio::test]
    async fn test_converge_moves_players_toward_target() {
        let harness = SimulationHarness::in_memory(HarnessConfig::default());
        let seeded = harness.seed_world("town", 3).await.unwrap();

        let report = harness.converge().await.unwrap();
        assert_eq!(report.walkers, 2);

        let walker = harness.player_snapshot(seeded.players[2].id).await.unwrap();
        assert_eq!(
            walker.motion,
            Motion::Walking { target: seeded.players[0].id, ignore: vec![] }
        );
        let target = harness.player_snapshot(seeded.players[0].id).await.unwrap();
        assert_eq!(target.motion.as_str(), "stopped");
    }

    #[tokio::test]
    async fn test_mark_player_thinking_then_reset_and_converse_clears_it() {
        let harness = SimulationHarness::in_memory(HarnessConfig::default());
        let seeded = harness.seed_world("town", 2).await.unwrap();

        assert!(harness.mark_player_thinking(seeded.players[1].id).await.unwrap().thinking);
        assert_eq!(harness.reset_and_converse(Some(2)).await.unwrap(), 1);

        let snapshot = harness.player_snapshot(seeded.players[1].id).await.unwrap();
        assert!(!snapshot.thinking);
        assert_eq!(harness.list_messages().await.unwrap().len(), 2);
    }
}
