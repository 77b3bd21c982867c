//! Simloop - simulation-loop driver for multi-agent worlds
//!
//! Simloop repeatedly advances a population of agents through decision
//! cycles, and provides two deterministic scenario drivers: convergence
//! (every agent walks to one player) and scripted conversations.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, port traits and errors
//! - **Service Layer** (`services`): snapshot loading, the thinking gate,
//!   message collection and journal-backed collaborators
//! - **Application Layer** (`application`): loop controller, directors and
//!   the `SimulationHarness` facade
//! - **Adapters** (`adapters`): SQLite and in-memory stores, scripted collaborators
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use simloop::{HarnessConfig, SimulationHarness};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let harness = SimulationHarness::in_memory(HarnessConfig::default());
//!     harness.seed_world("town", 3).await?;
//!     harness.reset_and_loop(Some(10)).await?;
//!     harness.converge().await?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::{
    ConvergenceReport, HarnessPorts, LoopController, LoopOutcome, LoopState, SimulationHarness,
};
pub use domain::models::{
    Agent, ClientMessage, Config, ConversationOptions, DispatchMode, HarnessConfig, MovementIntent,
    Player, PlayerSnapshot, SessionContext, World,
};
pub use domain::ports::{
    AgentRepository, DecisionMaker, InteractionHandler, JournalRepository, MessageMapper,
    MovementExecutor, PlayerStateResolver, WorldRepository,
};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{MessageCollector, StateSnapshot, ThinkingGate};
