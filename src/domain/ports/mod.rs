//! Port trait definitions (Hexagonal Architecture)
//!
//! Stores and collaborators the harness drives. Adapters in
//! `crate::adapters` and `crate::services` implement them.

pub mod agent_repository;
pub mod decision_maker;
pub mod interaction_handler;
pub mod journal_repository;
pub mod message_mapper;
pub mod movement_executor;
pub mod world_repository;

pub use agent_repository::AgentRepository;
pub use decision_maker::DecisionMaker;
pub use interaction_handler::{ActivitySink, InteractionHandler};
pub use journal_repository::JournalRepository;
pub use message_mapper::{MessageMapper, PlayerStateResolver};
pub use movement_executor::MovementExecutor;
pub use world_repository::WorldRepository;
