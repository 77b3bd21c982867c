//! Domain services built on the store ports.

pub mod message_collector;
pub mod message_mapper;
pub mod movement;
pub mod player_state;
pub mod seeding;
pub mod state_snapshot;
pub mod thinking_gate;

pub use message_collector::MessageCollector;
pub use message_mapper::ClientMessageMapper;
pub use movement::JournalMovementExecutor;
pub use player_state::JournalPlayerStateResolver;
pub use seeding::{SeededWorld, WorldSeeder, PLAYER_SPACING};
pub use state_snapshot::StateSnapshot;
pub use thinking_gate::ThinkingGate;
