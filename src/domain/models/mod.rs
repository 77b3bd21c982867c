//! Domain models.

pub mod agent;
pub mod config;
pub mod journal;
pub mod movement;
pub mod player;
pub mod session;
pub mod world;

pub use agent::Agent;
pub use config::{Config, DatabaseConfig, HarnessConfig, LoggingConfig};
pub use journal::{ClientMessage, EntryData, EntryKind, JournalEntry};
pub use movement::{DispatchMode, MovementIntent};
pub use player::{Motion, Player, PlayerSnapshot, Position};
pub use session::{ConversationOptions, SessionContext};
pub use world::World;
