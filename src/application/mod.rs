//! Application layer: the loop controller, scenario directors and the harness facade.

pub mod convergence_director;
pub mod conversation_director;
pub mod harness;
pub mod loop_controller;

pub use convergence_director::{plan_convergence, ConvergenceDirector, ConvergenceReport};
pub use conversation_director::ConversationDirector;
pub use harness::{HarnessPorts, SimulationHarness};
pub use loop_controller::{LoopController, LoopOutcome, LoopState};
