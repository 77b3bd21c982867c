//! Deterministic stand-ins for the decision-making and interaction collaborators.
//!
//! Neither produces natural language or path decisions; they exist so the
//! harness can be driven end to end and its scenarios stay reproducible.

pub mod decision_maker;
pub mod interaction_handler;

pub use decision_maker::ScriptedDecisionMaker;
pub use interaction_handler::ScriptedInteractionHandler;
