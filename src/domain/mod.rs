//! Domain layer for the simloop harness
//!
//! Worlds, players, agents and journal entries, plus the port traits the
//! harness drives its collaborators through.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
