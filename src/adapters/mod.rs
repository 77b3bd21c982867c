//! Adapters for the store and collaborator ports.

pub mod memory;
pub mod scripted;
pub mod sqlite;
