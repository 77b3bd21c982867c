//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::converse::ConverseArgs;
use super::commands::debug::DebugArgs;
use super::commands::init::InitArgs;
use super::commands::loop_cmd::LoopArgs;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "simloop")]
#[command(about = "Simloop - simulation-loop driver for multi-agent worlds", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .simloop/
    #[arg(short, long, global = true, env = "SIMLOOP_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the database and seed a world
    Init(InitArgs),

    /// Drive decision loops over the latest world's roster
    Loop(LoopArgs),

    /// Run scripted conversations between agents
    Converse(ConverseArgs),

    /// Stop the first player and walk every other agent to them
    Converge,

    /// List chat messages of the latest world in time order
    Messages,

    /// Inspect and poke world state
    Debug(DebugArgs),
}
