//! CLI command implementations.

pub mod converge;
pub mod converse;
pub mod debug;
pub mod init;
pub mod loop_cmd;
pub mod messages;

use anyhow::{Context, Result};

use crate::adapters::sqlite::{initialize_database, PoolConfig};
use crate::application::SimulationHarness;
use crate::domain::models::Config;

/// Open (and migrate) the configured database and build a scripted harness over it.
pub async fn open_harness(config: &Config) -> Result<SimulationHarness> {
    let pool = initialize_database(&config.database.url(), Some(PoolConfig::from(&config.database)))
        .await
        .with_context(|| format!("Failed to open database at {}", config.database.path))?;
    Ok(SimulationHarness::with_sqlite(pool, config.harness.clone()))
}
