//! Implementation of the `simloop init` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::cli::commands::open_harness;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::config::CONFIG_DIR;

/// Arguments of `simloop init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Number of agent-backed players to seed
    #[arg(short, long, default_value_t = 2)]
    pub players: usize,

    /// Name of the seeded world
    #[arg(short, long, default_value = "simloop")]
    pub world_name: String,

    /// Delete the existing database and start over
    #[arg(short, long)]
    pub force: bool,
}

/// Result of `simloop init`.
#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    /// False when a world already existed and `--force` was not given.
    pub success: bool,
    /// Summary line shown to the operator.
    pub message: String,
    /// Database file the command operated on.
    pub database_path: PathBuf,
    /// Set when a default config file was written.
    pub config_written: Option<PathBuf>,
    /// Id of the seeded world.
    pub world_id: Option<Uuid>,
    /// Names of the seeded players.
    pub players: Vec<String>,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.message.clone()];
        if let Some(ref path) = self.config_written {
            lines.push(format!("\nWrote default config to {}", path.display()));
        }
        if let Some(world_id) = self.world_id {
            lines.push(format!("\nDatabase: {}", self.database_path.display()));
            lines.push(format!("World: {world_id}"));
            if !self.players.is_empty() {
                lines.push(format!("Players: {}", self.players.join(", ")));
            }
        }
        lines.join("\n")
    }
}

pub async fn execute(args: InitArgs, config: &Config, json_mode: bool) -> Result<()> {
    let database_path = PathBuf::from(&config.database.path);

    if args.force {
        remove_database_files(&database_path).await?;
    }

    let config_written = write_default_config(config).await?;
    let harness = open_harness(config).await?;

    if !args.force {
        if let Some(world) = harness.latest_world().await? {
            let output_data = InitOutput {
                success: false,
                message: format!(
                    "World '{}' already exists. Use --force to start over.",
                    world.name
                ),
                database_path,
                config_written,
                world_id: None,
                players: vec![],
            };
            output(&output_data, json_mode);
            return Ok(());
        }
    }

    let seeded = harness
        .seed_world(&args.world_name, args.players)
        .await
        .context("Failed to seed world")?;

    let output_data = InitOutput {
        success: true,
        message: format!(
            "Initialized world '{}' with {} player(s).",
            seeded.world.name,
            seeded.players.len()
        ),
        database_path,
        config_written,
        world_id: Some(seeded.world.id),
        players: seeded.players.iter().map(|p| p.name.clone()).collect(),
    };
    output(&output_data, json_mode);
    Ok(())
}

/// Remove the database along with its WAL side files.
async fn remove_database_files(database_path: &Path) -> Result<()> {
    let base = database_path.as_os_str().to_os_string();
    for suffix in ["", "-wal", "-shm"] {
        let mut name = base.clone();
        name.push(suffix);
        let path = PathBuf::from(name);
        if fs::try_exists(&path).await.unwrap_or(false) {
            fs::remove_file(&path)
                .await
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
    }
    Ok(())
}

/// Write `.simloop/config.yaml` from the effective config when it does not exist yet.
async fn write_default_config(config: &Config) -> Result<Option<PathBuf>> {
    let dir = PathBuf::from(CONFIG_DIR);
    let path = dir.join("config.yaml");
    if fs::try_exists(&path).await.unwrap_or(false) {
        return Ok(None);
    }

    fs::create_dir_all(&dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let yaml = serde_yaml::to_string(config).context("Failed to serialize config")?;
    fs::write(&path, yaml)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_remove_database_files_removes_side_files() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("sim.db");
        for name in ["sim.db", "sim.db-wal", "sim.db-shm", "keep.db"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        remove_database_files(&db).await.unwrap();

        assert!(!db.exists());
        assert!(!dir.path().join("sim.db-wal").exists());
        assert!(dir.path().join("keep.db").exists());
    }

    #[tokio::test]
    async fn test_remove_missing_database_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        remove_database_files(&dir.path().join("absent.db")).await.unwrap();
    }
}
