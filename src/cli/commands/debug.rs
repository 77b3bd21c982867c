//! Debug CLI commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;
use uuid::Uuid;

use crate::cli::commands::open_harness;
use crate::cli::output::{list_table, output, render_list, CommandOutput};
use crate::domain::models::{Agent, Config, Motion, PlayerSnapshot, World};

/// Arguments of `simloop debug`.
#[derive(Args, Debug)]
pub struct DebugArgs {
    /// Inspection to run.
    #[command(subcommand)]
    pub command: DebugCommands,
}

/// Read-only inspection commands, plus `think`.
#[derive(Subcommand, Debug)]
pub enum DebugCommands {
    /// Latest world and its roster
    Players,
    /// Agents of the latest world
    Agents,
    /// Every player in every world
    AllPlayers,
    /// The most recently created player
    LatestPlayer,
    /// One player by id
    Player {
        /// Player id
        id: Uuid,
    },
    /// Mark one player's agent as thinking
    Think {
        /// Player id
        id: Uuid,
    },
}

/// Roster listing, optionally scoped to one world.
#[derive(Debug, Serialize)]
pub struct PlayerListOutput {
    /// World the roster belongs to; `None` when listing every world.
    pub world: Option<World>,
    /// Resolved players in roster order.
    pub players: Vec<PlayerSnapshot>,
    /// Number of players listed.
    pub total: usize,
}

impl PlayerListOutput {
    fn new(world: Option<World>, players: Vec<PlayerSnapshot>) -> Self {
        let total = players.len();
        Self { world, players, total }
    }
}

fn describe_motion(motion: &Motion) -> String {
    match motion {
        Motion::Stopped { position } => format!("stopped at ({:.1}, {:.1})", position.x, position.y),
        Motion::Walking { target, .. } => format!("walking to {target}"),
    }
}

impl CommandOutput for PlayerListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["id", "name", "agent", "thinking", "motion"]);
        for player in &self.players {
            table.add_row(vec![
                player.id.to_string(),
                player.name.clone(),
                player.agent_id.map_or_else(|| "-".to_string(), |id| id.to_string()),
                player.thinking.to_string(),
                describe_motion(&player.motion),
            ]);
        }
        let list = render_list("player", &table, self.total);
        match self.world {
            Some(ref world) => format!("World: {} ({})\n{list}", world.name, world.id),
            None => list,
        }
    }
}

/// Agents of the latest world.
#[derive(Debug, Serialize)]
pub struct AgentListOutput {
    /// Agents in creation order.
    pub agents: Vec<Agent>,
    /// Number of agents listed.
    pub total: usize,
}

impl CommandOutput for AgentListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["id", "player", "thinking", "updated"]);
        for agent in &self.agents {
            table.add_row(vec![
                agent.id.to_string(),
                agent.player_id.to_string(),
                agent.thinking.to_string(),
                agent.updated_at.to_rfc3339(),
            ]);
        }
        render_list("agent", &table, self.total)
    }
}

/// A single resolved player.
#[derive(Debug, Serialize)]
pub struct PlayerDetailOutput {
    /// `None` when no player exists.
    pub player: Option<PlayerSnapshot>,
}

impl CommandOutput for PlayerDetailOutput {
    fn to_human(&self) -> String {
        let Some(ref player) = self.player else {
            return "No players found.".to_string();
        };
        let lines = [
            format!("Player: {}", player.name),
            format!("ID: {}", player.id),
            format!("World: {}", player.world_id),
            format!(
                "Agent: {}",
                player.agent_id.map_or_else(|| "none".to_string(), |id| id.to_string())
            ),
            format!("Thinking: {}", player.thinking),
            format!("Motion: {}", describe_motion(&player.motion)),
        ];
        lines.join("\n")
    }
}

pub async fn execute(args: DebugArgs, config: &Config, json_mode: bool) -> Result<()> {
    let harness = open_harness(config).await?;

    match args.command {
        DebugCommands::Players => {
            let session = harness.debug_players().await.context("Failed to load roster")?;
            output(&PlayerListOutput::new(Some(session.world), session.roster), json_mode);
        }
        DebugCommands::Agents => {
            let agents = harness.agent_state().await.context("Failed to load agents")?;
            let total = agents.len();
            output(&AgentListOutput { agents, total }, json_mode);
        }
        DebugCommands::AllPlayers => {
            let players = harness.all_players().await.context("Failed to load players")?;
            output(&PlayerListOutput::new(None, players), json_mode);
        }
        DebugCommands::LatestPlayer => {
            let player = harness.latest_player().await.context("Failed to load latest player")?;
            output(&PlayerDetailOutput { player }, json_mode);
        }
        DebugCommands::Player { id } => {
            let player = harness
                .player_snapshot(id)
                .await
                .with_context(|| format!("Failed to load player {id}"))?;
            output(&PlayerDetailOutput { player: Some(player) }, json_mode);
        }
        DebugCommands::Think { id } => {
            let player = harness
                .mark_player_thinking(id)
                .await
                .with_context(|| format!("Failed to mark player {id} thinking"))?;
            output(&PlayerDetailOutput { player: Some(player) }, json_mode);
        }
    }
    Ok(())
}
