//! Implementation of the `simloop loop` command.

use anyhow::{Context, Result};
use clap::Args;

use crate::application::LoopOutcome;
use crate::cli::commands::open_harness;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

/// Arguments of `simloop loop`.
#[derive(Args, Debug)]
pub struct LoopArgs {
    /// Number of iterations (defaults to harness.default_iterations)
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub iterations: Option<i64>,

    /// Release pending decisions before the first iteration
    #[arg(long)]
    pub reset: bool,
}

/// Result of `simloop loop`.
#[derive(Debug, serde::Serialize)]
pub struct LoopOutput {
    /// Whether pending decisions were released first.
    pub reset: bool,
    /// Repetitions and players driven.
    #[serde(flatten)]
    pub outcome: LoopOutcome,
}

impl CommandOutput for LoopOutput {
    fn to_human(&self) -> String {
        let prefix = if self.reset { "Reset pending decisions. " } else { "" };
        format!(
            "{prefix}Ran {} iteration(s) over {} player(s).",
            self.outcome.iterations, self.outcome.players
        )
    }
}

pub async fn execute(args: LoopArgs, config: &Config, json_mode: bool) -> Result<()> {
    let harness = open_harness(config).await?;

    let outcome = if args.reset {
        harness.reset_and_loop(args.iterations).await
    } else {
        harness.run_loop(args.iterations).await
    }
    .context("Loop failed")?;

    output(
        &LoopOutput {
            reset: args.reset,
            outcome,
        },
        json_mode,
    );
    Ok(())
}
