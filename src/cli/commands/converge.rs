//! Implementation of the `simloop converge` command.

use anyhow::{Context, Result};

use crate::application::ConvergenceReport;
use crate::cli::commands::open_harness;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

/// Result of `simloop converge`.
#[derive(Debug, serde::Serialize)]
pub struct ConvergeOutput {
    /// Target and counts of the applied plan.
    #[serde(flatten)]
    pub report: ConvergenceReport,
}

impl CommandOutput for ConvergeOutput {
    fn to_human(&self) -> String {
        let mut line = format!(
            "Stopped {} and sent {} agent(s) walking to it.",
            self.report.target, self.report.walkers
        );
        if self.report.skipped > 0 {
            line.push_str(&format!(" Skipped {} player(s) without an agent.", self.report.skipped));
        }
        line
    }
}

pub async fn execute(config: &Config, json_mode: bool) -> Result<()> {
    let harness = open_harness(config).await?;
    let report = harness.converge().await.context("Convergence failed")?;
    output(&ConvergeOutput { report }, json_mode);
    Ok(())
}
