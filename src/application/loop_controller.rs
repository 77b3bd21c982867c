//! LoopController - fixed-count decision loops over a player batch
//!
//! Each iteration marks every agent busy, then dispatches one immediate
//! decision turn per agent. Iterations never overlap.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::DispatchMode;
use crate::domain::ports::DecisionMaker;
use crate::services::ThinkingGate;

/// Controller lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopState {
    /// No run in progress.
    Idle,
    /// A run is in progress.
    Running,
}

/// What a completed run drove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoopOutcome {
    /// Repetitions completed.
    pub iterations: u64,
    /// Distinct players dispatched per repetition.
    pub players: usize,
}

/// Drives repeated gate-then-dispatch rounds over a fixed set of players.
///
/// Only one run may be active at a time.
pub struct LoopController {
    gate: Arc<ThinkingGate>,
    decisions: Arc<dyn DecisionMaker>,
    running: AtomicBool,
}

/// Returns the controller to `Idle` however the run ends.
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl LoopController {
    /// Idle controller gating through `gate` and dispatching through `decisions`.
    pub fn new(gate: Arc<ThinkingGate>, decisions: Arc<dyn DecisionMaker>) -> Self {
        Self {
            gate,
            decisions,
            running: AtomicBool::new(false),
        }
    }

    /// Whether a run is currently in progress.
    pub fn state(&self) -> LoopState {
        if self.running.load(Ordering::SeqCst) {
            LoopState::Running
        } else {
            LoopState::Idle
        }
    }

    /// Run `iterations` gate-then-dispatch rounds over `player_ids`.
    ///
    /// With `reset`, pending decision state is released once before the first
    /// round. Duplicate ids are dropped, keeping the first occurrence.
    #[instrument(skip(self, player_ids), fields(players = player_ids.len()), err)]
    pub async fn run(&self, iterations: i64, player_ids: &[Uuid], reset: bool) -> DomainResult<LoopOutcome> {
        let rounds = u64::try_from(iterations).map_err(|_| DomainError::InvalidIterations(iterations))?;

        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(DomainError::LoopAlreadyRunning);
        }
        let _guard = RunGuard(&self.running);

        let ids = dedup_preserving_order(player_ids);

        if reset {
            self.decisions.reset_all_pending().await?;
        }

        info!(iterations = rounds, players = ids.len(), "loop started");
        for round in 0..rounds {
            self.gate.mark_busy(&ids).await?;
            self.decisions.decide_batch(&ids, DispatchMode::Immediate).await?;
            debug!(round, "iteration complete");
        }
        info!(iterations = rounds, "loop finished");

        Ok(LoopOutcome {
            iterations: rounds,
            players: ids.len(),
        })
    }
}

fn dedup_preserving_order(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
