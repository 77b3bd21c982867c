//! Common test utilities for integration tests
//!
//! Provides shared fixtures used across multiple integration test files.

use std::path::PathBuf;
use tempfile::TempDir;

use simloop::adapters::sqlite::create_migrated_test_pool;
use simloop::{HarnessConfig, SimulationHarness};

/// Create a temporary test database path
///
/// Returns the path to a SQLite database file in a temporary directory.
#[allow(dead_code)]
pub fn temp_db_path() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");
    (dir, db_path)
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Scripted harness over a fresh, migrated in-memory SQLite database.
#[allow(dead_code)]
pub async fn sqlite_harness(config: HarnessConfig) -> SimulationHarness {
    let pool = create_migrated_test_pool()
        .await
        .expect("Failed to create migrated test pool");
    SimulationHarness::with_sqlite(pool, config)
}
