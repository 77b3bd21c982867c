//! Infrastructure layer module
//!
//! Cross-cutting process concerns:
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)

pub mod config;
pub mod logging;
