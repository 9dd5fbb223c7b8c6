//! Shared utilities for the stock assistant workspace
//!
//! Logging setup and environment-backed configuration helpers used by the
//! library crates and the command-line binary.

pub mod config;
pub mod logging;

pub use config::{env_var, load_env};
pub use logging::init_tracing_with_default;
