//! Command implementations for the fittrack CLI.
//!
//! This module contains the actual implementations of CLI commands,
//! separated from the argument parsing definitions in cli/mod.rs.

pub mod config;
pub mod history;
pub mod metrics;
pub mod recent;
pub mod watch;
