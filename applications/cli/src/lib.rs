//! CivicLink CLI - library components
//!
//! Exposes the command layer so integration tests can drive it without
//! spawning the binary.

pub mod commands;
pub mod config;
pub mod error;
pub mod render;

pub use commands::{App, DashboardArgs, ReportArgs};
pub use config::AppConfig;
pub use error::{CliError, Result};
