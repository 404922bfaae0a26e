//! Ownergraph CLI library.
//!
//! Command-line front end for the fusion pipeline: reads a batch of
//! observations as JSON, runs it through extraction, scoring and conflict
//! resolution, writes the resolved edges to SQLite and prints the outcome.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
