//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ownergraph CLI - Fuse ownership observations into one ownership graph.
#[derive(Debug, Parser)]
#[command(name = "ownergraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (summary only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the fusion pipeline over a batch of observations
    Run(RunArgs),

    /// Load and validate a pipeline configuration file
    CheckConfig(CheckConfigArgs),

    /// Print a pipeline configuration preset as TOML
    InitConfig(InitConfigArgs),
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// JSON file holding an array of observations (`-` for stdin)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Pipeline configuration file
    #[arg(short, long, env = "OWNERGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database for resolved edges (in-memory when omitted)
    #[arg(long, env = "OWNERGRAPH_DB")]
    pub db: Option<PathBuf>,

    /// Evaluate freshness at this instant (RFC 3339) instead of the current time
    #[arg(long)]
    pub now: Option<String>,

    /// After a successful run, delete stored edges whose resource now has another owner
    #[arg(long)]
    pub prune: bool,
}

/// Arguments for the check-config command.
#[derive(Debug, Parser)]
pub struct CheckConfigArgs {
    /// Configuration file to validate
    pub path: PathBuf,
}

/// Arguments for the init-config command.
#[derive(Debug, Parser)]
pub struct InitConfigArgs {
    /// Preset to print
    #[arg(short, long, value_enum, default_value = "default")]
    pub preset: PresetArg,
}

/// Configuration preset argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PresetArg {
    /// Balanced trust model
    Default,
    /// Distrust unknown sources, decay quickly
    Strict,
    /// Slow decay, generous corroboration
    Lenient,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<PresetArg> for ownergraph_pipeline::PipelineConfig {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Default => ownergraph_pipeline::PipelineConfig::default(),
            PresetArg::Strict => ownergraph_pipeline::PipelineConfig::strict(),
            PresetArg::Lenient => ownergraph_pipeline::PipelineConfig::lenient(),
        }
    }
}
