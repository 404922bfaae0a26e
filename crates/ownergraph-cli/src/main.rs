//! Ownergraph CLI - fuse ownership observations into one ownership graph.

use anyhow::Context;
use clap::Parser;
use ownergraph_cli::commands;
use ownergraph_cli::{Cli, Command, Config, Formatter};
use ownergraph_pipeline::FusionStatus;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(FusionStatus::Success) => {}
        Ok(FusionStatus::Error) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run() -> anyhow::Result<FusionStatus> {
    let cli = Cli::parse();

    let config = Config::load().context("failed to load ~/.ownergraph/config.toml")?;

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Run(args) => {
            let input = args.input.display().to_string();
            let status = commands::execute_run(args, &config, &formatter)
                .await
                .with_context(|| format!("fusion run over {} failed", input))?;
            Ok(status)
        }
        Command::CheckConfig(args) => {
            commands::execute_check_config(args, &config, &formatter)?;
            Ok(FusionStatus::Success)
        }
        Command::InitConfig(args) => {
            commands::execute_init_config(args)?;
            Ok(FusionStatus::Success)
        }
    }
}
