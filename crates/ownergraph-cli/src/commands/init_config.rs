//! Init-config command implementation.

use crate::cli::InitConfigArgs;
use crate::error::Result;
use ownergraph_pipeline::PipelineConfig;

/// Execute the init-config command.
///
/// Prints the preset as TOML on stdout, ready to redirect into a file.
pub fn execute_init_config(args: InitConfigArgs) -> Result<()> {
    println!("{}", render_preset(args)?);
    Ok(())
}

fn render_preset(args: InitConfigArgs) -> Result<String> {
    let config: PipelineConfig = args.preset.into();
    Ok(config.to_toml()?)
}
