//! Check-config command implementation.

use crate::cli::CheckConfigArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the check-config command.
pub fn execute_check_config(
    args: CheckConfigArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let pipeline_config = config.pipeline_config(Some(&args.path))?;

    println!(
        "{}",
        formatter.success(&format!("Configuration valid: {}", args.path.display()))
    );
    let details = formatter.format_pipeline_config(&pipeline_config)?;
    if !details.is_empty() {
        println!("{}", details);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn formatter() -> Formatter {
        Formatter::new(OutputFormat::Quiet, false)
    }

    #[test]
    fn test_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[conflict]\nconflict_threshold = 0.4").unwrap();

        let args = CheckConfigArgs {
            path: file.path().to_path_buf(),
        };
        assert!(execute_check_config(args, &Config::default(), &formatter()).is_ok());
    }

    #[test]
    fn test_out_of_range_weight() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[scoring.source_weights]\ncodeowners = 1.5").unwrap();

        let args = CheckConfigArgs {
            path: file.path().to_path_buf(),
        };
        let result = execute_check_config(args, &Config::default(), &formatter());
        assert!(matches!(result, Err(CliError::Pipeline(_))));
    }

    #[test]
    fn test_missing_file() {
        let args = CheckConfigArgs {
            path: "/nonexistent/fusion.toml".into(),
        };
        assert!(execute_check_config(args, &Config::default(), &formatter()).is_err());
    }
}
