//! Configuration management for the CLI.
//!
//! Two files are involved. `~/.ownergraph/config.toml` holds CLI settings
//! (output, color, default paths). The pipeline configuration is a separate
//! TOML document, found via `--config`, the settings file, or
//! `~/.ownergraph/fusion.toml`, in that order.

use crate::error::{CliError, Result};
use ownergraph_pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Pipeline configuration used when `--config` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_config: Option<PathBuf>,

    /// SQLite database used when `--db` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (summary only) format
    Quiet,
}

impl Config {
    /// Directory holding ownergraph's files.
    pub fn home() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".ownergraph"))
    }

    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::home()?.join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if it is absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, or defaults if it is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve and validate the pipeline configuration.
    ///
    /// `explicit` wins, then the settings file's `pipeline_config`, then
    /// `~/.ownergraph/fusion.toml` if it exists. With none of those the
    /// built-in defaults apply.
    pub fn pipeline_config(&self, explicit: Option<&Path>) -> Result<PipelineConfig> {
        let candidate = match explicit.or(self.settings.pipeline_config.as_deref()) {
            Some(path) => Some(path.to_path_buf()),
            None => Self::home()
                .ok()
                .map(|home| home.join("fusion.toml"))
                .filter(|path| path.exists()),
        };

        let config = match candidate {
            Some(path) => {
                debug!("Loading pipeline configuration from {}", path.display());
                PipelineConfig::from_file(&path)?
            }
            None => PipelineConfig::default(),
        };

        config.validate()?;
        Ok(config)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            pipeline_config: None,
            database: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert!(config.settings.database.is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(config.settings.color);
    }

    #[test]
    fn test_load_settings() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[settings]
color = false
format = "json"
database = "/var/lib/ownergraph/graph.db"
"#
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert!(!config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert_eq!(
            config.settings.database,
            Some(PathBuf::from("/var/lib/ownergraph/graph.db"))
        );
    }

    #[test]
    fn test_malformed_settings_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[settings]\ncolor = \"sometimes\"").unwrap();
        assert!(matches!(Config::load_from(file.path()), Err(CliError::Toml(_))));
    }

    #[test]
    fn test_explicit_pipeline_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "persist_timeout_secs = 5").unwrap();

        let config = Config::default().pipeline_config(Some(file.path())).unwrap();
        assert_eq!(config.persist_timeout_secs, 5);
    }

    #[test]
    fn test_settings_pipeline_config_used_without_flag() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "persist_timeout_secs = 7").unwrap();

        let mut config = Config::default();
        config.settings.pipeline_config = Some(file.path().to_path_buf());

        assert_eq!(config.pipeline_config(None).unwrap().persist_timeout_secs, 7);
    }

    #[test]
    fn test_invalid_pipeline_config_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "persist_timeout_secs = 0").unwrap();

        let result = Config::default().pipeline_config(Some(file.path()));
        assert!(matches!(result, Err(CliError::Pipeline(_))));
    }
}
