//! Pipeline configuration
//!
//! One TOML document configures every stage:
//!
//! ```toml
//! persist_timeout_secs = 30
//!
//! [extractor]
//! owner_tag_key = "Owner"
//!
//! [scoring]
//! agreement_bonus = 0.1
//! freshness_decay_rate = 0.01
//! decay_unit = "days"
//!
//! [scoring.source_weights]
//! codeowners = 0.9
//!
//! [conflict]
//! unranked_priority = 100
//!
//! [conflict.source_priority]
//! codeowners = 1
//! ```

use crate::error::PipelineError;
use ownergraph_extractor::ExtractorConfig;
use ownergraph_resolver::ConflictDetector;
use ownergraph_scorer::ConfidenceEngine;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for a fusion pipeline
///
/// # Examples
///
/// ```
/// use ownergraph_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.persist_timeout_secs, 30);
///
/// // Distrust unknown sources, decay quickly
/// let config = PipelineConfig::strict();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Deadline for the graph store write, in seconds
    #[serde(default = "default_persist_timeout_secs")]
    pub persist_timeout_secs: u64,

    /// Payload decoding options
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Trust model
    #[serde(default)]
    pub scoring: ConfidenceEngine,

    /// Conflict ranking
    #[serde(default)]
    pub conflict: ConflictDetector,
}

fn default_persist_timeout_secs() -> u64 {
    30
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            persist_timeout_secs: default_persist_timeout_secs(),
            extractor: ExtractorConfig::default(),
            scoring: ConfidenceEngine::default(),
            conflict: ConflictDetector::default(),
        }
    }
}

impl PipelineConfig {
    /// Strict preset: strict trust model, short store deadline
    pub fn strict() -> Self {
        Self {
            persist_timeout_secs: 10,
            scoring: ConfidenceEngine::strict(),
            ..Self::default()
        }
    }

    /// Lenient preset: lenient trust model, generous store deadline
    pub fn lenient() -> Self {
        Self {
            persist_timeout_secs: 120,
            scoring: ConfidenceEngine::lenient(),
            ..Self::default()
        }
    }

    /// Look up a preset by name (`default`, `strict`, `lenient`)
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "default" => Some(Self::default()),
            "strict" => Some(Self::strict()),
            "lenient" => Some(Self::lenient()),
            _ => None,
        }
    }

    /// Store write deadline
    pub fn persist_timeout(&self) -> Duration {
        Duration::from_secs(self.persist_timeout_secs)
    }

    /// Validate every stage's configuration
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.persist_timeout_secs == 0 {
            return Err(PipelineError::Config(
                "persist_timeout_secs must be greater than 0".to_string(),
            ));
        }
        self.extractor.validate()?;
        self.scoring.validate()?;
        self.conflict.validate()?;
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, PipelineError> {
        toml::from_str(toml_str).map_err(|e| PipelineError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, PipelineError> {
        toml::to_string_pretty(self).map_err(|e| PipelineError::Config(e.to_string()))
    }
}
