//! Configuration for the Extractor

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};

/// Default cloud tag holding the owner
pub const DEFAULT_OWNER_TAG_KEY: &str = "Owner";

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Cloud tag key that names a resource's owner
    #[serde(default = "default_owner_tag_key")]
    pub owner_tag_key: String,

    /// Strip one leading `@` from owner markers (`@team/backend` → `team/backend`)
    #[serde(default = "default_strip_owner_marker")]
    pub strip_owner_marker: bool,
}

fn default_owner_tag_key() -> String {
    DEFAULT_OWNER_TAG_KEY.to_string()
}

fn default_strip_owner_marker() -> bool {
    true
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            owner_tag_key: default_owner_tag_key(),
            strip_owner_marker: default_strip_owner_marker(),
        }
    }
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.owner_tag_key.trim().is_empty() {
            return Err(ExtractorError::Config(
                "owner_tag_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Normalize a raw owner marker, returning `None` if nothing usable remains
    pub fn normalize_owner(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        let stripped = if self.strip_owner_marker {
            trimmed.strip_prefix('@').unwrap_or(trimmed).trim()
        } else {
            trimmed
        };

        if stripped.is_empty() {
            None
        } else {
            Some(stripped.to_string())
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        toml::from_str(toml_str).map_err(|e| ExtractorError::Toml(e.to_string()))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self).map_err(|e| ExtractorError::Toml(e.to_string()))
    }
}
