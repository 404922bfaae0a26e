//! Conflict detection configuration

use crate::error::ResolverError;
use ownergraph_domain::SourceKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static authority ranking used to break ownership conflicts
///
/// Lower rank means more authoritative. Ranking is independent of the
/// trust weights used for scoring.
///
/// # Examples
///
/// ```
/// use ownergraph_resolver::ConflictDetector;
///
/// let detector = ConflictDetector::default();
/// assert_eq!(detector.rank_for("codeowners"), 1);
/// assert_eq!(detector.rank_for("k8s"), 2);
/// assert_eq!(detector.rank_for("spreadsheet"), detector.unranked_priority);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictDetector {
    /// Reserved sensitivity for fuzzy conflict detection, in (0, 1)
    /// Validated but not consulted by exact-match resolution
    #[serde(default = "default_conflict_threshold")]
    pub conflict_threshold: f64,

    /// Rank given to sources absent from `source_priority`
    /// Must be greater than every configured rank
    #[serde(default = "default_unranked_priority")]
    pub unranked_priority: u32,

    /// Rank per source id (canonical id, alias, or any raw source string)
    #[serde(default = "default_source_priority")]
    pub source_priority: BTreeMap<String, u32>,
}

fn default_conflict_threshold() -> f64 {
    0.3
}

fn default_unranked_priority() -> u32 {
    100
}

fn default_source_priority() -> BTreeMap<String, u32> {
    SourceKind::ALL
        .iter()
        .zip(1u32..)
        .map(|(kind, rank)| (kind.as_str().to_string(), rank))
        .collect()
}

impl Default for ConflictDetector {
    /// codeowners 1, kubernetes 2, aws 3, datadog 4; unranked 100
    fn default() -> Self {
        Self {
            conflict_threshold: default_conflict_threshold(),
            unranked_priority: default_unranked_priority(),
            source_priority: default_source_priority(),
        }
    }
}

impl ConflictDetector {
    /// Build a detector from an explicit ranking
    ///
    /// `unranked_priority` is placed just past the worst configured rank.
    pub fn from_priorities<I, S>(priorities: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let source_priority: BTreeMap<String, u32> = priorities
            .into_iter()
            .map(|(source, rank)| (source.into(), rank))
            .collect();
        let worst = source_priority.values().copied().max().unwrap_or(0);

        Self {
            conflict_threshold: default_conflict_threshold(),
            unranked_priority: worst.saturating_add(1),
            source_priority,
        }
    }

    /// Rank for a source
    ///
    /// Looks up the raw source string first, then the canonical id of its
    /// kind, then falls back to `unranked_priority`.
    pub fn rank_for(&self, source: &str) -> u32 {
        if let Some(rank) = self.source_priority.get(source) {
            return *rank;
        }

        SourceKind::parse(source)
            .and_then(|kind| self.source_priority.get(kind.as_str()))
            .copied()
            .unwrap_or(self.unranked_priority)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ResolverError> {
        if !(self.conflict_threshold > 0.0 && self.conflict_threshold < 1.0) {
            return Err(ResolverError::Config(format!(
                "conflict_threshold must be in (0, 1), got {}",
                self.conflict_threshold
            )));
        }

        if self.source_priority.keys().any(|source| source.trim().is_empty()) {
            return Err(ResolverError::Config(
                "source_priority contains an empty source id".to_string(),
            ));
        }

        if let Some((source, rank)) = self
            .source_priority
            .iter()
            .find(|(_, rank)| **rank >= self.unranked_priority)
        {
            return Err(ResolverError::Config(format!(
                "unranked_priority {} must be greater than every configured rank ('{}' is {})",
                self.unranked_priority, source, rank
            )));
        }

        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ResolverError> {
        toml::from_str(toml_str).map_err(|e| ResolverError::Toml(e.to_string()))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ResolverError> {
        toml::to_string_pretty(self).map_err(|e| ResolverError::Toml(e.to_string()))
    }
}
