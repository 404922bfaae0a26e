//! Trust model configuration
//!
//! Source weights, the fallback weight for unknown sources, the agreement
//! bonus and the freshness decay constant.

use crate::error::ScoringError;
use ownergraph_domain::SourceKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Time unit in which a fact's age is measured before decay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecayUnit {
    /// Age in seconds
    Seconds,
    /// Age in hours
    Hours,
    /// Age in days
    #[default]
    Days,
}

impl DecayUnit {
    /// Length of one unit in seconds
    pub fn seconds(&self) -> f64 {
        match self {
            DecayUnit::Seconds => 1.0,
            DecayUnit::Hours => 3_600.0,
            DecayUnit::Days => 86_400.0,
        }
    }
}

/// Static trust model used by the Scorer
///
/// Immutable once built; pass a different engine per tenant rather than
/// mutating a shared one.
///
/// # Examples
///
/// ```
/// use ownergraph_scorer::ConfidenceEngine;
///
/// let engine = ConfidenceEngine::default();
/// assert_eq!(engine.weight_for("codeowners"), 0.9);
/// // Aliases resolve to the canonical entry
/// assert_eq!(engine.weight_for("GitHub"), 0.9);
/// // Unknown sources get the named fallback
/// assert_eq!(engine.weight_for("spreadsheet"), engine.default_weight);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceEngine {
    /// Weight applied to sources absent from `source_weights`
    /// Must be strictly lower than every configured weight
    #[serde(default = "default_default_weight")]
    pub default_weight: f64,

    /// Boost per additional distinct source corroborating an identical claim
    #[serde(default = "default_agreement_bonus")]
    pub agreement_bonus: f64,

    /// Exponential decay constant per `decay_unit` of age
    #[serde(default = "default_freshness_decay_rate")]
    pub freshness_decay_rate: f64,

    /// Unit in which age is measured
    #[serde(default)]
    pub decay_unit: DecayUnit,

    /// Trust weight per source id (canonical id, alias, or any raw source string)
    #[serde(default = "default_source_weights")]
    pub source_weights: BTreeMap<String, f64>,
}

fn default_default_weight() -> f64 {
    0.5
}

fn default_agreement_bonus() -> f64 {
    0.1
}

fn default_freshness_decay_rate() -> f64 {
    0.01
}

fn default_source_weights() -> BTreeMap<String, f64> {
    weights(&[0.9, 0.8, 0.7, 0.6])
}

/// Weights in `SourceKind::ALL` order, keyed by canonical id
fn weights(values: &[f64; 4]) -> BTreeMap<String, f64> {
    SourceKind::ALL
        .iter()
        .zip(values)
        .map(|(kind, weight)| (kind.as_str().to_string(), *weight))
        .collect()
}

impl Default for ConfidenceEngine {
    /// Balanced trust model
    ///
    /// - Weights: codeowners 0.9, kubernetes 0.8, aws 0.7, datadog 0.6
    /// - Unknown sources: 0.5
    /// - Agreement bonus: 0.1 per extra source
    /// - Decay: 0.01 per day (≈ half after 69 days)
    fn default() -> Self {
        Self {
            default_weight: default_default_weight(),
            agreement_bonus: default_agreement_bonus(),
            freshness_decay_rate: default_freshness_decay_rate(),
            decay_unit: DecayUnit::Days,
            source_weights: default_source_weights(),
        }
    }
}

impl ConfidenceEngine {
    /// Strict trust model (distrust unknowns, fast decay, small bonus)
    ///
    /// - Unknown sources: 0.3
    /// - Agreement bonus: 0.05
    /// - Decay: 0.05 per day (≈ half after 14 days)
    pub fn strict() -> Self {
        Self {
            default_weight: 0.3,
            agreement_bonus: 0.05,
            freshness_decay_rate: 0.05,
            decay_unit: DecayUnit::Days,
            source_weights: default_source_weights(),
        }
    }

    /// Lenient trust model (slow decay, generous corroboration)
    ///
    /// - Agreement bonus: 0.2
    /// - Decay: 0.002 per day (≈ half after a year)
    pub fn lenient() -> Self {
        Self {
            default_weight: 0.55,
            agreement_bonus: 0.2,
            freshness_decay_rate: 0.002,
            decay_unit: DecayUnit::Days,
            source_weights: weights(&[0.95, 0.9, 0.8, 0.7]),
        }
    }

    /// Trust weight for a source
    ///
    /// Looks up the raw source string first, then the canonical id of its
    /// kind, then falls back to `default_weight`.
    pub fn weight_for(&self, source: &str) -> f64 {
        if let Some(weight) = self.source_weights.get(source) {
            return *weight;
        }

        SourceKind::parse(source)
            .and_then(|kind| self.source_weights.get(kind.as_str()))
            .copied()
            .unwrap_or(self.default_weight)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ScoringError> {
        for (source, weight) in &self.source_weights {
            if source.trim().is_empty() {
                return Err(ScoringError::Config(
                    "source_weights contains an empty source id".to_string(),
                ));
            }
            if !in_unit_range(*weight) {
                return Err(ScoringError::Config(format!(
                    "weight for '{}' must be in [0, 1], got {}",
                    source, weight
                )));
            }
        }

        if !in_unit_range(self.default_weight) {
            return Err(ScoringError::Config(format!(
                "default_weight must be in [0, 1], got {}",
                self.default_weight
            )));
        }

        if let Some((source, weight)) = self
            .source_weights
            .iter()
            .find(|(_, weight)| self.default_weight >= **weight)
        {
            return Err(ScoringError::Config(format!(
                "default_weight {} must be lower than every configured weight ('{}' is {})",
                self.default_weight, source, weight
            )));
        }

        if !in_unit_range(self.agreement_bonus) {
            return Err(ScoringError::Config(format!(
                "agreement_bonus must be in [0, 1], got {}",
                self.agreement_bonus
            )));
        }

        if !self.freshness_decay_rate.is_finite() || self.freshness_decay_rate < 0.0 {
            return Err(ScoringError::Config(format!(
                "freshness_decay_rate must be finite and non-negative, got {}",
                self.freshness_decay_rate
            )));
        }

        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ScoringError> {
        toml::from_str(toml_str).map_err(|e| ScoringError::Toml(e.to_string()))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ScoringError> {
        toml::to_string_pretty(self).map_err(|e| ScoringError::Toml(e.to_string()))
    }
}

fn in_unit_range(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}
