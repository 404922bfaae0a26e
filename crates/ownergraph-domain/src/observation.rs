//! Observation module - raw claims as delivered by source adapters

use crate::{SourceKind, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A raw, source-reported ownership claim
///
/// Produced by an external adapter, consumed once by the extractor and
/// discarded. Deserialization is lenient: missing fields take their empty
/// defaults and a non-numeric confidence reads as `0.0`, so one sloppy
/// record never rejects the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Source identifier (e.g. "codeowners", "kubernetes")
    #[serde(default)]
    pub source: String,

    /// Source-specific payload, decoded by the extractor
    #[serde(default)]
    pub payload: Value,

    /// Source-reported confidence, nominally in [0, 1]
    #[serde(default, deserialize_with = "lenient_confidence")]
    pub confidence: f64,

    /// When the source observed this
    #[serde(default)]
    pub timestamp: Timestamp,
}

impl Observation {
    /// Create a new observation
    pub fn new(
        source: impl Into<String>,
        payload: Value,
        confidence: f64,
        timestamp: impl Into<Timestamp>,
    ) -> Self {
        Self {
            source: source.into(),
            payload,
            confidence,
            timestamp: timestamp.into(),
        }
    }

    /// The known kind of this observation's source, if any
    pub fn kind(&self) -> Option<SourceKind> {
        SourceKind::parse(&self.source)
    }
}

fn lenient_confidence<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().unwrap_or(0.0))
}
