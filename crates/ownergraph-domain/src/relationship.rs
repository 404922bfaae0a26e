//! Relationship module - canonical ownership edges

use crate::{clamp_confidence, Timestamp};
use serde::{Deserialize, Serialize};

/// Relationship type emitted by every known decoder
pub const OWNS: &str = "owns";

/// A canonical ownership fact between an owner and a resource
///
/// Created by the extractor, rescored by the scorer, flagged by the
/// resolver, and immutable once handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Claimed owner (individual or team)
    pub from: String,

    /// Target resource identifier
    pub to: String,

    /// Relationship kind (e.g. "owns")
    #[serde(rename = "type")]
    pub relationship_type: String,

    /// Confidence [0.0, 1.0]
    pub confidence: f64,

    /// Source that asserted this edge
    pub source: String,

    /// When the source observed this edge
    pub timestamp: Timestamp,

    /// Set by the resolver when sources disagreed about the owner
    #[serde(default)]
    pub has_conflict: bool,

    /// Distinct sources asserting this exact claim, first occurrence first
    #[serde(default)]
    pub corroborated_by: Vec<String>,
}

impl Relationship {
    /// Create a new relationship
    ///
    /// Confidence is clamped into [0, 1]; the asserting source is recorded as
    /// the sole corroborator.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        relationship_type: impl Into<String>,
        confidence: f64,
        source: impl Into<String>,
        timestamp: impl Into<Timestamp>,
    ) -> Self {
        let source = source.into();
        Self {
            from: from.into(),
            to: to.into(),
            relationship_type: relationship_type.into(),
            confidence: clamp_confidence(confidence),
            corroborated_by: vec![source.clone()],
            source,
            timestamp: timestamp.into(),
            has_conflict: false,
        }
    }

    /// Create an "owns" relationship
    pub fn owns(
        from: impl Into<String>,
        to: impl Into<String>,
        confidence: f64,
        source: impl Into<String>,
        timestamp: impl Into<Timestamp>,
    ) -> Self {
        Self::new(from, to, OWNS, confidence, source, timestamp)
    }

    /// Identity of the claim: `(from, to, type)`
    pub fn claim_key(&self) -> ClaimKey {
        ClaimKey {
            from: self.from.clone(),
            to: self.to.clone(),
            relationship_type: self.relationship_type.clone(),
        }
    }

    /// Identity of the contested target: `(to, type)`
    pub fn target_key(&self) -> TargetKey {
        TargetKey {
            to: self.to.clone(),
            relationship_type: self.relationship_type.clone(),
        }
    }

    /// Whether every identifying field is non-empty
    pub fn is_well_formed(&self) -> bool {
        !self.from.trim().is_empty()
            && !self.to.trim().is_empty()
            && !self.relationship_type.trim().is_empty()
            && !self.source.trim().is_empty()
            && !self.timestamp.is_empty()
    }
}

/// Grouping key for consolidation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClaimKey {
    /// Claimed owner
    pub from: String,
    /// Target resource
    pub to: String,
    /// Relationship kind
    pub relationship_type: String,
}

/// Grouping key for conflict detection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetKey {
    /// Target resource
    pub to: String,
    /// Relationship kind
    pub relationship_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_confidence() {
        let rel = Relationship::owns("user1", "/src/main", 1.7, "codeowners", "2024-01-01");
        assert_eq!(rel.confidence, 1.0);
        assert!(!rel.has_conflict);
        assert_eq!(rel.corroborated_by, vec!["codeowners".to_string()]);
    }

    #[test]
    fn test_keys() {
        let a = Relationship::owns("user1", "res-a", 0.5, "aws", "2024-01-01");
        let b = Relationship::owns("user2", "res-a", 0.5, "aws", "2024-01-01");

        assert_ne!(a.claim_key(), b.claim_key());
        assert_eq!(a.target_key(), b.target_key());
    }

    #[test]
    fn test_well_formed() {
        let rel = Relationship::owns("user1", "res-a", 0.5, "aws", "2024-01-01");
        assert!(rel.is_well_formed());

        let mut missing_ts = rel.clone();
        missing_ts.timestamp = Timestamp::default();
        assert!(!missing_ts.is_well_formed());

        let mut missing_owner = rel;
        missing_owner.from = " ".to_string();
        assert!(!missing_owner.is_well_formed());
    }

    #[test]
    fn test_serializes_camel_case() {
        let rel = Relationship::owns("user1", "res-a", 0.5, "aws", "2024-01-01");
        let json = serde_json::to_value(&rel).unwrap();

        assert_eq!(json["type"], "owns");
        assert_eq!(json["hasConflict"], false);
        assert_eq!(json["corroboratedBy"][0], "aws");
        assert_eq!(json["timestamp"], "2024-01-01");
    }
}
