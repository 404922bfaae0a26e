//! Source kinds - the observers the engine knows how to decode

use std::fmt;

/// A known ownership observer
///
/// Observations from any other source are tolerated but contribute nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceKind {
    /// Source-control ownership files (CODEOWNERS and friends)
    OwnershipFile,

    /// Cluster resource metadata (owner labels/annotations)
    ClusterMetadata,

    /// Cloud resource tags
    CloudTags,

    /// Monitoring-platform service catalog team assignments
    Monitoring,
}

impl SourceKind {
    /// Every known kind, in canonical order
    pub const ALL: [SourceKind; 4] = [
        SourceKind::OwnershipFile,
        SourceKind::ClusterMetadata,
        SourceKind::CloudTags,
        SourceKind::Monitoring,
    ];

    /// Canonical source identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::OwnershipFile => "codeowners",
            SourceKind::ClusterMetadata => "kubernetes",
            SourceKind::CloudTags => "aws",
            SourceKind::Monitoring => "datadog",
        }
    }

    /// Resolve a source identifier (canonical id or alias, case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "codeowners" | "github" | "ownership-file" => Some(SourceKind::OwnershipFile),
            "kubernetes" | "k8s" | "cluster" => Some(SourceKind::ClusterMetadata),
            "aws" | "aws-tags" | "cloud-tags" => Some(SourceKind::CloudTags),
            "datadog" | "monitoring" => Some(SourceKind::Monitoring),
            _ => None,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown source: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_ids_parse_back() {
        for kind in SourceKind::ALL {
            assert_eq!(SourceKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(SourceKind::parse("GitHub"), Some(SourceKind::OwnershipFile));
        assert_eq!(SourceKind::parse("k8s"), Some(SourceKind::ClusterMetadata));
        assert_eq!(SourceKind::parse(" cloud-tags "), Some(SourceKind::CloudTags));
        assert_eq!(SourceKind::parse("Monitoring"), Some(SourceKind::Monitoring));
    }

    #[test]
    fn test_unknown_source() {
        assert!(SourceKind::parse("pagerduty").is_none());
        assert!(SourceKind::parse("").is_none());
        assert!("jira".parse::<SourceKind>().is_err());
    }
}
