//! Conflict detection and priority-based resolution

use crate::config::ConflictDetector;
use ownergraph_domain::{Relationship, TargetKey};
use std::collections::HashMap;
use tracing::{debug, info};

/// Resolved edge set: at most one relationship per `(to, type)`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Resolved relationships in first-occurrence order of their target
    pub relationships: Vec<Relationship>,

    /// Number of targets whose sources disagreed about the owner
    pub conflict_count: usize,
}

impl Resolution {
    /// Relationships flagged as conflicts
    pub fn conflicts(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter().filter(|r| r.has_conflict)
    }

    /// Number of resolved relationships
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    /// Whether nothing was resolved
    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }
}

/// Collapses scored facts to one owner per target
///
/// Deterministic: the same input in the same order always resolves the
/// same way, and the winner of a conflict never depends on input order
/// unless ranks tie.
#[derive(Debug, Clone, Default)]
pub struct ConflictResolver {
    detector: ConflictDetector,
}

impl ConflictResolver {
    /// Create a new Resolver
    pub fn new(detector: ConflictDetector) -> Self {
        Self { detector }
    }

    /// Create a Resolver with the default ranking
    pub fn default_config() -> Self {
        Self::new(ConflictDetector::default())
    }

    /// Active ranking
    pub fn detector(&self) -> &ConflictDetector {
        &self.detector
    }

    /// Resolve scored relationships to one per `(to, type)`
    pub fn resolve(&self, scored: &[Relationship]) -> Resolution {
        let mut positions: HashMap<TargetKey, usize> = HashMap::new();
        let mut groups: Vec<Vec<&Relationship>> = Vec::new();

        for rel in scored {
            let next = groups.len();
            let position = *positions.entry(rel.target_key()).or_insert(next);
            if position == next {
                groups.push(Vec::new());
            }
            groups[position].push(rel);
        }

        let relationships: Vec<Relationship> = groups
            .iter()
            .map(|group| self.resolve_group(group))
            .collect();
        let conflict_count = relationships.iter().filter(|r| r.has_conflict).count();

        info!(
            "Resolved {} relationships into {} targets ({} conflicts)",
            scored.len(),
            relationships.len(),
            conflict_count
        );

        Resolution {
            relationships,
            conflict_count,
        }
    }

    fn resolve_group(&self, group: &[&Relationship]) -> Relationship {
        let mut owners: Vec<&str> = Vec::new();
        for rel in group {
            if !owners.contains(&rel.from.as_str()) {
                owners.push(&rel.from);
            }
        }

        if owners.len() < 2 {
            let kept = strongest(group);
            return Relationship {
                has_conflict: false,
                ..kept.clone()
            };
        }

        let winner = self.highest_priority(group);
        debug!(
            "Conflict on {} ({}): owners [{}], {} wins via {} (rank {})",
            winner.to,
            winner.relationship_type,
            owners.join(", "),
            winner.from,
            winner.source,
            self.detector.rank_for(&winner.source)
        );

        Relationship {
            has_conflict: true,
            ..winner.clone()
        }
    }

    /// Lowest rank wins; equal ranks go to the earliest record
    fn highest_priority<'a>(&self, group: &[&'a Relationship]) -> &'a Relationship {
        let mut best = group[0];
        let mut best_rank = self.detector.rank_for(&best.source);
        for &rel in &group[1..] {
            let rank = self.detector.rank_for(&rel.source);
            if rank < best_rank {
                best = rel;
                best_rank = rank;
            }
        }
        best
    }
}

/// Highest confidence wins; equal confidence goes to the earliest record
fn strongest<'a>(group: &[&'a Relationship]) -> &'a Relationship {
    let mut best = group[0];
    for &rel in &group[1..] {
        if rel.confidence > best.confidence {
            best = rel;
        }
    }
    best
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    const SOURCES: [&str; 6] = ["codeowners", "kubernetes", "aws", "datadog", "wiki", "notes"];

    fn relationship_strategy() -> impl Strategy<Value = Relationship> {
        (0..4usize, 0..4usize, 0..SOURCES.len(), 0.0f64..=1.0).prop_map(
            |(owner, resource, source, confidence)| {
                Relationship::owns(
                    format!("owner{}", owner),
                    format!("res{}", resource),
                    confidence,
                    SOURCES[source],
                    "2024-05-01",
                )
            },
        )
    }

    proptest! {
        /// Property: one record per target; conflict iff ≥2 distinct owners
        #[test]
        fn test_conflict_invariant(
            scored in prop::collection::vec(relationship_strategy(), 0..30)
        ) {
            let resolution = ConflictResolver::default_config().resolve(&scored);

            let mut seen = HashSet::new();
            for rel in &resolution.relationships {
                prop_assert!(seen.insert(rel.target_key()));

                let owners: HashSet<&str> = scored
                    .iter()
                    .filter(|s| s.target_key() == rel.target_key())
                    .map(|s| s.from.as_str())
                    .collect();
                prop_assert_eq!(rel.has_conflict, owners.len() >= 2);
            }

            prop_assert_eq!(resolution.conflict_count, resolution.conflicts().count());
        }

        /// Property: the better-ranked source wins regardless of input order
        #[test]
        fn test_priority_determinism(
            better in 0..4usize,
            worse in 0..4usize,
            c1 in 0.0f64..=1.0,
            c2 in 0.0f64..=1.0,
        ) {
            prop_assume!(better < worse);
            let resolver = ConflictResolver::default_config();
            let strong =
                Relationship::owns("user2", "resourceA", c1, SOURCES[better], "2024-05-01");
            let weak = Relationship::owns("user1", "resourceA", c2, SOURCES[worse], "2024-05-01");

            let forward = resolver.resolve(&[strong.clone(), weak.clone()]);
            let backward = resolver.resolve(&[weak, strong]);

            prop_assert_eq!(&forward.relationships[0].from, "user2");
            prop_assert_eq!(&backward.relationships[0].from, "user2");
            prop_assert!(forward.relationships[0].has_conflict);
        }
    }
}
