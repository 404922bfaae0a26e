//! Scoring and consolidation of ownership facts

use crate::config::ConfidenceEngine;
use crate::freshness::freshness_multiplier;
use chrono::{DateTime, Utc};
use ownergraph_domain::{clamp_confidence, ClaimKey, Relationship, SourceKind};
use std::collections::HashMap;
use tracing::{debug, info};

/// One fact with its individual score
#[derive(Debug)]
struct Contribution<'a> {
    fact: &'a Relationship,
    score: f64,
    observed: Option<DateTime<Utc>>,
}

/// Scores facts against a `ConfidenceEngine` and consolidates duplicates
///
/// Pure: the same facts, engine and `now` always produce the same output.
#[derive(Debug, Clone, Default)]
pub struct ConfidenceScorer {
    engine: ConfidenceEngine,
}

impl ConfidenceScorer {
    /// Create a new Scorer
    pub fn new(engine: ConfidenceEngine) -> Self {
        Self { engine }
    }

    /// Create a Scorer with the default trust model
    pub fn default_config() -> Self {
        Self::new(ConfidenceEngine::default())
    }

    /// Active trust model
    pub fn engine(&self) -> &ConfidenceEngine {
        &self.engine
    }

    /// Individual score of a single fact
    ///
    /// `clamp(confidence × weight(source) × freshness(timestamp, now))`
    pub fn score_fact(&self, fact: &Relationship, now: DateTime<Utc>) -> f64 {
        let base = fact.confidence * self.engine.weight_for(&fact.source);
        let freshness = freshness_multiplier(
            &fact.timestamp,
            now,
            self.engine.freshness_decay_rate,
            self.engine.decay_unit,
        );
        clamp_confidence(base * freshness)
    }

    /// Score every fact and emit one relationship per `(from, to, type)`
    ///
    /// Output follows the first occurrence of each claim in `facts`.
    pub fn score(&self, facts: &[Relationship], now: DateTime<Utc>) -> Vec<Relationship> {
        let mut positions: HashMap<ClaimKey, usize> = HashMap::new();
        let mut groups: Vec<Vec<Contribution<'_>>> = Vec::new();

        for fact in facts {
            let contribution = Contribution {
                fact,
                score: self.score_fact(fact, now),
                observed: fact.timestamp.parse(),
            };

            let next = groups.len();
            let position = *positions.entry(fact.claim_key()).or_insert(next);
            if position == next {
                groups.push(Vec::new());
            }
            groups[position].push(contribution);
        }

        let scored: Vec<Relationship> = groups
            .into_iter()
            .map(|group| self.consolidate(group))
            .collect();

        let corroborated = scored.iter().filter(|r| r.corroborated_by.len() > 1).count();
        info!(
            "Scored {} facts into {} claims ({} corroborated)",
            facts.len(),
            scored.len(),
            corroborated
        );

        scored
    }

    /// Merge one claim group into a single relationship
    ///
    /// Confidence is the best individual score plus `agreement_bonus` for
    /// each distinct observer beyond the first. Aliases of one known source
    /// count once, under the spelling seen first. Source and timestamp come
    /// from the representative contributor.
    fn consolidate(&self, group: Vec<Contribution<'_>>) -> Relationship {
        let mut observers: Vec<&str> = Vec::new();
        let mut sources: Vec<String> = Vec::new();
        for contribution in &group {
            let observer = observer_identity(&contribution.fact.source);
            if !observers.contains(&observer) {
                observers.push(observer);
                sources.push(contribution.fact.source.clone());
            }
        }

        let best_score = group.iter().map(|c| c.score).fold(0.0, f64::max);
        let confidence = if sources.len() > 1 {
            let bonus = self.engine.agreement_bonus * (sources.len() - 1) as f64;
            clamp_confidence(best_score + bonus)
        } else {
            best_score
        };

        let chosen = representative(&group);
        if group.len() > 1 {
            debug!(
                "Consolidated {} facts for {} owns {} from [{}] -> {:.3} via {}",
                group.len(),
                chosen.fact.from,
                chosen.fact.to,
                sources.join(", "),
                confidence,
                chosen.fact.source
            );
        }

        Relationship {
            confidence,
            has_conflict: false,
            corroborated_by: sources,
            ..chosen.fact.clone()
        }
    }
}

/// Canonical id for known sources, the raw string otherwise
fn observer_identity(source: &str) -> &str {
    SourceKind::parse(source).map_or(source, |kind| kind.as_str())
}

/// The contributor whose source and timestamp a consolidated claim inherits
///
/// Most recent parsable timestamp wins, then the higher individual score,
/// then the earlier contributor. With no parsable timestamps the first
/// contributor is used.
fn representative<'a, 'b>(group: &'b [Contribution<'a>]) -> &'b Contribution<'a> {
    let mut best = &group[0];
    for candidate in &group[1..] {
        let better = match (candidate.observed, best.observed) {
            (Some(a), Some(b)) => a > b || (a == b && candidate.score > best.score),
            (Some(_), None) => true,
            (None, _) => false,
        };
        if better {
            best = candidate;
        }
    }
    best
}
