//! Ownergraph Scorer
//!
//! Assigns every ownership fact a normalized trust score and merges
//! identical claims reported by several sources.
//!
//! # Scoring
//!
//! ```text
//! score = clamp(confidence × weight(source) × exp(-rate × age), 0, 1)
//! ```
//!
//! `age` is measured against a caller-supplied `now` so a run is
//! reproducible. Unparsable timestamps do not decay.
//!
//! # Consolidation
//!
//! Facts sharing `(from, to, type)` collapse into one relationship whose
//! confidence is the best individual score plus `agreement_bonus` for each
//! additional distinct source, and whose source and timestamp come from the
//! most recently observed contributor.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use ownergraph_domain::Relationship;
//! use ownergraph_scorer::ConfidenceScorer;
//!
//! let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
//! let facts = vec![
//!     Relationship::owns("user1", "resourceA", 0.8, "kubernetes", "2024-05-01"),
//!     Relationship::owns("user1", "resourceA", 0.9, "aws", "2024-05-01"),
//! ];
//!
//! let scored = ConfidenceScorer::default_config().score(&facts, now);
//! assert_eq!(scored.len(), 1);
//! assert_eq!(scored[0].corroborated_by.len(), 2);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod freshness;
mod scorer;

pub use config::{ConfidenceEngine, DecayUnit};
pub use error::ScoringError;
pub use freshness::{age_in_units, freshness_multiplier};
pub use scorer::ConfidenceScorer;
