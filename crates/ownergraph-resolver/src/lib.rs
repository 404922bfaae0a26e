//! Ownergraph Resolver
//!
//! Detects when sources disagree about who owns a resource and picks one
//! owner using a static source-priority ranking.
//!
//! Scored relationships are grouped by `(to, type)`. A group with a single
//! distinct owner collapses to its strongest record. A group with several
//! distinct owners is a conflict: the record from the best-ranked source
//! wins and is flagged `has_conflict`. Unranked sources lose to any ranked
//! one; equal ranks go to the earliest record.
//!
//! ```
//! use ownergraph_domain::Relationship;
//! use ownergraph_resolver::ConflictResolver;
//!
//! let scored = vec![
//!     Relationship::owns("user1", "resourceA", 0.9, "aws", "2024-05-01"),
//!     Relationship::owns("user2", "resourceA", 0.4, "codeowners", "2024-05-01"),
//! ];
//!
//! let resolution = ConflictResolver::default_config().resolve(&scored);
//! assert_eq!(resolution.relationships[0].from, "user2");
//! assert!(resolution.relationships[0].has_conflict);
//! assert_eq!(resolution.conflict_count, 1);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod resolver;

pub use config::ConflictDetector;
pub use error::ResolverError;
pub use resolver::{ConflictResolver, Resolution};
