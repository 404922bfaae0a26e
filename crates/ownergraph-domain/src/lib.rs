//! Ownergraph Domain Layer
//!
//! This crate holds the data model shared by every stage of the ownership
//! fusion engine. It carries no behavior beyond construction, parsing and
//! invariant helpers; the stages themselves live in the extractor, scorer,
//! resolver and pipeline crates.
//!
//! ## Key Concepts
//!
//! - **Observation**: A raw, source-reported ownership claim with an opaque payload
//! - **Relationship**: A canonical `(from, to, type)` ownership edge with confidence
//! - **Timestamp**: The transported point in time, parsed lazily and leniently
//! - **SourceKind**: The closed set of observers the engine knows how to decode
//! - **GraphStore**: The persistence seam the orchestrator writes resolved edges to
//!
//! ## Architecture
//!
//! ```text
//! Observation → Extractor → Relationship → Scorer → Resolver → GraphStore
//! ```
//!
//! Data only flows forward. Nothing in this crate depends on a later stage.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod confidence;
pub mod observation;
pub mod relationship;
pub mod source;
pub mod timestamp;
pub mod traits;

// Re-exports for convenience
pub use confidence::clamp_confidence;
pub use observation::Observation;
pub use relationship::{ClaimKey, Relationship, TargetKey, OWNS};
pub use source::SourceKind;
pub use timestamp::Timestamp;
pub use traits::GraphStore;
