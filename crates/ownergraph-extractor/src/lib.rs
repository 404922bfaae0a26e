//! Ownergraph Extractor
//!
//! Decodes raw per-source observations into canonical ownership facts.
//!
//! # Overview
//!
//! Every observer reports ownership in its own payload shape. The Extractor
//! dispatches each observation by its `source` to a decoder for that shape,
//! walks the payload defensively and emits one `owns` relationship per
//! (owner, resource) pair it finds.
//!
//! # Architecture
//!
//! ```text
//! Observation → SourcePayload::decode → (owner, resource) pairs → Relationship
//! ```
//!
//! # Key Features
//!
//! - **Closed payload union**: one variant per known schema plus `Unrecognized`
//! - **Skip, never fail**: a malformed entry drops only itself
//! - **Statistics**: skipped entries and unknown sources are counted, not raised
//!
//! # Example Usage
//!
//! ```
//! use ownergraph_domain::Observation;
//! use ownergraph_extractor::ObservationExtractor;
//! use serde_json::json;
//!
//! let extractor = ObservationExtractor::default_config();
//! let observation = Observation::new(
//!     "codeowners",
//!     json!([{"path": "/src/main", "owners": ["@user1", "@team/backend"]}]),
//!     0.8,
//!     "2024-05-01T12:00:00Z",
//! );
//!
//! let relationships = extractor.extract(&[observation]);
//! assert_eq!(relationships.len(), 2);
//! assert_eq!(relationships[0].from, "user1");
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod payload;
mod stats;


pub use config::{ExtractorConfig, DEFAULT_OWNER_TAG_KEY};
pub use error::{EntryError, ExtractorError};
pub use extractor::{Extraction, ObservationExtractor};
pub use payload::{
    CloudResourceEntry, ClusterResourceEntry, DecodedPayload, MonitoredServiceEntry,
    OwnershipFileEntry, SourcePayload,
};
pub use stats::ExtractionStats;
