//! Ownergraph Pipeline
//!
//! Orchestrates one fusion run over a batch of observations.
//!
//! # Architecture
//!
//! ```text
//! Observations → Extractor → Scorer → Resolver → GraphStore
//!                                         ↓
//!                                   FusionSummary
//! ```
//!
//! "Now" is captured once per run. Extraction, scoring and resolution
//! cannot fail; the store write can, and its failure is reported as an
//! error-status summary instead of an `Err`.
//!
//! # Usage
//!
//! ```no_run
//! use chrono::Utc;
//! use ownergraph_domain::Observation;
//! use ownergraph_pipeline::{FusionPipeline, PipelineConfig};
//! use ownergraph_store::SqliteGraphStore;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteGraphStore::new("ownergraph.db")?;
//! let pipeline = FusionPipeline::new(PipelineConfig::default(), store)?;
//!
//! let batch = vec![Observation::new(
//!     "kubernetes",
//!     json!([{"resourceName": "deploy/api", "owner": "team-api"}]),
//!     0.7,
//!     "2024-05-01T12:00:00Z",
//! )];
//!
//! let summary = pipeline.run_at(&batch, Utc::now()).await;
//! println!("{}", serde_json::to_string_pretty(&summary)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Presets
//!
//! ```
//! use ownergraph_pipeline::PipelineConfig;
//!
//! let config = PipelineConfig::default();
//! let config = PipelineConfig::strict();
//! let config = PipelineConfig::lenient();
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod pipeline;
mod summary;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use pipeline::{Fusion, FusionPipeline};
pub use summary::{FusionReport, FusionStatus, FusionSummary};

// Cancellation handle accepted by `FusionPipeline::execute_at`
pub use tokio_util::sync::CancellationToken;
