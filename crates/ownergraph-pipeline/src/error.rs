//! Error types for pipeline operations
//!
//! None of these cross the invocation boundary: a run turns them into an
//! error-status `FusionSummary`. They surface directly only from
//! construction and configuration loading.

use ownergraph_extractor::ExtractorError;
use ownergraph_resolver::ResolverError;
use ownergraph_scorer::ScoringError;
use thiserror::Error;

/// Errors that can occur during pipeline operations
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The graph store rejected the resolved edges
    #[error("Persistence failed: {0}")]
    Persistence(String),

    /// The graph store did not answer within the deadline
    #[error("Persistence timed out after {0}s")]
    Timeout(u64),

    /// The caller cancelled the run before persistence finished
    #[error("Persistence cancelled")]
    Cancelled,

    /// The blocking persistence worker panicked or was aborted
    #[error("Worker error: {0}")]
    Worker(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ExtractorError> for PipelineError {
    fn from(e: ExtractorError) -> Self {
        PipelineError::Config(format!("extractor: {}", e))
    }
}

impl From<ScoringError> for PipelineError {
    fn from(e: ScoringError) -> Self {
        PipelineError::Config(format!("scoring: {}", e))
    }
}

impl From<ResolverError> for PipelineError {
    fn from(e: ResolverError) -> Self {
        PipelineError::Config(format!("conflict: {}", e))
    }
}
