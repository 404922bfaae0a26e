//! Scorer error types

use thiserror::Error;

/// Errors that can occur while configuring the Scorer
///
/// Scoring itself is total; only a bad `ConfidenceEngine` is rejected.
#[derive(Error, Debug)]
pub enum ScoringError {
    /// A weight, bonus or rate is out of range
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),
}
