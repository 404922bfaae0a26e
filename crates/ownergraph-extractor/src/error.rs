//! Error types for the Extractor
//!
//! Extraction itself never fails. `ExtractorError` only covers
//! configuration; per-entry decode problems are `EntryError`s, which are
//! counted and logged, then dropped.

use thiserror::Error;

/// Errors that can occur while configuring the Extractor
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),
}

/// Why a single payload entry was skipped
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntryError {
    /// The payload was neither a list nor a single entry object
    #[error("payload is not a list of entries")]
    UnsupportedShape,

    /// The entry is not a JSON object
    #[error("entry {index} is not an object")]
    NotAnObject {
        /// Position in the payload
        index: usize,
    },

    /// A required field is absent or null
    #[error("entry {index} is missing '{field}'")]
    MissingField {
        /// Position in the payload
        index: usize,
        /// Field name
        field: &'static str,
    },

    /// A field has the wrong JSON type
    #[error("entry {index} has '{field}' of the wrong type (expected {expected})")]
    WrongType {
        /// Position in the payload
        index: usize,
        /// Field name
        field: &'static str,
        /// Expected JSON type
        expected: &'static str,
    },

    /// A required string field is empty after trimming
    #[error("entry {index} has an empty '{field}'")]
    EmptyField {
        /// Position in the payload
        index: usize,
        /// Field name
        field: &'static str,
    },

    /// The tag map has no usable owner tag
    #[error("entry {index} has no non-empty '{key}' tag")]
    MissingOwnerTag {
        /// Position in the payload
        index: usize,
        /// Configured owner tag key
        key: String,
    },

    /// One owner in an owner list is unusable
    #[error("entry {index} owner #{position} is not a non-empty string")]
    InvalidOwner {
        /// Position in the payload
        index: usize,
        /// Position within the owner list
        position: usize,
    },
}
