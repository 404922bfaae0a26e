//! Resolver error types

use thiserror::Error;

/// Errors that can occur while configuring the Resolver
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),
}
