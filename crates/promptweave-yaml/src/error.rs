//! Error types for the YAML bridge.

use thiserror::Error;

/// Result type alias for promptweave-yaml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing YAML input.
#[derive(Debug, Error)]
pub enum Error {
    /// YAML syntax error from the underlying parser.
    #[error("YAML syntax error: {0}")]
    Scan(#[from] yaml_rust2::ScanError),
}
