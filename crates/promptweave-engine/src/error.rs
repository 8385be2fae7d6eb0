/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for document flattening.

use thiserror::Error;

/// Errors that can occur while flattening a document.
///
/// Fatal variants carry the section name and the offending fragment so the
/// authoring mistake can be located in the source document. A failed
/// document does not invalidate the engine: the wildcard cache survives and
/// subsequent documents flatten normally.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A `choice`/`oneOf` block that cannot be resolved.
    #[error("malformed choice block in section '{section}': {message}")]
    MalformedChoiceBlock { section: String, message: String },

    /// An inline brace expression that cannot be resolved.
    #[error("malformed choice expression '{{{expr}}}' in section '{section}': {message}")]
    MalformedBraceExpression {
        section: String,
        expr: String,
        message: String,
    },

    /// Expansion kept producing new text past the pass limit.
    ///
    /// Cyclic wildcard or variable content can keep every pass distinct from
    /// the previous one; the limit turns that into an error instead of an
    /// unbounded loop.
    #[error("expansion did not converge after {passes} passes in section '{section}': '{fragment}'")]
    ExpansionDidNotConverge {
        section: String,
        fragment: String,
        passes: usize,
    },

    /// The document root is not a mapping.
    #[error("invalid document: {message}")]
    InvalidDocument { message: String },

    /// I/O error reading a wildcard resource (a missing resource is not an
    /// error; this covers the rest).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
