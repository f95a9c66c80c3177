//! Error types for spacescan

use thiserror::Error;

/// Main error type for spacescan operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed annotation '{key}': {reason}")]
    MalformedAnnotation { key: String, reason: String },

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Resource disposal failed: {0}")]
    ResourceDisposal(String),

    #[error("No catalog entry for '{0}'")]
    MissingTarget(String),

    #[error("Invalid annotation set: {0}")]
    InvalidAnnotationSet(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for a malformed annotation record
    pub fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedAnnotation {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error only affects a single annotation record.
    ///
    /// Per-object failures are collected and reported; they never abort a load.
    pub fn is_per_object(&self) -> bool {
        matches!(
            self,
            Error::MalformedAnnotation { .. } | Error::DegenerateGeometry(_)
        )
    }
}

/// Result type alias for spacescan operations
pub type Result<T> = std::result::Result<T, Error>;
