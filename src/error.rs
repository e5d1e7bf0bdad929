//! Error types for the layout engine.
//!
//! Layout analysis itself never fails: empty or degenerate input produces an
//! empty result. Errors only surface at the edges of the crate, when a
//! configuration is rejected, when a page is built from malformed fragments,
//! or when a result cannot be (de)serialized.

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around layout analysis.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration value is out of range
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfig {
        /// Name of the offending configuration field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// A fragment cannot take part in layout analysis
    #[error("Invalid fragment at index {index}: {reason}")]
    InvalidFragment {
        /// Position of the fragment in the page's input list
        index: usize,
        /// Why the fragment was rejected
        reason: String,
    },

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
