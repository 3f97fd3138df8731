//! Error types for compliance grading.

use thiserror::Error;

/// Errors raised at the input boundary, before an engine run starts.
///
/// This is the only fatal error surface: once a [`crate::RepositoryRef`]
/// has been parsed, a run always produces a complete report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Empty or whitespace-only repository reference.
    #[error("repository reference is empty")]
    Empty,

    /// URL input pointing at a host other than github.com.
    #[error("unsupported host: {0} (only github.com is supported)")]
    UnsupportedHost(String),

    /// Reference that does not resolve to an `owner/name` pair.
    #[error("malformed repository reference: {0}")]
    MalformedReference(String),
}

/// Result type for input-boundary operations.
pub type Result<T> = std::result::Result<T, InputError>;
