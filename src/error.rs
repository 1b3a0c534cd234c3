//! Error types for the shield-text crate.

/// Comparison error types.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// The algorithm selector is not one of `levenshtein`, `rabin-karp`, `kmp`.
    #[error("invalid algorithm: {tag}")]
    InvalidAlgorithm { tag: String },

    /// A comparison setting is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for shield-text operations.
pub type CompareResult<T> = Result<T, CompareError>;
