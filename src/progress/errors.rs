use thiserror::Error;

/// Errors that can arise while persisting progression state.
///
/// Business-rule refusals (unknown ids, insufficient points, ...) are never
/// reported here; they are [`Outcome`](crate::progress::Outcome) values.
#[derive(Debug, Error)]
pub enum ProgressError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around JSON serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapper around IO errors (directory creation, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted bytes were not valid UTF-8.
    #[error("utf-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}
