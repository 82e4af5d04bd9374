//! Error types for JSON decoding and encoding.

use thiserror::Error;

/// Errors that can occur while decoding or encoding a [`Json`](crate::Json) tree.
#[derive(Error, Debug)]
pub enum JsonError {
    /// The tokenizer rejected the input, or a string/byte sink failed while encoding.
    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The top-level source matched none of the probes (e.g. a bare `null`).
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Containers were nested deeper than `DecodeOptions::max_depth`.
    #[error("Nesting depth exceeds limit of {limit}")]
    DepthLimitExceeded { limit: usize },
}

/// Convenience alias used throughout json-lookup.
pub type Result<T> = std::result::Result<T, JsonError>;
