/// Error types for splat-rotations
///
/// Only the I/O collaborators (upstream fetch, cache file, config) can
/// fail. Parsing and searching are total functions and never use these.

use thiserror::Error;

/// Main error type for splat-rotations operations
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// HTTP request to the schedule API failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O errors (cache file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Upstream returned something unusable
    #[error("Upstream fetch failed: {0}")]
    Fetch(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for splat-rotations operations
pub type Result<T> = std::result::Result<T, ScheduleError>;
