//! Error types for schema generation

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for schema generation operations
pub type Rs2ProtoResult<T> = Result<T, Rs2ProtoError>;

/// Error type for schema generation
///
/// Only fatal conditions are represented here. Declarations that are not
/// annotated or cannot be classified are excluded from the model and never
/// surface as errors.
#[derive(Error, Debug)]
pub enum Rs2ProtoError {
    /// One or more packages failed to load (aggregated over all packages)
    #[error("error loading packages: {0}")]
    LoadFailure(String),

    /// The output artifact could not be written
    #[error("unable to write output {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No package specifiers were supplied
    #[error("usage error: {0}")]
    Usage(String),

    /// Invalid or unreadable configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error outside of output writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for Rs2ProtoError {
    fn from(err: toml::de::Error) -> Self {
        Rs2ProtoError::Config(err.to_string())
    }
}
