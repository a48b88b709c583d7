//! Error types for the offline layout driver.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for offline layout runs.
///
/// The "requested iterations already satisfied" condition is deliberately
/// not represented here: it is a normal outcome reported through
/// [`RunOutcome`](crate::driver::RunOutcome), not a failure.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] super::ConfigError),

    /// A resume pointed at a snapshot that is no longer on disk. The name
    /// comes from the store's own directory scan, so this only happens when
    /// something external deletes the file between scan and read.
    #[error("Checkpoint not found: {}", path.display())]
    CheckpointNotFound { path: PathBuf },

    /// Snapshot byte length does not match `node_count * record_width`.
    /// Usually the run was configured with a different dimensionality or a
    /// different graph than the checkpoint was produced with.
    #[error("Snapshot size mismatch: expected {expected} bytes, found {actual}")]
    FormatMismatch { expected: usize, actual: usize },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl LayoutError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type alias for offline layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;
