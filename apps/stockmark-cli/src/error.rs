//! Error types for the host harness.

use std::path::PathBuf;

use stockmark_core::ValidationError;

/// Result type alias for harness operations.
pub type CliResult<T> = Result<T, CliError>;

/// Harness errors.
///
/// Core operations cannot fail; everything here is about reading files
/// and settings.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid snapshot: {0}")]
    SnapshotParse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),
}

impl CliError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }
}
