use thiserror::Error;

use crate::ingestion::IngestionSeverity;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Error type returned by ingestion, configuration, and handler functions.
///
/// Only hard failures end up here. Row-length mismatches and columns without numeric data are
/// absorbed into the data itself (null padding, zero-valued statistics) and never surface as errors.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// The backing source could not be read (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader failed (invalid UTF-8, or an I/O failure mid-read).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A configuration document was invalid JSON or did not match the expected shape.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration is structurally valid but unusable.
    #[error("invalid config: {message}")]
    Config { message: String },
}

impl IngestionError {
    /// Classify the error for observers and alert thresholds.
    ///
    /// I/O failures (including CSV errors that wrap one) are [`IngestionSeverity::Critical`];
    /// everything else is [`IngestionSeverity::Error`].
    pub fn severity(&self) -> IngestionSeverity {
        match self {
            IngestionError::Io(_) => IngestionSeverity::Critical,
            IngestionError::Csv(err) => match err.kind() {
                ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
                _ => IngestionSeverity::Error,
            },
            IngestionError::Json(_) | IngestionError::Config { .. } => IngestionSeverity::Error,
        }
    }

    /// Whether this error means the source itself was unavailable.
    pub fn is_source_unavailable(&self) -> bool {
        self.severity() == IngestionSeverity::Critical
    }
}
