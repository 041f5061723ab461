//! Lead import errors.

use tenura_shared::AppError;
use tenura_shared::types::ImportBatchId;
use thiserror::Error;

/// Errors raised by the import lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// Batch has no rows.
    #[error("Import batch has no rows")]
    EmptyBatch,

    /// Batch was already committed.
    #[error("Import batch {0} is already committed")]
    AlreadyCommitted(ImportBatchId),

    /// Batch must be validated before commit.
    #[error("Import batch {0} must be validated before commit")]
    NotValidated(ImportBatchId),
}

impl ImportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyBatch => "EMPTY_BATCH",
            Self::AlreadyCommitted(_) => "ALREADY_COMMITTED",
            Self::NotValidated(_) => "NOT_VALIDATED",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::EmptyBatch => 400,
            Self::AlreadyCommitted(_) | Self::NotValidated(_) => 409,
        }
    }
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        Self::from_status(err.http_status_code(), err.to_string())
    }
}
