use std::path::PathBuf;

use thiserror::Error;

/// Application-level errors (CLI layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] cadence_service::error::ServiceError),

    #[error(transparent)]
    RfcError(#[from] cadence_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] cadence_core::error::CoreError),

    #[error("Failed to read {}: {source}", .path.display())]
    InputRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid schedule input in {}: {source}", .path.display())]
    InputParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to render output: {0}")]
    OutputError(#[from] serde_json::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
