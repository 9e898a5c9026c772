use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    RfcError(#[from] cadence_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] cadence_core::error::CoreError),

    #[error("Store error: {0}")]
    StoreError(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
