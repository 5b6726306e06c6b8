// surtax-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurtaxError {
    // --- DOMAIN ERRORS (ledger preconditions, configuration) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, Parsing, Database) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- GENERIC / APPLICATION ERRORS ---
    #[error("Internal Error: {0}")]
    InternalError(String),
}

// Manual implementation to avoid a duplicate enum variant but keep ergonomics
impl From<std::io::Error> for SurtaxError {
    fn from(err: std::io::Error) -> Self {
        SurtaxError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<duckdb::Error> for SurtaxError {
    fn from(err: duckdb::Error) -> Self {
        SurtaxError::Infrastructure(InfrastructureError::from(err))
    }
}
