// surtax-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Invalid project '{project_id}': {reason}")]
    #[diagnostic(
        code(surtax::domain::invalid_project),
        help("The ledger must be fixed at the source; the engine never repairs records.")
    )]
    InvalidProject { project_id: String, reason: String },

    #[error("Project '{0}' not found in ledger")]
    #[diagnostic(code(surtax::domain::project_not_found))]
    ProjectNotFound(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(surtax::domain::configuration))]
    InvalidConfiguration(String),
}
