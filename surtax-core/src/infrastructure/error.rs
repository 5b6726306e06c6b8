// surtax-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(surtax::infra::database::duckdb),
        help("An error occurred while reading the project ledger.")
    )]
    DuckDB(#[from] duckdb::Error),

    #[error("Ledger connection lock poisoned")]
    #[diagnostic(code(surtax::infra::database::poisoned))]
    Poisoned,

    #[error("Invalid ledger table name '{0}'")]
    #[diagnostic(
        code(surtax::infra::database::table_name),
        help("Table names may only contain letters, digits and underscores.")
    )]
    InvalidTableName(String),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Abstracted) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(surtax::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(surtax::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON Serialization Error: {0}")]
    #[diagnostic(code(surtax::infra::json))]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(surtax::infra::config))]
    ConfigError(String),

    #[error("Project configuration not found at '{0}'")]
    #[diagnostic(code(surtax::infra::config_missing))]
    ConfigNotFound(String),

    #[error("Invalid configuration values: {0}")]
    #[diagnostic(
        code(surtax::infra::config_invalid),
        help("Thresholds must be non-negative and at least one approved category is required.")
    )]
    Validation(#[from] validator::ValidationErrors),

    // --- TEMPLATING ---
    #[error("Template Rendering Error: {0}")]
    #[diagnostic(
        code(surtax::infra::template),
        help("Check the Jinja syntax ({{ ... }}) of the report template.")
    )]
    TemplateError(#[from] minijinja::Error),
}

// Shortcut so `?` works directly on duckdb calls
impl From<duckdb::Error> for InfrastructureError {
    fn from(err: duckdb::Error) -> Self {
        InfrastructureError::Database(DatabaseError::DuckDB(err))
    }
}
