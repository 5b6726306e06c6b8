// surtax-core/src/ports/ledger.rs

// What the engine needs from storage, without knowing how it is stored.
// Each call returns one read-consistent snapshot; the engine never writes back.

use crate::domain::ledger::Project;
use crate::error::SurtaxError;
use async_trait::async_trait;

#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// Every project in the ledger, including deleted and uncategorized rows.
    /// Implementations must reject records that fail `Project::validate`.
    async fn load_projects(&self) -> Result<Vec<Project>, SurtaxError>;

    /// Short label for logs ("duckdb:data/contracts.duckdb", "memory", ...).
    fn source_name(&self) -> &str;
}
