// surtax-core/src/infrastructure/adapters/memory.rs

use async_trait::async_trait;

use crate::domain::ledger::Project;
use crate::error::SurtaxError;
use crate::ports::ledger::LedgerReader;

/// A ledger over a snapshot the caller already holds.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    projects: Vec<Project>,
}

impl InMemoryLedger {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }
}

#[async_trait]
impl LedgerReader for InMemoryLedger {
    async fn load_projects(&self) -> Result<Vec<Project>, SurtaxError> {
        for project in &self.projects {
            project.validate()?;
        }
        Ok(self.projects.clone())
    }

    fn source_name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[tokio::test]
    async fn test_returns_snapshot_including_deleted_rows() -> Result<()> {
        let deleted = Project {
            id: "gone".into(),
            is_deleted: true,
            ..Default::default()
        };
        let ledger = InMemoryLedger::new(vec![deleted]);
        assert_eq!(ledger.load_projects().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_project_fails_the_load() {
        let bad = Project {
            id: "bad".into(),
            original_amount: -10.0,
            ..Default::default()
        };
        let ledger = InMemoryLedger::new(vec![bad]);
        assert!(ledger.load_projects().await.is_err());
    }
}
