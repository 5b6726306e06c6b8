// surtax-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use duckdb::{Config, Connection, Row};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument};

// Hexagonal imports
use crate::domain::error::DomainError;
use crate::domain::ledger::{Project, ProjectStatus};
use crate::error::SurtaxError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::ledger::LedgerReader;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerSettings {
    /// DuckDB file, relative to the project directory, or ":memory:".
    pub path: String,
    pub table: String,
    /// Recompute delay/budget flags from raw fields instead of trusting the ledger.
    pub recompute_flags: bool,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            path: "data/contracts.duckdb".to_string(),
            table: "contracts".to_string(),
            recompute_flags: false,
        }
    }
}

/// Read-only access to the `contracts` table.
pub struct DuckDbLedger {
    conn: Arc<Mutex<Connection>>,
    label: String,
    table: String,
    recompute_flags: bool,
}

fn validate_table_name(name: &str) -> Result<(), InfrastructureError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(DatabaseError::InvalidTableName(name.to_string()).into())
    }
}

/// Column layout shared by `create_schema` and `load_projects`.
fn schema_ddl(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            contract_id VARCHAR PRIMARY KEY,
            title VARCHAR,
            school_name VARCHAR,
            vendor_id VARCHAR,
            vendor_name VARCHAR,
            surtax_category VARCHAR,
            original_amount DOUBLE DEFAULT 0,
            current_amount DOUBLE DEFAULT 0,
            total_paid DOUBLE DEFAULT 0,
            percent_complete DOUBLE,
            original_end_date VARCHAR,
            current_end_date VARCHAR,
            is_deleted BOOLEAN DEFAULT FALSE,
            status VARCHAR,
            is_delayed BOOLEAN DEFAULT FALSE,
            delay_days INTEGER DEFAULT 0,
            delay_reason VARCHAR,
            is_over_budget BOOLEAN DEFAULT FALSE,
            budget_variance_amount DOUBLE DEFAULT 0,
            budget_variance_pct DOUBLE DEFAULT 0,
            change_order_count INTEGER DEFAULT 0,
            total_change_order_amount DOUBLE DEFAULT 0
        )"
    )
}

fn select_sql(table: &str) -> String {
    format!(
        "SELECT
            contract_id,
            title,
            school_name,
            vendor_id,
            vendor_name,
            surtax_category,
            COALESCE(original_amount, 0)::DOUBLE,
            COALESCE(current_amount, 0)::DOUBLE,
            COALESCE(total_paid, 0)::DOUBLE,
            percent_complete::DOUBLE,
            CAST(original_end_date AS VARCHAR),
            CAST(current_end_date AS VARCHAR),
            COALESCE(is_deleted, FALSE),
            status,
            COALESCE(is_delayed, FALSE),
            COALESCE(delay_days, 0)::BIGINT,
            delay_reason,
            COALESCE(is_over_budget, FALSE),
            COALESCE(budget_variance_amount, 0)::DOUBLE,
            COALESCE(budget_variance_pct, 0)::DOUBLE,
            COALESCE(change_order_count, 0)::BIGINT,
            COALESCE(total_change_order_amount, 0)::DOUBLE
        FROM {table}
        ORDER BY contract_id"
    )
}

/// Row as stored, before dates and counts are checked.
struct RawProject {
    project: Project,
    original_end_date: Option<String>,
    current_end_date: Option<String>,
    change_order_count: i64,
}

fn read_row(row: &Row<'_>) -> duckdb::Result<RawProject> {
    let status: Option<String> = row.get(13)?;
    Ok(RawProject {
        project: Project {
            id: row.get(0)?,
            title: row.get(1)?,
            school_name: row.get(2)?,
            vendor_id: row.get(3)?,
            vendor_name: row.get(4)?,
            category: row.get(5)?,
            original_amount: row.get(6)?,
            current_amount: row.get(7)?,
            total_paid: row.get(8)?,
            percent_complete: row.get(9)?,
            original_end_date: None,
            current_end_date: None,
            is_deleted: row.get(12)?,
            status: ProjectStatus::from(status),
            is_delayed: row.get(14)?,
            delay_days: row.get(15)?,
            delay_reason: row.get(16)?,
            is_over_budget: row.get(17)?,
            budget_variance_amount: row.get(18)?,
            budget_variance_pct: row.get(19)?,
            change_order_count: 0,
            total_change_order_amount: row.get(21)?,
        },
        original_end_date: row.get(10)?,
        current_end_date: row.get(11)?,
        change_order_count: row.get(20)?,
    })
}

fn parse_date(project_id: &str, field: &str, raw: Option<String>) -> Result<Option<NaiveDate>, DomainError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    // Timestamps are accepted; only the calendar date matters
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| DomainError::InvalidProject {
            project_id: project_id.to_string(),
            reason: format!("{} '{}' is not a date: {}", field, raw, e),
        })
}

impl RawProject {
    fn into_project(self, recompute_flags: bool) -> Result<Project, DomainError> {
        let mut project = self.project;
        project.original_end_date =
            parse_date(&project.id, "original_end_date", self.original_end_date)?;
        project.current_end_date =
            parse_date(&project.id, "current_end_date", self.current_end_date)?;
        project.change_order_count =
            u32::try_from(self.change_order_count).map_err(|_| DomainError::InvalidProject {
                project_id: project.id.clone(),
                reason: format!(
                    "change_order_count must be a non-negative count, got {}",
                    self.change_order_count
                ),
            })?;

        project.validate()?;
        Ok(if recompute_flags {
            project.with_recomputed_flags()
        } else {
            project
        })
    }
}

impl DuckDbLedger {
    pub fn open(db_path: &str, settings: &LedgerSettings) -> Result<Self, InfrastructureError> {
        validate_table_name(&settings.table)?;
        let config = Config::default();

        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            label: format!("duckdb:{}", db_path),
            table: settings.table.clone(),
            recompute_flags: settings.recompute_flags,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, InfrastructureError> {
        self.conn
            .lock()
            .map_err(|_| InfrastructureError::Database(DatabaseError::Poisoned))
    }

    /// Creates the ledger table if it does not exist yet.
    #[instrument(skip(self), fields(table = %self.table))]
    pub fn create_schema(&self) -> Result<(), InfrastructureError> {
        let conn = self.lock()?;
        conn.execute_batch(&schema_ddl(&self.table))?;
        info!("Ledger schema ready");
        Ok(())
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

#[async_trait]
impl LedgerReader for DuckDbLedger {
    #[instrument(skip(self), fields(source = %self.label))]
    async fn load_projects(&self) -> Result<Vec<Project>, SurtaxError> {
        let raw_rows = {
            let conn = self.lock()?;
            let mut stmt = conn.prepare(&select_sql(&self.table))?;
            let rows = stmt.query_map([], |row| read_row(row))?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        let projects = raw_rows
            .into_iter()
            .map(|raw| raw.into_project(self.recompute_flags))
            .collect::<Result<Vec<_>, DomainError>>()?;

        debug!(count = projects.len(), "Ledger snapshot loaded");
        Ok(projects)
    }

    fn source_name(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn ledger(settings: LedgerSettings) -> Result<DuckDbLedger> {
        let ledger = DuckDbLedger::open(":memory:", &settings)?;
        ledger.create_schema()?;
        Ok(ledger)
    }

    fn seed(ledger: &DuckDbLedger, sql: &str) -> Result<()> {
        let conn = ledger.lock()?;
        conn.execute_batch(sql)?;
        Ok(())
    }

    #[tokio::test]
    async fn test_load_projects_maps_columns() -> Result<()> {
        let ledger = ledger(LedgerSettings::default())?;
        seed(
            &ledger,
            "INSERT INTO contracts (contract_id, title, school_name, vendor_id, vendor_name,
                surtax_category, original_amount, current_amount, total_paid, percent_complete,
                original_end_date, current_end_date, status, is_delayed, delay_days, delay_reason,
                change_order_count, total_change_order_amount)
             VALUES ('C-1', 'Roof Replacement', 'Forest High', 'V9', 'Acme Co.', 'Renovation',
                100000, 120000, 50000, 40, '2025-01-01', '2025-03-02', 'active', TRUE, 60,
                'Permitting', 2, 15000);",
        )?;

        let projects = ledger.load_projects().await?;
        assert_eq!(projects.len(), 1);

        let p = &projects[0];
        assert_eq!(p.id, "C-1");
        assert_eq!(p.category.as_deref(), Some("Renovation"));
        assert_eq!(p.status, ProjectStatus::Active);
        assert_eq!(p.current_amount, 120_000.0);
        assert_eq!(p.percent_complete, Some(40.0));
        assert_eq!(p.original_end_date, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(p.delay_days, 60);
        assert_eq!(p.change_order_count, 2);
        assert_eq!(p.delay_reason.as_deref(), Some("Permitting"));
        // Flags trusted as stored
        assert!(!p.is_over_budget);
        Ok(())
    }

    #[tokio::test]
    async fn test_null_status_is_not_active() -> Result<()> {
        use crate::domain::compliance::ComplianceScorer;

        let ledger = ledger(LedgerSettings::default())?;
        seed(
            &ledger,
            "INSERT INTO contracts (contract_id, surtax_category, status, is_delayed, delay_days)
             VALUES ('A', 'Renovation', 'Active', FALSE, 0),
                    ('N', 'Renovation', NULL, TRUE, 30);",
        )?;

        let projects = ledger.load_projects().await?;
        assert_eq!(projects[1].id, "N");
        assert_eq!(projects[1].status, ProjectStatus::Unknown);

        let refs: Vec<&Project> = projects.iter().collect();
        let schedule = ComplianceScorer::default().schedule(&refs);
        assert_eq!(schedule.score, 100);
        assert_eq!(schedule.metrics[0].value, "1");
        Ok(())
    }

    #[tokio::test]
    async fn test_recompute_flags_when_configured() -> Result<()> {
        let ledger = ledger(LedgerSettings {
            recompute_flags: true,
            ..Default::default()
        })?;
        seed(
            &ledger,
            "INSERT INTO contracts (contract_id, surtax_category, original_amount, current_amount,
                original_end_date, current_end_date)
             VALUES ('C-2', 'Technology', 100000, 120000, '2025-01-01', '2025-02-15');",
        )?;

        let projects = ledger.load_projects().await?;
        let p = &projects[0];
        assert!(p.is_over_budget);
        assert!((p.budget_variance_pct - 20.0).abs() < 1e-9);
        assert!(p.is_delayed);
        assert_eq!(p.delay_days, 45);
        Ok(())
    }

    #[tokio::test]
    async fn test_negative_amount_is_rejected() -> Result<()> {
        let ledger = ledger(LedgerSettings::default())?;
        seed(
            &ledger,
            "INSERT INTO contracts (contract_id, surtax_category, current_amount)
             VALUES ('C-3', 'Renovation', -5);",
        )?;

        let result = ledger.load_projects().await;
        assert!(matches!(
            result,
            Err(SurtaxError::Domain(DomainError::InvalidProject { .. }))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_bad_date_is_rejected() -> Result<()> {
        let ledger = ledger(LedgerSettings::default())?;
        seed(
            &ledger,
            "INSERT INTO contracts (contract_id, surtax_category, current_end_date)
             VALUES ('C-4', 'Renovation', 'next spring');",
        )?;
        assert!(ledger.load_projects().await.is_err());
        Ok(())
    }

    #[test]
    fn test_table_name_must_be_identifier() {
        let settings = LedgerSettings {
            table: "contracts; DROP TABLE x".into(),
            ..Default::default()
        };
        assert!(DuckDbLedger::open(":memory:", &settings).is_err());
        assert!(validate_table_name("contracts_2025").is_ok());
        assert!(validate_table_name("2025").is_err());
    }

    #[tokio::test]
    async fn test_missing_table_is_an_error() -> Result<()> {
        let ledger = DuckDbLedger::open(":memory:", &LedgerSettings::default())?;
        assert!(ledger.load_projects().await.is_err());
        Ok(())
    }
}
