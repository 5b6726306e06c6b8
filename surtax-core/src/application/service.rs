// surtax-core/src/application/service.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use crate::domain::compliance::{ComplianceConfig, ComplianceReport, ComplianceScorer};
use crate::domain::concerns::{Concern, ConcernDetector, ConcernFilter, ConcernThresholds};
use crate::domain::error::DomainError;
use crate::domain::ledger::Project;
use crate::domain::risk::RiskAssessment;
use crate::error::SurtaxError;
use crate::infrastructure::config::ProjectConfig;
use crate::ports::ledger::LedgerReader;

use super::report::{AnnualReport, MeetingAgenda, ProgramOverview, VendorReport};

/// Everything the engines need that is not in the ledger.
#[derive(Debug, Clone, Default)]
pub struct OversightConfig {
    pub program_name: String,
    pub fiscal_year: Option<String>,
    pub thresholds: ConcernThresholds,
    pub compliance: ComplianceConfig,
}

impl From<&ProjectConfig> for OversightConfig {
    fn from(config: &ProjectConfig) -> Self {
        Self {
            program_name: config.name.clone(),
            fiscal_year: config.fiscal_year.clone(),
            thresholds: config.concerns.clone(),
            compliance: config.compliance.clone(),
        }
    }
}

/// One project with the concerns raised against it.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    pub project: Project,
    pub concerns: Vec<Concern>,
}

/// Read-only use cases over a ledger. Every call takes a fresh snapshot.
pub struct OversightService<'a> {
    ledger: &'a dyn LedgerReader,
    config: OversightConfig,
    detector: ConcernDetector,
    scorer: ComplianceScorer,
}

impl<'a> OversightService<'a> {
    pub fn new(ledger: &'a dyn LedgerReader, config: OversightConfig) -> Self {
        let detector = ConcernDetector::new(&config.thresholds);
        let scorer = ComplianceScorer::new(config.compliance.clone());
        Self {
            ledger,
            config,
            detector,
            scorer,
        }
    }

    pub fn config(&self) -> &OversightConfig {
        &self.config
    }

    async fn snapshot(&self) -> Result<Vec<Project>, SurtaxError> {
        let projects = self.ledger.load_projects().await?;
        info!(
            source = %self.ledger.source_name(),
            count = projects.len(),
            "Ledger snapshot taken"
        );
        Ok(projects)
    }

    #[instrument(skip(self, filter))]
    pub async fn concerns(&self, filter: &ConcernFilter) -> Result<Vec<Concern>, SurtaxError> {
        let projects = self.snapshot().await?;
        let concerns = self.detector.detect(&projects);
        Ok(filter.apply(concerns))
    }

    #[instrument(skip(self))]
    pub async fn compliance(&self, now: DateTime<Utc>) -> Result<ComplianceReport, SurtaxError> {
        let projects = self.snapshot().await?;
        Ok(self.scorer.score(&projects, now))
    }

    #[instrument(skip(self))]
    pub async fn overview(&self) -> Result<ProgramOverview, SurtaxError> {
        let projects = self.snapshot().await?;
        Ok(ProgramOverview::build(&projects))
    }

    #[instrument(skip(self))]
    pub async fn risk(&self) -> Result<RiskAssessment, SurtaxError> {
        let projects = self.snapshot().await?;
        Ok(RiskAssessment::compute(&projects))
    }

    #[instrument(skip(self))]
    pub async fn vendors(&self) -> Result<VendorReport, SurtaxError> {
        let projects = self.snapshot().await?;
        Ok(VendorReport::build(&projects))
    }

    /// Looks the id up in the whole snapshot, deleted rows included.
    #[instrument(skip(self))]
    pub async fn project_detail(&self, id: &str) -> Result<ProjectDetail, SurtaxError> {
        let projects = self.snapshot().await?;
        let project = projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| DomainError::ProjectNotFound(id.to_string()))?;

        let concerns = ConcernFilter::watching([id]).apply(self.detector.detect(&projects));
        Ok(ProjectDetail { project, concerns })
    }

    /// Builds every section from a single snapshot so the figures agree with each other.
    #[instrument(skip(self))]
    pub async fn annual_report(
        &self,
        fiscal_year: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<AnnualReport, SurtaxError> {
        let projects = self.snapshot().await?;
        let fiscal_year = fiscal_year
            .map(str::to_string)
            .or_else(|| self.config.fiscal_year.clone())
            .unwrap_or_else(|| AnnualReport::default_fiscal_year(now));

        Ok(AnnualReport::build(
            &self.config.program_name,
            fiscal_year,
            &projects,
            self.detector.detect(&projects),
            self.scorer.score(&projects, now),
            now,
        ))
    }

    #[instrument(skip(self))]
    pub async fn meeting_agenda(&self) -> Result<MeetingAgenda, SurtaxError> {
        let projects = self.snapshot().await?;
        let concerns = self.detector.detect(&projects);
        Ok(MeetingAgenda::build(&projects, &concerns))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::concerns::{ConcernType, Severity};
    use crate::domain::ledger::fixtures::{delayed, over_budget, project, with_vendor};
    use crate::infrastructure::adapters::InMemoryLedger;
    use anyhow::Result;
    use chrono::TimeZone;

    fn ledger() -> InMemoryLedger {
        InMemoryLedger::new(vec![
            project("ok"),
            delayed("late", 120),
            over_budget("over", 8.0),
            with_vendor("v1", "Acme Builders", 2),
            with_vendor("v2", "Acme Builders", 2),
        ])
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 30, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_concerns_are_sorted_and_filtered() -> Result<()> {
        let ledger = ledger();
        let service = OversightService::new(&ledger, OversightConfig::default());

        let all = service.concerns(&ConcernFilter::default()).await?;
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].severity, Severity::High);
        assert_eq!(all[0].project_id.as_deref(), Some("late"));

        let vendors = service
            .concerns(&ConcernFilter {
                concern_type: Some(ConcernType::VendorPattern),
                ..Default::default()
            })
            .await?;
        assert_eq!(vendors.len(), 1);
        assert_eq!(vendors[0].title, "Vendor: Acme Builders");
        Ok(())
    }

    #[tokio::test]
    async fn test_thresholds_flow_into_detector() -> Result<()> {
        let ledger = ledger();
        let config = OversightConfig {
            thresholds: ConcernThresholds {
                delay_high_days: 200,
                ..Default::default()
            },
            ..Default::default()
        };
        let service = OversightService::new(&ledger, config);

        let concerns = service.concerns(&ConcernFilter::default()).await?;
        assert!(concerns.iter().all(|c| c.severity == Severity::Medium));
        Ok(())
    }

    #[tokio::test]
    async fn test_project_detail() -> Result<()> {
        let ledger = ledger();
        let service = OversightService::new(&ledger, OversightConfig::default());

        let detail = service.project_detail("late").await?;
        assert_eq!(detail.project.id, "late");
        assert_eq!(detail.concerns.len(), 1);
        assert_eq!(detail.concerns[0].concern_type, ConcernType::ScheduleDelay);

        let missing = service.project_detail("nope").await;
        assert!(matches!(
            missing,
            Err(SurtaxError::Domain(DomainError::ProjectNotFound(_)))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_annual_report_fiscal_year_precedence() -> Result<()> {
        let ledger = ledger();
        let config = OversightConfig {
            program_name: "Marion County".into(),
            fiscal_year: Some("FY 2024-25".into()),
            ..Default::default()
        };
        let service = OversightService::new(&ledger, config);

        let from_config = service.annual_report(None, now()).await?;
        assert_eq!(from_config.fiscal_year, "FY 2024-25");
        assert_eq!(from_config.program_name, "Marion County");

        let explicit = service.annual_report(Some("FY 2026"), now()).await?;
        assert_eq!(explicit.fiscal_year, "FY 2026");
        assert_eq!(explicit.overview.total_projects, 5);
        assert_eq!(explicit.concerns.len(), 3);
        assert_eq!(explicit.compliance.categories.len(), 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_risk_and_vendor_views() -> Result<()> {
        let ledger = ledger();
        let service = OversightService::new(&ledger, OversightConfig::default());

        let risk = service.risk().await?;
        assert_eq!(risk.summary.total, 5);
        assert_eq!(risk.summary.high, 2);
        assert_eq!(risk.projects[0].project_id, "late");

        let vendors = service.vendors().await?;
        assert_eq!(vendors.vendors.len(), 1);
        assert_eq!(vendors.vendors[0].project_count, 2);
        assert_eq!(vendors.budget_changes.len(), 1);
        assert_eq!(vendors.budget_changes[0].project_id, "over");
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_ledger_propagates() {
        let bad = Project {
            id: "bad".into(),
            current_amount: f64::NAN,
            ..Default::default()
        };
        let ledger = InMemoryLedger::new(vec![bad]);
        let service = OversightService::new(&ledger, OversightConfig::default());
        assert!(service.overview().await.is_err());
    }
}
