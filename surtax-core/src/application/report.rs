// surtax-core/src/application/report.rs
//
// Read models assembled for the annual report and the committee meeting.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::domain::compliance::ComplianceReport;
use crate::domain::concerns::{Concern, Severity};
use crate::domain::ledger::{Project, ProjectStatus};
use crate::domain::overview::{
    BudgetChange, BudgetChangeSummary, CategorySpending, ChangeOrderSummary, OverviewStats,
    StatusBreakdown, VendorPerformance, top_projects_by_budget,
};
use crate::domain::risk::{RiskAssessment, RiskSummary};

const TOP_PROJECTS: usize = 10;
const RECENTLY_COMPLETED: usize = 10;

/// The slice of a project printed in report tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub id: String,
    pub title: String,
    pub school_name: Option<String>,
    pub category: Option<String>,
    pub current_amount: f64,
    pub total_paid: f64,
    pub percent_complete: f64,
    pub status: String,
    pub is_delayed: bool,
    pub is_over_budget: bool,
}

impl From<&Project> for ProjectSummary {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id.clone(),
            title: p.display_title().to_string(),
            school_name: p.school_name.clone(),
            category: p.category.clone(),
            current_amount: p.current_amount,
            total_paid: p.total_paid,
            percent_complete: p.completion(),
            status: p.status.to_string(),
            is_delayed: p.is_delayed,
            is_over_budget: p.is_over_budget,
        }
    }
}

/// Dashboard figures taken from one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ProgramOverview {
    pub stats: OverviewStats,
    pub category_spending: Vec<CategorySpending>,
    pub status_breakdown: Vec<StatusBreakdown>,
    pub change_orders: ChangeOrderSummary,
}

impl ProgramOverview {
    pub fn build(projects: &[Project]) -> Self {
        Self {
            stats: OverviewStats::compute(projects),
            category_spending: CategorySpending::compute(projects),
            status_breakdown: StatusBreakdown::compute(projects),
            change_orders: ChangeOrderSummary::compute(projects),
        }
    }
}

/// Vendor track records and the contracts whose budgets moved since award.
#[derive(Debug, Clone, Serialize)]
pub struct VendorReport {
    pub vendors: Vec<VendorPerformance>,
    pub budget_change_summary: BudgetChangeSummary,
    pub budget_changes: Vec<BudgetChange>,
}

impl VendorReport {
    pub fn build(projects: &[Project]) -> Self {
        let budget_changes = BudgetChange::compute(projects);
        Self {
            vendors: VendorPerformance::compute(projects),
            budget_change_summary: BudgetChangeSummary::compute(&budget_changes),
            budget_changes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnualReport {
    pub generated_at: DateTime<Utc>,
    pub program_name: String,
    pub fiscal_year: String,
    pub overview: OverviewStats,
    pub category_spending: Vec<CategorySpending>,
    pub status_breakdown: Vec<StatusBreakdown>,
    pub change_orders: ChangeOrderSummary,
    pub risk: RiskSummary,
    pub vendors: Vec<VendorPerformance>,
    pub top_projects: Vec<ProjectSummary>,
    pub recently_completed: Vec<ProjectSummary>,
    pub concerns: Vec<Concern>,
    pub compliance: ComplianceReport,
}

impl AnnualReport {
    pub fn default_fiscal_year(now: DateTime<Utc>) -> String {
        format!("FY {}", now.year())
    }

    pub fn build(
        program_name: &str,
        fiscal_year: String,
        projects: &[Project],
        concerns: Vec<Concern>,
        compliance: ComplianceReport,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            generated_at,
            program_name: program_name.to_string(),
            fiscal_year,
            overview: OverviewStats::compute(projects),
            category_spending: CategorySpending::compute(projects),
            status_breakdown: StatusBreakdown::compute(projects),
            change_orders: ChangeOrderSummary::compute(projects),
            risk: RiskAssessment::compute(projects).summary,
            vendors: VendorPerformance::compute(projects),
            top_projects: top_projects_by_budget(projects, TOP_PROJECTS)
                .into_iter()
                .map(ProjectSummary::from)
                .collect(),
            recently_completed: recently_completed(projects, RECENTLY_COMPLETED),
            concerns,
            compliance,
        }
    }

    pub fn high_priority(&self) -> impl Iterator<Item = &Concern> {
        self.concerns.iter().filter(|c| c.severity == Severity::High)
    }
}

/// Completed in-scope projects, latest finish first. Undated ones go last.
fn recently_completed(projects: &[Project], limit: usize) -> Vec<ProjectSummary> {
    let mut done: Vec<&Project> = projects
        .iter()
        .filter(|p| p.is_in_scope() && p.status == ProjectStatus::Completed)
        .collect();
    done.sort_by(|a, b| b.current_end_date.cmp(&a.current_end_date));
    done.into_iter().take(limit).map(ProjectSummary::from).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgendaKind {
    Standard,
    Concern,
    Discussion,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgendaItem {
    pub title: String,
    pub duration_minutes: u32,
    pub kind: AgendaKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub concerns: Vec<Concern>,
}

impl AgendaItem {
    fn standard(title: &str, duration_minutes: u32, kind: AgendaKind) -> Self {
        Self {
            title: title.to_string(),
            duration_minutes,
            kind,
            concerns: Vec::new(),
        }
    }
}

/// Suggested running order for a committee meeting.
#[derive(Debug, Clone, Serialize)]
pub struct MeetingAgenda {
    pub overview: OverviewStats,
    pub items: Vec<AgendaItem>,
}

impl MeetingAgenda {
    pub fn build(projects: &[Project], concerns: &[Concern]) -> Self {
        let mut items = vec![AgendaItem::standard(
            "Program Overview & Financial Summary",
            10,
            AgendaKind::Standard,
        )];

        let by_severity = |severity: Severity| -> Vec<Concern> {
            concerns
                .iter()
                .filter(|c| c.severity == severity)
                .cloned()
                .collect()
        };

        let high = by_severity(Severity::High);
        if !high.is_empty() {
            items.push(AgendaItem {
                title: format!("High Priority Concerns ({} items)", high.len()),
                duration_minutes: 15,
                kind: AgendaKind::Concern,
                concerns: high,
            });
        }

        let medium = by_severity(Severity::Medium);
        if !medium.is_empty() {
            items.push(AgendaItem {
                title: format!("Items to Monitor ({} items)", medium.len()),
                duration_minutes: 10,
                kind: AgendaKind::Concern,
                concerns: medium,
            });
        }

        items.push(AgendaItem::standard(
            "Spending by Category Review",
            10,
            AgendaKind::Standard,
        ));
        items.push(AgendaItem::standard(
            "Discussion & Action Items",
            15,
            AgendaKind::Discussion,
        ));

        Self {
            overview: OverviewStats::compute(projects),
            items,
        }
    }

    pub fn total_minutes(&self) -> u32 {
        self.items.iter().map(|i| i.duration_minutes).sum()
    }
}
