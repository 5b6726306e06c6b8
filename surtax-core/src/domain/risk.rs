// surtax-core/src/domain/risk.rs
//
// Per-project risk classification from the two ledger flags.
// Same scoping rule as the engines: deleted and uncategorized projects are ignored.

use std::fmt;

use serde::Serialize;

use crate::domain::ledger::Project;

/// Budget variance (percent) above which an unflagged project still warrants watching.
const WATCH_VARIANCE_PCT: f64 = 5.0;

// Declaration order is the display priority: Critical sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Critical when both delayed and over budget, High when either flag is set,
/// Medium for early warning signs below the flags, Low otherwise.
pub fn classify_risk(project: &Project) -> RiskLevel {
    match (project.is_delayed, project.is_over_budget) {
        (true, true) => RiskLevel::Critical,
        (true, false) | (false, true) => RiskLevel::High,
        _ if project.delay_days > 0 || project.budget_variance_pct > WATCH_VARIANCE_PCT => {
            RiskLevel::Medium
        }
        _ => RiskLevel::Low,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRisk {
    pub level: RiskLevel,
    pub project_id: String,
    pub title: String,
    pub school_name: Option<String>,
    pub vendor_name: Option<String>,
    pub status: String,
    pub current_amount: f64,
    pub percent_complete: f64,
    pub delay_days: i64,
    pub budget_variance_pct: f64,
}

impl ProjectRisk {
    fn from_project(project: &Project) -> Self {
        Self {
            level: classify_risk(project),
            project_id: project.id.clone(),
            title: project.display_title().to_string(),
            school_name: project.school_name.clone(),
            vendor_name: project.vendor_name.clone(),
            status: project.status.as_str().to_string(),
            current_amount: project.current_amount,
            percent_complete: project.completion(),
            delay_days: project.delay_days,
            budget_variance_pct: project.budget_variance_pct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct RiskSummary {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskSummary {
    fn count(&mut self, level: RiskLevel) {
        self.total += 1;
        match level {
            RiskLevel::Critical => self.critical += 1,
            RiskLevel::High => self.high += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::Low => self.low += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct RiskAssessment {
    pub summary: RiskSummary,
    /// Highest level first, then longest delay; ties keep ledger order.
    pub projects: Vec<ProjectRisk>,
}

impl RiskAssessment {
    pub fn compute(projects: &[Project]) -> Self {
        let mut ranked: Vec<ProjectRisk> = projects
            .iter()
            .filter(|p| p.is_in_scope())
            .map(ProjectRisk::from_project)
            .collect();
        ranked.sort_by(|a, b| a.level.cmp(&b.level).then(b.delay_days.cmp(&a.delay_days)));

        let mut summary = RiskSummary::default();
        for p in &ranked {
            summary.count(p.level);
        }
        Self {
            summary,
            projects: ranked,
        }
    }
}
