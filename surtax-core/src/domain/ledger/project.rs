// surtax-core/src/domain/ledger/project.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::status::ProjectStatus;
use crate::domain::error::DomainError;

/// A capital project ("contract") as read from the ledger.
///
/// The derived flags (`is_delayed`, `is_over_budget`, variances) are normally
/// pre-computed by the ledger. [`DerivedFlags::compute`] reproduces them when
/// they cannot be trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Project {
    pub id: String,
    pub title: Option<String>,
    pub school_name: Option<String>,
    pub vendor_id: Option<String>,
    pub vendor_name: Option<String>,
    /// Surtax category. Projects without one are outside every analysis.
    pub category: Option<String>,

    pub original_amount: f64,
    pub current_amount: f64,
    pub total_paid: f64,
    pub percent_complete: Option<f64>,

    pub original_end_date: Option<NaiveDate>,
    pub current_end_date: Option<NaiveDate>,

    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub status: ProjectStatus,

    // --- Pre-computed by the ledger ---
    #[serde(default)]
    pub is_delayed: bool,
    #[serde(default)]
    pub delay_days: i64,
    pub delay_reason: Option<String>,
    #[serde(default)]
    pub is_over_budget: bool,
    #[serde(default)]
    pub budget_variance_amount: f64,
    #[serde(default)]
    pub budget_variance_pct: f64,
    #[serde(default)]
    pub change_order_count: u32,
    #[serde(default)]
    pub total_change_order_amount: f64,
}

impl Project {
    /// Only non-deleted, categorized projects take part in detection and scoring.
    pub fn is_in_scope(&self) -> bool {
        !self.is_deleted && self.category.is_some()
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled project")
    }

    pub fn completion(&self) -> f64 {
        self.percent_complete.unwrap_or(0.0)
    }

    /// Returns a copy whose derived flags are recomputed from the raw fields.
    pub fn with_recomputed_flags(mut self) -> Self {
        DerivedFlags::compute(&self).apply_to(&mut self);
        self
    }

    /// Ledger precondition check. Detection and scoring assume it holds and never
    /// repair a record; readers call this before handing projects to the engine.
    pub fn validate(&self) -> Result<(), DomainError> {
        let amounts = [
            ("original_amount", self.original_amount),
            ("current_amount", self.current_amount),
            ("total_paid", self.total_paid),
            ("total_change_order_amount", self.total_change_order_amount),
        ];
        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(self.invalid(format!(
                    "{} must be a non-negative amount, got {}",
                    field, value
                )));
            }
        }

        if let Some(pct) = self.percent_complete {
            if !(0.0..=100.0).contains(&pct) {
                return Err(self.invalid(format!(
                    "percent_complete must be within 0-100, got {}",
                    pct
                )));
            }
        }

        if self.id.trim().is_empty() {
            return Err(self.invalid("identifier is empty".to_string()));
        }

        Ok(())
    }

    fn invalid(&self, reason: String) -> DomainError {
        DomainError::InvalidProject {
            project_id: self.id.clone(),
            reason,
        }
    }
}

/// Schedule and budget flags derived from the raw ledger fields.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DerivedFlags {
    pub is_delayed: bool,
    pub delay_days: i64,
    pub is_over_budget: bool,
    pub budget_variance_amount: f64,
    pub budget_variance_pct: f64,
}

impl DerivedFlags {
    pub fn compute(project: &Project) -> Self {
        let delay_days = match (project.original_end_date, project.current_end_date) {
            (Some(original), Some(current)) if current > original => {
                (current - original).num_days()
            }
            _ => 0,
        };

        // A zero original budget has nothing to be "over"
        let (is_over_budget, variance_amount, variance_pct) = if project.original_amount > 0.0 {
            let amount = project.current_amount - project.original_amount;
            (
                project.current_amount > project.original_amount,
                amount,
                amount / project.original_amount * 100.0,
            )
        } else {
            (false, 0.0, 0.0)
        };

        Self {
            is_delayed: delay_days > 0,
            delay_days,
            is_over_budget,
            budget_variance_amount: variance_amount,
            budget_variance_pct: variance_pct,
        }
    }

    pub fn apply_to(&self, project: &mut Project) {
        project.is_delayed = self.is_delayed;
        project.delay_days = self.delay_days;
        project.is_over_budget = self.is_over_budget;
        project.budget_variance_amount = self.budget_variance_amount;
        project.budget_variance_pct = self.budget_variance_pct;
    }
}
