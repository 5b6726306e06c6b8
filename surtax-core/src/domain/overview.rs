// surtax-core/src/domain/overview.rs
//
// Program-level aggregates for the committee overview and the annual report.
// Same scoping rule as the engines: deleted and uncategorized projects are ignored.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::ledger::{Project, ProjectStatus};

fn in_scope(projects: &[Project]) -> impl Iterator<Item = &Project> {
    projects.iter().filter(|p| p.is_in_scope())
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct OverviewStats {
    pub total_projects: usize,
    pub total_budget: f64,
    pub total_spent: f64,
    pub total_remaining: f64,
    pub percent_spent: f64,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub delayed_projects: usize,
    pub over_budget_projects: usize,
    pub avg_completion: f64,
    /// Delayed plus over-budget projects (a project can count twice).
    pub concerns_count: usize,
    pub on_track_projects: usize,
}

impl OverviewStats {
    pub fn compute(projects: &[Project]) -> Self {
        let mut stats = Self::default();
        let mut completion_sum = 0.0;

        for p in in_scope(projects) {
            stats.total_projects += 1;
            stats.total_budget += p.current_amount;
            stats.total_spent += p.total_paid;
            completion_sum += p.completion();
            match p.status {
                ProjectStatus::Active => stats.active_projects += 1,
                ProjectStatus::Completed => stats.completed_projects += 1,
                ProjectStatus::Unknown | ProjectStatus::Other(_) => {}
            }
            if p.is_delayed {
                stats.delayed_projects += 1;
            }
            if p.is_over_budget {
                stats.over_budget_projects += 1;
            }
        }

        if stats.total_projects > 0 {
            stats.avg_completion = completion_sum / stats.total_projects as f64;
        }
        stats.total_remaining = stats.total_budget - stats.total_spent;
        if stats.total_budget > 0.0 {
            stats.percent_spent = stats.total_spent / stats.total_budget * 100.0;
        }
        stats.concerns_count = stats.delayed_projects + stats.over_budget_projects;
        stats.on_track_projects = stats.active_projects.saturating_sub(stats.delayed_projects);
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpending {
    pub category: String,
    pub project_count: usize,
    pub total_budget: f64,
    pub total_spent: f64,
    pub percent_of_total: f64,
}

impl CategorySpending {
    /// Largest budget first.
    pub fn compute(projects: &[Project]) -> Vec<Self> {
        let mut rows: Vec<Self> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for p in in_scope(projects) {
            let Some(cat) = p.category.as_deref() else {
                continue;
            };
            let slot = *index.entry(cat).or_insert_with(|| {
                rows.push(Self {
                    category: cat.to_string(),
                    project_count: 0,
                    total_budget: 0.0,
                    total_spent: 0.0,
                    percent_of_total: 0.0,
                });
                rows.len() - 1
            });
            let row = &mut rows[slot];
            row.project_count += 1;
            row.total_budget += p.current_amount;
            row.total_spent += p.total_paid;
        }

        let total: f64 = rows.iter().map(|r| r.total_budget).sum();
        if total > 0.0 {
            for row in &mut rows {
                row.percent_of_total = row.total_budget / total * 100.0;
            }
        }
        rows.sort_by(|a, b| b.total_budget.total_cmp(&a.total_budget));
        rows
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusBreakdown {
    pub status: String,
    pub count: usize,
    pub total: f64,
}

impl StatusBreakdown {
    /// Statuses in order of first appearance.
    pub fn compute(projects: &[Project]) -> Vec<Self> {
        let mut rows: Vec<Self> = Vec::new();
        for p in in_scope(projects) {
            match rows.iter_mut().find(|r| r.status == p.status.as_str()) {
                Some(row) => {
                    row.count += 1;
                    row.total += p.current_amount;
                }
                None => rows.push(Self {
                    status: p.status.as_str().to_string(),
                    count: 1,
                    total: p.current_amount,
                }),
            }
        }
        rows
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ChangeOrderSummary {
    /// Projects with at least one change order.
    pub projects_with_change_orders: usize,
    pub total_change_orders: u64,
    pub total_amount: f64,
    pub avg_per_project: f64,
}

impl ChangeOrderSummary {
    pub fn compute(projects: &[Project]) -> Self {
        let mut summary = Self::default();
        for p in in_scope(projects).filter(|p| p.change_order_count > 0) {
            summary.projects_with_change_orders += 1;
            summary.total_change_orders += u64::from(p.change_order_count);
            summary.total_amount += p.total_change_order_amount;
        }
        if summary.projects_with_change_orders > 0 {
            summary.avg_per_project =
                summary.total_change_orders as f64 / summary.projects_with_change_orders as f64;
        }
        summary
    }
}

/// Delivery record of one vendor across its contracts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorPerformance {
    pub vendor_name: String,
    pub project_count: usize,
    pub total_value: f64,
    /// Percent of the vendor's projects flagged as delayed.
    pub delay_rate: f64,
    /// Percent of the vendor's projects flagged as over budget.
    pub over_budget_rate: f64,
    pub avg_completion: f64,
}

impl VendorPerformance {
    /// Grouped by vendor name, largest total value first. Projects without a
    /// vendor name are skipped.
    pub fn compute(projects: &[Project]) -> Vec<Self> {
        struct Tally {
            delayed: usize,
            over_budget: usize,
            completion: f64,
        }

        let mut rows: Vec<(Self, Tally)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for p in in_scope(projects) {
            let Some(name) = p.vendor_name.as_deref().map(str::trim).filter(|n| !n.is_empty())
            else {
                continue;
            };
            let slot = *index.entry(name).or_insert_with(|| {
                rows.push((
                    Self {
                        vendor_name: name.to_string(),
                        project_count: 0,
                        total_value: 0.0,
                        delay_rate: 0.0,
                        over_budget_rate: 0.0,
                        avg_completion: 0.0,
                    },
                    Tally {
                        delayed: 0,
                        over_budget: 0,
                        completion: 0.0,
                    },
                ));
                rows.len() - 1
            });
            let (row, tally) = &mut rows[slot];
            row.project_count += 1;
            row.total_value += p.current_amount;
            tally.delayed += usize::from(p.is_delayed);
            tally.over_budget += usize::from(p.is_over_budget);
            tally.completion += p.completion();
        }

        let mut vendors: Vec<Self> = rows
            .into_iter()
            .map(|(mut row, tally)| {
                let n = row.project_count as f64;
                row.delay_rate = tally.delayed as f64 / n * 100.0;
                row.over_budget_rate = tally.over_budget as f64 / n * 100.0;
                row.avg_completion = tally.completion / n;
                row
            })
            .collect();
        vendors.sort_by(|a, b| b.total_value.total_cmp(&a.total_value));
        vendors
    }
}

/// A project whose current budget differs from the amount originally awarded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetChange {
    pub project_id: String,
    pub title: String,
    pub school_name: Option<String>,
    pub vendor_name: Option<String>,
    pub original_amount: f64,
    pub current_amount: f64,
    /// Negative for reductions.
    pub change_amount: f64,
    pub change_pct: f64,
    pub status: String,
}

impl BudgetChange {
    /// Largest absolute change first; ties keep ledger order.
    pub fn compute(projects: &[Project]) -> Vec<Self> {
        let mut changes: Vec<Self> = in_scope(projects)
            .filter(|p| p.current_amount != p.original_amount)
            .map(|p| {
                let change_amount = p.current_amount - p.original_amount;
                Self {
                    project_id: p.id.clone(),
                    title: p.display_title().to_string(),
                    school_name: p.school_name.clone(),
                    vendor_name: p.vendor_name.clone(),
                    original_amount: p.original_amount,
                    current_amount: p.current_amount,
                    change_amount,
                    change_pct: if p.original_amount > 0.0 {
                        change_amount / p.original_amount * 100.0
                    } else {
                        0.0
                    },
                    status: p.status.as_str().to_string(),
                }
            })
            .collect();
        changes.sort_by(|a, b| b.change_amount.abs().total_cmp(&a.change_amount.abs()));
        changes
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct BudgetChangeSummary {
    pub total_changes: usize,
    /// Net of increases and reductions.
    pub total_change_value: f64,
    pub increases: usize,
    pub decreases: usize,
}

impl BudgetChangeSummary {
    pub fn compute(changes: &[BudgetChange]) -> Self {
        let mut summary = Self::default();
        for change in changes {
            summary.total_changes += 1;
            summary.total_change_value += change.change_amount;
            if change.change_amount > 0.0 {
                summary.increases += 1;
            } else {
                summary.decreases += 1;
            }
        }
        summary
    }
}

/// The `limit` largest in-scope projects by current budget; ties keep ledger order.
pub fn top_projects_by_budget(projects: &[Project], limit: usize) -> Vec<&Project> {
    let mut ranked: Vec<&Project> = in_scope(projects).collect();
    ranked.sort_by(|a, b| b.current_amount.total_cmp(&a.current_amount));
    ranked.truncate(limit);
    ranked
}
