// surtax-core/src/domain/compliance/scorer.rs
//
// Five linear penalty scores over the in-scope projects. Every ratio guards
// its zero denominator, so an empty ledger scores without error.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use super::config::ComplianceConfig;
use super::recommendations::Dimension;
use super::report::{ComplianceCategory, ComplianceReport, ComplianceStatus, Metric};
use crate::domain::format::{currency_full, group_thousands, percentage};
use crate::domain::ledger::Project;

/// Points lost per percent of projects over budget.
const OVER_BUDGET_PENALTY: f64 = 5.0;
/// Points lost per percent of active projects delayed.
const DELAY_PENALTY: f64 = 3.0;
/// Points lost per percent of vendors with a high change-order rate.
const HIGH_CO_VENDOR_PENALTY: f64 = 2.0;
/// A vendor averaging more change orders than this per contract is "high".
const HIGH_CO_AVERAGE: f64 = 2.0;

const OVER_BUDGET_ATTENTION_PCT: f64 = 10.0;
const DELAY_ATTENTION_PCT: f64 = 20.0;
const FUNDS_ATTENTION_SCORE: f64 = 95.0;
const HIGH_CO_ATTENTION_PCT: f64 = 20.0;

pub struct ComplianceScorer {
    config: ComplianceConfig,
}

/// Clamp to [0, 100] then truncate.
fn to_score(raw: f64) -> u8 {
    raw.clamp(0.0, 100.0) as u8
}

fn pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn category(
    dimension: Dimension,
    score: u8,
    metrics: Vec<Metric>,
    needs_attention: bool,
) -> ComplianceCategory {
    ComplianceCategory {
        name: dimension.name().to_string(),
        score,
        status: ComplianceStatus::from_score(score),
        metrics,
        recommendations: dimension
            .recommendations(needs_attention)
            .iter()
            .map(|r| r.to_string())
            .collect(),
    }
}

impl ComplianceScorer {
    pub fn new(config: ComplianceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComplianceConfig {
        &self.config
    }

    /// Scores the snapshot. `generated_at` is the only input outside the ledger
    /// and configuration, so identical inputs give identical reports.
    pub fn score(&self, projects: &[Project], generated_at: DateTime<Utc>) -> ComplianceReport {
        let scoped: Vec<&Project> = projects.iter().filter(|p| p.is_in_scope()).collect();

        let categories = Dimension::ALL
            .iter()
            .map(|dimension| match dimension {
                Dimension::FinancialManagement => self.financial(&scoped),
                Dimension::SchedulePerformance => self.schedule(&scoped),
                Dimension::UseOfFunds => self.use_of_funds(&scoped),
                Dimension::TransparencyReporting => self.transparency(),
                Dimension::VendorPerformance => self.vendor(&scoped),
            })
            .collect();

        ComplianceReport::from_categories(generated_at, categories)
    }

    pub fn financial(&self, projects: &[&Project]) -> ComplianceCategory {
        let total = projects.len();
        let over_budget = projects.iter().filter(|p| p.is_over_budget).count();
        let total_budget: f64 = projects.iter().map(|p| p.current_amount).sum();
        let total_spent: f64 = projects.iter().map(|p| p.total_paid).sum();

        let over_budget_pct = pct(over_budget, total);
        let score = to_score(100.0 - over_budget_pct * OVER_BUDGET_PENALTY);

        category(
            Dimension::FinancialManagement,
            score,
            vec![
                Metric::new("Total Budget", currency_full(total_budget)),
                Metric::new("Total Spent", currency_full(total_spent)),
                Metric::new(
                    "Over Budget Projects",
                    format!("{} of {}", over_budget, total),
                ),
                Metric::new("Budget Variance Rate", percentage(over_budget_pct)),
            ],
            over_budget_pct > OVER_BUDGET_ATTENTION_PCT,
        )
    }

    /// Only Active projects count toward schedule performance.
    pub fn schedule(&self, projects: &[&Project]) -> ComplianceCategory {
        let active: Vec<&&Project> = projects.iter().filter(|p| p.status.is_active()).collect();
        let delayed: Vec<&&Project> = active.iter().copied().filter(|p| p.is_delayed).collect();

        let delayed_pct = pct(delayed.len(), active.len());
        let score = to_score(100.0 - delayed_pct * DELAY_PENALTY);

        // Average over all active projects, counting on-time ones as zero days
        let avg_delay = if active.is_empty() {
            0.0
        } else {
            delayed.iter().map(|p| p.delay_days as f64).sum::<f64>() / active.len() as f64
        };

        category(
            Dimension::SchedulePerformance,
            score,
            vec![
                Metric::new("Active Projects", active.len().to_string()),
                Metric::new("Delayed Projects", delayed.len().to_string()),
                Metric::new("On-Time Rate", percentage(100.0 - delayed_pct)),
                Metric::new("Avg Delay (days)", group_thousands(avg_delay)),
            ],
            delayed_pct > DELAY_ATTENTION_PCT,
        )
    }

    pub fn use_of_funds(&self, projects: &[&Project]) -> ComplianceCategory {
        let mut by_category: HashMap<&str, f64> = HashMap::new();
        for p in projects {
            if let Some(cat) = p.category.as_deref() {
                *by_category.entry(cat).or_insert(0.0) += p.current_amount;
            }
        }

        let total_funds: f64 = by_category.values().sum();
        let eligible_funds: f64 = by_category
            .iter()
            .filter(|(cat, _)| self.config.is_approved(cat))
            .map(|(_, amount)| amount)
            .sum();
        let approved_categories = by_category
            .keys()
            .filter(|cat| self.config.is_approved(cat))
            .count();

        // Nothing to score against counts as compliant
        let raw = if total_funds > 0.0 {
            eligible_funds / total_funds * 100.0
        } else {
            100.0
        };
        let score = to_score(raw);

        category(
            Dimension::UseOfFunds,
            score,
            vec![
                Metric::new("Approved Categories", approved_categories.to_string()),
                Metric::new("Total Categories", by_category.len().to_string()),
                Metric::new("Eligible Spending", currency_full(eligible_funds)),
                Metric::new("Compliance Rate", percentage(raw)),
            ],
            raw < FUNDS_ATTENTION_SCORE,
        )
    }

    /// Driven by the injected checklist, not by the ledger.
    pub fn transparency(&self) -> ComplianceCategory {
        let checklist = &self.config.transparency;
        let items = checklist.items();
        let raw = pct(checklist.met_count(), items.len());
        let score = to_score(raw);

        let metrics = items
            .iter()
            .map(|(label, met)| {
                let missing = match *label {
                    "Public Meetings" | "Website Updated" => "No",
                    _ => "Pending",
                };
                Metric::new(label, if *met { "Yes" } else { missing })
            })
            .collect();

        category(Dimension::TransparencyReporting, score, metrics, score < 100)
    }

    /// Vendors are compared on their average change orders per contract, over
    /// the contracts that carry at least one change order.
    pub fn vendor(&self, projects: &[&Project]) -> ComplianceCategory {
        // vendor_id -> (contracts with change orders, change orders)
        let mut with_change_orders: HashMap<&str, (usize, u64)> = HashMap::new();
        let mut all_vendors: HashSet<&str> = HashSet::new();
        let mut vendor_projects = 0usize;
        let mut vendor_change_orders = 0u64;

        for p in projects {
            let Some(id) = p.vendor_id.as_deref() else {
                continue;
            };
            all_vendors.insert(id);
            vendor_projects += 1;
            vendor_change_orders += u64::from(p.change_order_count);

            if p.change_order_count > 0 {
                let entry = with_change_orders.entry(id).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += u64::from(p.change_order_count);
            }
        }

        let high_co = with_change_orders
            .values()
            .filter(|(contracts, cos)| *cos as f64 / *contracts as f64 > HIGH_CO_AVERAGE)
            .count();

        let high_co_pct = pct(high_co, with_change_orders.len());
        let score = to_score(100.0 - high_co_pct * HIGH_CO_VENDOR_PENALTY);

        let avg_change_orders = if vendor_projects == 0 {
            0.0
        } else {
            vendor_change_orders as f64 / vendor_projects as f64
        };

        category(
            Dimension::VendorPerformance,
            score,
            vec![
                Metric::new("Active Vendors", all_vendors.len().to_string()),
                Metric::new("Avg Change Orders", format!("{:.1}", avg_change_orders)),
                Metric::new("High CO Vendors", high_co.to_string()),
                Metric::new("Performance Rate", format!("{}%", score)),
            ],
            high_co_pct > HIGH_CO_ATTENTION_PCT,
        )
    }
}

impl Default for ComplianceScorer {
    fn default() -> Self {
        Self::new(ComplianceConfig::default())
    }
}
