// surtax-core/src/domain/concerns/rules.rs
//
// Each rule scans the in-scope projects on its own and returns its concerns
// already ordered. The detector only concatenates and ranks by severity.

use std::collections::HashMap;

use super::concern::{Concern, ConcernType, Severity};
use super::thresholds::ConcernThresholds;
use crate::domain::format::{currency_full, truncate_chars};
use crate::domain::ledger::Project;

const QUESTION_TITLE_CHARS: usize = 40;

pub trait ConcernRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// `projects` only holds in-scope projects (not deleted, categorized).
    fn evaluate(&self, projects: &[&Project]) -> Vec<Concern>;
}

// --- SCHEDULE DELAY ---

pub struct ScheduleDelayRule {
    high_after_days: i64,
}

impl ScheduleDelayRule {
    pub fn new(thresholds: &ConcernThresholds) -> Self {
        Self {
            high_after_days: thresholds.delay_high_days,
        }
    }

    fn build(&self, project: &Project) -> Concern {
        let severity = if project.delay_days > self.high_after_days {
            Severity::High
        } else {
            Severity::Medium
        };
        Concern {
            concern_type: ConcernType::ScheduleDelay,
            severity,
            project_id: Some(project.id.clone()),
            title: project.display_title().to_string(),
            school_name: project.school_name.clone(),
            category: project.category.clone(),
            value: project.current_amount,
            detail: format!("{} days behind schedule", project.delay_days),
            reason: project.delay_reason.clone(),
            suggested_question: format!(
                "What is causing the delay on {}?",
                truncate_chars(project.display_title(), QUESTION_TITLE_CHARS)
            ),
        }
    }
}

impl ConcernRule for ScheduleDelayRule {
    fn name(&self) -> &'static str {
        "schedule_delay"
    }

    fn evaluate(&self, projects: &[&Project]) -> Vec<Concern> {
        let mut delayed: Vec<&Project> = projects.iter().copied().filter(|p| p.is_delayed).collect();
        // Longest delays first; sort_by is stable so ledger order breaks ties
        delayed.sort_by(|a, b| b.delay_days.cmp(&a.delay_days));
        delayed.into_iter().map(|p| self.build(p)).collect()
    }
}

// --- COST OVERRUN ---

pub struct CostOverrunRule {
    min_pct: f64,
    high_above_pct: f64,
}

impl CostOverrunRule {
    pub fn new(thresholds: &ConcernThresholds) -> Self {
        Self {
            min_pct: thresholds.overrun_min_pct,
            high_above_pct: thresholds.overrun_high_pct,
        }
    }

    fn matches(&self, project: &Project) -> bool {
        project.is_over_budget && project.budget_variance_pct > self.min_pct
    }

    fn build(&self, project: &Project) -> Concern {
        let severity = if project.budget_variance_pct > self.high_above_pct {
            Severity::High
        } else {
            Severity::Medium
        };
        Concern {
            concern_type: ConcernType::CostOverrun,
            severity,
            project_id: Some(project.id.clone()),
            title: project.display_title().to_string(),
            school_name: project.school_name.clone(),
            category: project.category.clone(),
            value: project.current_amount,
            detail: format!(
                "+{:.1}% over original budget ({})",
                project.budget_variance_pct,
                currency_full(project.budget_variance_amount)
            ),
            reason: None,
            suggested_question: format!(
                "What drove the cost increase on {}?",
                truncate_chars(project.display_title(), QUESTION_TITLE_CHARS)
            ),
        }
    }
}

impl ConcernRule for CostOverrunRule {
    fn name(&self) -> &'static str {
        "cost_overrun"
    }

    fn evaluate(&self, projects: &[&Project]) -> Vec<Concern> {
        let mut over: Vec<&Project> = projects.iter().copied().filter(|p| self.matches(p)).collect();
        over.sort_by(|a, b| b.budget_variance_pct.total_cmp(&a.budget_variance_pct));
        over.into_iter().map(|p| self.build(p)).collect()
    }
}

// --- VENDOR PATTERN ---

pub struct VendorPatternRule {
    min_change_orders: u32,
}

/// Change-order totals for one vendor across its projects.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorChangeOrders {
    pub vendor_id: Option<String>,
    pub vendor_name: String,
    pub contract_count: usize,
    pub total_change_orders: u64,
    pub total_change_order_amount: f64,
}

impl VendorChangeOrders {
    /// Groups projects that carry change orders by vendor identity, in order of
    /// first appearance. Projects without a vendor id share one group.
    pub fn aggregate(projects: &[&Project]) -> Vec<Self> {
        let mut groups: Vec<Self> = Vec::new();
        let mut index: HashMap<Option<&str>, usize> = HashMap::new();

        for project in projects.iter().filter(|p| p.change_order_count > 0) {
            let key = project.vendor_id.as_deref();
            let slot = *index.entry(key).or_insert_with(|| {
                groups.push(Self {
                    vendor_id: project.vendor_id.clone(),
                    vendor_name: String::new(),
                    contract_count: 0,
                    total_change_orders: 0,
                    total_change_order_amount: 0.0,
                });
                groups.len() - 1
            });

            let group = &mut groups[slot];
            if group.vendor_name.is_empty() {
                if let Some(name) = project.vendor_name.as_deref() {
                    group.vendor_name = name.to_string();
                }
            }
            group.contract_count += 1;
            group.total_change_orders += u64::from(project.change_order_count);
            group.total_change_order_amount += project.total_change_order_amount;
        }

        for group in &mut groups {
            if group.vendor_name.is_empty() {
                group.vendor_name = "Unknown vendor".to_string();
            }
        }
        groups
    }
}

impl VendorPatternRule {
    pub fn new(thresholds: &ConcernThresholds) -> Self {
        Self {
            min_change_orders: thresholds.vendor_min_change_orders,
        }
    }

    fn build(&self, vendor: &VendorChangeOrders) -> Concern {
        Concern {
            concern_type: ConcernType::VendorPattern,
            severity: Severity::Medium,
            project_id: None,
            title: format!("Vendor: {}", vendor.vendor_name),
            school_name: None,
            category: None,
            value: vendor.total_change_order_amount,
            detail: format!(
                "{} change orders across {} contracts",
                vendor.total_change_orders, vendor.contract_count
            ),
            reason: None,
            suggested_question: format!(
                "Why does {} have so many change orders?",
                vendor.vendor_name
            ),
        }
    }
}

impl ConcernRule for VendorPatternRule {
    fn name(&self) -> &'static str {
        "vendor_pattern"
    }

    fn evaluate(&self, projects: &[&Project]) -> Vec<Concern> {
        let mut vendors: Vec<VendorChangeOrders> = VendorChangeOrders::aggregate(projects)
            .into_iter()
            .filter(|v| v.total_change_orders >= u64::from(self.min_change_orders))
            .collect();
        vendors.sort_by(|a, b| b.total_change_orders.cmp(&a.total_change_orders));
        vendors.iter().map(|v| self.build(v)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::ledger::fixtures::{delayed, over_budget, project, with_vendor};

    fn refs(projects: &[Project]) -> Vec<&Project> {
        projects.iter().collect()
    }

    #[test]
    fn test_delay_medium_at_45_days() {
        let projects = vec![delayed("P2", 45)];
        let rule = ScheduleDelayRule::new(&ConcernThresholds::default());

        let concerns = rule.evaluate(&refs(&projects));
        assert_eq!(concerns.len(), 1);
        assert_eq!(concerns[0].severity, Severity::Medium);
        assert_eq!(concerns[0].detail, "45 days behind schedule");
        assert_eq!(concerns[0].project_id.as_deref(), Some("P2"));
    }

    #[test]
    fn test_delay_high_above_90_days_only() {
        let projects = vec![delayed("P3", 120), delayed("P4", 90)];
        let rule = ScheduleDelayRule::new(&ConcernThresholds::default());

        let concerns = rule.evaluate(&refs(&projects));
        assert_eq!(concerns[0].severity, Severity::High);
        // Exactly 90 days is not "more than 90"
        assert_eq!(concerns[1].severity, Severity::Medium);
    }

    #[test]
    fn test_delay_question_truncates_title() {
        let mut p = delayed("P1", 10);
        p.title = Some("South Marion High School Classroom Addition Phase II".into());
        let rule = ScheduleDelayRule::new(&ConcernThresholds::default());

        let concerns = rule.evaluate(&[&p]);
        assert_eq!(
            concerns[0].suggested_question,
            "What is causing the delay on South Marion High School Classroom Addit?"
        );
    }

    #[test]
    fn test_delays_sorted_longest_first_with_stable_ties() {
        let projects = vec![delayed("A", 10), delayed("B", 200), delayed("C", 10)];
        let rule = ScheduleDelayRule::new(&ConcernThresholds::default());

        let ids: Vec<_> = rule
            .evaluate(&refs(&projects))
            .into_iter()
            .map(|c| c.project_id.unwrap())
            .collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_overrun_high_detail() {
        let projects = vec![over_budget("P1", 20.0)];
        let rule = CostOverrunRule::new(&ConcernThresholds::default());

        let concerns = rule.evaluate(&refs(&projects));
        assert_eq!(concerns.len(), 1);
        assert_eq!(concerns[0].severity, Severity::High);
        assert!(concerns[0].detail.contains("+20.0%"));
        assert!(concerns[0].detail.contains("$20,000"));
        assert_eq!(concerns[0].value, 120_000.0);
    }

    #[test]
    fn test_overrun_requires_more_than_minimum_variance() {
        let projects = vec![over_budget("small", 5.0), over_budget("mid", 10.0)];
        let rule = CostOverrunRule::new(&ConcernThresholds::default());

        let concerns = rule.evaluate(&refs(&projects));
        assert_eq!(concerns.len(), 1);
        assert_eq!(concerns[0].project_id.as_deref(), Some("mid"));
        assert_eq!(concerns[0].severity, Severity::Medium);
    }

    #[test]
    fn test_overrun_high_above_15_percent_only() {
        let projects = vec![over_budget("edge", 15.0), over_budget("above", 15.1)];
        let rule = CostOverrunRule::new(&ConcernThresholds::default());

        let concerns = rule.evaluate(&refs(&projects));
        let severity_of = |id: &str| {
            concerns
                .iter()
                .find(|c| c.project_id.as_deref() == Some(id))
                .map(|c| c.severity)
        };
        // Exactly 15% is not "more than 15"
        assert_eq!(severity_of("edge"), Some(Severity::Medium));
        assert_eq!(severity_of("above"), Some(Severity::High));
    }

    #[test]
    fn test_overrun_ignores_variance_without_flag() {
        let mut p = project("P1");
        p.budget_variance_pct = 40.0;
        let rule = CostOverrunRule::new(&ConcernThresholds::default());
        assert!(rule.evaluate(&[&p]).is_empty());
    }

    #[test]
    fn test_vendor_pattern_three_single_change_orders() {
        let projects = vec![
            with_vendor("P1", "Acme Co.", 1),
            with_vendor("P2", "Acme Co.", 1),
            with_vendor("P3", "Acme Co.", 1),
        ];
        let rule = VendorPatternRule::new(&ConcernThresholds::default());

        let concerns = rule.evaluate(&refs(&projects));
        assert_eq!(concerns.len(), 1);
        let c = &concerns[0];
        assert_eq!(c.severity, Severity::Medium);
        assert_eq!(c.project_id, None);
        assert_eq!(c.title, "Vendor: Acme Co.");
        assert!(c.detail.contains("3 change orders across 3 contracts"));
        assert_eq!(c.value, 30_000.0);
    }

    #[test]
    fn test_vendor_pattern_below_minimum_is_silent() {
        let projects = vec![with_vendor("P1", "Acme Co.", 2), with_vendor("P2", "Other", 0)];
        let rule = VendorPatternRule::new(&ConcernThresholds::default());
        assert!(rule.evaluate(&refs(&projects)).is_empty());
    }

    #[test]
    fn test_vendor_projects_without_change_orders_not_counted() {
        let projects = vec![
            with_vendor("P1", "Acme Co.", 3),
            with_vendor("P2", "Acme Co.", 0),
        ];
        let rule = VendorPatternRule::new(&ConcernThresholds::default());

        let concerns = rule.evaluate(&refs(&projects));
        assert_eq!(concerns[0].detail, "3 change orders across 1 contracts");
    }

    #[test]
    fn test_vendors_sorted_by_total_change_orders() {
        let projects = vec![
            with_vendor("P1", "Small Builders", 3),
            with_vendor("P2", "Big Builders", 4),
            with_vendor("P3", "Big Builders", 4),
        ];
        let rule = VendorPatternRule::new(&ConcernThresholds::default());

        let titles: Vec<_> = rule
            .evaluate(&refs(&projects))
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["Vendor: Big Builders", "Vendor: Small Builders"]);
    }
}
