// surtax-core/src/domain/concerns/detector.rs

use super::concern::Concern;
use super::rules::{ConcernRule, CostOverrunRule, ScheduleDelayRule, VendorPatternRule};
use super::thresholds::ConcernThresholds;
use crate::domain::ledger::Project;

/// Runs an ordered list of rules over a project snapshot and ranks the result.
///
/// Detection is a pure function of its input: no I/O, no clock, no shared state.
/// A detector can be shared across threads and called concurrently.
pub struct ConcernDetector {
    rules: Vec<Box<dyn ConcernRule>>,
}

impl ConcernDetector {
    /// Built-in rules, in reporting order: delays, overruns, vendor patterns.
    pub fn new(thresholds: &ConcernThresholds) -> Self {
        Self::with_rules(vec![
            Box::new(ScheduleDelayRule::new(thresholds)),
            Box::new(CostOverrunRule::new(thresholds)),
            Box::new(VendorPatternRule::new(thresholds)),
        ])
    }

    pub fn with_rules(rules: Vec<Box<dyn ConcernRule>>) -> Self {
        Self { rules }
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Deleted and uncategorized projects are dropped before any rule runs.
    ///
    /// The output is ranked High, Medium, Low with a STABLE sort: within a
    /// severity, concerns keep rule order and each rule's own ordering. Callers
    /// taking a "top N" must truncate this list as is.
    pub fn detect(&self, projects: &[Project]) -> Vec<Concern> {
        let in_scope: Vec<&Project> = projects.iter().filter(|p| p.is_in_scope()).collect();

        let mut concerns: Vec<Concern> = self
            .rules
            .iter()
            .flat_map(|rule| rule.evaluate(&in_scope))
            .collect();

        concerns.sort_by_key(|c| c.severity.rank());
        concerns
    }
}

impl Default for ConcernDetector {
    fn default() -> Self {
        Self::new(&ConcernThresholds::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::concerns::concern::{ConcernType, Severity};
    use crate::domain::ledger::fixtures::{delayed, over_budget, project, with_vendor};

    fn mixed_ledger() -> Vec<Project> {
        vec![
            delayed("D-medium", 45),
            delayed("D-high", 120),
            over_budget("O-medium", 10.0),
            over_budget("O-high", 30.0),
            with_vendor("V1", "Acme Co.", 2),
            with_vendor("V2", "Acme Co.", 2),
            project("clean"),
        ]
    }

    fn ids(concerns: &[Concern]) -> Vec<String> {
        concerns
            .iter()
            .map(|c| c.project_id.clone().unwrap_or_else(|| c.title.clone()))
            .collect()
    }

    #[test]
    fn test_empty_ledger_has_no_concerns() {
        assert!(ConcernDetector::default().detect(&[]).is_empty());
    }

    #[test]
    fn test_rule_order_is_stable_within_severity() {
        let concerns = ConcernDetector::default().detect(&mixed_ledger());

        assert_eq!(
            ids(&concerns),
            vec![
                "D-high",
                "O-high",
                "D-medium",
                "O-medium",
                "Vendor: Acme Co.",
            ]
        );
    }

    #[test]
    fn test_count_is_sum_of_rule_matches() {
        let ledger = mixed_ledger();
        let detector = ConcernDetector::default();
        let thresholds = ConcernThresholds::default();
        let scoped: Vec<&Project> = ledger.iter().filter(|p| p.is_in_scope()).collect();

        let expected = ScheduleDelayRule::new(&thresholds).evaluate(&scoped).len()
            + CostOverrunRule::new(&thresholds).evaluate(&scoped).len()
            + VendorPatternRule::new(&thresholds).evaluate(&scoped).len();
        assert_eq!(detector.detect(&ledger).len(), expected);
    }

    #[test]
    fn test_out_of_scope_projects_are_ignored() {
        let mut deleted = delayed("deleted", 300);
        deleted.is_deleted = true;
        let mut uncategorized = over_budget("uncategorized", 50.0);
        uncategorized.category = None;

        let concerns = ConcernDetector::default().detect(&[deleted, uncategorized]);
        assert!(concerns.is_empty());
    }

    #[test]
    fn test_detection_is_idempotent() -> anyhow::Result<()> {
        let detector = ConcernDetector::default();
        let ledger = mixed_ledger();

        let first = serde_json::to_string(&detector.detect(&ledger))?;
        let second = serde_json::to_string(&detector.detect(&ledger))?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_custom_rule_list() {
        struct Everything;
        impl ConcernRule for Everything {
            fn name(&self) -> &'static str {
                "everything"
            }
            fn evaluate(&self, projects: &[&Project]) -> Vec<Concern> {
                projects
                    .iter()
                    .map(|p| Concern {
                        concern_type: ConcernType::ScheduleDelay,
                        severity: Severity::Low,
                        project_id: Some(p.id.clone()),
                        title: p.display_title().to_string(),
                        school_name: None,
                        category: None,
                        value: 0.0,
                        detail: String::new(),
                        reason: None,
                        suggested_question: String::new(),
                    })
                    .collect()
            }
        }

        let detector = ConcernDetector::with_rules(vec![
            Box::new(Everything),
            Box::new(ScheduleDelayRule::new(&ConcernThresholds::default())),
        ]);
        assert_eq!(detector.rule_names(), vec!["everything", "schedule_delay"]);

        let concerns = detector.detect(&[project("A"), delayed("B", 5)]);
        // The Low items came first in rule order but rank after Medium
        assert_eq!(ids(&concerns), vec!["B", "A", "B"]);
        assert_eq!(concerns[0].severity, Severity::Medium);
    }

    #[test]
    fn test_severity_sort_preserves_relative_order() {
        let concerns = ConcernDetector::default().detect(&mixed_ledger());
        for pair in concerns.windows(2) {
            assert!(pair[0].severity.rank() <= pair[1].severity.rank());
        }
        let mediums: Vec<_> = concerns
            .iter()
            .filter(|c| c.severity == Severity::Medium)
            .map(|c| c.concern_type)
            .collect();
        assert_eq!(
            mediums,
            vec![
                ConcernType::ScheduleDelay,
                ConcernType::CostOverrun,
                ConcernType::VendorPattern
            ]
        );
    }
}
