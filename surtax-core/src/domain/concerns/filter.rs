// surtax-core/src/domain/concerns/filter.rs

use std::collections::HashSet;

use super::concern::{Concern, ConcernType, Severity};

/// Narrows a ranked concern list without reordering it.
#[derive(Debug, Clone, Default)]
pub struct ConcernFilter {
    pub concern_type: Option<ConcernType>,
    pub severity: Option<Severity>,
    /// Case-insensitive match on title, detail or school name.
    pub search: Option<String>,
    /// Keep only concerns attached to these project ids (vendor patterns have none).
    pub watchlist: Option<HashSet<String>>,
    pub limit: Option<usize>,
}

impl ConcernFilter {
    pub fn top(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Default::default()
        }
    }

    pub fn watching<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            watchlist: Some(ids.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.concern_type.is_none()
            && self.severity.is_none()
            && self.search.is_none()
            && self.watchlist.is_none()
            && self.limit.is_none()
    }

    pub fn matches(&self, concern: &Concern) -> bool {
        if self.concern_type.is_some_and(|t| t != concern.concern_type) {
            return false;
        }
        if self.severity.is_some_and(|s| s != concern.severity) {
            return false;
        }
        if let Some(watchlist) = &self.watchlist {
            match &concern.project_id {
                Some(id) if watchlist.contains(id) => {}
                _ => return false,
            }
        }
        if let Some(needle) = self.search.as_deref().map(str::to_lowercase) {
            let haystacks = [
                Some(concern.title.as_str()),
                Some(concern.detail.as_str()),
                concern.school_name.as_deref(),
            ];
            if !haystacks
                .into_iter()
                .flatten()
                .any(|h| h.to_lowercase().contains(&needle))
            {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, concerns: Vec<Concern>) -> Vec<Concern> {
        let filtered = concerns.into_iter().filter(|c| self.matches(c));
        match self.limit {
            Some(n) => filtered.take(n).collect(),
            None => filtered.collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::concerns::ConcernDetector;
    use crate::domain::ledger::fixtures::{delayed, over_budget, with_vendor};
    use crate::domain::ledger::Project;

    fn ledger() -> Vec<Project> {
        let mut school = delayed("P1", 120);
        school.school_name = Some("Forest High".into());
        vec![
            school,
            delayed("P2", 30),
            over_budget("P3", 25.0),
            with_vendor("P4", "Acme Co.", 3),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let concerns = ConcernDetector::default().detect(&ledger());
        let filter = ConcernFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(concerns.clone()), concerns);
    }

    #[test]
    fn test_filter_by_type_and_severity() {
        let concerns = ConcernDetector::default().detect(&ledger());

        let delays = ConcernFilter {
            concern_type: Some(ConcernType::ScheduleDelay),
            ..Default::default()
        }
        .apply(concerns.clone());
        assert_eq!(delays.len(), 2);

        let high = ConcernFilter {
            severity: Some(Severity::High),
            ..Default::default()
        }
        .apply(concerns);
        assert!(high.iter().all(|c| c.severity == Severity::High));
        assert_eq!(high.len(), 2);
    }

    #[test]
    fn test_search_is_case_insensitive_over_school() {
        let concerns = ConcernDetector::default().detect(&ledger());
        let found = ConcernFilter {
            search: Some("FOREST".into()),
            ..Default::default()
        }
        .apply(concerns);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].project_id.as_deref(), Some("P1"));
    }

    #[test]
    fn test_watchlist_drops_vendor_patterns() {
        let concerns = ConcernDetector::default().detect(&ledger());
        let watched = ConcernFilter::watching(["P2", "P4"]).apply(concerns);
        // P4 only shows up through the vendor aggregate, which has no project id
        assert_eq!(watched.len(), 1);
        assert_eq!(watched[0].project_id.as_deref(), Some("P2"));
    }

    #[test]
    fn test_top_truncates_after_ranking() {
        let concerns = ConcernDetector::default().detect(&ledger());
        let top = ConcernFilter::top(2).apply(concerns.clone());
        assert_eq!(top, concerns[..2].to_vec());
    }
}
