// surtax-core/src/application/briefing.rs

use serde_json::json;
use tracing::instrument;

use crate::application::ports::TemplateEngine;
use crate::application::report::AnnualReport;
use crate::error::SurtaxError;
use crate::infrastructure::error::InfrastructureError;

/// Markdown briefing handed to committee members before a meeting.
pub const BRIEFING_TEMPLATE: &str = r#"# {{ report.program_name }} Surtax Oversight Briefing

{{ report.fiscal_year }} | generated {{ report.generated_at }}

## Program Overview

| Metric | Value |
|---|---|
| Projects | {{ report.overview.total_projects }} |
| Total budget | {{ report.overview.total_budget | currency_full }} |
| Spent to date | {{ report.overview.total_spent | currency_full }} ({{ report.overview.percent_spent | percentage }}) |
| Remaining | {{ report.overview.total_remaining | currency_full }} |
| Delayed projects | {{ report.overview.delayed_projects }} |
| Over-budget projects | {{ report.overview.over_budget_projects }} |
| Critical-risk projects | {{ report.risk.critical }} |

## Compliance: {{ report.compliance.overall_score }}/100 ({{ report.compliance.overall_status }})

{% for category in report.compliance.categories %}
- **{{ category.name }}**: {{ category.score }} ({{ category.status }})
{% endfor %}

## Concerns

{% if report.concerns %}
{% for concern in report.concerns %}
- [{{ concern.severity }}] {{ concern.type }}: **{{ concern.title }}** ({{ concern.detail }})
  - Ask: {{ concern.suggested_question }}
{% endfor %}
{% else %}
No concerns detected.
{% endif %}

## Spending by Category

| Category | Projects | Budget | Share |
|---|---|---|---|
{% for row in report.category_spending %}
| {{ row.category }} | {{ row.project_count }} | {{ row.total_budget | currency }} | {{ row.percent_of_total | percentage }} |
{% endfor %}

## Vendor Performance

{% if report.vendors %}
| Vendor | Projects | Value | Delayed | Over budget |
|---|---|---|---|---|
{% for v in report.vendors %}
| {{ v.vendor_name }} | {{ v.project_count }} | {{ v.total_value | currency }} | {{ v.delay_rate | percentage }} | {{ v.over_budget_rate | percentage }} |
{% endfor %}
{% else %}
No vendor records.
{% endif %}

## Largest Projects

{% for p in report.top_projects %}
{{ loop.index }}. {{ p.title }}{% if p.school_name %} ({{ p.school_name }}){% endif %}: {{ p.current_amount | currency }}, {{ p.percent_complete | percentage }} complete
{% endfor %}
"#;

#[instrument(skip_all, fields(fiscal_year = %report.fiscal_year))]
pub fn render_briefing(
    engine: &dyn TemplateEngine,
    report: &AnnualReport,
) -> Result<String, SurtaxError> {
    let report = serde_json::to_value(report).map_err(InfrastructureError::from)?;
    engine.render(BRIEFING_TEMPLATE, &json!({ "report": report }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::compliance::ComplianceScorer;
    use crate::domain::concerns::ConcernDetector;
    use crate::domain::ledger::fixtures::{delayed, project, with_vendor};
    use crate::infrastructure::render::JinjaRenderer;
    use anyhow::Result;
    use chrono::{TimeZone, Utc};

    fn report(projects: &[crate::domain::ledger::Project]) -> AnnualReport {
        let now = Utc.with_ymd_and_hms(2025, 9, 30, 0, 0, 0).unwrap();
        AnnualReport::build(
            "Marion County",
            "FY 2025".into(),
            projects,
            ConcernDetector::default().detect(projects),
            ComplianceScorer::default().score(projects, now),
            now,
        )
    }

    #[test]
    fn test_briefing_lists_concerns_and_scores() -> Result<()> {
        let mut late = delayed("late", 120);
        late.title = Some("Forest High Roof".into());
        let ledger = vec![project("a"), late];

        let out = render_briefing(&JinjaRenderer::new(), &report(&ledger))?;

        assert!(out.starts_with("# Marion County Surtax Oversight Briefing"));
        assert!(out.contains("| Total budget | $200,000 |"));
        assert!(out.contains("- [High] Schedule Delay: **Forest High Roof** (120 days behind schedule)"));
        assert!(out.contains("- **Transparency & Reporting**: 60 (warning)"));
        assert!(out.contains("| Renovation | 2 | $200K | 100.0% |"));
        assert!(out.contains("1. Project a (Belleview Elementary): $100K, 0.0% complete"));
        Ok(())
    }

    #[test]
    fn test_briefing_without_concerns() -> Result<()> {
        let out = render_briefing(&JinjaRenderer::new(), &report(&[project("a")]))?;
        assert!(out.contains("No concerns detected."));
        assert!(out.contains("No vendor records."));
        Ok(())
    }

    #[test]
    fn test_briefing_lists_vendors_and_risk() -> Result<()> {
        let mut late = with_vendor("v2", "Acme Builders", 0);
        late.is_delayed = true;
        late.is_over_budget = true;
        let ledger = vec![with_vendor("v1", "Acme Builders", 1), late];

        let out = render_briefing(&JinjaRenderer::new(), &report(&ledger))?;
        assert!(out.contains("| Critical-risk projects | 1 |"));
        assert!(out.contains("| Acme Builders | 2 | $200K | 50.0% | 50.0% |"));
        Ok(())
    }
}
