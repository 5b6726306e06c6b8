// surtax/src/commands/risk.rs
//
// USE CASE: Rank projects by risk so the committee starts with the worst.

use std::path::PathBuf;

use surtax_core::domain::format::{currency_compact, percentage, truncate_chars};
use surtax_core::domain::risk::{ProjectRisk, RiskLevel};

use super::{Workspace, new_table};
use crate::cli::OutputFormat;

fn risk_badge(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Critical => "🔴 Critical",
        RiskLevel::High => "🟠 High",
        RiskLevel::Medium => "🟡 Medium",
        RiskLevel::Low => "🟢 Low",
    }
}

fn print_projects(projects: &[ProjectRisk]) {
    let mut table = new_table(&["Risk", "Project", "Status", "Budget", "Complete", "Delay", "Variance"]);
    for p in projects {
        let mut subject = format!("{} {}", p.project_id, truncate_chars(&p.title, 40));
        if let Some(school) = &p.school_name {
            subject.push_str(&format!("\n{}", school));
        }
        table.add_row(vec![
            risk_badge(p.level).to_string(),
            subject,
            p.status.clone(),
            currency_compact(p.current_amount),
            percentage(p.percent_complete),
            format!("{} days", p.delay_days),
            percentage(p.budget_variance_pct),
        ]);
    }
    println!("{table}");
}

pub async fn execute(project_dir: PathBuf, top: Option<usize>, format: OutputFormat) -> anyhow::Result<()> {
    let workspace = Workspace::open(&project_dir)?;
    let mut assessment = workspace.service().risk().await?;
    if let Some(n) = top {
        assessment.projects.truncate(n);
    }

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
        return Ok(());
    }

    let summary = &assessment.summary;
    println!(
        "🔥 {}: {} project(s) | {} critical, {} high, {} medium, {} low",
        workspace.config.name, summary.total, summary.critical, summary.high, summary.medium, summary.low
    );
    if assessment.projects.is_empty() {
        println!("   ✅ No projects in scope.");
        return Ok(());
    }

    print_projects(&assessment.projects);
    Ok(())
}
