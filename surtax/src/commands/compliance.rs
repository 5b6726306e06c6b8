// surtax/src/commands/compliance.rs
//
// USE CASE: Compliance scorecard, with an optional CI gate.

use chrono::Utc;
use std::path::PathBuf;

use surtax_core::domain::compliance::{ComplianceCategory, ComplianceReport, ComplianceStatus};

use super::{Workspace, new_table};
use crate::cli::OutputFormat;

fn status_badge(status: ComplianceStatus) -> &'static str {
    match status {
        ComplianceStatus::Good => "✅ good",
        ComplianceStatus::Warning => "⚠️ warning",
        ComplianceStatus::Critical => "❌ critical",
    }
}

/// Dimensions that are not in good standing, in scorecard order.
fn needs_follow_up(report: &ComplianceReport) -> Vec<&ComplianceCategory> {
    report
        .categories
        .iter()
        .filter(|c| c.status != ComplianceStatus::Good)
        .collect()
}

fn print_report(report: &ComplianceReport) {
    let mut table = new_table(&["Dimension", "Score", "Status", "Metrics"]);
    for category in &report.categories {
        let metrics = category
            .metrics
            .iter()
            .map(|m| format!("{}: {}", m.label, m.value))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            category.name.clone(),
            category.score.to_string(),
            status_badge(category.status).to_string(),
            metrics,
        ]);
    }
    println!("{table}");

    let flagged = needs_follow_up(report);
    if !flagged.is_empty() {
        println!("\n💡 Recommendations:");
        for category in flagged {
            println!("   {}", category.name);
            for rec in &category.recommendations {
                println!("     • {}", rec);
            }
        }
    }
}

pub async fn execute(project_dir: PathBuf, check: bool, format: OutputFormat) -> anyhow::Result<()> {
    let workspace = Workspace::open(&project_dir)?;
    let report = workspace.service().compliance(Utc::now()).await?;

    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Table => {
            println!(
                "⚖️  {}: overall {}/100 ({})",
                workspace.config.name,
                report.overall_score,
                status_badge(report.overall_status)
            );
            print_report(&report);
        }
    }

    if check && report.overall_status == ComplianceStatus::Critical {
        eprintln!("\n💥 --check mode: overall compliance is critical.");
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use surtax_core::domain::compliance::ComplianceScorer;

    #[test]
    fn test_only_dimensions_below_good_are_followed_up() {
        // Empty ledger, nothing attested: only transparency falls short
        let report = ComplianceScorer::default().score(&[], Utc::now());
        let names: Vec<_> = needs_follow_up(&report)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Transparency & Reporting"]);
    }
}
