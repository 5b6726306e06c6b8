// surtax/src/commands/vendors.rs
//
// USE CASE: Vendor track records and budget changes since award.

use std::path::PathBuf;

use surtax_core::application::VendorReport;
use surtax_core::domain::format::{currency_compact, currency_full, percentage, truncate_chars};

use super::{Workspace, new_table};
use crate::cli::OutputFormat;

fn print_vendors(report: &VendorReport) {
    let mut table = new_table(&["Vendor", "Projects", "Value", "Delayed", "Over budget", "Avg complete"]);
    for v in &report.vendors {
        table.add_row(vec![
            v.vendor_name.clone(),
            v.project_count.to_string(),
            currency_compact(v.total_value),
            percentage(v.delay_rate),
            percentage(v.over_budget_rate),
            percentage(v.avg_completion),
        ]);
    }
    println!("{table}");
}

fn print_budget_changes(report: &VendorReport) {
    let summary = &report.budget_change_summary;
    println!(
        "\n📝 Budget changes: {} project(s), net {} ({} up, {} down)",
        summary.total_changes,
        currency_full(summary.total_change_value),
        summary.increases,
        summary.decreases
    );
    if report.budget_changes.is_empty() {
        return;
    }

    let mut table = new_table(&["Project", "Original", "Current", "Change", "Status"]);
    for c in &report.budget_changes {
        table.add_row(vec![
            format!("{} {}", c.project_id, truncate_chars(&c.title, 40)),
            currency_compact(c.original_amount),
            currency_compact(c.current_amount),
            format!("{:+.1}% ({})", c.change_pct, currency_full(c.change_amount)),
            c.status.clone(),
        ]);
    }
    println!("{table}");
}

pub async fn execute(project_dir: PathBuf, format: OutputFormat) -> anyhow::Result<()> {
    let workspace = Workspace::open(&project_dir)?;
    let report = workspace.service().vendors().await?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("🤝 {}: {} vendor(s)", workspace.config.name, report.vendors.len());
    if !report.vendors.is_empty() {
        print_vendors(&report);
    }
    print_budget_changes(&report);
    Ok(())
}
