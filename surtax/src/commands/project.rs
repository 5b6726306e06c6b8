// surtax/src/commands/project.rs
//
// USE CASE: Drill into one project.

use std::path::PathBuf;

use surtax_core::domain::format::{currency_full, percentage};

use super::concerns::print_concerns;
use super::{Workspace, new_table};

pub async fn execute(project_dir: PathBuf, id: String) -> anyhow::Result<()> {
    let workspace = Workspace::open(&project_dir)?;
    let detail = workspace.service().project_detail(&id).await?;
    let p = &detail.project;

    let date = |d: Option<chrono::NaiveDate>| d.map(|d| d.to_string()).unwrap_or_else(|| "-".into());
    let text = |s: &Option<String>| s.clone().unwrap_or_else(|| "-".into());

    println!("🔎 {} ({})", p.display_title(), p.id);
    if p.is_deleted {
        println!("   🗑️  Marked deleted; excluded from concerns and scores.");
    }

    let mut table = new_table(&["Field", "Value"]);
    table
        .add_row(vec!["School".to_string(), text(&p.school_name)])
        .add_row(vec!["Category".to_string(), text(&p.category)])
        .add_row(vec!["Vendor".to_string(), text(&p.vendor_name)])
        .add_row(vec!["Status".to_string(), p.status.to_string()])
        .add_row(vec!["Original amount".to_string(), currency_full(p.original_amount)])
        .add_row(vec!["Current amount".to_string(), currency_full(p.current_amount)])
        .add_row(vec!["Paid to date".to_string(), currency_full(p.total_paid)])
        .add_row(vec!["Complete".to_string(), percentage(p.completion())])
        .add_row(vec!["Original end".to_string(), date(p.original_end_date)])
        .add_row(vec!["Current end".to_string(), date(p.current_end_date)])
        .add_row(vec!["Delay (days)".to_string(), p.delay_days.to_string()])
        .add_row(vec![
            "Budget variance".to_string(),
            format!(
                "{} ({})",
                currency_full(p.budget_variance_amount),
                percentage(p.budget_variance_pct)
            ),
        ])
        .add_row(vec![
            "Change orders".to_string(),
            format!(
                "{} ({})",
                p.change_order_count,
                currency_full(p.total_change_order_amount)
            ),
        ]);
    println!("{table}");

    if detail.concerns.is_empty() {
        println!("\n✅ No concerns raised for this project.");
    } else {
        println!("\n🚩 Concerns");
        print_concerns(&detail.concerns);
    }
    Ok(())
}
