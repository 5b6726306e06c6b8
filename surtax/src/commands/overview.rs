// surtax/src/commands/overview.rs
//
// USE CASE: Program overview for the committee dashboard.

use std::path::PathBuf;

use surtax_core::domain::format::{currency_compact, currency_full, percentage};
use surtax_core::domain::overview::{CategorySpending, OverviewStats};

use super::{Workspace, new_table};

pub fn print_stats(stats: &OverviewStats) {
    let mut table = new_table(&["Metric", "Value"]);
    table
        .add_row(vec!["Projects".to_string(), stats.total_projects.to_string()])
        .add_row(vec!["Total budget".to_string(), currency_full(stats.total_budget)])
        .add_row(vec![
            "Spent to date".to_string(),
            format!(
                "{} ({})",
                currency_full(stats.total_spent),
                percentage(stats.percent_spent)
            ),
        ])
        .add_row(vec!["Remaining".to_string(), currency_full(stats.total_remaining)])
        .add_row(vec!["Active".to_string(), stats.active_projects.to_string()])
        .add_row(vec!["Completed".to_string(), stats.completed_projects.to_string()])
        .add_row(vec!["Delayed".to_string(), stats.delayed_projects.to_string()])
        .add_row(vec!["Over budget".to_string(), stats.over_budget_projects.to_string()])
        .add_row(vec!["On track".to_string(), stats.on_track_projects.to_string()])
        .add_row(vec!["Avg completion".to_string(), percentage(stats.avg_completion)]);
    println!("{table}");
}

fn print_categories(rows: &[CategorySpending]) {
    let mut table = new_table(&["Category", "Projects", "Budget", "Spent", "Share"]);
    for row in rows {
        table.add_row(vec![
            row.category.clone(),
            row.project_count.to_string(),
            currency_compact(row.total_budget),
            currency_compact(row.total_spent),
            percentage(row.percent_of_total),
        ]);
    }
    println!("{table}");
}

pub async fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let workspace = Workspace::open(&project_dir)?;
    let overview = workspace.service().overview().await?;

    println!("📊 {}", workspace.config.name);
    print_stats(&overview.stats);

    if !overview.category_spending.is_empty() {
        println!("\n💰 Spending by category");
        print_categories(&overview.category_spending);
    }

    if !overview.status_breakdown.is_empty() {
        let mut table = new_table(&["Status", "Projects", "Budget"]);
        for row in &overview.status_breakdown {
            table.add_row(vec![
                row.status.clone(),
                row.count.to_string(),
                currency_compact(row.total),
            ]);
        }
        println!("\n📌 By status");
        println!("{table}");
    }

    let change_orders = &overview.change_orders;
    println!(
        "\n📝 Change orders: {} across {} project(s), {} total, {:.1} per project",
        change_orders.total_change_orders,
        change_orders.projects_with_change_orders,
        currency_full(change_orders.total_amount),
        change_orders.avg_per_project
    );
    Ok(())
}
