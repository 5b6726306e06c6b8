// surtax/src/commands/report.rs
//
// USE CASE: Annual report + committee briefing written under target/.

use chrono::Utc;
use std::path::PathBuf;

use surtax_core::application::render_briefing;
use surtax_core::infrastructure::fs::write_artifact;
use surtax_core::infrastructure::render::JinjaRenderer;

use super::Workspace;

pub async fn execute(project_dir: PathBuf, fiscal_year: Option<String>) -> anyhow::Result<()> {
    let start = std::time::Instant::now();
    let workspace = Workspace::open(&project_dir)?;

    println!("📑 Building annual report...");
    let report = workspace
        .service()
        .annual_report(fiscal_year.as_deref(), Utc::now())
        .await?;
    println!("   Program: {} ({})", report.program_name, report.fiscal_year);

    let target_dir = workspace.target_dir();
    let json_path = write_artifact(&target_dir, "report.json", &serde_json::to_string_pretty(&report)?)?;
    println!("   📄 {}", json_path.display());

    let briefing = render_briefing(&JinjaRenderer::new(), &report)?;
    let md_path = write_artifact(&target_dir, "briefing.md", &briefing)?;
    println!("   📝 {}", md_path.display());

    println!(
        "\n✨ Report ready: {} concern(s), {} high priority, compliance {}/100 ({:.2?})",
        report.concerns.len(),
        report.high_priority().count(),
        report.compliance.overall_score,
        start.elapsed()
    );
    Ok(())
}
