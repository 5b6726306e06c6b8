// surtax/src/commands/concerns.rs
//
// USE CASE: List concerns for committee review.

use std::path::PathBuf;

use surtax_core::domain::concerns::{Concern, ConcernFilter, ConcernType, Severity};
use surtax_core::domain::format::{currency_compact, truncate_chars};

use super::{Workspace, new_table};
use crate::cli::OutputFormat;

pub fn build_filter(
    concern_type: Option<ConcernType>,
    severity: Option<Severity>,
    search: Option<String>,
    watch: Vec<String>,
    top: Option<usize>,
) -> ConcernFilter {
    ConcernFilter {
        concern_type,
        severity,
        search,
        watchlist: if watch.is_empty() {
            None
        } else {
            Some(watch.into_iter().collect())
        },
        limit: top,
    }
}

fn severity_badge(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "🔴 High",
        Severity::Medium => "🟠 Medium",
        Severity::Low => "🟢 Low",
    }
}

pub fn print_concerns(concerns: &[Concern]) {
    let mut table = new_table(&["Severity", "Type", "Concern", "Detail", "Exposure"]);
    for c in concerns {
        let mut subject = c.title.clone();
        if let Some(school) = &c.school_name {
            subject.push_str(&format!("\n{}", school));
        }
        let mut detail = c.detail.clone();
        if let Some(reason) = &c.reason {
            detail.push_str(&format!("\nReason: {}", reason));
        }
        table.add_row(vec![
            severity_badge(c.severity).to_string(),
            c.concern_type.to_string(),
            subject,
            detail,
            currency_compact(c.value),
        ]);
    }
    println!("{table}");
}

fn print_guidance(concerns: &[Concern]) {
    const ALL_TYPES: [ConcernType; 3] = [
        ConcernType::ScheduleDelay,
        ConcernType::CostOverrun,
        ConcernType::VendorPattern,
    ];

    for ty in ALL_TYPES
        .into_iter()
        .filter(|t| concerns.iter().any(|c| c.concern_type == *t))
    {
        let guide = ty.guidance();
        println!("\n📘 {}", guide.title);
        println!("   {}", guide.description);
        println!("   Why it matters: {}", guide.why_it_matters);
        println!("   Questions to ask:");
        for q in guide.questions_to_ask {
            println!("     • {}", q);
        }
        println!("   Typical causes: {}", guide.typical_causes.join(", "));
    }
}

pub async fn execute(
    project_dir: PathBuf,
    filter: ConcernFilter,
    explain: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let workspace = Workspace::open(&project_dir)?;
    let concerns = workspace.service().concerns(&filter).await?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&concerns)?);
        return Ok(());
    }

    println!("🚩 {}: {} concern(s)", workspace.config.name, concerns.len());
    if concerns.is_empty() {
        println!("   ✅ Nothing needs the committee's attention.");
        return Ok(());
    }

    print_concerns(&concerns);

    println!("\n❓ Suggested questions:");
    for c in &concerns {
        println!("   • [{}] {}", truncate_chars(&c.title, 40), c.suggested_question);
    }

    if explain {
        print_guidance(&concerns);
    }
    Ok(())
}
