// surtax/src/commands/agenda.rs
//
// USE CASE: Suggested agenda for the next committee meeting.

use std::path::PathBuf;

use surtax_core::application::AgendaKind;
use surtax_core::domain::format::truncate_chars;

use super::Workspace;

pub async fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let workspace = Workspace::open(&project_dir)?;
    let agenda = workspace.service().meeting_agenda().await?;

    println!("🗓️  {}: committee meeting agenda", workspace.config.name);
    for (i, item) in agenda.items.iter().enumerate() {
        let icon = match item.kind {
            AgendaKind::Standard => "📋",
            AgendaKind::Concern => "🚩",
            AgendaKind::Discussion => "💬",
        };
        println!("{:>3}. {} {} ({} min)", i + 1, icon, item.title, item.duration_minutes);
        for concern in &item.concerns {
            println!("       • {}: {}", truncate_chars(&concern.title, 40), concern.detail);
        }
    }
    println!("\n⏱️  Estimated length: {} min", agenda.total_minutes());
    Ok(())
}
