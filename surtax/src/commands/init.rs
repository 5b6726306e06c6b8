// surtax/src/commands/init.rs
//
// USE CASE: Scaffold a new oversight project.

use std::fs;
use std::path::{Path, PathBuf};

use surtax_core::infrastructure::adapters::DuckDbLedger;
use surtax_core::infrastructure::config::{find_main_config, load_project_config};
use surtax_core::infrastructure::fs::atomic_write;

const THRESHOLDS_YML: &str = "\
# Concern rule trigger points
delay_high_days: 90
overrun_min_pct: 5.0
overrun_high_pct: 15.0
vendor_min_change_orders: 3
";

const COMPLIANCE_YML: &str = "\
approved_categories:
  - New Construction
  - Renovation
  - Technology
  - Safety & Security
  - Maintenance

# Flip to true once each item is attested
transparency:
  public_meetings: false
  annual_report: false
  website_updated: false
  financial_audit: false
  performance_audit: false
";

fn manifest(name: &str) -> String {
    format!(
        "name: \"{name}\"
config-paths: [\"config\"]
target-path: \"target\"

ledger:
  path: \"data/contracts.duckdb\"
  table: \"contracts\"
  recompute_flags: false
"
    )
}

fn write_if_missing(path: &Path, content: &str) -> anyhow::Result<()> {
    if path.exists() {
        println!("   ⏭️  {} already exists, keeping it", path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    atomic_write(path, content)?;
    println!("   📝 {}", path.display());
    Ok(())
}

pub fn execute(project_dir: PathBuf, name: Option<String>) -> anyhow::Result<()> {
    println!("🏗️  Initializing oversight project in {}", project_dir.display());
    fs::create_dir_all(&project_dir)?;

    if find_main_config(&project_dir).is_err() {
        let name = name.unwrap_or_else(|| "surtax_oversight".to_string());
        write_if_missing(&project_dir.join("surtax.yaml"), &manifest(&name))?;
    } else {
        println!("   ⏭️  Project manifest already exists, keeping it");
    }
    write_if_missing(&project_dir.join("config/thresholds.yml"), THRESHOLDS_YML)?;
    write_if_missing(&project_dir.join("config/compliance.yml"), COMPLIANCE_YML)?;

    // Round-trip through the loader so a broken manifest fails here, not later
    let config = load_project_config(&project_dir)?;
    let ledger_path = config.ledger_path(&project_dir);
    if let Some(parent) = Path::new(&ledger_path).parent() {
        fs::create_dir_all(parent)?;
    }

    let ledger = DuckDbLedger::open(&ledger_path, &config.ledger)?;
    ledger.create_schema()?;
    println!("   🗄️  Ledger table '{}' ready in {}", ledger.table(), ledger_path);

    println!("\n✨ Project '{}' initialized.", config.name);
    Ok(())
}
