// surtax/src/commands/mod.rs

pub mod agenda;
pub mod compliance;
pub mod concerns;
pub mod init;
pub mod overview;
pub mod project;
pub mod report;
pub mod risk;
pub mod vendors;

use anyhow::{Context, bail};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::path::{Path, PathBuf};
use tracing::debug;

use surtax_core::application::{OversightConfig, OversightService};
use surtax_core::infrastructure::adapters::DuckDbLedger;
use surtax_core::infrastructure::config::{ProjectConfig, load_project_config};

/// A loaded project: its config plus an open ledger.
pub struct Workspace {
    pub project_dir: PathBuf,
    pub config: ProjectConfig,
    pub ledger: DuckDbLedger,
}

impl Workspace {
    pub fn open(project_dir: &Path) -> anyhow::Result<Self> {
        let config = load_project_config(project_dir)?;
        let ledger_path = config.ledger_path(project_dir);

        // DuckDB would silently create an empty file here
        if ledger_path != ":memory:" && !Path::new(&ledger_path).exists() {
            bail!(
                "Ledger not found at: {}\n👉 Have you run 'surtax init'?",
                ledger_path
            );
        }

        debug!(ledger = %ledger_path, table = %config.ledger.table, "Opening ledger");
        let ledger = DuckDbLedger::open(&ledger_path, &config.ledger)
            .with_context(|| format!("Failed to open ledger at {}", ledger_path))?;

        Ok(Self {
            project_dir: project_dir.to_path_buf(),
            config,
            ledger,
        })
    }

    pub fn service(&self) -> OversightService<'_> {
        OversightService::new(&self.ledger, OversightConfig::from(&self.config))
    }

    pub fn target_dir(&self) -> PathBuf {
        self.config.target_dir(&self.project_dir)
    }
}

pub fn new_table<S: ToString>(header: &[S]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().map(|h| h.to_string()).collect::<Vec<_>>());
    table
}
