// surtax/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use surtax_core::domain::concerns::{ConcernType, Severity};

#[derive(Parser)]
#[command(name = "surtax")]
#[command(about = "Concern detection and compliance scoring for school surtax oversight", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🏗️  Scaffolds surtax.yaml, satellite configs and an empty ledger
    Init {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Program name written to surtax.yaml
        #[arg(long)]
        name: Option<String>,
    },

    /// 🚩 Lists concerns for committee review, most severe first
    Concerns {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Only one concern type (delay | overrun | vendor)
        #[arg(long = "type")]
        concern_type: Option<ConcernType>,

        /// Only one severity (high | medium | low)
        #[arg(long)]
        severity: Option<Severity>,

        /// Case-insensitive text search over title, school and detail
        #[arg(long)]
        search: Option<String>,

        /// Only concerns on these project ids (repeatable)
        #[arg(long = "watch")]
        watch: Vec<String>,

        /// Keep only the first N concerns
        #[arg(long)]
        top: Option<usize>,

        /// Print the briefing notes for each concern type found
        #[arg(long)]
        explain: bool,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// ⚖️  Scores the program on the five compliance dimensions
    Compliance {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Exit with error if the overall status is critical
        #[arg(long)]
        check: bool,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// 📊 Program totals, spending by category and change orders
    Overview {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 🔥 Ranks projects by risk level (critical, high, medium, low)
    Risk {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Keep only the first N projects
        #[arg(long)]
        top: Option<usize>,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// 🤝 Vendor track records and budget changes since award
    Vendors {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// 🔎 Shows one project and the concerns raised against it
    Project {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        #[arg(long)]
        id: String,
    },

    /// 🗓️  Suggested agenda for the next committee meeting
    Agenda {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 📑 Writes the annual report (JSON) and committee briefing (Markdown)
    Report {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Label for the report, e.g. "FY 2025-26" (defaults to config, then current year)
        #[arg(long)]
        fiscal_year: Option<String>,
    },
}
