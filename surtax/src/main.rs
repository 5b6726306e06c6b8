// surtax/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use surtax_core::SurtaxError;
use surtax_core::infrastructure::error::InfrastructureError;

#[tokio::main]
async fn main() {
    // Logs go to stderr so `--format json` output stays machine-readable.
    // RUST_LOG=info surtax concerns ... to see what the engine does
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        report_error(err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Init { project_dir, name } => commands::init::execute(project_dir, name),
        Commands::Concerns {
            project_dir,
            concern_type,
            severity,
            search,
            watch,
            top,
            explain,
            format,
        } => {
            let filter = commands::concerns::build_filter(concern_type, severity, search, watch, top);
            commands::concerns::execute(project_dir, filter, explain, format).await
        }
        Commands::Compliance {
            project_dir,
            check,
            format,
        } => commands::compliance::execute(project_dir, check, format).await,
        Commands::Overview { project_dir } => commands::overview::execute(project_dir).await,
        Commands::Risk {
            project_dir,
            top,
            format,
        } => commands::risk::execute(project_dir, top, format).await,
        Commands::Vendors {
            project_dir,
            format,
        } => commands::vendors::execute(project_dir, format).await,
        Commands::Project { project_dir, id } => commands::project::execute(project_dir, id).await,
        Commands::Agenda { project_dir } => commands::agenda::execute(project_dir).await,
        Commands::Report {
            project_dir,
            fiscal_year,
        } => commands::report::execute(project_dir, fiscal_year).await,
    }
}

/// Core errors carry miette diagnostics (code + help); render them in full.
fn report_error(err: anyhow::Error) {
    let err = match err.downcast::<SurtaxError>() {
        Ok(SurtaxError::Domain(e)) => {
            eprintln!("{:?}", miette::Report::new(e));
            return;
        }
        Ok(SurtaxError::Infrastructure(e)) => {
            eprintln!("{:?}", miette::Report::new(e));
            return;
        }
        Ok(other) => anyhow::Error::new(other),
        Err(err) => err,
    };
    match err.downcast::<InfrastructureError>() {
        Ok(e) => eprintln!("{:?}", miette::Report::new(e)),
        Err(err) => eprintln!("❌ {:#}", err),
    }
}
