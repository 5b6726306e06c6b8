// surtax-core/src/infrastructure/config/project.rs

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::compliance::ComplianceConfig;
use crate::domain::concerns::ConcernThresholds;
use crate::infrastructure::adapters::LedgerSettings;
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["surtax_project_conf.yaml", "surtax.yaml"];

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct ProjectConfig {
    #[validate(length(min = 1, message = "Project name cannot be empty"))]
    pub name: String,

    /// Label printed on reports, e.g. "FY 2025-26". Derived from the run date when absent.
    #[serde(rename = "fiscal-year", default)]
    pub fiscal_year: Option<String>,

    #[serde(rename = "config-paths", default)]
    pub config_paths: Vec<String>,

    #[serde(rename = "target-path", default = "default_target_path")]
    pub target_path: String,

    #[serde(default)]
    pub ledger: LedgerSettings,

    #[serde(default)]
    #[validate(nested)]
    pub concerns: ConcernThresholds,

    #[serde(default)]
    #[validate(nested)]
    pub compliance: ComplianceConfig,
}

fn default_target_path() -> String {
    "target".to_string()
}

impl ProjectConfig {
    /// Ledger location resolved against the project directory.
    pub fn ledger_path(&self, project_dir: &Path) -> String {
        if self.ledger.path == ":memory:" || Path::new(&self.ledger.path).is_absolute() {
            self.ledger.path.clone()
        } else {
            project_dir.join(&self.ledger.path).to_string_lossy().into_owned()
        }
    }

    pub fn target_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.target_path)
    }
}

#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading project manifest");

    let mut config: ProjectConfig = load_fragment(&config_path)?;

    // Satellites win over the inline blocks. A corrupt satellite aborts the load.
    if let Some(config_folder) = config.config_paths.first() {
        let config_dir = project_dir.join(config_folder);
        if config_dir.exists() {
            load_satellite_configs(&mut config, &config_dir)?;
        }
    }

    apply_env_overrides(&mut config);

    config.validate()?;
    config
        .concerns
        .check_consistency()
        .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;

    Ok(config)
}

pub fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    for filename in CONFIG_CANDIDATES {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "{} (checked {:?})",
        root.display(),
        CONFIG_CANDIDATES
    )))
}

/// Loads one typed YAML document.
fn load_fragment<T: DeserializeOwned>(path: &Path) -> Result<T, InfrastructureError> {
    let content = fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|e| {
        InfrastructureError::ConfigError(format!("Failed to parse {}: {}", path.display(), e))
    })
}

fn load_satellite_configs(
    config: &mut ProjectConfig,
    config_dir: &Path,
) -> Result<(), InfrastructureError> {
    let compliance_path = config_dir.join("compliance.yml");
    if compliance_path.exists() {
        config.compliance = load_fragment(&compliance_path)?;
        info!("  ⚖️  Compliance settings loaded");
    }

    let thresholds_path = config_dir.join("thresholds.yml");
    if thresholds_path.exists() {
        config.concerns = load_fragment(&thresholds_path)?;
        info!("  🚩 Concern thresholds loaded");
    }

    Ok(())
}

fn apply_env_overrides(config: &mut ProjectConfig) {
    if let Ok(val) = std::env::var("SURTAX_LEDGER_PATH") {
        info!(old = ?config.ledger.path, new = ?val, "Overriding ledger path via ENV");
        config.ledger.path = val;
    }
    if let Ok(val) = std::env::var("SURTAX_LEDGER_TABLE") {
        info!(old = ?config.ledger.table, new = ?val, "Overriding ledger table via ENV");
        config.ledger.table = val;
    }
    if let Ok(val) = std::env::var("SURTAX_TARGET_PATH") {
        info!(old = ?config.target_path, new = ?val, "Overriding target path via ENV");
        config.target_path = val;
    }
}
