// surtax-core/src/domain/compliance/mod.rs

pub mod config;
pub mod recommendations;
pub mod report;
pub mod scorer;

pub use config::{ComplianceConfig, TransparencyChecklist};
pub use report::{ComplianceCategory, ComplianceReport, ComplianceStatus, Metric};
pub use scorer::ComplianceScorer;
