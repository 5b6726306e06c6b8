pub mod compliance;
pub mod concerns;
pub mod error;
pub mod format;
pub mod ledger;
pub mod overview;
pub mod risk;

// Handy re-exports to keep imports short elsewhere
pub use compliance::{ComplianceConfig, ComplianceReport, ComplianceScorer};
pub use concerns::{Concern, ConcernDetector, ConcernFilter, ConcernType, Severity};
pub use error::DomainError;
pub use ledger::{Project, ProjectStatus};
pub use risk::{RiskAssessment, RiskLevel, classify_risk};
