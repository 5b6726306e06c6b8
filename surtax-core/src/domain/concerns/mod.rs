// surtax-core/src/domain/concerns/mod.rs

pub mod concern;
pub mod detector;
pub mod filter;
pub mod guidance;
pub mod rules;
pub mod thresholds;

// Re-exports
pub use concern::{Concern, ConcernType, Severity};
pub use detector::ConcernDetector;
pub use filter::ConcernFilter;
pub use guidance::ConcernGuidance;
pub use rules::{ConcernRule, CostOverrunRule, ScheduleDelayRule, VendorPatternRule};
pub use thresholds::ConcernThresholds;
