// surtax-core/src/domain/concerns/thresholds.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::error::DomainError;

/// Trigger points for the built-in concern rules.
/// Defaults reproduce the committee dashboard's long-standing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ConcernThresholds {
    /// Delays strictly longer than this are High severity.
    #[validate(range(min = 0))]
    pub delay_high_days: i64,

    /// Overruns must exceed this variance (%) to be reported at all.
    #[validate(range(min = 0.0))]
    pub overrun_min_pct: f64,

    /// Overruns strictly above this variance (%) are High severity.
    #[validate(range(min = 0.0))]
    pub overrun_high_pct: f64,

    /// Minimum summed change orders for a vendor pattern.
    #[validate(range(min = 1))]
    pub vendor_min_change_orders: u32,
}

impl Default for ConcernThresholds {
    fn default() -> Self {
        Self {
            delay_high_days: 90,
            overrun_min_pct: 5.0,
            overrun_high_pct: 15.0,
            vendor_min_change_orders: 3,
        }
    }
}

impl ConcernThresholds {
    /// Cross-field rules `validator` cannot express.
    pub fn check_consistency(&self) -> Result<(), DomainError> {
        if self.overrun_high_pct < self.overrun_min_pct {
            return Err(DomainError::InvalidConfiguration(format!(
                "overrun_high_pct ({}) must not be below overrun_min_pct ({})",
                self.overrun_high_pct, self.overrun_min_pct
            )));
        }
        Ok(())
    }
}
