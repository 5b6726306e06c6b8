// surtax-core/src/domain/concerns/concern.rs

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConcernType {
    #[serde(rename = "Schedule Delay")]
    ScheduleDelay,
    #[serde(rename = "Cost Overrun")]
    CostOverrun,
    #[serde(rename = "Vendor Pattern")]
    VendorPattern,
}

impl ConcernType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ScheduleDelay => "Schedule Delay",
            Self::CostOverrun => "Cost Overrun",
            Self::VendorPattern => "Vendor Pattern",
        }
    }
}

impl fmt::Display for ConcernType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ConcernType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "scheduledelay" | "delay" => Ok(Self::ScheduleDelay),
            "costoverrun" | "overrun" => Ok(Self::CostOverrun),
            "vendorpattern" | "vendor" => Ok(Self::VendorPattern),
            _ => Err(format!("Unknown concern type: {}", s)),
        }
    }
}

// Declaration order is the display priority: High sorts first.
// Low is part of the scale but no built-in rule emits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Sort rank: High=0, Medium=1, Low=2.
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// An issue flagged for committee review. Built fresh on every detection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concern {
    #[serde(rename = "type")]
    pub concern_type: ConcernType,
    pub severity: Severity,
    /// None for vendor patterns, which span several projects.
    pub project_id: Option<String>,
    pub title: String,
    pub school_name: Option<String>,
    pub category: Option<String>,
    /// Dollar magnitude behind the concern.
    pub value: f64,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub suggested_question: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_severity_rank_order() {
        assert!(Severity::High.rank() < Severity::Medium.rank());
        assert!(Severity::Medium.rank() < Severity::Low.rank());
        assert!(Severity::High < Severity::Low);
    }

    #[test]
    fn test_parsing() {
        assert_eq!(Severity::from_str("HIGH").unwrap(), Severity::High);
        assert!(Severity::from_str("critical").is_err());
        assert_eq!(
            ConcernType::from_str("Cost Overrun").unwrap(),
            ConcernType::CostOverrun
        );
        assert_eq!(
            ConcernType::from_str("schedule-delay").unwrap(),
            ConcernType::ScheduleDelay
        );
        assert_eq!(
            ConcernType::from_str("vendor").unwrap(),
            ConcernType::VendorPattern
        );
    }

    #[test]
    fn test_concern_serializes_with_display_names() -> anyhow::Result<()> {
        let json = serde_json::to_value(ConcernType::VendorPattern)?;
        assert_eq!(json, serde_json::json!("Vendor Pattern"));
        Ok(())
    }
}
