// surtax-core/src/domain/compliance/report.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceStatus {
    Good,
    Warning,
    Critical,
}

impl ComplianceStatus {
    /// good >= 80, warning >= 60, critical below.
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Good,
            60..=79 => Self::Warning,
            _ => Self::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    pub fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceCategory {
    pub name: String,
    /// 0-100
    pub score: u8,
    pub status: ComplianceStatus,
    pub metrics: Vec<Metric>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub generated_at: DateTime<Utc>,
    pub overall_score: u8,
    pub overall_status: ComplianceStatus,
    pub categories: Vec<ComplianceCategory>,
}

impl ComplianceReport {
    /// Overall score is the truncated, unweighted mean of the category scores.
    pub fn from_categories(generated_at: DateTime<Utc>, categories: Vec<ComplianceCategory>) -> Self {
        let overall_score = if categories.is_empty() {
            0
        } else {
            let sum: u32 = categories.iter().map(|c| u32::from(c.score)).sum();
            // The mean of u8 values always fits in a u8
            u8::try_from(sum / categories.len() as u32).unwrap_or(u8::MAX)
        };

        Self {
            generated_at,
            overall_score,
            overall_status: ComplianceStatus::from_score(overall_score),
            categories,
        }
    }

    pub fn category(&self, name: &str) -> Option<&ComplianceCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
