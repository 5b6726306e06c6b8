// surtax-core/src/domain/ledger/status.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Contract status as recorded in the ledger.
/// Free-form in practice: anything that is not Active/Completed is kept verbatim.
/// A missing status is `Unknown`, which is never counted as active.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum ProjectStatus {
    Active,
    Completed,
    #[default]
    Unknown,
    Other(String),
}

impl ProjectStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Unknown => "Unknown",
            Self::Other(s) => s.as_str(),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl From<&str> for ProjectStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "active" => Self::Active,
            "completed" => Self::Completed,
            "" | "unknown" => Self::Unknown,
            _ => Self::Other(s.trim().to_string()),
        }
    }
}

impl From<Option<String>> for ProjectStatus {
    fn from(s: Option<String>) -> Self {
        s.map_or(Self::Unknown, Self::from)
    }
}

impl From<String> for ProjectStatus {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<ProjectStatus> for String {
    fn from(status: ProjectStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
