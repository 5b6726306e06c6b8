// surtax-core/src/domain/compliance/config.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_APPROVED_CATEGORIES: [&str; 5] = [
    "New Construction",
    "Renovation",
    "Technology",
    "Safety & Security",
    "Maintenance",
];

/// Scorer inputs that do not come from the ledger.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Validate)]
#[serde(default)]
pub struct ComplianceConfig {
    /// Categories voters approved surtax spending for.
    #[validate(length(min = 1, message = "At least one approved category is required"))]
    pub approved_categories: Vec<String>,
    pub transparency: TransparencyChecklist,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            approved_categories: DEFAULT_APPROVED_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            transparency: TransparencyChecklist::default(),
        }
    }
}

impl ComplianceConfig {
    pub fn is_approved(&self, category: &str) -> bool {
        self.approved_categories.iter().any(|c| c == category)
    }
}

/// Governance attestations kept outside the ledger.
///
/// The default assumes the routine obligations (meetings, annual report,
/// website) are kept and the two audits are still outstanding.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct TransparencyChecklist {
    pub public_meetings: bool,
    pub annual_report: bool,
    pub website_updated: bool,
    pub financial_audit: bool,
    pub performance_audit: bool,
}

impl Default for TransparencyChecklist {
    fn default() -> Self {
        Self {
            public_meetings: true,
            annual_report: true,
            website_updated: true,
            financial_audit: false,
            performance_audit: false,
        }
    }
}

impl TransparencyChecklist {
    pub fn none_met() -> Self {
        Self {
            public_meetings: false,
            annual_report: false,
            website_updated: false,
            financial_audit: false,
            performance_audit: false,
        }
    }

    pub fn all_met() -> Self {
        Self {
            public_meetings: true,
            annual_report: true,
            website_updated: true,
            financial_audit: true,
            performance_audit: true,
        }
    }

    pub fn items(&self) -> [(&'static str, bool); 5] {
        [
            ("Public Meetings", self.public_meetings),
            ("Annual Report", self.annual_report),
            ("Website Updated", self.website_updated),
            ("Financial Audit", self.financial_audit),
            ("Performance Audit", self.performance_audit),
        ]
    }

    pub fn met_count(&self) -> usize {
        self.items().iter().filter(|(_, met)| *met).count()
    }
}
