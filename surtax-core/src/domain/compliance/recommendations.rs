// surtax-core/src/domain/compliance/recommendations.rs

/// The five governance dimensions, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    FinancialManagement,
    SchedulePerformance,
    UseOfFunds,
    TransparencyReporting,
    VendorPerformance,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Self::FinancialManagement,
        Self::SchedulePerformance,
        Self::UseOfFunds,
        Self::TransparencyReporting,
        Self::VendorPerformance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::FinancialManagement => "Financial Management",
            Self::SchedulePerformance => "Schedule Performance",
            Self::UseOfFunds => "Use of Funds",
            Self::TransparencyReporting => "Transparency & Reporting",
            Self::VendorPerformance => "Vendor Performance",
        }
    }

    /// Canned advice keyed by (dimension, whether the driving metric crossed its threshold).
    pub fn recommendations(&self, needs_attention: bool) -> &'static [&'static str] {
        match (self, needs_attention) {
            (Self::FinancialManagement, true) => &[
                "Continue monitoring projects approaching budget limits",
                "Review change order approval processes",
            ],
            (Self::FinancialManagement, false) => {
                &["All projects within acceptable budget variance"]
            }
            (Self::SchedulePerformance, true) => &[
                "Investigate root causes of delays",
                "Consider schedule recovery plans",
            ],
            (Self::SchedulePerformance, false) => &["Schedule performance is acceptable"],
            (Self::UseOfFunds, true) => &["Review categorization of expenditures"],
            (Self::UseOfFunds, false) => &["All funds used for voter-approved purposes"],
            (Self::TransparencyReporting, true) => &["Complete outstanding audits"],
            (Self::TransparencyReporting, false) => &["All transparency requirements met"],
            (Self::VendorPerformance, true) => &["Review vendors with high change order rates"],
            (Self::VendorPerformance, false) => &["Vendor performance is satisfactory"],
        }
    }
}
