// surtax-core/src/domain/concerns/guidance.rs
//
// Static briefing material shown next to each concern type.

use serde::Serialize;

use super::concern::ConcernType;

#[derive(Debug, Clone, Serialize)]
pub struct ConcernGuidance {
    pub title: &'static str,
    pub description: &'static str,
    pub why_it_matters: &'static str,
    pub questions_to_ask: &'static [&'static str],
    pub typical_causes: &'static [&'static str],
}

impl ConcernType {
    pub fn guidance(&self) -> ConcernGuidance {
        match self {
            Self::ScheduleDelay => ConcernGuidance {
                title: "Schedule Delays",
                description: "Projects running behind their planned completion date.",
                why_it_matters: "Delays can increase costs, disrupt learning environments and point to contractor or planning issues.",
                questions_to_ask: &[
                    "What is causing the delay?",
                    "Has the contractor provided a recovery schedule?",
                    "Are there additional costs associated with the delay?",
                    "Does this affect any other projects or school operations?",
                ],
                typical_causes: &[
                    "Weather",
                    "Material shortages",
                    "Permitting issues",
                    "Design changes",
                    "Contractor performance",
                ],
            },
            Self::CostOverrun => ConcernGuidance {
                title: "Cost Overruns",
                description: "Projects exceeding their original approved budget.",
                why_it_matters: "Overruns reduce the funds available for other projects and may signal weak initial planning or scope creep.",
                questions_to_ask: &[
                    "What caused the cost increase?",
                    "Was this foreseeable during planning?",
                    "Can scope be reduced to stay within budget?",
                    "How does this affect the overall surtax program budget?",
                ],
                typical_causes: &[
                    "Unforeseen conditions",
                    "Design errors",
                    "Material price increases",
                    "Scope changes",
                    "Change orders",
                ],
            },
            Self::VendorPattern => ConcernGuidance {
                title: "Vendor Patterns",
                description: "Contractors with repeated change orders across multiple projects.",
                why_it_matters: "Recurring change orders may reflect bidding practices, estimating issues or vendor performance worth monitoring.",
                questions_to_ask: &[
                    "Is this vendor consistently under-bidding?",
                    "Are the change orders for legitimate unforeseen conditions?",
                    "How does this vendor compare to others?",
                    "Should this affect future contract awards?",
                ],
                typical_causes: &[
                    "Aggressive bidding",
                    "Incomplete specifications",
                    "Complex projects",
                    "Market conditions",
                ],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_has_questions() {
        for t in [
            ConcernType::ScheduleDelay,
            ConcernType::CostOverrun,
            ConcernType::VendorPattern,
        ] {
            let g = t.guidance();
            assert!(!g.questions_to_ask.is_empty());
            assert!(!g.typical_causes.is_empty());
        }
    }
}
