// surtax-core/src/application/mod.rs

pub mod briefing;
pub mod ports;
pub mod report;
pub mod service;

// --- RE-EXPORTS (FACADE PATTERN) ---
// The CLI does `use surtax_core::application::{OversightService, OversightConfig};`
// without knowing the file layout.

pub use briefing::{BRIEFING_TEMPLATE, render_briefing};
pub use report::{
    AgendaItem, AgendaKind, AnnualReport, MeetingAgenda, ProgramOverview, ProjectSummary,
    VendorReport,
};
pub use service::{OversightConfig, OversightService, ProjectDetail};
