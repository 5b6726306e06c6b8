// surtax-core/src/application/ports/renderer.rs

use crate::error::SurtaxError;

/// Turns a template plus a JSON context into text (the committee briefing).
pub trait TemplateEngine: Send + Sync {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, SurtaxError>;
}
