// surtax-core/src/infrastructure/render/jinja.rs

// Renders committee documents from JSON read models. Money and percentages go
// through the same formatters the CLI tables use.

use minijinja::Environment;

use crate::application::ports::TemplateEngine;
use crate::domain::format::{currency_compact, currency_full, percentage};
use crate::error::SurtaxError;
use crate::infrastructure::error::InfrastructureError;

pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        env.add_filter("currency", currency_compact);
        env.add_filter("currency_full", currency_full);
        env.add_filter("percentage", percentage);

        Self { env }
    }
}

impl Default for JinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for JinjaRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, SurtaxError> {
        self.env
            .render_str(template, context)
            .map_err(|e| SurtaxError::Infrastructure(InfrastructureError::TemplateError(e)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;

    #[test]
    fn test_money_filters() -> Result<()> {
        let renderer = JinjaRenderer::new();
        let out = renderer.render(
            "Budget {{ budget | currency }}, {{ paid | currency_full }} spent ({{ pct | percentage }})",
            &json!({ "budget": 2_460_000.0, "paid": 20000, "pct": 12.5 }),
        )?;
        insta::assert_snapshot!(out, @"Budget $2.5M, $20,000 spent (12.5%)");
        Ok(())
    }

    #[test]
    fn test_blocks_do_not_leave_blank_lines() -> Result<()> {
        let renderer = JinjaRenderer::new();
        let out = renderer.render(
            "{% for s in schools %}\n- {{ s }}\n{% endfor %}\n",
            &json!({ "schools": ["Forest High", "Dunnellon Middle"] }),
        )?;
        assert_eq!(out, "- Forest High\n- Dunnellon Middle\n");
        Ok(())
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let renderer = JinjaRenderer::new();
        let err = renderer.render("{{ unclosed ", &json!({})).unwrap_err();
        assert!(matches!(
            err,
            SurtaxError::Infrastructure(InfrastructureError::TemplateError(_))
        ));
    }
}
