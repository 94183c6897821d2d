//! Parse and execute a single plugin template with Tera.

use tera::Tera;

use crate::context::RenderContext;
use crate::error::{RenderError, RenderResult};

const TEMPLATE_NAME: &str = "PluginTemplate";

/// A parsed template, ready to be executed against a context.
#[derive(Debug)]
pub(crate) struct PluginTemplate {
    plugin_type: String,
    tera: Tera,
}

impl PluginTemplate {
    /// Parse `raw`. Syntax errors become [`RenderError::TemplateParse`].
    pub fn parse(plugin_type: &str, raw: &str) -> RenderResult<Self> {
        let mut tera = Tera::default();
        // Output is agent configuration, not markup.
        tera.autoescape_on(Vec::new());
        tera.add_raw_template(TEMPLATE_NAME, raw)
            .map_err(|source| RenderError::TemplateParse {
                plugin_type: plugin_type.to_string(),
                source,
            })?;

        Ok(Self {
            plugin_type: plugin_type.to_string(),
            tera,
        })
    }

    /// Execute against `context`. A reference to an absent key, or any other
    /// runtime fault, becomes [`RenderError::TemplateExecution`].
    pub fn execute(&self, context: &RenderContext) -> RenderResult<String> {
        self.tera
            .render(TEMPLATE_NAME, &context.to_tera_context())
            .map_err(|source| RenderError::TemplateExecution {
                plugin_type: self.plugin_type.clone(),
                source,
            })
    }
}
