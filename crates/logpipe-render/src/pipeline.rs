//! Render a whole [`LoggingPipeline`]: every filter, then every output.

use std::fmt;

use logpipe_secure::SecretProvider;
use serde::Serialize;

use crate::context::RenderContext;
use crate::error::RenderResult;
use crate::model::{Input, LoggingPipeline, Plugin};
use crate::renderer::PluginRenderer;

/// Context key holding the fluentd tag pattern.
pub const PATTERN_KEY: &str = "pattern";
/// Prefix of the context keys carrying input labels.
pub const LABEL_KEY_PREFIX: &str = "label_";

const APP_LABEL: &str = "app";
const MATCH_ALL_PATTERN: &str = "**";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Filter,
    Output,
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter => f.write_str("filter"),
            Self::Output => f.write_str("output"),
        }
    }
}

/// One rendered plugin of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSection {
    pub kind: SectionKind,
    pub name: String,
    pub plugin_type: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedPipeline {
    pub sections: Vec<RenderedSection>,
}

impl RenderedPipeline {
    /// All sections joined into one configuration file, one blank line apart.
    pub fn to_config_string(&self) -> String {
        let mut config = String::new();
        for (index, section) in self.sections.iter().enumerate() {
            if index > 0 {
                config.push('\n');
            }
            config.push_str(&section.text);
            if !section.text.ends_with('\n') {
                config.push('\n');
            }
        }
        config
    }
}

/// Base context derived from the input selector.
///
/// Every label is exposed as `label_<key>`. `pattern` is the `app` label when
/// present, otherwise the label values ordered by key and joined with `.`,
/// and `**` when there are no labels.
pub fn input_context(input: &Input) -> RenderContext {
    let mut context: RenderContext = input
        .label
        .iter()
        .map(|(key, value)| (format!("{LABEL_KEY_PREFIX}{key}"), value.clone()))
        .collect();

    let pattern = match input.label.get(APP_LABEL) {
        Some(app) => app.clone(),
        None if input.label.is_empty() => MATCH_ALL_PATTERN.to_string(),
        None => input
            .label
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("."),
    };
    context.insert(PATTERN_KEY, pattern);
    context
}

/// Renders pipelines plugin by plugin, each over a fresh copy of the base.
#[derive(Debug)]
pub struct PipelineRenderer<P> {
    renderer: PluginRenderer<P>,
    defaults: RenderContext,
}

impl<P: SecretProvider> PipelineRenderer<P> {
    pub fn new(renderer: PluginRenderer<P>) -> Self {
        Self {
            renderer,
            defaults: RenderContext::new(),
        }
    }

    /// Entries placed under the input-derived base; input entries win.
    #[must_use]
    pub fn with_defaults(mut self, defaults: RenderContext) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn renderer(&self) -> &PluginRenderer<P> {
        &self.renderer
    }

    pub fn base_context(&self, input: &Input) -> RenderContext {
        let mut base = self.defaults.clone();
        base.extend(&input_context(input));
        base
    }

    /// Stops at the first plugin that fails.
    pub async fn render(&self, pipeline: &LoggingPipeline) -> RenderResult<RenderedPipeline> {
        let base = self.base_context(&pipeline.input);
        let plugins = pipeline
            .filter
            .iter()
            .map(|plugin| (SectionKind::Filter, plugin))
            .chain(pipeline.output.iter().map(|plugin| (SectionKind::Output, plugin)));

        let mut sections = Vec::with_capacity(pipeline.filter.len() + pipeline.output.len());
        for (kind, plugin) in plugins {
            sections.push(self.render_section(kind, plugin, &base).await?);
        }

        tracing::info!(sections = sections.len(), "Rendered logging pipeline");
        Ok(RenderedPipeline { sections })
    }

    async fn render_section(
        &self,
        kind: SectionKind,
        plugin: &Plugin,
        base: &RenderContext,
    ) -> RenderResult<RenderedSection> {
        let rendered = self.renderer.render(plugin, base).await?;
        Ok(RenderedSection {
            kind,
            name: plugin.name.clone(),
            plugin_type: plugin.plugin_type.clone(),
            text: rendered.text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn input(labels: &[(&str, &str)]) -> Input {
        Input {
            label: labels
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_pattern_prefers_app_label() {
        let context = input_context(&input(&[("app", "nginx"), ("tier", "web")]));
        assert_eq!(context.get(PATTERN_KEY), Some("nginx"));
        assert_eq!(context.get("label_tier"), Some("web"));
        assert_eq!(context.get("label_app"), Some("nginx"));
    }

    #[test]
    fn test_pattern_joins_sorted_labels() {
        let context = input_context(&input(&[("tier", "web"), ("component", "api")]));
        assert_eq!(context.get(PATTERN_KEY), Some("api.web"));
    }

    #[test]
    fn test_pattern_without_labels() {
        let context = input_context(&Input::default());
        assert_eq!(context.get(PATTERN_KEY), Some("**"));
        assert_eq!(context.len(), 1);
    }

    #[test]
    fn test_config_string_separates_sections() {
        let section = |text: &str| RenderedSection {
            kind: SectionKind::Output,
            name: String::new(),
            plugin_type: "stdout".to_string(),
            text: text.to_string(),
        };
        let pipeline = RenderedPipeline {
            sections: vec![section("a\n"), section("b")],
        };
        assert_eq!(pipeline.to_config_string(), "a\n\nb\n");
        assert_eq!(RenderedPipeline::default().to_config_string(), "");
    }
}
