//! `logpipe-ctl render` and `logpipe-ctl plugin`

use std::path::Path;

use anyhow::Context as _;
use logpipe_render::{LoggingPipeline, PipelineRenderer, Plugin, RenderConfig, RenderContext};

use super::build_renderer;
use crate::{output, OutputFormat};

pub(crate) async fn handle_render_command(
    config: &RenderConfig,
    path: &Path,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let pipeline = LoggingPipeline::load(path)?;
    let renderer = PipelineRenderer::new(build_renderer(config));

    let rendered = renderer
        .render(&pipeline)
        .await
        .with_context(|| format!("cannot render {}", path.display()))?;

    match format {
        OutputFormat::Config => output::raw(&rendered.to_config_string()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&rendered)?;
            json.push('\n');
            output::raw(&json);
        }
    }
    output::success(format!(
        "Rendered {} section(s) from {}",
        rendered.sections.len(),
        path.display()
    ));
    Ok(())
}

pub(crate) async fn handle_plugin_command(
    config: &RenderConfig,
    path: &Path,
    set: Vec<(String, String)>,
) -> anyhow::Result<()> {
    let plugin = Plugin::load(path)?;
    let base: RenderContext = set.into_iter().collect();
    let renderer = build_renderer(config);

    let rendered = renderer
        .render(&plugin, &base)
        .await
        .with_context(|| format!("cannot render {}", path.display()))?;

    output::raw(&rendered.text);
    if !rendered.text.ends_with('\n') {
        output::raw("\n");
    }
    Ok(())
}
