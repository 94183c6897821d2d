//! Command dispatch and the wiring from configuration to renderers.

mod render;
mod templates;

use std::sync::Arc;

use anyhow::Context as _;
use logpipe_render::config::expand_path;
use logpipe_render::{load_render_config, ParameterResolver, PluginRenderer, RenderConfig};
use logpipe_secure::{DirectorySecretProvider, InMemorySecretProvider, SecretProvider};

use crate::{Cli, Commands, RenderOptions};

pub(crate) type SharedProvider = Arc<dyn SecretProvider>;

pub(crate) async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        None => load_render_config(),
    };

    match cli.command {
        Commands::Render {
            pipeline,
            options,
            format,
        } => {
            let config = apply_overrides(config, &options);
            render::handle_render_command(&config, &pipeline, format).await
        }
        Commands::Plugin {
            plugin,
            options,
            set,
        } => {
            let config = apply_overrides(config, &options);
            render::handle_plugin_command(&config, &plugin, set).await
        }
        Commands::Templates { template_dirs } => {
            let mut config = config;
            prepend_template_dirs(&mut config, &template_dirs);
            templates::handle_templates_command(&config);
            Ok(())
        }
    }
}

/// Command-line flags win over the config file.
pub(crate) fn apply_overrides(mut config: RenderConfig, options: &RenderOptions) -> RenderConfig {
    if let Some(namespace) = &options.namespace {
        config.namespace.clone_from(namespace);
    }
    if let Some(dir) = &options.secrets_dir {
        config.secrets_dir = Some(dir.clone());
    }
    if let Some(mode) = options.on_secret_error {
        config.on_secret_error = mode;
    }
    if let Some(value) = &options.secret_default {
        config.secret_default.clone_from(value);
    }
    prepend_template_dirs(&mut config, &options.template_dirs);
    config
}

fn prepend_template_dirs(config: &mut RenderConfig, dirs: &[String]) {
    if !dirs.is_empty() {
        config.template_dirs.splice(0..0, dirs.iter().cloned());
    }
}

pub(crate) fn secret_provider(config: &RenderConfig) -> SharedProvider {
    match &config.secrets_dir {
        Some(dir) => Arc::new(DirectorySecretProvider::new(
            expand_path(dir),
            config.namespace.clone(),
        )),
        None => {
            tracing::debug!("No secret store configured; secret parameters will not resolve");
            Arc::new(InMemorySecretProvider::new(config.namespace.clone()))
        }
    }
}

pub(crate) fn build_renderer(config: &RenderConfig) -> PluginRenderer<SharedProvider> {
    let mut resolver = ParameterResolver::new(secret_provider(config));
    if let Some(timeout) = config.secret_timeout() {
        resolver = resolver.with_timeout(timeout);
    }
    PluginRenderer::new(config.template_source(), resolver)
        .with_policy(config.secret_failure_policy())
}
