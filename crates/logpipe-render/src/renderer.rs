//! # Plugin Renderer
//!
//! Turns one [`Plugin`] plus a base [`RenderContext`] into agent configuration
//! text. The steps run in a fixed order:
//!
//! 1. Fetch the template for the plugin type. An unknown type aborts before
//!    the context is touched.
//! 2. Resolve every parameter in declared order and write it into the
//!    context. Later parameters overwrite earlier ones with the same name.
//!    Failed secret lookups are handled by the [`SecretFailurePolicy`].
//! 3. Parse the template.
//! 4. Execute it against the merged context.

use std::sync::Arc;

use logpipe_secure::SecretProvider;

use crate::context::RenderContext;
use crate::error::{RenderError, RenderResult};
use crate::model::Plugin;
use crate::resolver::{ParameterResolver, ResolveError};
use crate::template::{PluginTemplate, TemplateSource};

/// What to do when a secret-backed parameter cannot be resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SecretFailurePolicy {
    /// Log the failure and render the parameter as an empty string.
    #[default]
    Degrade,
    /// Log the failure and render the parameter with this value.
    Default(String),
    /// Abort the render with [`RenderError::SecretResolution`].
    Fail,
}

/// Output of [`PluginRenderer::render`]: the text and the merged context it
/// was executed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub context: RenderContext,
}

/// Renders plugins against injected template and secret sources.
///
/// The renderer holds no per-render state. One instance can serve
/// concurrent renders as long as each render gets its own context.
#[derive(Debug)]
pub struct PluginRenderer<P> {
    templates: Arc<dyn TemplateSource>,
    resolver: ParameterResolver<P>,
    policy: SecretFailurePolicy,
}

impl<P: SecretProvider> PluginRenderer<P> {
    pub fn new(templates: impl TemplateSource + 'static, resolver: ParameterResolver<P>) -> Self {
        Self {
            templates: Arc::new(templates),
            resolver,
            policy: SecretFailurePolicy::default(),
        }
    }

    /// Share an already wrapped template source.
    pub fn with_shared_templates(
        templates: Arc<dyn TemplateSource>,
        resolver: ParameterResolver<P>,
    ) -> Self {
        Self {
            templates,
            resolver,
            policy: SecretFailurePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: SecretFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &SecretFailurePolicy {
        &self.policy
    }

    pub fn templates(&self) -> &dyn TemplateSource {
        self.templates.as_ref()
    }

    pub fn resolver(&self) -> &ParameterResolver<P> {
        &self.resolver
    }

    /// Render over a copy of `base`. The caller's context is never modified.
    pub async fn render(&self, plugin: &Plugin, base: &RenderContext) -> RenderResult<Rendered> {
        let mut context = base.clone();
        let text = self.render_into(plugin, &mut context).await?;
        Ok(Rendered { text, context })
    }

    /// Render writing resolved parameters straight into `context`.
    ///
    /// Writes made before a failure are kept.
    #[tracing::instrument(skip_all, fields(plugin_type = %plugin.plugin_type, plugin_name = %plugin.name))]
    pub async fn render_into(
        &self,
        plugin: &Plugin,
        context: &mut RenderContext,
    ) -> RenderResult<String> {
        let raw = self.templates.get(&plugin.plugin_type)?;

        for parameter in &plugin.parameters {
            match self.resolver.resolve(parameter).await {
                Ok(resolved) => {
                    context.insert(resolved.key, resolved.value);
                }
                Err(err) => {
                    let fallback = self.recover(err)?;
                    context.insert(parameter.name(), fallback);
                }
            }
        }

        let template = PluginTemplate::parse(&plugin.plugin_type, &raw)?;
        let text = template.execute(context)?;

        tracing::debug!(
            parameters = plugin.parameters.len(),
            bytes = text.len(),
            "Rendered plugin"
        );
        Ok(text)
    }

    /// Apply the failure policy, returning the value to write instead.
    fn recover(&self, err: ResolveError) -> RenderResult<String> {
        let fallback = match &self.policy {
            SecretFailurePolicy::Fail => return Err(RenderError::SecretResolution(err)),
            SecretFailurePolicy::Degrade => String::new(),
            SecretFailurePolicy::Default(value) => value.clone(),
        };

        tracing::warn!(
            parameter = %err.parameter,
            secret = %err.reference.secret_name,
            key = %err.reference.key,
            namespace = %self.resolver.provider().namespace(),
            error = %err.source,
            "Secret lookup failed, substituting fallback value"
        );
        Ok(fallback)
    }
}
