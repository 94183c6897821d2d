//! # logpipe-render
//!
//! Renders declarative log-agent plugins (fluentd filters and outputs) into
//! configuration snippets.
//!
//! Each [`Plugin`] names a type and an ordered list of [`Parameter`]s. A
//! parameter is either a literal or a reference to a field of an external
//! secret. Rendering a plugin resolves every parameter through the
//! [`ParameterResolver`], layers the results over a caller-supplied
//! [`RenderContext`], and executes the template its type maps to in the
//! configured [`TemplateSource`].
//!
//! ```ignore
//! use logpipe_render::{
//!     BuiltinTemplates, ParameterResolver, Parameter, Plugin, PluginRenderer, RenderContext,
//! };
//! use logpipe_secure::InMemorySecretProvider;
//!
//! let secrets = InMemorySecretProvider::new("logging")
//!     .with_secret("es-cred", [("password", "changeme")]);
//! let renderer = PluginRenderer::new(BuiltinTemplates, ParameterResolver::new(secrets));
//!
//! let plugin = Plugin::new("elasticsearch", "cluster")
//!     .with_parameter(Parameter::literal("host", "es.logging.svc")?)
//!     .with_parameter(Parameter::literal("user", "elastic")?)
//!     .with_parameter(Parameter::secret("password", "es-cred", "password")?);
//!
//! let base: RenderContext = [("pattern", "nginx")].into_iter().collect();
//! let rendered = renderer.render(&plugin, &base).await?;
//! println!("{}", rendered.text);
//! ```
//!
//! ## Modules
//!
//! - [`model`]: plugin, parameter and pipeline declarations
//! - [`context`]: the string-keyed rendering context
//! - [`template`]: template sources and the builtin fluentd catalogue
//! - [`resolver`]: literal and secret-backed parameter resolution
//! - [`renderer`]: single-plugin rendering and the secret failure policy
//! - [`pipeline`]: whole-pipeline rendering
//! - [`config`]: `.logpipe.toml` loading

pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod renderer;
pub mod resolver;
pub mod template;

pub use config::{load_render_config, RenderConfig, SecretErrorMode};
pub use context::RenderContext;
pub use error::{ConfigError, ModelError, RenderError, RenderResult};
pub use model::{Input, LoggingPipeline, Parameter, ParameterSource, Plugin};
pub use pipeline::{PipelineRenderer, RenderedPipeline, RenderedSection, SectionKind};
pub use renderer::{PluginRenderer, Rendered, SecretFailurePolicy};
pub use resolver::{ParameterResolver, ResolveError, ResolvedParameter, ValueOrigin};
pub use template::{
    BuiltinTemplates, DirectoryTemplates, InlineTemplates, LayeredTemplates, TemplateSource,
};
