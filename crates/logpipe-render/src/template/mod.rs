//! Plugin templates: where template text comes from and how it is executed.
//!
//! A [`TemplateSource`] maps a plugin type to raw template text. Sources are
//! read-only and may be shared across concurrent renders. Template text uses
//! the Tera language (`{{ key }}` substitutes a context entry).

mod builtin;
mod engine;
mod inline;
mod loader;

use std::borrow::Cow;
use std::sync::Arc;

pub use builtin::BuiltinTemplates;
pub(crate) use engine::PluginTemplate;
pub use inline::InlineTemplates;
pub use loader::DirectoryTemplates;

use crate::error::{RenderError, RenderResult};

/// Static lookup of template text by plugin type.
pub trait TemplateSource: Send + Sync + std::fmt::Debug {
    /// Raw template text for `plugin_type`, or
    /// [`RenderError::TemplateNotFound`] when the type is unknown.
    fn get(&self, plugin_type: &str) -> RenderResult<Cow<'_, str>>;

    /// Plugin types this source can serve, sorted.
    fn plugin_types(&self) -> Vec<String>;
}

impl<T> TemplateSource for Arc<T>
where
    T: TemplateSource + ?Sized,
{
    fn get(&self, plugin_type: &str) -> RenderResult<Cow<'_, str>> {
        (**self).get(plugin_type)
    }

    fn plugin_types(&self) -> Vec<String> {
        (**self).plugin_types()
    }
}

/// Ordered stack of sources; the first one that knows a type wins.
#[derive(Debug, Default)]
pub struct LayeredTemplates {
    layers: Vec<Box<dyn TemplateSource>>,
}

impl LayeredTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer below the existing ones.
    #[must_use]
    pub fn with_layer(mut self, source: impl TemplateSource + 'static) -> Self {
        self.layers.push(Box::new(source));
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl TemplateSource for LayeredTemplates {
    fn get(&self, plugin_type: &str) -> RenderResult<Cow<'_, str>> {
        for layer in &self.layers {
            match layer.get(plugin_type) {
                Err(RenderError::TemplateNotFound { .. }) => continue,
                found => return found,
            }
        }
        Err(RenderError::template_not_found(plugin_type))
    }

    fn plugin_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self
            .layers
            .iter()
            .flat_map(|layer| layer.plugin_types())
            .collect();
        types.sort();
        types.dedup();
        types
    }
}
