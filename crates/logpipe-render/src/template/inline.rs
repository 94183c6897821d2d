//! Templates registered in memory by the caller.

use std::borrow::Cow;
use std::collections::BTreeMap;

use super::TemplateSource;
use crate::error::{RenderError, RenderResult};

#[derive(Debug, Clone, Default)]
pub struct InlineTemplates {
    templates: BTreeMap<String, String>,
}

impl InlineTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_template(mut self, plugin_type: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(plugin_type, text);
        self
    }

    pub fn insert(&mut self, plugin_type: impl Into<String>, text: impl Into<String>) {
        self.templates.insert(plugin_type.into(), text.into());
    }
}

impl TemplateSource for InlineTemplates {
    fn get(&self, plugin_type: &str) -> RenderResult<Cow<'_, str>> {
        self.templates
            .get(plugin_type)
            .map(|text| Cow::Borrowed(text.as_str()))
            .ok_or_else(|| RenderError::template_not_found(plugin_type))
    }

    fn plugin_types(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let source = InlineTemplates::new().with_template("tail", "path {{ path }}");
        assert_eq!(source.get("tail").unwrap(), "path {{ path }}");
        assert!(source.get("s3").is_err());
        assert_eq!(source.plugin_types(), vec!["tail".to_string()]);
    }
}
