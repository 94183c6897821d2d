//! Load `<plugin type>.tera` files from a template directory.

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use super::TemplateSource;
use crate::error::{RenderError, RenderResult};

const TEMPLATE_EXTENSION: &str = "tera";

/// Templates stored as `<dir>/<plugin type>.tera`.
///
/// Files are read on every lookup so edits are picked up without a restart.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    dir: PathBuf,
}

impl DirectoryTemplates {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn template_path(&self, plugin_type: &str) -> Option<PathBuf> {
        let mut components = Path::new(plugin_type).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Some(
                self.dir
                    .join(format!("{plugin_type}.{TEMPLATE_EXTENSION}")),
            ),
            _ => None,
        }
    }
}

impl TemplateSource for DirectoryTemplates {
    fn get(&self, plugin_type: &str) -> RenderResult<Cow<'_, str>> {
        let path = self
            .template_path(plugin_type)
            .ok_or_else(|| RenderError::template_not_found(plugin_type))?;

        match std::fs::read_to_string(&path) {
            Ok(text) => {
                tracing::debug!(plugin_type, ?path, "Loaded template from directory");
                Ok(Cow::Owned(text))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(RenderError::template_not_found(plugin_type))
            }
            Err(source) => Err(RenderError::TemplateLoad {
                plugin_type: plugin_type.to_string(),
                path,
                source,
            }),
        }
    }

    fn plugin_types(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = ?self.dir, error = %e, "Cannot list template directory");
                return Vec::new();
            }
        };

        let mut types: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| path.extension().is_some_and(|ext| ext == TEMPLATE_EXTENSION))
            .filter_map(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
            .collect();
        types.sort();
        types
    }
}
