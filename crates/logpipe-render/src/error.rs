//! # Render Error Types
//!
//! Structural and template failures abort a render and surface to the caller.
//! Secret lookup failures only surface here when the active
//! [`SecretFailurePolicy`](crate::SecretFailurePolicy) says so.

use std::path::PathBuf;

use thiserror::Error;

use crate::resolver::ResolveError;

/// Result alias for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no template registered for plugin type '{plugin_type}'")]
    TemplateNotFound { plugin_type: String },

    #[error("failed to load template for plugin type '{plugin_type}' from {path}: {source}")]
    TemplateLoad {
        plugin_type: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse template for plugin type '{plugin_type}': {source}")]
    TemplateParse {
        plugin_type: String,
        source: tera::Error,
    },

    #[error("failed to execute template for plugin type '{plugin_type}': {source}")]
    TemplateExecution {
        plugin_type: String,
        source: tera::Error,
    },

    #[error(transparent)]
    SecretResolution(#[from] ResolveError),
}

impl RenderError {
    pub fn template_not_found(plugin_type: impl Into<String>) -> Self {
        Self::TemplateNotFound {
            plugin_type: plugin_type.into(),
        }
    }

    /// Plugin type the failing template belongs to, when there is one.
    pub fn plugin_type(&self) -> Option<&str> {
        match self {
            Self::TemplateNotFound { plugin_type }
            | Self::TemplateLoad { plugin_type, .. }
            | Self::TemplateParse { plugin_type, .. }
            | Self::TemplateExecution { plugin_type, .. } => Some(plugin_type),
            Self::SecretResolution(_) => None,
        }
    }
}

/// Errors raised while building plugin and pipeline values from documents.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("parameter name must not be empty")]
    EmptyParameterName,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        source: serde_yaml::Error,
    },
}

/// Errors raised while loading [`RenderConfig`](crate::RenderConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value '{value}' for {field}")]
    InvalidValue { field: &'static str, value: String },
}
