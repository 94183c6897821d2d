//! Render configuration: secret namespace, failure policy and template
//! search paths.
//!
//! Loaded from `.logpipe.toml`; every field has a default so an empty file
//! (or no file at all) is a valid configuration.

pub(crate) mod loader;

pub use loader::{expand_path, load_render_config};

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::renderer::SecretFailurePolicy;
use crate::template::{BuiltinTemplates, DirectoryTemplates, LayeredTemplates};

fn default_namespace() -> String {
    "default".to_string()
}

fn default_secret_timeout_ms() -> u64 {
    5_000
}

/// Config-file spelling of [`SecretFailurePolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretErrorMode {
    #[default]
    Degrade,
    Default,
    Fail,
}

impl FromStr for SecretErrorMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "degrade" => Ok(Self::Degrade),
            "default" => Ok(Self::Default),
            "fail" => Ok(Self::Fail),
            _ => Err(ConfigError::InvalidValue {
                field: "on-secret-error",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RenderConfig {
    /// Namespace every secret lookup is scoped to. Default: "default".
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// What to do when a secret lookup fails. Default: degrade.
    #[serde(default)]
    pub on_secret_error: SecretErrorMode,

    /// Substitute used when `on-secret-error = "default"`.
    #[serde(default)]
    pub secret_default: String,

    /// Upper bound for one secret lookup in milliseconds; 0 disables it.
    #[serde(default = "default_secret_timeout_ms")]
    pub secret_timeout_ms: u64,

    /// Directories searched for `<type>.tera`, ahead of the builtins.
    #[serde(default)]
    pub template_dirs: Vec<String>,

    /// Root of the directory-backed secret store.
    pub secrets_dir: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            on_secret_error: SecretErrorMode::default(),
            secret_default: String::new(),
            secret_timeout_ms: default_secret_timeout_ms(),
            template_dirs: Vec::new(),
            secrets_dir: None,
        }
    }
}

impl RenderConfig {
    /// Load an explicit config file; unlike discovery, errors propagate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn secret_failure_policy(&self) -> SecretFailurePolicy {
        match self.on_secret_error {
            SecretErrorMode::Degrade => SecretFailurePolicy::Degrade,
            SecretErrorMode::Default => SecretFailurePolicy::Default(self.secret_default.clone()),
            SecretErrorMode::Fail => SecretFailurePolicy::Fail,
        }
    }

    pub fn secret_timeout(&self) -> Option<Duration> {
        (self.secret_timeout_ms > 0).then(|| Duration::from_millis(self.secret_timeout_ms))
    }

    /// Configured template directories in order, then the builtin catalogue.
    pub fn template_source(&self) -> LayeredTemplates {
        self.template_dirs
            .iter()
            .map(|dir| DirectoryTemplates::new(expand_path(dir)))
            .fold(LayeredTemplates::new(), |layers, dir| layers.with_layer(dir))
            .with_layer(BuiltinTemplates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateSource;

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.namespace, "default");
        assert_eq!(config.secret_failure_policy(), SecretFailurePolicy::Degrade);
        assert_eq!(config.secret_timeout(), Some(Duration::from_secs(5)));
        assert!(config.template_dirs.is_empty());
        assert!(config.secrets_dir.is_none());
    }

    #[test]
    fn test_empty_file_equals_defaults() {
        let config: RenderConfig = toml::from_str("").unwrap();
        assert_eq!(config.namespace, "default");
        assert_eq!(config.secret_timeout_ms, 5_000);
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_str = r#"
namespace = "logging"
on-secret-error = "default"
secret-default = "REDACTED"
secret-timeout-ms = 0
template-dirs = ["./templates", "~/logpipe/templates"]
secrets-dir = "/var/run/secrets/logpipe"
"#;
        let config: RenderConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.namespace, "logging");
        assert_eq!(
            config.secret_failure_policy(),
            SecretFailurePolicy::Default("REDACTED".to_string())
        );
        assert_eq!(config.secret_timeout(), None);
        assert_eq!(config.template_dirs.len(), 2);
        assert_eq!(config.secrets_dir.as_deref(), Some("/var/run/secrets/logpipe"));
    }

    #[test]
    fn test_rejects_unknown_policy() {
        assert!(toml::from_str::<RenderConfig>("on-secret-error = \"ignore\"").is_err());
        assert!("ignore".parse::<SecretErrorMode>().is_err());
        assert_eq!("FAIL".parse::<SecretErrorMode>().unwrap(), SecretErrorMode::Fail);
    }

    #[test]
    fn test_template_source_ends_with_builtins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tail.tera"), "path {{ path }}").unwrap();

        let config = RenderConfig {
            template_dirs: vec![dir.path().to_string_lossy().to_string()],
            ..Default::default()
        };
        let source = config.template_source();
        assert_eq!(source.len(), 2);
        assert!(source.get("tail").is_ok());
        assert!(source.get("stdout").is_ok());
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "namespace = [").unwrap();

        let err = RenderConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }
}
