//! Secrets read from Kubernetes-Secret-shaped YAML files on disk.
//!
//! Layout: `<root>/<namespace>/<name>.yaml`
//!
//! ```yaml
//! data:
//!   password: czNjcjN0        # base64
//! stringData:
//!   user: app                 # plain text, wins over `data`
//! ```

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use secrecy::SecretString;
use serde::Deserialize;

use crate::error::{SecretError, SecretResult};
use crate::provider::SecretProvider;

const SECRET_FILE_EXTENSION: &str = "yaml";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SecretDocument {
    #[serde(default)]
    data: HashMap<String, String>,
    #[serde(default)]
    string_data: HashMap<String, String>,
}

/// Reads one secret file per lookup; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct DirectorySecretProvider {
    root: PathBuf,
    namespace: String,
}

impl DirectorySecretProvider {
    pub fn new(root: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            namespace: namespace.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document backing `name`, or `None` when `name` is not a
    /// single plain path component.
    fn secret_path(&self, name: &str) -> Option<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Some(
                self.root
                    .join(&self.namespace)
                    .join(format!("{name}.{SECRET_FILE_EXTENSION}")),
            ),
            _ => None,
        }
    }

    async fn load(&self, name: &str) -> SecretResult<SecretDocument> {
        // Names that are not a plain file name cannot exist in the store.
        let path = self
            .secret_path(name)
            .ok_or_else(|| SecretError::not_found(&self.namespace, name))?;
        tracing::trace!(
            secret = %name,
            namespace = %self.namespace,
            path = %path.display(),
            "Reading secret document"
        );

        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SecretError::not_found(&self.namespace, name));
            }
            Err(e) => {
                return Err(SecretError::connectivity(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };

        if contents.trim().is_empty() {
            return Ok(SecretDocument::default());
        }
        serde_yaml::from_str(&contents).map_err(|e| SecretError::InvalidData {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl SecretProvider for DirectorySecretProvider {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn get(&self, name: &str, key: &str) -> SecretResult<SecretString> {
        let mut document = self.load(name).await?;

        if let Some(value) = document.string_data.remove(key) {
            return Ok(SecretString::from(value));
        }

        let encoded = document
            .data
            .remove(key)
            .ok_or_else(|| SecretError::missing_key(&self.namespace, name, key))?;
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| SecretError::InvalidData {
                name: name.to_string(),
                reason: format!("key '{key}' is not valid base64: {e}"),
            })?;
        let value = String::from_utf8(bytes).map_err(|_| SecretError::InvalidData {
            name: name.to_string(),
            reason: format!("key '{key}' is not valid UTF-8"),
        })?;
        Ok(SecretString::from(value))
    }
}
