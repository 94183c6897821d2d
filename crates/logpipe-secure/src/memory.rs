//! In-process secret store.

use std::collections::HashMap;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::error::{SecretError, SecretResult};
use crate::provider::SecretProvider;

/// Secrets held in memory, scoped to one namespace.
///
/// Useful for embedding callers that already hold credentials and for
/// deterministic tests.
#[derive(Debug, Default)]
pub struct InMemorySecretProvider {
    namespace: String,
    secrets: HashMap<String, HashMap<String, SecretString>>,
}

impl InMemorySecretProvider {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            secrets: HashMap::new(),
        }
    }

    /// Builder form of [`insert`](Self::insert) for a whole secret.
    #[must_use]
    pub fn with_secret<I, K, V>(mut self, name: impl Into<String>, data: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entry = self.secrets.entry(name.into()).or_default();
        for (key, value) in data {
            entry.insert(key.into(), SecretString::from(value.into()));
        }
        self
    }

    /// Store (or overwrite) one field of a secret.
    pub fn insert(&mut self, name: impl Into<String>, key: impl Into<String>, value: impl Into<String>) {
        self.secrets
            .entry(name.into())
            .or_default()
            .insert(key.into(), SecretString::from(value.into()));
    }

    /// Remove a whole secret. Returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.secrets.remove(name).is_some()
    }
}

#[async_trait]
impl SecretProvider for InMemorySecretProvider {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn get(&self, name: &str, key: &str) -> SecretResult<SecretString> {
        let data = self
            .secrets
            .get(name)
            .ok_or_else(|| SecretError::not_found(&self.namespace, name))?;
        let value = data
            .get(key)
            .ok_or_else(|| SecretError::missing_key(&self.namespace, name, key))?;
        Ok(SecretString::from(value.expose_secret().to_owned()))
    }
}
