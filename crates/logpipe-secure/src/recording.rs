//! Test doubles for code that consumes a [`SecretProvider`].

use std::sync::Mutex;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::{SecretError, SecretResult};
use crate::provider::SecretProvider;
use crate::reference::SecretReference;

/// Forwards every lookup to an inner provider and records it.
#[derive(Debug)]
pub struct RecordingSecretProvider<P> {
    inner: P,
    calls: Mutex<Vec<SecretReference>>,
}

impl<P: SecretProvider> RecordingSecretProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every lookup seen so far, in call order.
    pub fn calls(&self) -> Vec<SecretReference> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
    }
}

#[async_trait]
impl<P: SecretProvider> SecretProvider for RecordingSecretProvider<P> {
    fn namespace(&self) -> &str {
        self.inner.namespace()
    }

    async fn get(&self, name: &str, key: &str) -> SecretResult<SecretString> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(SecretReference::new(name, key));
        }
        self.inner.get(name, key).await
    }
}

/// A store that is never reachable.
#[derive(Debug, Clone)]
pub struct UnreachableSecretProvider {
    namespace: String,
    reason: String,
}

impl UnreachableSecretProvider {
    pub fn new(namespace: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl SecretProvider for UnreachableSecretProvider {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn get(&self, _name: &str, _key: &str) -> SecretResult<SecretString> {
        Err(SecretError::connectivity(self.reason.clone()))
    }
}
