//! The [`SecretProvider`] strategy trait.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::SecretResult;
use crate::reference::SecretReference;

/// Live lookup of a single secret field.
///
/// Implementations perform a fresh lookup on every call and never cache.
/// The lookup namespace is fixed when the provider is constructed.
#[async_trait]
pub trait SecretProvider: Send + Sync + std::fmt::Debug {
    /// Namespace every lookup of this provider is scoped to.
    fn namespace(&self) -> &str;

    /// Fetch the value stored under `key` in the secret called `name`.
    async fn get(&self, name: &str, key: &str) -> SecretResult<SecretString>;

    /// Convenience wrapper taking a [`SecretReference`].
    async fn resolve(&self, reference: &SecretReference) -> SecretResult<SecretString> {
        self.get(&reference.secret_name, &reference.key).await
    }
}

#[async_trait]
impl<P> SecretProvider for Arc<P>
where
    P: SecretProvider + ?Sized,
{
    fn namespace(&self) -> &str {
        (**self).namespace()
    }

    async fn get(&self, name: &str, key: &str) -> SecretResult<SecretString> {
        (**self).get(name, key).await
    }
}
