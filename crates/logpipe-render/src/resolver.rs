//! Parameter resolution: turn one [`Parameter`] into a `(key, value)` pair.

use std::fmt;
use std::time::Duration;

use logpipe_secure::{ExposeSecret, SecretError, SecretProvider, SecretReference};
use thiserror::Error;

use crate::model::{Parameter, ParameterSource};

/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueOrigin {
    Literal,
    Secret(SecretReference),
}

/// A parameter's context key and its value.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedParameter {
    pub key: String,
    pub value: String,
    pub origin: ValueOrigin,
}

impl fmt::Debug for ResolvedParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value: &dyn fmt::Debug = match self.origin {
            ValueOrigin::Literal => &self.value,
            ValueOrigin::Secret(_) => &"[REDACTED]",
        };
        f.debug_struct("ResolvedParameter")
            .field("key", &self.key)
            .field("value", value)
            .field("origin", &self.origin)
            .finish()
    }
}

/// A secret-backed parameter whose lookup failed.
#[derive(Debug, Clone, Error)]
#[error("failed to resolve parameter '{parameter}' from secret {reference}: {source}")]
pub struct ResolveError {
    pub parameter: String,
    pub reference: SecretReference,
    #[source]
    pub source: SecretError,
}

/// Resolves parameters, consulting the secret provider for indirect ones.
///
/// Every indirect parameter costs exactly one provider call; nothing is
/// cached or retried.
#[derive(Debug)]
pub struct ParameterResolver<P> {
    provider: P,
    timeout: Option<Duration>,
}

impl<P: SecretProvider> ParameterResolver<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            timeout: None,
        }
    }

    /// Bound every secret lookup. Expiry is reported as a connectivity failure.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub async fn resolve(&self, parameter: &Parameter) -> Result<ResolvedParameter, ResolveError> {
        let reference = match parameter.source() {
            ParameterSource::Literal(value) => {
                return Ok(ResolvedParameter {
                    key: parameter.name().to_string(),
                    value: value.clone(),
                    origin: ValueOrigin::Literal,
                });
            }
            ParameterSource::Secret(reference) => reference,
        };

        match self.lookup(reference).await {
            Ok(value) => Ok(ResolvedParameter {
                key: parameter.name().to_string(),
                value,
                origin: ValueOrigin::Secret(reference.clone()),
            }),
            Err(source) => Err(ResolveError {
                parameter: parameter.name().to_string(),
                reference: reference.clone(),
                source,
            }),
        }
    }

    async fn lookup(&self, reference: &SecretReference) -> Result<String, SecretError> {
        let lookup = self.provider.resolve(reference);
        let secret = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, lookup).await.map_err(|_| {
                SecretError::connectivity(format!(
                    "lookup of {reference} in namespace '{}' timed out after {limit:?}",
                    self.provider.namespace()
                ))
            })??,
            None => lookup.await?,
        };
        Ok(secret.expose_secret().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use logpipe_secure::{InMemorySecretProvider, RecordingSecretProvider, SecretString};

    fn provider() -> RecordingSecretProvider<InMemorySecretProvider> {
        RecordingSecretProvider::new(
            InMemorySecretProvider::new("default").with_secret("db-cred", [("password", "s3cr3t")]),
        )
    }

    #[tokio::test]
    async fn test_literal_never_consults_provider() {
        let resolver = ParameterResolver::new(provider());
        let resolved = resolver
            .resolve(&Parameter::literal("path", "/var/log/app.log").unwrap())
            .await
            .unwrap();

        assert_eq!(resolved.key, "path");
        assert_eq!(resolved.value, "/var/log/app.log");
        assert_eq!(resolved.origin, ValueOrigin::Literal);
        assert_eq!(resolver.provider().call_count(), 0);
    }

    #[tokio::test]
    async fn test_secret_consults_provider_once() {
        let resolver = ParameterResolver::new(provider());
        let resolved = resolver
            .resolve(&Parameter::secret("password", "db-cred", "password").unwrap())
            .await
            .unwrap();

        assert_eq!(resolved.value, "s3cr3t");
        assert_eq!(
            resolver.provider().calls(),
            vec![SecretReference::new("db-cred", "password")]
        );
    }

    #[tokio::test]
    async fn test_missing_key_is_reported() {
        let resolver = ParameterResolver::new(provider());
        let err = resolver
            .resolve(&Parameter::secret("password", "db-cred", "token").unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.parameter, "password");
        assert_eq!(err.source, SecretError::missing_key("default", "db-cred", "token"));
    }

    #[tokio::test]
    async fn test_debug_redacts_secret_values() {
        let resolver = ParameterResolver::new(provider());
        let resolved = resolver
            .resolve(&Parameter::secret("password", "db-cred", "password").unwrap())
            .await
            .unwrap();
        assert!(!format!("{resolved:?}").contains("s3cr3t"));
    }

    #[derive(Debug)]
    struct StalledProvider;

    #[async_trait]
    impl SecretProvider for StalledProvider {
        fn namespace(&self) -> &str {
            "default"
        }

        async fn get(&self, _name: &str, _key: &str) -> logpipe_secure::SecretResult<SecretString> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(SecretString::from("late".to_string()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_surfaces_as_connectivity() {
        let resolver = ParameterResolver::new(StalledProvider).with_timeout(Duration::from_millis(50));
        let err = resolver
            .resolve(&Parameter::secret("password", "db-cred", "password").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err.source, SecretError::Connectivity { .. }));
        assert!(err.source.to_string().contains("timed out"));
    }
}
