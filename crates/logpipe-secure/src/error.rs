//! Error types for secret lookups.

use thiserror::Error;

/// Result alias for secret lookups.
pub type SecretResult<T> = Result<T, SecretError>;

/// Failures a [`SecretProvider`](crate::SecretProvider) can report.
///
/// Not-found and missing-key failures describe the state of the store; the
/// remaining variants describe the store being unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretError {
    #[error("secret '{name}' not found in namespace '{namespace}'")]
    NotFound { namespace: String, name: String },

    #[error("key '{key}' not found in secret '{name}' (namespace '{namespace}')")]
    MissingKey {
        namespace: String,
        name: String,
        key: String,
    },

    #[error("secret store unreachable: {reason}")]
    Connectivity { reason: String },

    #[error("secret '{name}' holds invalid data: {reason}")]
    InvalidData { name: String, reason: String },
}

impl SecretError {
    pub fn not_found(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn missing_key(
        namespace: impl Into<String>,
        name: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self::MissingKey {
            namespace: namespace.into(),
            name: name.into(),
            key: key.into(),
        }
    }

    pub fn connectivity(reason: impl Into<String>) -> Self {
        Self::Connectivity {
            reason: reason.into(),
        }
    }

    /// True for failures that describe an absent secret or key rather than an
    /// unusable store.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::MissingKey { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(SecretError::not_found("default", "db").is_not_found());
        assert!(SecretError::missing_key("default", "db", "password").is_not_found());
        assert!(!SecretError::connectivity("connection refused").is_not_found());
    }

    #[test]
    fn test_messages_name_the_reference() {
        let err = SecretError::missing_key("logging", "db-cred", "password");
        let msg = err.to_string();
        assert!(msg.contains("password"));
        assert!(msg.contains("db-cred"));
        assert!(msg.contains("logging"));
    }
}
