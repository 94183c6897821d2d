//! Pointer to a value stored in an external secret.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one field of one secret: the secret's name and the key within
/// its data.
///
/// Serialises with the wire names used by plugin documents
/// (`secretKeyRef: { name, key }`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecretReference {
    #[serde(rename = "name")]
    pub secret_name: String,
    pub key: String,
}

impl SecretReference {
    pub fn new(secret_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            secret_name: secret_name.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for SecretReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.secret_name, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let reference: SecretReference =
            serde_yaml::from_str("name: db-cred\nkey: password\n").unwrap();
        assert_eq!(reference, SecretReference::new("db-cred", "password"));
        assert_eq!(reference.to_string(), "db-cred/password");
    }
}
