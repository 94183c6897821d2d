//! # logpipe-secure
//!
//! Secret lookup boundary for logpipe plugin parameters.
//!
//! A plugin parameter may take its value from an externally stored secret
//! instead of a literal. This crate owns that boundary: the [`SecretReference`]
//! a parameter points at, the [`SecretProvider`] strategy trait that performs
//! the lookup, and the backends shipped with logpipe.
//!
//! Providers are scoped to a single namespace chosen when they are built. The
//! namespace is deployment configuration and is never taken from the reference
//! itself.
//!
//! ## Backends
//!
//! - [`InMemorySecretProvider`] holds secrets in process, for embedding callers and tests.
//! - [`DirectorySecretProvider`] reads Kubernetes-Secret-shaped YAML documents
//!   from `<root>/<namespace>/<name>.yaml`.
//! - `RecordingSecretProvider` (feature `test-utils`) wraps another provider and
//!   records every lookup it forwards.
//!
//! Values are handed out as [`secrecy::SecretString`] so they are redacted in
//! `Debug` output and zeroized on drop.

mod directory;
mod error;
mod memory;
mod provider;
#[cfg(any(test, feature = "test-utils"))]
mod recording;
mod reference;

pub use directory::DirectorySecretProvider;
pub use error::{SecretError, SecretResult};
pub use memory::InMemorySecretProvider;
pub use provider::SecretProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use recording::{RecordingSecretProvider, UnreachableSecretProvider};
pub use reference::SecretReference;

pub use secrecy::{ExposeSecret, SecretString};
