//! Credential acquisition and storage.
//!
//! A `CredentialProvider` is picked once at startup: `LocalStorageProvider`
//! persists the key in a local key-value file, `BridgeProvider` defers to a
//! host key-management capability. The `KeyStore` wraps the provider and
//! tracks which credential generation is current.

mod bridge;
mod key_store;
mod local;

pub use bridge::{BridgeProvider, CommandBridge, HostBridge};
pub use key_store::{CredentialSource, KeyStore};
pub use local::{LocalStorageProvider, LocalStore};

use std::fmt;

use metaprompt_common::StorageError;

/// An opaque API key. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw key, for the transport's auth header only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Masked form for status output, e.g. `AIza…x9Qk`.
    ///
    /// Values shorter than 16 characters are fully masked.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() < 16 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}…{tail}")
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Where the credential comes from and goes to.
pub trait CredentialProvider: Send {
    /// Short name for logs and status output.
    fn name(&self) -> &'static str;

    fn load(&self) -> Result<Option<Credential>, StorageError>;

    fn save(&mut self, credential: &Credential) -> Result<(), StorageError>;

    fn remove(&mut self) -> Result<(), StorageError>;

    /// Open an interactive key picker, if the provider has one.
    ///
    /// Returns `Ok(false)` when there is no picker; callers then fall back
    /// to manual entry.
    fn open_selector(&mut self) -> Result<bool, StorageError> {
        Ok(false)
    }
}
