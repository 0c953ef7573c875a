//! The Key Store: the single active credential and its generation.

use metaprompt_common::StorageError;
use tracing::info;

use super::{Credential, CredentialProvider};

/// Where the current credential came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    None,
    /// Loaded from, or saved through, the provider.
    Provider,
    /// Taken from an environment variable at startup; not persisted.
    Environment,
}

/// Holds at most one credential.
///
/// Every `set`, `clear` or picker selection starts a new generation; a chat
/// session created under an older generation is stale.
pub struct KeyStore {
    provider: Box<dyn CredentialProvider>,
    current: Option<Credential>,
    source: CredentialSource,
    generation: u64,
}

impl KeyStore {
    /// Open the store, reading any credential the provider already has.
    pub fn open(provider: Box<dyn CredentialProvider>) -> Result<Self, StorageError> {
        let current = provider.load()?;
        let source = if current.is_some() {
            CredentialSource::Provider
        } else {
            CredentialSource::None
        };
        info!(
            provider = provider.name(),
            has_key = current.is_some(),
            "Key store opened"
        );
        Ok(Self {
            provider,
            current,
            source,
            generation: 0,
        })
    }

    /// Use the value of `var` when no credential is stored yet.
    pub fn bootstrap_from_env(&mut self, var: &str) -> bool {
        self.bootstrap(std::env::var(var).ok())
    }

    pub(crate) fn bootstrap(&mut self, value: Option<String>) -> bool {
        if self.current.is_some() {
            return false;
        }
        match value {
            Some(v) if !v.trim().is_empty() => {
                self.current = Some(Credential::new(v.trim()));
                self.source = CredentialSource::Environment;
                self.generation += 1;
                info!("API key taken from the environment");
                true
            }
            _ => false,
        }
    }

    pub fn get(&self) -> Option<&Credential> {
        self.current.as_ref()
    }

    pub fn has_credential(&self) -> bool {
        self.current.is_some()
    }

    /// Persist `value` as the credential. No format check is made.
    pub fn set(&mut self, value: impl Into<String>) -> Result<(), StorageError> {
        let credential = Credential::new(value);
        self.provider.save(&credential)?;
        self.current = Some(credential);
        self.source = CredentialSource::Provider;
        self.generation += 1;
        info!(provider = self.provider.name(), "API key saved");
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.provider.remove()?;
        self.current = None;
        self.source = CredentialSource::None;
        self.generation += 1;
        info!(provider = self.provider.name(), "API key cleared");
        Ok(())
    }

    /// Run the provider's key picker and reload the credential.
    ///
    /// Returns `Ok(false)` when the provider has no picker.
    pub fn select_interactively(&mut self) -> Result<bool, StorageError> {
        if !self.provider.open_selector()? {
            return Ok(false);
        }
        self.current = self.provider.load()?;
        self.source = if self.current.is_some() {
            CredentialSource::Provider
        } else {
            CredentialSource::None
        };
        self.generation += 1;
        Ok(true)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }
}
