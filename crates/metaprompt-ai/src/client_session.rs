//! The client context object owned by the application root.

use metaprompt_common::StorageError;

use crate::credentials::KeyStore;
use crate::dispatch::DispatchError;
use crate::session::{ChatSession, SessionManager, SessionState};

/// Key Store plus Session Manager for one running client.
///
/// Credential changes go through here so the session is always dropped
/// together with the key it was created from.
pub struct ClientSession {
    keys: KeyStore,
    sessions: SessionManager,
}

impl ClientSession {
    pub fn new(keys: KeyStore, sessions: SessionManager) -> Self {
        Self { keys, sessions }
    }

    pub fn keys(&self) -> &KeyStore {
        &self.keys
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn state(&self) -> SessionState {
        self.sessions.state()
    }

    /// Persist a new key and drop the current session.
    pub fn set_credential(&mut self, value: impl Into<String>) -> Result<(), StorageError> {
        self.keys.set(value)?;
        self.sessions.reset();
        Ok(())
    }

    /// Remove the key and drop the current session.
    pub fn clear_credential(&mut self) -> Result<(), StorageError> {
        self.keys.clear()?;
        self.sessions.reset();
        Ok(())
    }

    /// Run the provider's key picker; drops the session when it ran.
    pub fn select_credential(&mut self) -> Result<bool, StorageError> {
        let selected = self.keys.select_interactively()?;
        if selected {
            self.sessions.reset();
        }
        Ok(selected)
    }

    /// Drop the current session, keeping the key.
    pub fn reset(&mut self) {
        self.sessions.reset();
    }

    pub(crate) fn session(&mut self) -> Result<&mut ChatSession, DispatchError> {
        self.sessions.get_or_create(&self.keys)
    }
}
