//! Lazily creates, reuses and drops the single chat session.

use std::sync::Arc;

use tracing::{debug, info};

use crate::credentials::{Credential, KeyStore};
use crate::dispatch::{classify, DispatchError};
use crate::prompts::PROBE_PROMPT;
use crate::{AiError, ClientFactory, Turn};

use super::handle::ChatSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoSession,
    SessionActive,
}

struct ActiveSession {
    /// Key store generation the session was created under.
    generation: u64,
    session: ChatSession,
}

/// Owns at most one `ChatSession`.
pub struct SessionManager {
    factory: Arc<dyn ClientFactory>,
    chat_model: String,
    probe_model: String,
    system_instruction: Option<String>,
    active: Option<ActiveSession>,
    created: u64,
}

impl SessionManager {
    pub fn new(factory: Arc<dyn ClientFactory>, chat_model: impl Into<String>) -> Self {
        let chat_model = chat_model.into();
        Self {
            factory,
            probe_model: chat_model.clone(),
            chat_model,
            system_instruction: None,
            active: None,
            created: 0,
        }
    }

    pub fn with_probe_model(mut self, model: impl Into<String>) -> Self {
        self.probe_model = model.into();
        self
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn state(&self) -> SessionState {
        if self.active.is_some() {
            SessionState::SessionActive
        } else {
            SessionState::NoSession
        }
    }

    pub fn active(&self) -> Option<&ChatSession> {
        self.active.as_ref().map(|a| &a.session)
    }

    /// Number of sessions created since startup.
    pub fn created_count(&self) -> u64 {
        self.created
    }

    pub fn chat_model(&self) -> &str {
        &self.chat_model
    }

    /// Return the live session, creating one from the current credential.
    ///
    /// A session from an older key store generation is dropped first.
    /// Fails with `CredentialMissing` before any client is created when the
    /// store is empty.
    pub fn get_or_create(&mut self, keys: &KeyStore) -> Result<&mut ChatSession, DispatchError> {
        let generation = keys.generation();
        let active = match self.active.take() {
            Some(active) if active.generation == generation => active,
            stale => {
                if let Some(old) = stale {
                    debug!(session = %old.session.id().short(), "Dropping stale session");
                }
                let credential = keys.get().ok_or(DispatchError::CredentialMissing)?;
                let client = self
                    .factory
                    .connect(credential, &self.chat_model)
                    .map_err(classify)?;

                let mut session = ChatSession::new(client);
                if let Some(ref instruction) = self.system_instruction {
                    session = session.with_system_instruction(instruction.clone());
                }
                self.created += 1;
                info!(
                    session = %session.id().short(),
                    model = %self.chat_model,
                    "Chat session created"
                );
                ActiveSession {
                    generation,
                    session,
                }
            }
        };

        Ok(&mut self.active.insert(active).session)
    }

    /// Drop the current session. Calling it again is a no-op.
    pub fn reset(&mut self) {
        if let Some(old) = self.active.take() {
            info!(session = %old.session.id().short(), "Chat session reset");
        }
    }

    /// One minimal request with `credential` on a throwaway client.
    ///
    /// The live session is not touched.
    pub async fn probe(&self, credential: &Credential) -> Result<(), AiError> {
        let client = self.factory.connect(credential, &self.probe_model)?;
        debug!(model = %self.probe_model, "Probing API connection");
        client.send_message(&[Turn::user(PROBE_PROMPT)]).await?;
        Ok(())
    }
}
