//! Application root: owns the client context and the transcript.

use std::path::Path;
use std::sync::Arc;

use metaprompt_ai::prompts::DEFAULT_SYSTEM_INSTRUCTION;
use metaprompt_ai::{
    BridgeProvider, ClientSession, CommandBridge, CredentialProvider, CredentialSource,
    ErrorKind, GeminiFactory, KeyStore, LocalStorageProvider, LocalStore, MessageDispatcher,
    SessionManager, SessionState,
};
use metaprompt_common::{Message, MetapromptError, StorageError};
use metaprompt_config::{AppConfig, AttachmentConfig, CredentialsConfig, ProviderKind};
use tracing::{debug, info};

use crate::attachment::{compose, Attachment, AttachmentError};
use crate::conversation::Conversation;
use crate::strings::{self, Strings};

/// Result of submitting one line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Blank input; nothing was sent.
    Ignored,
    /// No key is available; nothing was added to the transcript.
    NeedsCredential,
    /// The model's message (a reply or a localized error) was appended.
    Replied {
        reply: Message,
        error: Option<ErrorKind>,
    },
}

pub struct App {
    client: ClientSession,
    dispatcher: MessageDispatcher,
    strings: &'static Strings,
    attachments: AttachmentConfig,
    conversation: Conversation,
}

impl App {
    pub fn new(
        client: ClientSession,
        dispatcher: MessageDispatcher,
        strings: &'static Strings,
        attachments: AttachmentConfig,
    ) -> Self {
        Self {
            client,
            dispatcher,
            strings,
            attachments,
            conversation: Conversation::new(),
        }
    }

    /// Wire the key store, Gemini factory and session manager from config.
    pub fn from_config(config: &AppConfig) -> Result<Self, MetapromptError> {
        let provider = credential_provider(&config.credentials)?;
        let mut keys = KeyStore::open(provider)?;
        if keys.bootstrap_from_env(&config.credentials.env_var) {
            info!(var = %config.credentials.env_var, "Using API key from environment");
        }

        let factory = GeminiFactory::new()
            .with_api_base(&config.model.api_base)
            .with_temperature(config.model.temperature)
            .with_max_tokens(config.model.max_output_tokens);
        let instruction = config
            .model
            .system_instruction
            .clone()
            .unwrap_or_else(|| DEFAULT_SYSTEM_INSTRUCTION.to_string());
        let sessions = SessionManager::new(Arc::new(factory), &config.model.chat_model)
            .with_probe_model(&config.model.probe_model)
            .with_system_instruction(instruction);

        let strings = strings::for_locale(config.conversation.locale);
        let fallback = config
            .conversation
            .fallback_reply
            .clone()
            .unwrap_or_else(|| strings.fallback_reply.to_string());

        Ok(Self::new(
            ClientSession::new(keys, sessions),
            MessageDispatcher::new(fallback),
            strings,
            config.attachments.clone(),
        ))
    }

    pub fn strings(&self) -> &'static Strings {
        self.strings
    }

    #[cfg(test)]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn has_credential(&self) -> bool {
        self.client.keys().has_credential()
    }

    /// Save a key typed by the user. Blank input saves nothing.
    pub fn set_key(&mut self, value: &str) -> Result<bool, StorageError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(false);
        }
        self.client.set_credential(value)?;
        Ok(true)
    }

    pub fn clear_key(&mut self) -> Result<(), StorageError> {
        self.client.clear_credential()
    }

    /// Open the host key picker, when the provider has one.
    pub fn select_key(&mut self) -> Result<bool, StorageError> {
        self.client.select_credential()
    }

    pub fn key_status(&self) -> String {
        let keys = self.client.keys();
        match keys.get() {
            Some(credential) => {
                let origin = match keys.source() {
                    CredentialSource::Environment => self.strings.key_from_environment,
                    _ => keys.provider_name(),
                };
                format!("{} ({origin})", credential.masked())
            }
            None => self.strings.key_none.to_string(),
        }
    }

    /// Probe the API with the stored key without touching the session.
    pub async fn test_connection(&self) -> bool {
        self.dispatcher.test_connection(&self.client, None).await
    }

    pub fn attach(&mut self, path: &Path) -> Result<&Attachment, AttachmentError> {
        let file = Attachment::load(path, &self.attachments)?;
        debug!(name = file.name(), bytes = file.size(), "Attachment staged");
        Ok(self.conversation.attach(file))
    }

    pub fn detach(&mut self) -> bool {
        self.conversation.detach()
    }

    /// Drop the session and start an empty transcript.
    pub fn reset(&mut self) {
        self.client.reset();
        self.conversation.clear();
        info!("Conversation reset");
    }

    pub fn status_line(&self) -> String {
        let sessions = self.client.sessions();
        let state = match self.client.state() {
            SessionState::NoSession => "no session",
            SessionState::SessionActive => "session active",
        };
        let mut line = format!(
            "{state} | model {} | sessions created {} | messages {}",
            sessions.chat_model(),
            sessions.created_count(),
            self.conversation.messages().len(),
        );
        if let Some(session) = sessions.active() {
            let tracker = session.tracker();
            line.push_str(&format!(
                " | session {} | {} calls, {} tokens",
                session.id().short(),
                tracker.call_count(),
                tracker.total_tokens(),
            ));
        }
        if let Some(file) = self.conversation.attachment() {
            line.push_str(&format!(" | attached {}", file.name()));
        }
        line
    }

    /// Send a prompt, consuming any pending attachment.
    pub async fn submit(&mut self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }
        if !self.has_credential() {
            return SubmitOutcome::NeedsCredential;
        }

        let attachment = self.conversation.take_attachment();
        let composed = compose(text, attachment.as_ref(), self.strings);
        self.conversation.push(Message::user(composed.display));

        let result = self.dispatcher.send(&mut self.client, &composed.prompt).await;

        let (content, error) = match result {
            Ok(reply) => (reply, None),
            Err(e) => {
                let kind = e.kind();
                (self.error_text(kind).to_string(), Some(kind))
            }
        };
        let reply = self.conversation.push(Message::model(content)).clone();
        SubmitOutcome::Replied { reply, error }
    }

    pub fn error_text(&self, kind: ErrorKind) -> &'static str {
        match kind {
            ErrorKind::CredentialMissing => self.strings.error_key_missing,
            ErrorKind::CredentialInvalid => self.strings.error_key_invalid,
            ErrorKind::TransientFailure => self.strings.error_generic,
        }
    }
}

fn credential_provider(
    config: &CredentialsConfig,
) -> Result<Box<dyn CredentialProvider>, MetapromptError> {
    match config.effective_provider() {
        ProviderKind::Bridge => {
            let read = config.bridge_read_command.as_deref().ok_or_else(|| {
                MetapromptError::Other("bridge provider needs bridge_read_command".into())
            })?;
            let mut bridge = CommandBridge::new(read);
            if let Some(select) = &config.bridge_select_command {
                bridge = bridge.with_select_command(select);
            }
            Ok(Box::new(BridgeProvider::new(Box::new(bridge))))
        }
        ProviderKind::Local | ProviderKind::Auto => {
            let path = metaprompt_config::default_storage_path()?;
            let store = LocalStore::open(path)?;
            Ok(Box::new(LocalStorageProvider::new(
                store,
                config.storage_key.clone(),
            )))
        }
    }
}

#[cfg(test)]
mod tests;
