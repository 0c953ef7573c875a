//! Model-facing core of Metaprompt.
//!
//! Provides:
//! - a Gemini client behind the `AiClient` trait
//! - credential providers and the `KeyStore`
//! - the `SessionManager` owning the single live chat handle
//! - the `MessageDispatcher` and its failure taxonomy

pub mod client_session;
pub mod credentials;
pub mod dispatch;
pub mod gemini;
pub mod prompts;
pub mod session;
pub mod token_tracker;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use async_trait::async_trait;

pub use client_session::ClientSession;
pub use credentials::{
    BridgeProvider, CommandBridge, Credential, CredentialProvider, CredentialSource, HostBridge,
    KeyStore, LocalStorageProvider, LocalStore,
};
pub use dispatch::{DispatchError, ErrorKind, MessageDispatcher};
pub use gemini::{GeminiClient, GeminiConfig, GeminiFactory};
pub use session::{ChatSession, SessionManager, SessionState};
pub use token_tracker::TokenTracker;

/// A transport bound to one credential and one model.
#[async_trait]
pub trait AiClient: Send + Sync {
    async fn send_message(&self, turns: &[Turn]) -> Result<AiResponse, AiError>;

    fn model(&self) -> &str;
}

/// Creates transport clients for a credential.
///
/// Connecting is local (no network traffic); the first request is the
/// first remote call.
pub trait ClientFactory: Send + Sync {
    fn connect(&self, credential: &Credential, model: &str) -> Result<Arc<dyn AiClient>, AiError>;
}

/// One entry of the history sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Model,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::System,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Model,
    System,
}

#[derive(Debug, Clone)]
pub struct AiResponse {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("API error: {0}")]
    ApiError(String),
    #[error("rate limited")]
    RateLimited,
    #[error("network error: {0}")]
    NetworkError(String),
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("timeout")]
    Timeout,
}

impl From<reqwest::Error> for AiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AiError::Timeout
        } else if e.is_decode() {
            AiError::ParseError(e.to_string())
        } else {
            AiError::NetworkError(e.to_string())
        }
    }
}
