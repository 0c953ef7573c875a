//! Message Dispatcher: one prompt in, display text or a classified failure out.

mod error;


pub use error::{classify, is_credential_rejection, DispatchError, ErrorKind};

use tracing::{debug, info, warn};

use crate::client_session::ClientSession;
use crate::credentials::Credential;

/// Sends prompts through a `ClientSession`.
///
/// Exactly one remote round trip per `send`; failures are never retried
/// here.
#[derive(Debug, Clone)]
pub struct MessageDispatcher {
    fallback_reply: String,
}

impl MessageDispatcher {
    /// `fallback_reply` replaces empty model replies.
    pub fn new(fallback_reply: impl Into<String>) -> Self {
        Self {
            fallback_reply: fallback_reply.into(),
        }
    }

    pub fn fallback_reply(&self) -> &str {
        &self.fallback_reply
    }

    /// Send `prompt` on the current session, creating it if needed.
    pub async fn send(
        &self,
        client: &mut ClientSession,
        prompt: &str,
    ) -> Result<String, DispatchError> {
        let session = client.session()?;
        debug!(
            session = %session.id().short(),
            chars = prompt.chars().count(),
            "Dispatching prompt"
        );

        let response = session.send(prompt).await.map_err(|e| {
            let err = classify(e);
            warn!(kind = ?err.kind(), error = %err, "Prompt failed");
            err
        })?;

        if response.content.trim().is_empty() {
            warn!("Model returned an empty reply, using fallback text");
            return Ok(self.fallback_reply.clone());
        }
        Ok(response.content)
    }

    /// Probe the API with `credential`, or the stored one when `None`.
    ///
    /// Never creates, replaces or resets the live session.
    pub async fn test_connection(
        &self,
        client: &ClientSession,
        credential: Option<&Credential>,
    ) -> bool {
        let Some(credential) = credential.or_else(|| client.keys().get()) else {
            debug!("Connection test skipped: no API key");
            return false;
        };

        match client.sessions().probe(credential).await {
            Ok(()) => {
                info!("Connection test succeeded");
                true
            }
            Err(e) => {
                warn!(error = %e, "Connection test failed");
                false
            }
        }
    }
}
