//! The session handle: one conversation with the remote model.

use std::sync::Arc;

use metaprompt_common::SessionId;
use tracing::debug;

use crate::token_tracker::TokenTracker;
use crate::{AiClient, AiError, AiResponse, Turn};

/// A conversation with message history.
pub struct ChatSession {
    id: SessionId,
    client: Arc<dyn AiClient>,
    /// Sent as the system instruction on every call.
    system_instruction: Option<String>,
    /// Completed user/model turns, oldest first.
    history: Vec<Turn>,
    tracker: TokenTracker,
}

impl ChatSession {
    pub fn new(client: Arc<dyn AiClient>) -> Self {
        Self {
            id: SessionId::new(),
            client,
            system_instruction: None,
            history: Vec::new(),
            tracker: TokenTracker::new(),
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Send one user turn and record the reply.
    ///
    /// On failure the user turn is dropped again, so the history only ever
    /// holds complete exchanges.
    pub async fn send(&mut self, text: impl Into<String>) -> Result<AiResponse, AiError> {
        self.history.push(Turn::user(text));
        let turns = self.build_turns();

        match self.client.send_message(&turns).await {
            Ok(response) => {
                self.tracker.record(&response.usage);
                self.history.push(Turn::model(response.content.clone()));
                debug!(
                    session = %self.id.short(),
                    turns = self.history.len(),
                    "Exchange recorded"
                );
                Ok(response)
            }
            Err(e) => {
                self.history.pop();
                Err(e)
            }
        }
    }

    fn build_turns(&self) -> Vec<Turn> {
        let mut turns = Vec::with_capacity(self.history.len() + 1);
        if let Some(ref system) = self.system_instruction {
            turns.push(Turn::system(system.clone()));
        }
        turns.extend(self.history.iter().cloned());
        turns
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn tracker(&self) -> &TokenTracker {
        &self.tracker
    }
}
