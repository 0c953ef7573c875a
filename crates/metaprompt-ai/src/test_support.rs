//! Test doubles for the transport and credential seams.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use metaprompt_common::StorageError;

use crate::client_session::ClientSession;
use crate::credentials::{Credential, CredentialProvider, KeyStore};
use crate::session::SessionManager;
use crate::{AiClient, AiError, AiResponse, ClientFactory, TokenUsage, Turn};

/// In-memory credential provider.
#[derive(Default)]
pub struct MemoryProvider {
    value: Option<Credential>,
    read_only: bool,
}

impl MemoryProvider {
    pub fn with_key(key: &str) -> Self {
        Self {
            value: Some(Credential::new(key)),
            read_only: false,
        }
    }

    /// Holds `key` and refuses every write.
    pub fn read_only(key: &str) -> Self {
        Self {
            value: Some(Credential::new(key)),
            read_only: true,
        }
    }
}

impl CredentialProvider for MemoryProvider {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn load(&self) -> Result<Option<Credential>, StorageError> {
        Ok(self.value.clone())
    }

    fn save(&mut self, credential: &Credential) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Write("read-only".into()));
        }
        self.value = Some(credential.clone());
        Ok(())
    }

    fn remove(&mut self) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Write("read-only".into()));
        }
        self.value = None;
        Ok(())
    }
}

/// Scripted transport shared by every client the `MockFactory` hands out.
#[derive(Default)]
pub struct MockClient {
    script: Mutex<VecDeque<Result<String, AiError>>>,
    requests: Mutex<Vec<(String, Vec<Turn>)>>,
}

impl MockClient {
    pub fn push_reply(&self, text: &str) {
        self.script.lock().unwrap().push_back(Ok(text.to_string()));
    }

    pub fn push_error(&self, err: AiError) {
        self.script.lock().unwrap().push_back(Err(err));
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// `(key, turns)` of the most recent request.
    pub fn last_request(&self) -> Option<(String, Vec<Turn>)> {
        self.requests.lock().unwrap().last().cloned()
    }
}

/// Client bound to one key and model, recording into the shared `MockClient`.
struct BoundClient {
    shared: Arc<MockClient>,
    key: String,
    model: String,
}

#[async_trait]
impl AiClient for BoundClient {
    async fn send_message(&self, turns: &[Turn]) -> Result<AiResponse, AiError> {
        self.shared
            .requests
            .lock()
            .unwrap()
            .push((self.key.clone(), turns.to_vec()));
        let next = self.shared.script.lock().unwrap().pop_front();
        let content = next.unwrap_or_else(|| Ok("ok".to_string()))?;
        Ok(AiResponse {
            content,
            usage: TokenUsage {
                input_tokens: 10,
                output_tokens: 5,
            },
        })
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Counts `connect` calls and remembers the models asked for.
#[derive(Default)]
pub struct MockFactory {
    pub client: Arc<MockClient>,
    connects: AtomicUsize,
    models: Mutex<Vec<String>>,
}

impl MockFactory {
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn models(&self) -> Vec<String> {
        self.models.lock().unwrap().clone()
    }
}

impl ClientFactory for MockFactory {
    fn connect(&self, credential: &Credential, model: &str) -> Result<Arc<dyn AiClient>, AiError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.models.lock().unwrap().push(model.to_string());
        Ok(Arc::new(BoundClient {
            shared: self.client.clone(),
            key: credential.expose().to_string(),
            model: model.to_string(),
        }))
    }
}

/// A `ClientSession` over a `MemoryProvider` and a shared `MockFactory`.
pub fn client_session(key: Option<&str>, factory: Arc<MockFactory>) -> ClientSession {
    let provider = match key {
        Some(k) => MemoryProvider::with_key(k),
        None => MemoryProvider::default(),
    };
    let keys = KeyStore::open(Box::new(provider)).unwrap();
    let sessions = SessionManager::new(factory, "chat-model")
        .with_probe_model("probe-model")
        .with_system_instruction("be helpful");
    ClientSession::new(keys, sessions)
}
