//! Scripted model client and an `App` over a temporary key store.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use metaprompt_ai::{
    AiClient, AiError, AiResponse, ClientFactory, ClientSession, Credential, KeyStore,
    LocalStorageProvider, LocalStore, MessageDispatcher, SessionManager, TokenUsage, Turn,
    TurnRole,
};
use metaprompt_config::AttachmentConfig;

use crate::app::App;
use crate::strings::EN;

/// Replies from a script, then "ok"; records the last user turn of every request.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, AiError>>>,
    prompts: Mutex<Vec<String>>,
    delay: Mutex<Option<Duration>>,
}

impl ScriptedClient {
    pub fn push_reply(&self, reply: &str) {
        self.replies.lock().unwrap().push_back(Ok(reply.to_string()));
    }

    pub fn push_error(&self, err: AiError) {
        self.replies.lock().unwrap().push_back(Err(err));
    }

    /// Every reply waits this long before resolving.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

struct Bound(Arc<ScriptedClient>);

#[async_trait]
impl AiClient for Bound {
    async fn send_message(&self, turns: &[Turn]) -> Result<AiResponse, AiError> {
        if let Some(turn) = turns.iter().rev().find(|t| t.role == TurnRole::User) {
            self.0.prompts.lock().unwrap().push(turn.content.clone());
        }
        let delay = *self.0.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.0.replies.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok("ok".into())).map(|content| AiResponse {
            content,
            usage: TokenUsage {
                input_tokens: 3,
                output_tokens: 2,
            },
        })
    }

    fn model(&self) -> &str {
        "test-model"
    }
}

#[derive(Default)]
pub struct ScriptedFactory {
    pub client: Arc<ScriptedClient>,
    connects: Mutex<u32>,
}

impl ScriptedFactory {
    pub fn connect_count(&self) -> u32 {
        *self.connects.lock().unwrap()
    }
}

impl ClientFactory for ScriptedFactory {
    fn connect(
        &self,
        _credential: &Credential,
        _model: &str,
    ) -> Result<Arc<dyn AiClient>, AiError> {
        *self.connects.lock().unwrap() += 1;
        Ok(Arc::new(Bound(self.client.clone())))
    }
}

pub struct Fixture {
    pub dir: tempfile::TempDir,
    pub storage: PathBuf,
    pub factory: Arc<ScriptedFactory>,
    pub app: App,
}

pub fn open_keys(storage: &Path) -> KeyStore {
    let store = LocalStore::open(storage).unwrap();
    KeyStore::open(Box::new(LocalStorageProvider::new(store, "GEMINI_API_KEY"))).unwrap()
}

pub fn fixture(key: Option<&str>) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let storage = dir.path().join("storage.json");
    let mut keys = open_keys(&storage);
    if let Some(key) = key {
        keys.set(key).unwrap();
    }

    let factory = Arc::new(ScriptedFactory::default());
    let sessions =
        SessionManager::new(factory.clone(), "chat-model").with_probe_model("probe-model");
    let app = App::new(
        ClientSession::new(keys, sessions),
        MessageDispatcher::new(EN.fallback_reply),
        &EN,
        AttachmentConfig::default(),
    );
    Fixture {
        dir,
        storage,
        factory,
        app,
    }
}
