//! Credential acquisition settings.

use serde::{Deserialize, Serialize};

/// Which credential provider to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Host bridge when bridge commands are configured, local storage otherwise.
    #[default]
    Auto,
    Local,
    Bridge,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub provider: ProviderKind,
    /// Environment variable used to bootstrap the key when none is stored.
    pub env_var: String,
    /// Entry name inside the local key-value store.
    pub storage_key: String,
    /// Host command printing the currently selected key on stdout.
    pub bridge_read_command: Option<String>,
    /// Host command opening an interactive key picker.
    pub bridge_select_command: Option<String>,
}

impl CredentialsConfig {
    /// Resolve `Auto` against the bridge settings.
    pub fn effective_provider(&self) -> ProviderKind {
        match self.provider {
            ProviderKind::Auto if self.bridge_read_command.is_some() => ProviderKind::Bridge,
            ProviderKind::Auto => ProviderKind::Local,
            other => other,
        }
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Auto,
            env_var: "GEMINI_API_KEY".into(),
            storage_key: "GEMINI_API_KEY".into(),
            bridge_read_command: None,
            bridge_select_command: None,
        }
    }
}
