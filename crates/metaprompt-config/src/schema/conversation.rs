//! Conversation view settings.

use serde::{Deserialize, Serialize};

/// Language of the messages the client itself prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ko,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationConfig {
    pub locale: Locale,
    /// Shown instead of an empty model reply. Locale default when unset.
    pub fallback_reply: Option<String>,
}
