//! Remote model settings.

use serde::{Deserialize, Serialize};

/// Which models to call and how to prime them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Base URL of the Generative Language API models endpoint.
    pub api_base: String,
    /// Model used for the conversation.
    pub chat_model: String,
    /// Cheaper model used by the connection test.
    pub probe_model: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
    /// Replaces the built-in system instruction when set.
    pub system_instruction: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta/models".into(),
            chat_model: "gemini-3-pro-preview".into(),
            probe_model: "gemini-3-flash-preview".into(),
            temperature: 0.7,
            max_output_tokens: 8192,
            system_instruction: None,
        }
    }
}
