//! Gemini API client struct, request building, and response parsing.

use std::time::Duration;

use tracing::debug;

use crate::{AiError, AiResponse, TokenUsage, Turn, TurnRole};

use super::config::GeminiConfig;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| AiError::ApiError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub(crate) fn api_url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Build the JSON request body for the Gemini API.
    pub(crate) fn build_request_body(&self, turns: &[Turn]) -> serde_json::Value {
        let mut contents = Vec::new();

        for turn in turns {
            let role = match turn.role {
                TurnRole::User => "user",
                TurnRole::Model => "model",
                TurnRole::System => continue, // handled via systemInstruction
            };
            contents.push(serde_json::json!({
                "role": role,
                "parts": [{ "text": turn.content }]
            }));
        }

        let mut body = serde_json::json!({
            "contents": contents,
            "generationConfig": {
                "maxOutputTokens": self.config.max_tokens,
                "temperature": self.config.temperature,
            }
        });

        if let Some(system) = turns.iter().find(|t| t.role == TurnRole::System) {
            body["systemInstruction"] = serde_json::json!({
                "parts": [{ "text": system.content }]
            });
        }

        body
    }

    /// Parse a Gemini response.
    ///
    /// A response without candidates (e.g. a blocked prompt) yields empty
    /// content rather than an error.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<AiResponse, AiError> {
        if !json.is_object() {
            return Err(AiError::ParseError("response is not a JSON object".to_string()));
        }

        let mut content = String::new();
        match json["candidates"].as_array().and_then(|c| c.first()) {
            Some(first) => {
                let parts = first["content"]["parts"]
                    .as_array()
                    .cloned()
                    .unwrap_or_default();
                for part in &parts {
                    // Skip thought summaries; only the answer is shown.
                    if part["thought"].as_bool() == Some(true) {
                        continue;
                    }
                    if let Some(text) = part["text"].as_str() {
                        content.push_str(text);
                    }
                }
                if content.is_empty() {
                    debug!(
                        finish_reason = first["finishReason"].as_str().unwrap_or("unknown"),
                        "Gemini candidate carried no text"
                    );
                }
            }
            None => {
                debug!(
                    block_reason = json["promptFeedback"]["blockReason"]
                        .as_str()
                        .unwrap_or("none"),
                    "Gemini response has no candidates"
                );
            }
        }

        let usage = TokenUsage {
            input_tokens: json["usageMetadata"]["promptTokenCount"]
                .as_u64()
                .unwrap_or(0),
            output_tokens: json["usageMetadata"]["candidatesTokenCount"]
                .as_u64()
                .unwrap_or(0),
        };

        Ok(AiResponse { content, usage })
    }
}
