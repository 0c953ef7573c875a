//! Binds Gemini clients to a credential.

use std::sync::Arc;

use crate::credentials::Credential;
use crate::{AiClient, AiError, ClientFactory};

use super::client::{GeminiClient, GEMINI_API_BASE};
use super::config::GeminiConfig;

/// Generation settings shared by every client the factory creates.
#[derive(Debug, Clone)]
pub struct GeminiFactory {
    api_base: String,
    temperature: f64,
    max_tokens: u32,
}

impl GeminiFactory {
    pub fn new() -> Self {
        Self {
            api_base: GEMINI_API_BASE.to_string(),
            temperature: 0.7,
            max_tokens: 8192,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

impl Default for GeminiFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientFactory for GeminiFactory {
    fn connect(&self, credential: &Credential, model: &str) -> Result<Arc<dyn AiClient>, AiError> {
        let config = GeminiConfig::new(credential.expose())
            .with_api_base(&self.api_base)
            .with_model(model)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);
        Ok(Arc::new(GeminiClient::new(config)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_binds_requested_model() {
        let factory = GeminiFactory::new().with_temperature(0.1);
        let client = factory
            .connect(&Credential::new("key"), "gemini-3-flash-preview")
            .unwrap();
        assert_eq!(client.model(), "gemini-3-flash-preview");
    }
}
