//! Google Gemini API client.
//!
//! Implements the `AiClient` trait for Gemini models via the
//! Generative Language API, plus the factory that binds clients to a
//! credential.

mod api;
mod client;
mod config;
mod factory;

pub use client::{GeminiClient, GEMINI_API_BASE};
pub use config::GeminiConfig;
pub use factory::GeminiFactory;
