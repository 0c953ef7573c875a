//! Full configuration validation.
//!
//! Each section has its own check; all problems are collected into a
//! single `ConfigError::ValidationError`.

mod helpers;


use crate::schema::{AppConfig, ProviderKind};
use helpers::{validate_non_empty, validate_range, validate_range_f64};
use metaprompt_common::ConfigError;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Largest attachment the client will read into a prompt.
const MAX_ATTACHMENT_BYTES: u64 = 16 * 1024 * 1024;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_model(&mut errors, config);
    validate_credentials(&mut errors, config);
    validate_attachments(&mut errors, config);
    validate_logging(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_model(errors: &mut Vec<String>, config: &AppConfig) {
    let model = &config.model;
    validate_non_empty(errors, "model.api_base", &model.api_base);
    validate_non_empty(errors, "model.chat_model", &model.chat_model);
    validate_non_empty(errors, "model.probe_model", &model.probe_model);
    validate_range_f64(errors, "model.temperature", model.temperature, 0.0, 2.0);
    validate_range(
        errors,
        "model.max_output_tokens",
        model.max_output_tokens,
        1,
        65_536,
    );
    if let Some(ref instruction) = model.system_instruction {
        validate_non_empty(errors, "model.system_instruction", instruction);
    }
}

fn validate_credentials(errors: &mut Vec<String>, config: &AppConfig) {
    let creds = &config.credentials;
    validate_non_empty(errors, "credentials.env_var", &creds.env_var);
    validate_non_empty(errors, "credentials.storage_key", &creds.storage_key);

    if creds.provider == ProviderKind::Bridge && creds.bridge_read_command.is_none() {
        errors.push("credentials.provider = \"bridge\" requires bridge_read_command".into());
    }
}

fn validate_attachments(errors: &mut Vec<String>, config: &AppConfig) {
    let attachments = &config.attachments;
    if attachments.max_bytes == 0 || attachments.max_bytes > MAX_ATTACHMENT_BYTES {
        errors.push(format!(
            "attachments.max_bytes = {} is out of range [1, {MAX_ATTACHMENT_BYTES}]",
            attachments.max_bytes
        ));
    }
    if attachments.allowed_extensions.is_empty() {
        errors.push("attachments.allowed_extensions must not be empty".into());
    }
    for ext in &attachments.allowed_extensions {
        if ext.is_empty() || ext.starts_with('.') || ext.chars().any(|c| c.is_ascii_uppercase()) {
            errors.push(format!(
                "attachments.allowed_extensions entry {ext:?} must be lowercase without a dot"
            ));
        }
    }
}

fn validate_logging(errors: &mut Vec<String>, config: &AppConfig) {
    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(format!(
            "logging.level = {:?} must be one of {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        ));
    }
}
