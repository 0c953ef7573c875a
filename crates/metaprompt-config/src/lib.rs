//! Metaprompt configuration system.
//!
//! TOML-based configuration with validation. Every section uses serde
//! defaults so partial configs work out of the box.
//!
//! ```rust,no_run
//! let config = metaprompt_config::load_config(None).expect("failed to load config");
//! println!("chatting with {}", config.model.chat_model);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    AppConfig, AttachmentConfig, ConversationConfig, CredentialsConfig, Locale, LoggingConfig,
    ModelConfig, ProviderKind,
};
pub use toml_loader::{default_config_path, default_storage_path};

use std::path::Path;

use metaprompt_common::ConfigError;

/// Load config and validate it.
///
/// With `path`, the file must exist. Without it, the platform default
/// path is used and a commented default file is created on first run.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };

    validation::validate(&config)?;
    Ok(config)
}
