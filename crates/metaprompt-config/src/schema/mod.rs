//! Configuration schema.
//!
//! All structs use `#[serde(default)]` so partial TOML files work.

mod attachments;
mod conversation;
mod credentials;
mod logging;
mod model;

pub use attachments::AttachmentConfig;
pub use conversation::{ConversationConfig, Locale};
pub use credentials::{CredentialsConfig, ProviderKind};
pub use logging::LoggingConfig;
pub use model::ModelConfig;

use serde::{Deserialize, Serialize};

/// Top-level configuration, one field per TOML section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub credentials: CredentialsConfig,
    pub conversation: ConversationConfig,
    pub attachments: AttachmentConfig,
    pub logging: LoggingConfig,
}
