//! Knowledge file attachment limits.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentConfig {
    pub max_bytes: u64,
    /// Lowercase extensions without the leading dot.
    pub allowed_extensions: Vec<String>,
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            max_bytes: 2 * 1024 * 1024,
            allowed_extensions: [
                "txt", "md", "csv", "json", "js", "jsx", "ts", "tsx", "py", "html", "css", "xml",
                "yaml", "yml",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}
