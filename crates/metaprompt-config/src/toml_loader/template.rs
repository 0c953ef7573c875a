//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Metaprompt Configuration
# Only override what you want to change -- missing fields use defaults.

[model]
# api_base = "https://generativelanguage.googleapis.com/v1beta/models"
# chat_model = "gemini-3-pro-preview"
# probe_model = "gemini-3-flash-preview"   # used by the connection test
# temperature = 0.7                        # 0.0-2.0
# max_output_tokens = 8192                 # 1-65536
# system_instruction = "..."               # replaces the built-in instruction

[credentials]
# provider = "auto"          # auto, local, bridge
# env_var = "GEMINI_API_KEY" # bootstraps the key when none is stored
# storage_key = "GEMINI_API_KEY"
# bridge_read_command = "pass show gemini/api-key"
# bridge_select_command = "my-key-picker"

[conversation]
# locale = "en"              # en, ko
# fallback_reply = "..."     # shown when the model returns an empty reply

[attachments]
# max_bytes = 2097152
# allowed_extensions = ["txt", "md", "csv", "json", "js", "jsx", "ts", "tsx", "py", "html", "css", "xml", "yaml", "yml"]

[logging]
# level = "warn"             # trace, debug, info, warn, error
"##
    .to_string()
}
