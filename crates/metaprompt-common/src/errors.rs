use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures of the local key-value store and credential providers.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage read error: {0}")]
    Read(String),

    #[error("storage write error: {0}")]
    Write(String),

    #[error("storage file is corrupt: {0}")]
    Corrupt(String),

    #[error("host bridge error: {0}")]
    Bridge(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

#[derive(Debug, thiserror::Error)]
pub enum MetapromptError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Other(String),
}
