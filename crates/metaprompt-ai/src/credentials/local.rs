//! File-backed key-value store, the local counterpart of browser storage.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use metaprompt_common::StorageError;
use tracing::{debug, warn};

use super::{Credential, CredentialProvider};

/// A flat string-to-string map persisted as pretty JSON.
///
/// Writes go to a `.tmp` sibling first and are renamed into place. On Unix
/// the file is created with mode 0600.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl LocalStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text)
                .map_err(|e| StorageError::Corrupt(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(StorageError::Read(format!("{}: {e}", path.display())));
            }
        };
        debug!(path = %path.display(), entries = entries.len(), "Local store opened");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    /// Remove an entry. Removing a missing entry is not an error.
    pub fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| write_error(&self.path, e))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| write_error(parent, e))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        write_private(&tmp_path, json.as_bytes()).map_err(|e| write_error(&tmp_path, e))?;

        if let Err(e) = std::fs::rename(&tmp_path, &self.path) {
            warn!("atomic rename failed ({e}), falling back to direct write");
            write_private(&self.path, json.as_bytes()).map_err(|e| write_error(&self.path, e))?;
            let _ = std::fs::remove_file(&tmp_path);
        }
        Ok(())
    }
}

fn write_error(path: &Path, e: impl std::fmt::Display) -> StorageError {
    StorageError::Write(format!("{}: {e}", path.display()))
}

fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::io::Write;
        use std::os::unix::fs::OpenOptionsExt;
        let mut f = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?;
        f.write_all(bytes)
    }
    #[cfg(not(unix))]
    {
        std::fs::write(path, bytes)
    }
}

/// Keeps the credential under one entry of a `LocalStore`.
#[derive(Debug)]
pub struct LocalStorageProvider {
    store: LocalStore,
    entry: String,
}

impl LocalStorageProvider {
    pub fn new(store: LocalStore, entry: impl Into<String>) -> Self {
        Self {
            store,
            entry: entry.into(),
        }
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }
}

impl CredentialProvider for LocalStorageProvider {
    fn name(&self) -> &'static str {
        "local"
    }

    fn load(&self) -> Result<Option<Credential>, StorageError> {
        Ok(self
            .store
            .get(&self.entry)
            .filter(|v| !v.is_empty())
            .map(Credential::new))
    }

    fn save(&mut self, credential: &Credential) -> Result<(), StorageError> {
        self.store.set(&self.entry, credential.expose())
    }

    fn remove(&mut self) -> Result<(), StorageError> {
        self.store.remove(&self.entry)
    }
}
