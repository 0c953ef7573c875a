//! Host-provided key management.
//!
//! Some environments own the API key themselves and only expose "is a key
//! selected" and "open the key picker". `BridgeProvider` adapts such a
//! capability to `CredentialProvider`.

use std::process::{Command, Stdio};

use metaprompt_common::StorageError;
use tracing::{debug, info};

use super::{Credential, CredentialProvider};

/// Key-management capability offered by the host environment.
pub trait HostBridge: Send {
    fn has_selected_key(&self) -> Result<bool, StorageError>;

    /// Let the user pick a key through the host's own UI.
    fn open_select_key(&mut self) -> Result<(), StorageError>;

    fn selected_key(&self) -> Result<Option<String>, StorageError>;

    fn can_select(&self) -> bool;
}

/// A host bridge made of shell commands, e.g. a password manager CLI.
///
/// `read_command` prints the selected key on stdout. `select_command`, if
/// set, runs attached to the terminal so the user can pick a key.
#[derive(Debug, Clone)]
pub struct CommandBridge {
    read_command: String,
    select_command: Option<String>,
}

impl CommandBridge {
    pub fn new(read_command: impl Into<String>) -> Self {
        Self {
            read_command: read_command.into(),
            select_command: None,
        }
    }

    pub fn with_select_command(mut self, command: impl Into<String>) -> Self {
        self.select_command = Some(command.into());
        self
    }
}

fn shell(command: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command]);
        cmd
    }
}

impl HostBridge for CommandBridge {
    fn has_selected_key(&self) -> Result<bool, StorageError> {
        Ok(self.selected_key()?.is_some())
    }

    fn open_select_key(&mut self) -> Result<(), StorageError> {
        let Some(ref command) = self.select_command else {
            return Err(StorageError::NotSupported(
                "no bridge_select_command configured".into(),
            ));
        };

        let status = shell(command)
            .status()
            .map_err(|e| StorageError::Bridge(format!("failed to run key picker: {e}")))?;
        if !status.success() {
            return Err(StorageError::Bridge(format!("key picker exited with {status}")));
        }
        Ok(())
    }

    fn selected_key(&self) -> Result<Option<String>, StorageError> {
        let output = shell(&self.read_command)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| StorageError::Bridge(format!("failed to run key command: {e}")))?;

        if !output.status.success() {
            debug!(status = %output.status, "Bridge key command reported no key");
            return Ok(None);
        }

        let key = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(if key.is_empty() { None } else { Some(key) })
    }

    fn can_select(&self) -> bool {
        self.select_command.is_some()
    }
}

/// Credential provider delegating to a `HostBridge`.
///
/// The host owns the key, so saving or removing it from here is not
/// supported; the picker is the way to change it.
pub struct BridgeProvider {
    bridge: Box<dyn HostBridge>,
}

impl BridgeProvider {
    pub fn new(bridge: Box<dyn HostBridge>) -> Self {
        Self { bridge }
    }
}

impl CredentialProvider for BridgeProvider {
    fn name(&self) -> &'static str {
        "bridge"
    }

    /// Reads the key once; the read command may prompt the user.
    fn load(&self) -> Result<Option<Credential>, StorageError> {
        Ok(self.bridge.selected_key()?.map(Credential::new))
    }

    fn save(&mut self, _credential: &Credential) -> Result<(), StorageError> {
        Err(StorageError::NotSupported(
            "the host bridge manages its own key; use the key picker".into(),
        ))
    }

    fn remove(&mut self) -> Result<(), StorageError> {
        Err(StorageError::NotSupported(
            "the host bridge manages its own key; use the key picker".into(),
        ))
    }

    fn open_selector(&mut self) -> Result<bool, StorageError> {
        if !self.bridge.can_select() {
            return Ok(false);
        }
        self.bridge.open_select_key()?;
        info!("Host key picker completed");
        Ok(true)
    }
}
