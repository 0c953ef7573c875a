//! The dispatcher's failure taxonomy.

use crate::AiError;

/// Error bodies that mean the key itself was refused.
const CREDENTIAL_REJECTION_SIGNATURES: &[&str] = &[
    "api_key_invalid",
    "api key not valid",
    "permission_denied",
    "unauthenticated",
    "requested entity was not found",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    CredentialMissing,
    CredentialInvalid,
    TransientFailure,
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// No key configured; nothing was sent.
    #[error("no API key configured")]
    CredentialMissing,

    /// The remote refused the key.
    #[error("API key rejected: {0}")]
    CredentialInvalid(#[source] AiError),

    /// Anything else; the session stays usable for a retry.
    #[error("request failed: {0}")]
    TransientFailure(#[source] AiError),
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::CredentialMissing => ErrorKind::CredentialMissing,
            DispatchError::CredentialInvalid(_) => ErrorKind::CredentialInvalid,
            DispatchError::TransientFailure(_) => ErrorKind::TransientFailure,
        }
    }

    /// Whether the caller should ask the user for a (new) key.
    pub fn needs_credential(&self) -> bool {
        matches!(
            self,
            DispatchError::CredentialMissing | DispatchError::CredentialInvalid(_)
        )
    }
}

/// HTTP 401/403, or an error body naming an auth/permission failure.
pub fn is_credential_rejection(err: &AiError) -> bool {
    match err {
        AiError::Http { status, body } => {
            if matches!(status, 401 | 403) {
                return true;
            }
            let body = body.to_ascii_lowercase();
            CREDENTIAL_REJECTION_SIGNATURES
                .iter()
                .any(|sig| body.contains(sig))
        }
        _ => false,
    }
}

/// Sort a transport failure into the taxonomy.
pub fn classify(err: AiError) -> DispatchError {
    if is_credential_rejection(&err) {
        DispatchError::CredentialInvalid(err)
    } else {
        DispatchError::TransientFailure(err)
    }
}
