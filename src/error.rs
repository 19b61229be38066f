//! Error types for cryptographic operations.

use thiserror::Error;

/// Errors surfaced by key derivation, content encryption and name encryption.
///
/// Wrong passwords and tampered data both map to [`Error::DecryptionFailed`];
/// the two cases cannot be told apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid password: password cannot be empty")]
    InvalidPassword,

    #[error("decryption failed: wrong password or corrupted data")]
    DecryptionFailed,

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("cryptography unavailable: {0}")]
    CryptoUnavailable(String),

    #[error("session expired")]
    SessionExpired,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn too_short(what: &str, expected: usize, got: usize) -> Self {
        Self::MalformedInput(format!("{what} too short: need at least {expected} bytes, got {got}"))
    }
}
