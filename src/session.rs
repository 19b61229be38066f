//! Caller-owned unlock session.
//!
//! A [`Session`] is what a front end holds between "user typed the master
//! password" and "user is done": it keeps the password in memory for a bounded
//! time so a listing can decrypt many names without prompting again. The
//! ciphers never look a password up on their own; whoever owns the session
//! passes it in, and dropping it zeroizes the password.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::cipher::{ContentCipher, DisplayName, NameCipher};
use crate::error::{Error, Result};
use crate::secret::MasterPassword;

pub struct Session {
    password: MasterPassword,
    content: ContentCipher,
    names: NameCipher,
    started: Instant,
    ttl: Option<Duration>,
}

impl Session {
    /// Opens a session that stays valid until dropped.
    pub fn new(password: MasterPassword) -> Self {
        Self { password, content: ContentCipher::default(), names: NameCipher::default(), started: Instant::now(), ttl: None }
    }

    /// Opens a session that expires `ttl` after creation.
    pub fn with_ttl(password: MasterPassword, ttl: Duration) -> Self {
        Self { ttl: Some(ttl), ..Self::new(password) }
    }

    #[must_use]
    pub fn with_ciphers(mut self, content: ContentCipher, names: NameCipher) -> Self {
        self.content = content;
        self.names = names;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.ttl.is_some_and(|ttl| self.started.elapsed() >= ttl)
    }

    /// Returns the password while the session is live.
    ///
    /// # Errors
    ///
    /// [`Error::SessionExpired`] once the time-to-live has passed.
    pub fn password(&self) -> Result<&MasterPassword> {
        if self.is_expired() {
            return Err(Error::SessionExpired);
        }

        Ok(&self.password)
    }

    /// # Errors
    ///
    /// See [`ContentCipher::encrypt`]; also [`Error::SessionExpired`].
    pub fn encrypt_content(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.content.encrypt(plaintext, self.password()?)
    }

    /// # Errors
    ///
    /// See [`ContentCipher::decrypt`]; also [`Error::SessionExpired`].
    pub fn decrypt_content(&self, blob: &[u8]) -> Result<Vec<u8>> {
        self.content.decrypt(blob, self.password()?)
    }

    /// # Errors
    ///
    /// See [`NameCipher::encrypt`]; also [`Error::SessionExpired`].
    pub fn encrypt_name(&self, name: &str) -> Result<String> {
        self.names.encrypt(name, self.password()?)
    }

    /// Resolves a stored name for display.
    ///
    /// An expired session cannot decrypt, so encrypted names fall back to the
    /// stored token like any other name decryption failure.
    pub fn resolve_name(&self, token: &str) -> DisplayName {
        match self.password() {
            Ok(password) => self.names.resolve(token, password),
            Err(_) if !crate::frame::is_encrypted_name(token) => DisplayName::Plaintext(token.to_owned()),
            Err(e) => {
                debug!(error = %e, "session expired, showing stored name");
                DisplayName::Fallback(token.to_owned())
            }
        }
    }

    pub fn decrypt_name(&self, token: &str) -> String {
        self.resolve_name(token).into_string()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("password", &self.password).field("started", &self.started).field("ttl", &self.ttl).finish_non_exhaustive()
    }
}
