//! # Filename Encryption
//!
//! Filenames are encrypted with the same password-derived AES-256-GCM as file
//! bodies, then turned into a filesystem-safe token ending in `.encrypted`.
//!
//! Decryption is best-effort. A name that cannot be decrypted is shown as-is
//! rather than blocking a listing, so [`NameCipher::decrypt`] never fails; the
//! typed error is still available through [`NameCipher::try_decrypt`].
//!
//! ## Nonce layouts
//!
//! | Policy | Stored nonce | AEAD nonce |
//! |---|---|---|
//! | [`NameNonce::Compact`] | 8 bytes | stored bytes + 4 zero bytes |
//! | [`NameNonce::Full`] | 12 bytes | stored bytes |
//!
//! Compact is the established token format. Its 64 random bits make nonce
//! collisions under one password far likelier than with 96 bits, so new
//! writers may opt into Full. Readers accept both, plus the legacy browser
//! layout where the 8 bytes were used directly as a GCM IV.

use std::fmt::{Display, Formatter};

use tracing::{debug, instrument};

use crate::cipher::random::random_bytes;
use crate::cipher::{AesGcm, Kdf};
use crate::config::{NAME_NONCE_SIZE, NAME_SUFFIX, NONCE_SIZE, SALT_SIZE};
use crate::error::{Error, Result};
use crate::frame::{NameFrame, pad_nonce, text};
use crate::secret::MasterPassword;

/// Nonce layout used when writing new name tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameNonce {
    /// 8 stored bytes, zero-padded to 12 for the cipher.
    #[default]
    Compact,

    /// 12 stored random bytes.
    Full,
}

/// Result of resolving a stored name for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayName {
    /// The name had no `.encrypted` marker and is shown unchanged.
    Plaintext(String),

    /// The token was decrypted.
    Decrypted(String),

    /// The token carried the marker but could not be decrypted; it is shown unchanged.
    Fallback(String),
}

impl DisplayName {
    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plaintext(name) | Self::Decrypted(name) | Self::Fallback(name) => name,
        }
    }

    #[inline]
    pub fn into_string(self) -> String {
        match self {
            Self::Plaintext(name) | Self::Decrypted(name) | Self::Fallback(name) => name,
        }
    }

    #[inline]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

impl Display for DisplayName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated encryption of filenames into `.encrypted` tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameCipher {
    kdf: Kdf,
    nonce: NameNonce,
}

impl NameCipher {
    #[must_use]
    pub const fn new(kdf: Kdf) -> Self {
        Self { kdf, nonce: NameNonce::Compact }
    }

    #[must_use]
    pub const fn with_nonce(mut self, nonce: NameNonce) -> Self {
        self.nonce = nonce;
        self
    }

    #[must_use]
    pub const fn nonce(&self) -> NameNonce {
        self.nonce
    }

    /// Encrypts `name` into `base64url(salt || nonce || ciphertext || tag) + ".encrypted"`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPassword`] for an empty password
    /// - [`Error::CryptoUnavailable`] if randomness or the cipher fails
    #[instrument(level = "debug", skip_all, fields(nonce = ?self.nonce))]
    pub fn encrypt(&self, name: &str, password: &MasterPassword) -> Result<String> {
        let salt: [u8; SALT_SIZE] = random_bytes()?;

        let frame = match self.nonce {
            NameNonce::Compact => {
                let nonce: [u8; NAME_NONCE_SIZE] = random_bytes()?;
                let key = self.kdf.derive(password, &salt)?;
                let sealed = AesGcm::new(&key).seal(&pad_nonce(&nonce), name.as_bytes())?;
                NameFrame::new(salt, nonce, &sealed).to_bytes()
            }
            NameNonce::Full => {
                let nonce: [u8; NONCE_SIZE] = random_bytes()?;
                let key = self.kdf.derive(password, &salt)?;
                let sealed = AesGcm::new(&key).seal(&nonce, name.as_bytes())?;
                NameFrame::new(salt, nonce, &sealed).to_bytes()
            }
        };

        Ok(text::seal(&frame))
    }

    /// Decrypts a token, returning it unchanged when it is not encrypted or
    /// cannot be decrypted.
    #[must_use]
    pub fn decrypt(&self, token: &str, password: &MasterPassword) -> String {
        self.resolve(token, password).into_string()
    }

    /// Resolves a stored name for display, reporting which path was taken.
    ///
    /// This is the recovery point for name decryption errors: they are logged
    /// and replaced by [`DisplayName::Fallback`].
    pub fn resolve(&self, token: &str, password: &MasterPassword) -> DisplayName {
        if !text::is_encrypted_name(token) {
            return DisplayName::Plaintext(token.to_owned());
        }

        match self.try_decrypt(token, password) {
            Ok(name) => DisplayName::Decrypted(name),
            Err(e) => Self::recover(token, &e),
        }
    }

    /// Decrypts a token, surfacing every failure.
    ///
    /// Authenticated bytes that are not valid UTF-8 are decoded lossily, with
    /// U+FFFD in place of each invalid sequence.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedInput`] if the marker is missing, the encoding is
    ///   invalid or the frame is too short
    /// - [`Error::InvalidPassword`] for an empty password
    /// - [`Error::DecryptionFailed`] if no layout authenticates
    #[instrument(level = "debug", skip_all, fields(len = token.len()))]
    pub fn try_decrypt(&self, token: &str, password: &MasterPassword) -> Result<String> {
        let encoded = text::strip(token).ok_or_else(|| Error::MalformedInput(format!("name does not end with {NAME_SUFFIX}")))?;
        let bytes = text::decode(encoded)?;
        let plaintext = self.open(&bytes, password)?;

        Ok(String::from_utf8_lossy(&plaintext).into_owned())
    }

    /// Tries each known nonce layout under a single derived key.
    ///
    /// All layouts start with the same salt, so the key is derived once. A
    /// layout that does not match the writer's fails tag verification.
    fn open(&self, bytes: &[u8], password: &MasterPassword) -> Result<Vec<u8>> {
        let compact = NameFrame::<NAME_NONCE_SIZE>::parse(bytes)?;
        let key = self.kdf.derive(password, &compact.salt)?;
        let aead = AesGcm::new(&key);

        aead.open(&pad_nonce(&compact.nonce), compact.sealed)
            .or_else(|_| aead.open_short_iv(&compact.nonce, compact.sealed))
            .or_else(|_| {
                let full = NameFrame::<NONCE_SIZE>::parse(bytes).map_err(|_| Error::DecryptionFailed)?;
                aead.open(&full.nonce, full.sealed)
            })
    }

    fn recover(token: &str, error: &Error) -> DisplayName {
        debug!(%error, "name decryption failed, showing stored name");
        DisplayName::Fallback(token.to_owned())
    }
}
