//! # Key Derivation with PBKDF2
//!
//! Turns a master password and a per-operation salt into a one-time 256-bit
//! AES key using PBKDF2 over HMAC-SHA256.
//!
//! ## Security Properties
//!
//! - **Iterated**: 100 000 rounds make every password guess cost as much as
//!   100 000 HMAC computations, even for an attacker holding a leaked blob
//! - **Salted**: a fresh 16-byte salt per operation means identical passwords
//!   never yield identical keys
//! - **Deterministic**: the same password and salt always yield the same key,
//!   which is what lets decryption re-derive it from the stored salt

use std::fmt::{Debug, Formatter};
use std::num::NonZeroU32;

use hmac::Hmac;
use sha2::Sha256;
use tracing::instrument;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::{KEY_SIZE, PBKDF2_ITERATIONS, SALT_SIZE};
use crate::error::{Error, Result};
use crate::secret::MasterPassword;

/// A derived AES-256 key, zeroized when dropped.
///
/// Lives only inside a single encrypt or decrypt call.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_SIZE],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Debug for DerivedKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey").field("bytes", &"[REDACTED]").finish()
    }
}

/// # Key Derivation Function
///
/// PBKDF2-HMAC-SHA256 with a fixed iteration count. The count is part of the
/// contract between writer and reader: it is not stored in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kdf {
    iterations: NonZeroU32,
}

/// A zero count fails the build here instead of weakening the KDF.
const DEFAULT_ITERATIONS: NonZeroU32 = NonZeroU32::new(PBKDF2_ITERATIONS).unwrap();

impl Default for Kdf {
    fn default() -> Self {
        Self { iterations: DEFAULT_ITERATIONS }
    }
}

impl Kdf {
    /// Creates a KDF with a custom iteration count.
    ///
    /// Blobs written with one count can only be read with the same count.
    #[must_use]
    pub const fn with_iterations(iterations: NonZeroU32) -> Self {
        Self { iterations }
    }

    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations.get()
    }

    /// Derives a key from `password` and `salt`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPassword`] if the password is empty. This is
    /// checked before any derivation work is done.
    #[instrument(level = "debug", skip_all, fields(iterations = self.iterations.get()))]
    pub fn derive(&self, password: &MasterPassword, salt: &[u8; SALT_SIZE]) -> Result<DerivedKey> {
        if password.is_empty() {
            return Err(Error::InvalidPassword);
        }

        let mut key = [0u8; KEY_SIZE];
        let derived = pbkdf2::pbkdf2::<Hmac<Sha256>>(password.expose_secret(), salt, self.iterations.get(), &mut key);
        if let Err(e) = derived {
            key.zeroize();
            return Err(Error::CryptoUnavailable(format!("key derivation failed: {e}")));
        }

        Ok(DerivedKey::from_bytes(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_kdf() -> Kdf {
        Kdf::with_iterations(NonZeroU32::new(1_000).unwrap())
    }

    #[test]
    fn test_default_iterations() {
        assert_eq!(Kdf::default().iterations(), 100_000);
        assert_eq!(DEFAULT_ITERATIONS.get(), PBKDF2_ITERATIONS);
    }

    #[test]
    fn test_derive_deterministic() {
        let password = MasterPassword::from("correct horse");
        let salt = [0x42u8; SALT_SIZE];

        let key1 = fast_kdf().derive(&password, &salt).unwrap();
        let key2 = fast_kdf().derive(&password, &salt).unwrap();
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_derive_different_passwords() {
        let salt = [0x42u8; SALT_SIZE];
        let key1 = fast_kdf().derive(&MasterPassword::from("password1"), &salt).unwrap();
        let key2 = fast_kdf().derive(&MasterPassword::from("password2"), &salt).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_derive_different_salts() {
        let password = MasterPassword::from("same password");
        let key1 = fast_kdf().derive(&password, &[0x01; SALT_SIZE]).unwrap();
        let key2 = fast_kdf().derive(&password, &[0x02; SALT_SIZE]).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_derive_different_iterations() {
        let password = MasterPassword::from("same password");
        let salt = [0x42u8; SALT_SIZE];
        let key1 = fast_kdf().derive(&password, &salt).unwrap();
        let key2 = Kdf::with_iterations(NonZeroU32::new(1_001).unwrap()).derive(&password, &salt).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_derive_empty_password() {
        let result = fast_kdf().derive(&MasterPassword::from(""), &[0u8; SALT_SIZE]);
        assert_eq!(result.unwrap_err(), Error::InvalidPassword);
    }

    #[test]
    fn test_derive_matches_pbkdf2_hmac_sha256() {
        let password = MasterPassword::from("passwd");
        let salt = *b"salt-salt-salt-!";

        let mut expected = [0u8; KEY_SIZE];
        pbkdf2::pbkdf2::<Hmac<Sha256>>(b"passwd", &salt, 1_000, &mut expected).unwrap();

        assert_eq!(fast_kdf().derive(&password, &salt).unwrap().as_bytes(), &expected);
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = DerivedKey::from_bytes([0xAB; KEY_SIZE]);
        assert!(!format!("{key:?}").contains("171"));
    }
}
