//! cloudseal - client-side encryption for files kept in untrusted cloud storage.
//!
//! The storage backend only ever receives:
//! - content blobs: `salt[16] | nonce[12] | AES-256-GCM ciphertext | tag[16]`
//! - name tokens: `base64url(salt[16] | nonce[8] | ciphertext | tag[16]) + ".encrypted"`
//!
//! Keys come from the master password through PBKDF2-HMAC-SHA256
//! (100 000 iterations) with a fresh salt for every operation.
//!
//! ```no_run
//! use cloudseal::{MasterPassword, decrypt_content, encrypt_content};
//!
//! let password = MasterPassword::from("correct horse");
//! let blob = encrypt_content(b"hello", &password)?;
//! assert_eq!(decrypt_content(&blob, &password)?, b"hello");
//! # Ok::<(), cloudseal::Error>(())
//! ```

pub mod cipher;
pub mod config;
pub mod error;
pub mod frame;
pub mod secret;
pub mod session;

pub use cipher::{ContentCipher, DisplayName, Kdf, NameCipher, NameNonce};
pub use error::{Error, Result};
pub use frame::is_encrypted_name;
pub use secret::MasterPassword;
pub use session::Session;

/// Encrypts file content with the default parameters.
///
/// # Errors
///
/// See [`ContentCipher::encrypt`].
pub fn encrypt_content(plaintext: &[u8], password: &MasterPassword) -> Result<Vec<u8>> {
    ContentCipher::default().encrypt(plaintext, password)
}

/// Decrypts file content with the default parameters.
///
/// # Errors
///
/// See [`ContentCipher::decrypt`].
pub fn decrypt_content(blob: &[u8], password: &MasterPassword) -> Result<Vec<u8>> {
    ContentCipher::default().decrypt(blob, password)
}

/// Encrypts a filename into a `.encrypted` token with the default parameters.
///
/// # Errors
///
/// See [`NameCipher::encrypt`].
pub fn encrypt_name(name: &str, password: &MasterPassword) -> Result<String> {
    NameCipher::default().encrypt(name, password)
}

/// Decrypts a name token, returning it unchanged if it is not encrypted or
/// cannot be decrypted.
#[must_use]
pub fn decrypt_name(token: &str, password: &MasterPassword) -> String {
    NameCipher::default().decrypt(token, password)
}
