//! # Cryptographic Operations Module
//!
//! Password-based authenticated encryption for file contents and filenames.
//!
//! ## Architecture
//!
//! - **Key derivation** ([`Kdf`]): PBKDF2-HMAC-SHA256, 100 000 iterations, one key per call
//! - **Primitive** ([`AesGcm`]): AES-256-GCM with caller-supplied nonces
//! - **Ciphers** ([`ContentCipher`], [`NameCipher`]): fresh salt and nonce per call, framing via [`crate::frame`]
//!
//! Nothing here keeps state between calls. A key is derived, used once and
//! zeroized when the call returns.

mod aead;
mod content;
mod derive;
mod name;
mod random;

pub use aead::AesGcm;
pub use content::ContentCipher;
pub use derive::{DerivedKey, Kdf};
pub use name::{DisplayName, NameCipher, NameNonce};
pub use random::random_bytes;
