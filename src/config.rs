//! Global Configuration Constants
//!
//! Every size and parameter that is part of the on-the-wire format lives here.
//! Changing any of the format constants makes previously written blobs and
//! name tokens unreadable, so they are fixed rather than configurable.
//!
//! ## Wire formats
//!
//! ```text
//! content blob : salt[16] | nonce[12] | ciphertext | tag[16]
//! name token   : base64url_nopad(salt[16] | nonce[8] | ciphertext | tag[16]) + ".encrypted"
//! ```

/// Application name used in user interfaces
pub const APP_NAME: &str = "cloudseal";

// === Key Derivation Parameters ===

/// PBKDF2-HMAC-SHA256 iteration count
///
/// The count is not recorded in the output; a blob can only be read back with
/// the same count it was written with.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Length of derived keys in bytes (AES-256)
pub const KEY_SIZE: usize = 32;

/// Length of the per-operation salt in bytes
pub const SALT_SIZE: usize = 16;

// === AEAD Parameters ===

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the nonce stored in compact name tokens
///
/// Right-padded with zero bytes up to [`NONCE_SIZE`] before use.
pub const NAME_NONCE_SIZE: usize = 8;

/// Size of the AES-GCM authentication tag in bytes (128 bits)
pub const TAG_SIZE: usize = 16;

/// Smallest valid content blob: an empty plaintext still carries salt, nonce and tag
pub const MIN_CONTENT_LEN: usize = SALT_SIZE + NONCE_SIZE + TAG_SIZE;

// === Name Tokens ===

/// Marker suffix identifying encrypted names
///
/// External code relies on this suffix to decide whether a name needs
/// decryption before display.
pub const NAME_SUFFIX: &str = ".encrypted";

/// Extension used by the CLI for blobs whose name is kept in the clear
pub const BLOB_EXTENSION: &str = ".blob";

// === User Interface ===

/// Minimum password length accepted by interactive prompts
///
/// The library itself only rejects empty passwords.
pub const PASSWORD_MIN_LENGTH: usize = 8;
