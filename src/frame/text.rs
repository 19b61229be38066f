//! Text-safe encoding for name tokens.
//!
//! Base64 with the URL-and-filename-safe alphabet (`-` and `_` in place of
//! `+` and `/`). Encoding never emits `=` padding. Decoding accepts input with
//! or without padding, since older writers padded their tokens.

use base64::Engine;
use base64::alphabet::URL_SAFE;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::config::NAME_SUFFIX;
use crate::error::{Error, Result};

const CODEC: GeneralPurpose = GeneralPurpose::new(&URL_SAFE, GeneralPurposeConfig::new().with_encode_padding(false).with_decode_padding_mode(DecodePaddingMode::Indifferent));

pub fn encode(bytes: &[u8]) -> String {
    CODEC.encode(bytes)
}

/// # Errors
///
/// [`Error::MalformedInput`] if `text` contains characters outside the alphabet
/// or has an impossible length.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    CODEC.decode(text).map_err(|e| Error::MalformedInput(format!("invalid token encoding: {e}")))
}

/// Whether `name` carries the encrypted-name marker.
#[inline]
#[must_use]
pub fn is_encrypted_name(name: &str) -> bool {
    name.ends_with(NAME_SUFFIX)
}

/// Encodes a name frame and appends the marker.
pub fn seal(frame: &[u8]) -> String {
    let mut token = encode(frame);
    token.push_str(NAME_SUFFIX);
    token
}

/// Removes the marker, returning `None` when `token` does not end with it.
#[inline]
pub fn strip(token: &str) -> Option<&str> {
    token.strip_suffix(NAME_SUFFIX)
}
