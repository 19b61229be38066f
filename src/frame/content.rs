use crate::config::{MIN_CONTENT_LEN, NONCE_SIZE, SALT_SIZE};
use crate::error::{Error, Result};

/// Layout of an encrypted content blob.
///
/// ```text
/// 0        16         28
/// | salt   | nonce    | ciphertext || tag[16] |
/// ```
///
/// The storage layer sees only the concatenated bytes.
#[derive(Debug, PartialEq, Eq)]
pub struct ContentFrame<'a> {
    pub salt: [u8; SALT_SIZE],
    pub nonce: [u8; NONCE_SIZE],
    pub sealed: &'a [u8],
}

impl<'a> ContentFrame<'a> {
    #[inline]
    pub fn new(salt: [u8; SALT_SIZE], nonce: [u8; NONCE_SIZE], sealed: &'a [u8]) -> Self {
        Self { salt, nonce, sealed }
    }

    /// Splits a blob at its fixed offsets.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedInput`] if the blob cannot hold a salt, a nonce and a tag.
    pub fn parse(blob: &'a [u8]) -> Result<Self> {
        if blob.len() < MIN_CONTENT_LEN {
            return Err(Error::too_short("content blob", MIN_CONTENT_LEN, blob.len()));
        }

        let (salt, rest) = blob.split_at(SALT_SIZE);
        let (nonce, sealed) = rest.split_at(NONCE_SIZE);

        Ok(Self { salt: to_array(salt)?, nonce: to_array(nonce)?, sealed })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut blob = Vec::with_capacity(SALT_SIZE + NONCE_SIZE + self.sealed.len());
        blob.extend_from_slice(&self.salt);
        blob.extend_from_slice(&self.nonce);
        blob.extend_from_slice(self.sealed);
        blob
    }
}

pub(crate) fn to_array<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    bytes.try_into().map_err(|_| Error::MalformedInput(format!("expected {N} bytes, got {}", bytes.len())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TAG_SIZE;

    #[test]
    fn test_layout_offsets() {
        let sealed = [0xCCu8; TAG_SIZE + 3];
        let frame = ContentFrame::new([0xAA; SALT_SIZE], [0xBB; NONCE_SIZE], &sealed);
        let bytes = frame.to_bytes();

        assert_eq!(bytes.len(), SALT_SIZE + NONCE_SIZE + TAG_SIZE + 3);
        assert!(bytes[..16].iter().all(|&b| b == 0xAA));
        assert!(bytes[16..28].iter().all(|&b| b == 0xBB));
        assert!(bytes[28..].iter().all(|&b| b == 0xCC));
    }

    #[test]
    fn test_parse_inverts_to_bytes() {
        let sealed = [0xCCu8; TAG_SIZE];
        let frame = ContentFrame::new([0x01; SALT_SIZE], [0x02; NONCE_SIZE], &sealed);
        let bytes = frame.to_bytes();

        assert_eq!(ContentFrame::parse(&bytes).unwrap(), frame);
    }

    #[test]
    fn test_parse_minimum_length() {
        assert!(ContentFrame::parse(&[0u8; MIN_CONTENT_LEN]).unwrap().sealed.len() == TAG_SIZE);
        assert!(matches!(ContentFrame::parse(&[0u8; MIN_CONTENT_LEN - 1]), Err(Error::MalformedInput(_))));
        assert!(matches!(ContentFrame::parse(&[]), Err(Error::MalformedInput(_))));
    }
}
