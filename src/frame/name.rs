use crate::config::{SALT_SIZE, TAG_SIZE};
use crate::error::{Error, Result};
use crate::frame::content::to_array;

/// Binary layout inside a name token, generic over the stored nonce length.
///
/// ```text
/// | salt[16] | nonce[N] | ciphertext || tag[16] |
/// ```
///
/// Compact tokens use `N = 8`, full-nonce tokens `N = 12`. The layout itself
/// does not record `N`; readers try the candidates in turn.
#[derive(Debug, PartialEq, Eq)]
pub struct NameFrame<'a, const N: usize> {
    pub salt: [u8; SALT_SIZE],
    pub nonce: [u8; N],
    pub sealed: &'a [u8],
}

impl<'a, const N: usize> NameFrame<'a, N> {
    pub const MIN_LEN: usize = SALT_SIZE + N + TAG_SIZE;

    #[inline]
    pub fn new(salt: [u8; SALT_SIZE], nonce: [u8; N], sealed: &'a [u8]) -> Self {
        Self { salt, nonce, sealed }
    }

    /// # Errors
    ///
    /// [`Error::MalformedInput`] if the bytes cannot hold a salt, a nonce and a tag.
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() < Self::MIN_LEN {
            return Err(Error::too_short("name frame", Self::MIN_LEN, bytes.len()));
        }

        let (salt, rest) = bytes.split_at(SALT_SIZE);
        let (nonce, sealed) = rest.split_at(N);

        Ok(Self { salt: to_array(salt)?, nonce: to_array(nonce)?, sealed })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(SALT_SIZE + N + self.sealed.len());
        bytes.extend_from_slice(&self.salt);
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(self.sealed);
        bytes
    }
}

/// Right-pads a short nonce with zero bytes to `M` bytes.
pub fn pad_nonce<const N: usize, const M: usize>(nonce: &[u8; N]) -> [u8; M] {
    let mut padded = [0u8; M];
    let len = N.min(M);
    padded[..len].copy_from_slice(&nonce[..len]);
    padded
}
