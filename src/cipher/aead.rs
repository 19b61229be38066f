use aes_gcm::aead::consts::U8;
use aes_gcm::aead::{Aead, KeyInit, Nonce};
use aes_gcm::aes::Aes256;
use aes_gcm::Aes256Gcm;

use crate::cipher::DerivedKey;
use crate::config::{NAME_NONCE_SIZE, NONCE_SIZE};
use crate::error::{Error, Result};

/// AES-256-GCM driven by a raw 8-byte IV.
///
/// GCM accepts IVs other than 96 bits by hashing them into the initial
/// counter block. Browsers' WebCrypto does exactly this, so legacy name
/// tokens written with a bare 8-byte IV can only be opened this way.
type Aes256GcmShortIv = aes_gcm::AesGcm<Aes256, U8>;

/// AES-256-GCM with caller-supplied nonces.
///
/// Unlike a self-framing cipher, this type never generates or prepends a
/// nonce: framing is the caller's job. Output of [`AesGcm::seal`] is
/// `ciphertext || tag[16]`.
pub struct AesGcm<'k> {
    key: &'k DerivedKey,
}

impl<'k> AesGcm<'k> {
    #[inline]
    pub fn new(key: &'k DerivedKey) -> Self {
        Self { key }
    }

    pub fn seal(&self, nonce: &[u8; NONCE_SIZE], plaintext: &[u8]) -> Result<Vec<u8>> {
        let cipher = self.cipher::<Aes256Gcm>()?;
        cipher.encrypt(Nonce::<Aes256Gcm>::from_slice(nonce), plaintext).map_err(|e| Error::CryptoUnavailable(format!("aes-gcm encryption failed: {e}")))
    }

    /// Authenticates and decrypts `ciphertext || tag`.
    ///
    /// Every failure is reported as [`Error::DecryptionFailed`] with no detail,
    /// whether the key is wrong or the data was modified.
    pub fn open(&self, nonce: &[u8; NONCE_SIZE], sealed: &[u8]) -> Result<Vec<u8>> {
        let cipher = self.cipher::<Aes256Gcm>()?;
        cipher.decrypt(Nonce::<Aes256Gcm>::from_slice(nonce), sealed).map_err(|_| Error::DecryptionFailed)
    }

    pub fn open_short_iv(&self, iv: &[u8; NAME_NONCE_SIZE], sealed: &[u8]) -> Result<Vec<u8>> {
        let cipher = self.cipher::<Aes256GcmShortIv>()?;
        cipher.decrypt(Nonce::<Aes256GcmShortIv>::from_slice(iv), sealed).map_err(|_| Error::DecryptionFailed)
    }

    #[cfg(test)]
    pub fn seal_short_iv(&self, iv: &[u8; NAME_NONCE_SIZE], plaintext: &[u8]) -> Result<Vec<u8>> {
        let cipher = self.cipher::<Aes256GcmShortIv>()?;
        cipher.encrypt(Nonce::<Aes256GcmShortIv>::from_slice(iv), plaintext).map_err(|e| Error::CryptoUnavailable(format!("aes-gcm encryption failed: {e}")))
    }

    fn cipher<C: KeyInit>(&self) -> Result<C> {
        C::new_from_slice(self.key.as_bytes()).map_err(|e| Error::CryptoUnavailable(format!("invalid aes key: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KEY_SIZE, TAG_SIZE};

    fn key() -> DerivedKey {
        DerivedKey::from_bytes([0x42u8; KEY_SIZE])
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let key = key();
        let aead = AesGcm::new(&key);
        let nonce = [0x01u8; NONCE_SIZE];

        let sealed = aead.seal(&nonce, b"Hello, World!").unwrap();
        assert_eq!(sealed.len(), 13 + TAG_SIZE);
        assert_eq!(aead.open(&nonce, &sealed).unwrap(), b"Hello, World!");
    }

    #[test]
    fn test_seal_empty_plaintext() {
        let key = key();
        let aead = AesGcm::new(&key);
        let nonce = [0x01u8; NONCE_SIZE];

        let sealed = aead.seal(&nonce, b"").unwrap();
        assert_eq!(sealed.len(), TAG_SIZE);
        assert!(aead.open(&nonce, &sealed).unwrap().is_empty());
    }

    #[test]
    fn test_open_wrong_key() {
        let key = key();
        let wrong = DerivedKey::from_bytes([0x43u8; KEY_SIZE]);
        let nonce = [0x01u8; NONCE_SIZE];

        let sealed = AesGcm::new(&key).seal(&nonce, b"secret").unwrap();
        assert_eq!(AesGcm::new(&wrong).open(&nonce, &sealed).unwrap_err(), Error::DecryptionFailed);
    }

    #[test]
    fn test_open_wrong_nonce() {
        let key = key();
        let aead = AesGcm::new(&key);

        let sealed = aead.seal(&[0x01u8; NONCE_SIZE], b"secret").unwrap();
        assert_eq!(aead.open(&[0x02u8; NONCE_SIZE], &sealed).unwrap_err(), Error::DecryptionFailed);
    }

    #[test]
    fn test_open_tampered() {
        let key = key();
        let aead = AesGcm::new(&key);
        let nonce = [0x01u8; NONCE_SIZE];

        let mut sealed = aead.seal(&nonce, b"Hello, World!").unwrap();
        if let Some(last) = sealed.last_mut() {
            *last ^= 0xFF;
        }

        assert_eq!(aead.open(&nonce, &sealed).unwrap_err(), Error::DecryptionFailed);
    }

    #[test]
    fn test_short_iv_differs_from_zero_padded_nonce() {
        let key = key();
        let aead = AesGcm::new(&key);
        let iv = [0x07u8; NAME_NONCE_SIZE];
        let mut padded = [0u8; NONCE_SIZE];
        padded[..NAME_NONCE_SIZE].copy_from_slice(&iv);

        let sealed = aead.seal_short_iv(&iv, b"report.pdf").unwrap();
        assert_eq!(aead.open_short_iv(&iv, &sealed).unwrap(), b"report.pdf");
        assert!(aead.open(&padded, &sealed).is_err());
    }
}
