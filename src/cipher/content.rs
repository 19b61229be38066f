use tracing::{debug, instrument};

use crate::cipher::random::random_bytes;
use crate::cipher::{AesGcm, Kdf};
use crate::config::{NONCE_SIZE, SALT_SIZE, TAG_SIZE};
use crate::error::Result;
use crate::frame::ContentFrame;
use crate::secret::MasterPassword;

/// Authenticated encryption of file bodies.
///
/// Every call draws a fresh salt and nonce, derives its own key and keeps
/// nothing afterwards, so one value can be shared freely between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentCipher {
    kdf: Kdf,
}

impl ContentCipher {
    #[must_use]
    pub const fn new(kdf: Kdf) -> Self {
        Self { kdf }
    }

    /// Size of the blob produced for a plaintext of `plaintext_len` bytes.
    #[must_use]
    pub const fn blob_len(plaintext_len: usize) -> usize {
        SALT_SIZE + NONCE_SIZE + plaintext_len + TAG_SIZE
    }

    /// Encrypts `plaintext` into `salt || nonce || ciphertext || tag`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPassword`](crate::Error::InvalidPassword) for an empty password
    /// - [`Error::CryptoUnavailable`](crate::Error::CryptoUnavailable) if randomness or the cipher fails
    #[instrument(level = "debug", skip_all, fields(len = plaintext.len()))]
    pub fn encrypt(&self, plaintext: &[u8], password: &MasterPassword) -> Result<Vec<u8>> {
        let salt: [u8; SALT_SIZE] = random_bytes()?;
        let nonce: [u8; NONCE_SIZE] = random_bytes()?;

        let key = self.kdf.derive(password, &salt)?;
        let sealed = AesGcm::new(&key).seal(&nonce, plaintext)?;

        let blob = ContentFrame::new(salt, nonce, &sealed).to_bytes();
        debug!(blob_len = blob.len(), "content encrypted");

        Ok(blob)
    }

    /// Decrypts a blob produced by [`ContentCipher::encrypt`].
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedInput`](crate::Error::MalformedInput) if the blob is shorter than salt, nonce and tag
    /// - [`Error::InvalidPassword`](crate::Error::InvalidPassword) for an empty password
    /// - [`Error::DecryptionFailed`](crate::Error::DecryptionFailed) for a wrong password or modified blob
    #[instrument(level = "debug", skip_all, fields(len = blob.len()))]
    pub fn decrypt(&self, blob: &[u8], password: &MasterPassword) -> Result<Vec<u8>> {
        let frame = ContentFrame::parse(blob)?;

        let key = self.kdf.derive(password, &frame.salt)?;
        let plaintext = AesGcm::new(&key).open(&frame.nonce, frame.sealed)?;
        debug!(plaintext_len = plaintext.len(), "content decrypted");

        Ok(plaintext)
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use proptest::prelude::*;

    use super::*;
    use crate::error::Error;

    fn fast() -> ContentCipher {
        ContentCipher::new(Kdf::with_iterations(NonZeroU32::new(1_000).unwrap()))
    }

    #[test]
    fn test_hello_scenario_with_default_parameters() {
        let cipher = ContentCipher::default();
        let password = MasterPassword::from("correct horse");

        let blob = cipher.encrypt(b"hello", &password).unwrap();
        assert_eq!(blob.len(), 16 + 12 + 5 + 16);
        assert_eq!(cipher.decrypt(&blob, &password).unwrap(), b"hello");

        let wrong = cipher.decrypt(&blob, &MasterPassword::from("wrong password"));
        assert_eq!(wrong.unwrap_err(), Error::DecryptionFailed);

        let mut tampered = blob.clone();
        if let Some(last) = tampered.last_mut() {
            *last ^= 0x01;
        }
        assert_eq!(cipher.decrypt(&tampered, &password).unwrap_err(), Error::DecryptionFailed);
    }

    #[test]
    fn test_encrypt_is_not_deterministic() {
        let cipher = fast();
        let password = MasterPassword::from("correct horse");

        let blob1 = cipher.encrypt(b"same plaintext", &password).unwrap();
        let blob2 = cipher.encrypt(b"same plaintext", &password).unwrap();

        assert_ne!(blob1, blob2);
        assert_ne!(blob1[..SALT_SIZE], blob2[..SALT_SIZE]);
        assert_ne!(blob1[SALT_SIZE..SALT_SIZE + NONCE_SIZE], blob2[SALT_SIZE..SALT_SIZE + NONCE_SIZE]);
        assert_eq!(cipher.decrypt(&blob1, &password).unwrap(), b"same plaintext");
        assert_eq!(cipher.decrypt(&blob2, &password).unwrap(), b"same plaintext");
    }

    #[test]
    fn test_empty_plaintext() {
        let cipher = fast();
        let password = MasterPassword::from("correct horse");

        let blob = cipher.encrypt(b"", &password).unwrap();
        assert_eq!(blob.len(), ContentCipher::blob_len(0));
        assert!(cipher.decrypt(&blob, &password).unwrap().is_empty());
    }

    #[test]
    fn test_every_single_byte_flip_is_detected() {
        let cipher = fast();
        let password = MasterPassword::from("correct horse");
        let blob = cipher.encrypt(b"hello", &password).unwrap();

        for i in 0..blob.len() {
            let mut tampered = blob.clone();
            tampered[i] ^= 0x01;
            assert_eq!(cipher.decrypt(&tampered, &password).unwrap_err(), Error::DecryptionFailed, "flip at byte {i} went undetected");
        }
    }

    #[test]
    fn test_short_blob_is_malformed() {
        let cipher = fast();
        let password = MasterPassword::from("correct horse");

        assert!(matches!(cipher.decrypt(&[0u8; 43], &password), Err(Error::MalformedInput(_))));
        assert!(matches!(cipher.decrypt(&[], &password), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_truncated_blob_fails() {
        let cipher = fast();
        let password = MasterPassword::from("correct horse");
        let blob = cipher.encrypt(b"hello world", &password).unwrap();

        assert_eq!(cipher.decrypt(&blob[..blob.len() - 1], &password).unwrap_err(), Error::DecryptionFailed);
    }

    #[test]
    fn test_empty_password_rejected() {
        let cipher = fast();

        assert_eq!(cipher.encrypt(b"hello", &MasterPassword::from("")).unwrap_err(), Error::InvalidPassword);

        let blob = cipher.encrypt(b"hello", &MasterPassword::from("x")).unwrap();
        assert_eq!(cipher.decrypt(&blob, &MasterPassword::from("")).unwrap_err(), Error::InvalidPassword);
    }

    #[test]
    fn test_iteration_count_must_match() {
        let password = MasterPassword::from("correct horse");
        let blob = fast().encrypt(b"hello", &password).unwrap();

        let other = ContentCipher::new(Kdf::with_iterations(NonZeroU32::new(2_000).unwrap()));
        assert_eq!(other.decrypt(&blob, &password).unwrap_err(), Error::DecryptionFailed);
    }

    #[test]
    fn test_concurrent_encryption() {
        let cipher = fast();
        let handles: Vec<_> = (0..4u8)
            .map(|i| {
                std::thread::spawn(move || {
                    let password = MasterPassword::from("shared password");
                    let plaintext = vec![i; 64];
                    let blob = cipher.encrypt(&plaintext, &password).unwrap();
                    (plaintext, blob)
                })
            })
            .collect();

        let password = MasterPassword::from("shared password");
        for handle in handles {
            let (plaintext, blob) = handle.join().unwrap();
            assert_eq!(cipher.decrypt(&blob, &password).unwrap(), plaintext);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_roundtrip_and_length(plaintext in proptest::collection::vec(any::<u8>(), 0..512), password in "[ -~]{1,24}") {
            let cipher = fast();
            let password = MasterPassword::from(password.as_str());

            let blob = cipher.encrypt(&plaintext, &password).unwrap();
            prop_assert_eq!(blob.len(), 16 + 12 + plaintext.len() + 16);
            prop_assert_eq!(cipher.decrypt(&blob, &password).unwrap(), plaintext);
        }

        #[test]
        fn prop_wrong_password_rejected(plaintext in proptest::collection::vec(any::<u8>(), 0..64), a in "[a-z]{1,12}", b in "[A-Z]{1,12}") {
            let cipher = fast();

            let blob = cipher.encrypt(&plaintext, &MasterPassword::from(a.as_str())).unwrap();
            prop_assert_eq!(cipher.decrypt(&blob, &MasterPassword::from(b.as_str())).unwrap_err(), Error::DecryptionFailed);
        }
    }
}
