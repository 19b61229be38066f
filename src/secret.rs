use std::fmt::{Debug, Formatter};

use secrecy::{ExposeSecret, SecretBox, SecretString};

/// The user's master password.
///
/// Held in a [`SecretBox`] so the bytes are zeroized on drop and never show up
/// in `Debug` output.
pub struct MasterPassword {
    inner: SecretBox<Vec<u8>>,
}

impl MasterPassword {
    pub fn new(password: &[u8]) -> Self {
        Self::from_vec(password.to_vec())
    }

    pub fn from_vec(password: Vec<u8>) -> Self {
        Self { inner: SecretBox::new(Box::new(password)) }
    }

    pub fn expose_secret(&self) -> &[u8] {
        self.inner.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.expose_secret().is_empty()
    }
}

impl From<&str> for MasterPassword {
    fn from(password: &str) -> Self {
        Self::new(password.as_bytes())
    }
}

impl From<String> for MasterPassword {
    fn from(password: String) -> Self {
        Self::from_vec(password.into_bytes())
    }
}

impl From<SecretString> for MasterPassword {
    fn from(secret: SecretString) -> Self {
        Self::new(secret.expose_secret().as_bytes())
    }
}

impl Clone for MasterPassword {
    fn clone(&self) -> Self {
        Self::new(self.expose_secret())
    }
}

impl Debug for MasterPassword {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterPassword([REDACTED])")
    }
}
