//! Shared types for the command-line front end.

use std::fmt::{Display, Formatter, Result};
use std::path::PathBuf;

/// Direction of a file operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encrypt,
    Decrypt,
}

impl Mode {
    /// Progress label shown while files are being processed.
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Self::Encrypt => "Encrypting",
            Self::Decrypt => "Decrypting",
        }
    }

    #[inline]
    pub fn past_tense(self) -> &'static str {
        match self {
            Self::Encrypt => "encrypted",
            Self::Decrypt => "decrypted",
        }
    }
}

impl Display for Mode {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.label())
    }
}

/// A file that was processed successfully.
#[derive(Debug)]
pub struct Outcome {
    pub input: PathBuf,
    pub output: PathBuf,

    /// Bytes written to `output`.
    pub size: u64,
}
