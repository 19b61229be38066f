use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::error::{Error, Result};

/// Fills a fixed-size array from the operating system's CSPRNG.
///
/// Used for every salt and nonce. `OsRng` is stateless and safe to call from
/// any number of threads at once.
///
/// # Errors
///
/// Returns [`Error::CryptoUnavailable`] if the OS randomness source fails.
pub fn random_bytes<const N: usize>() -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    OsRng.try_fill_bytes(&mut bytes).map_err(|e| Error::CryptoUnavailable(format!("rng failed: {e}")))?;

    Ok(bytes)
}
