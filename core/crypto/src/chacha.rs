//! One-shot ChaCha20 keystream transform.
//!
//! XOR with the keystream is its own inverse, so one function serves both
//! directions. The block counter always starts at zero and no state carries
//! over between calls.

use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::{ChaCha20, ChaCha20Legacy};

use crate::keys::KEY_LENGTH;
use kdbxcore_common::{Error, Result};

/// IETF nonce length (RFC 8439).
pub const NONCE_LENGTH: usize = 12;

/// Original 64-bit nonce length.
pub const LEGACY_NONCE_LENGTH: usize = 8;

/// XOR `data` with the ChaCha20 keystream derived from `key` and `iv`.
///
/// A 12-byte `iv` selects the IETF variant, an 8-byte `iv` the original one.
pub fn chacha20(data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    if key.len() != KEY_LENGTH {
        return Err(Error::InvalidInput(format!(
            "Invalid key length: expected {}, got {}",
            KEY_LENGTH,
            key.len()
        )));
    }

    let mut buf = data.to_vec();
    match iv.len() {
        NONCE_LENGTH => ChaCha20::new_from_slices(key, iv)
            .map_err(|e| Error::InvalidInput(format!("ChaCha20 init failed: {}", e)))?
            .apply_keystream(&mut buf),
        LEGACY_NONCE_LENGTH => ChaCha20Legacy::new_from_slices(key, iv)
            .map_err(|e| Error::InvalidInput(format!("ChaCha20 init failed: {}", e)))?
            .apply_keystream(&mut buf),
        n => {
            return Err(Error::InvalidInput(format!(
                "Invalid IV length: expected {} or {}, got {}",
                NONCE_LENGTH, LEGACY_NONCE_LENGTH, n
            )))
        }
    }
    Ok(buf)
}
