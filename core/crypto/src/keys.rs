//! Key types with secure memory handling.
//!
//! Symmetric keys zeroize their memory on drop so imported key material
//! does not outlive the session that owns it.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use kdbxcore_common::{Error, Result};

/// Length of AES-256 and ChaCha20 keys in bytes (256-bit).
pub const KEY_LENGTH: usize = 32;

/// Length of an AES-CBC initialization vector in bytes (one block).
pub const IV_LENGTH: usize = 16;

/// 256-bit symmetric key bound to a cipher session.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CipherKey {
    key: [u8; KEY_LENGTH],
}

impl CipherKey {
    /// Create a key from raw bytes.
    pub fn from_bytes(key: [u8; KEY_LENGTH]) -> Self {
        Self { key }
    }

    /// Create a key from a slice.
    ///
    /// # Errors
    /// - Returns error if the slice is not exactly KEY_LENGTH bytes
    pub fn from_slice(key: &[u8]) -> Result<Self> {
        let key: [u8; KEY_LENGTH] = key.try_into().map_err(|_| {
            Error::InvalidInput(format!(
                "Invalid key length: expected {}, got {}",
                KEY_LENGTH,
                key.len()
            ))
        })?;
        Ok(Self::from_bytes(key))
    }

    /// Get the key bytes.
    ///
    /// # Security
    /// The returned slice should be used immediately and not stored.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CipherKey([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kdbxcore_common::ErrorKind;

    #[test]
    fn test_from_slice_checks_length() {
        assert!(CipherKey::from_slice(&[7u8; KEY_LENGTH]).is_ok());

        let err = CipherKey::from_slice(&[7u8; 16]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_from_slice_keeps_bytes() {
        let bytes: Vec<u8> = (0..KEY_LENGTH as u8).collect();
        let key = CipherKey::from_slice(&bytes).unwrap();
        assert_eq!(&key.as_bytes()[..], &bytes[..]);
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = CipherKey::from_bytes([0xAB; KEY_LENGTH]);
        assert_eq!(format!("{:?}", key), "CipherKey([REDACTED])");
    }
}
