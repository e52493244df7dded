//! Secure random bytes from the operating system.

use rand::rngs::OsRng;
use rand::RngCore;

use kdbxcore_common::{Error, Result};

/// Largest single request the default provider is documented to serve.
///
/// Advisory only: requests above it are still filled. Callers targeting
/// providers with a hard per-call limit should split larger requests.
pub const MAX_RANDOM_QUOTA: usize = 65536;

/// Fill a new buffer of exactly `len` bytes from the OS random source.
pub fn random_bytes(len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| Error::Crypto(format!("OS random source failed: {}", e)))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_length() {
        for len in [0, 1, 16, 33, MAX_RANDOM_QUOTA] {
            assert_eq!(random_bytes(len).unwrap().len(), len);
        }
    }

    #[test]
    fn test_successive_calls_differ() {
        let a = random_bytes(32).unwrap();
        let b = random_bytes(32).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_above_quota_is_served() {
        let buf = random_bytes(MAX_RANDOM_QUOTA + 1).unwrap();
        assert_eq!(buf.len(), MAX_RANDOM_QUOTA + 1);
    }
}
