//! HMAC-SHA256 message authentication.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use kdbxcore_common::{Error, Result};

/// HMAC-SHA256 tag size in bytes.
pub const HMAC_SHA256_LENGTH: usize = 32;

type HmacSha256 = Hmac<Sha256>;

/// Compute HMAC-SHA256 of `data` under `key`.
///
/// Keys of any length are accepted; HMAC hashes or pads them itself.
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<[u8; HMAC_SHA256_LENGTH]> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .map_err(|e| Error::Crypto(format!("HMAC key rejected: {}", e)))?;
    mac.update(data);

    let mut out = [0u8; HMAC_SHA256_LENGTH];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4231, test case 2
    #[test]
    fn test_hmac_known_answer() {
        let tag = hmac_sha256(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            hex::encode(tag),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_hmac_empty_inputs() {
        let tag = hmac_sha256(b"", b"").unwrap();
        assert_eq!(
            hex::encode(tag),
            "b613679a0814d9ec772f95d778c35fc5ff1697c493715653c6c712144292c5ad"
        );
    }

    #[test]
    fn test_hmac_long_key() {
        let key = vec![0x5Au8; 200];
        let tag1 = hmac_sha256(&key, b"block").unwrap();
        let tag2 = hmac_sha256(&key, b"block").unwrap();
        assert_eq!(tag1, tag2);
        assert_ne!(tag1, hmac_sha256(&key, b"other").unwrap());
    }
}
