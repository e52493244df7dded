//! AES-256-CBC block cipher sessions.
//!
//! A session owns exactly one imported key. Every decryption failure is
//! reported as [`Error::InvalidKey`] regardless of what the primitive said,
//! so callers cannot distinguish padding errors from length errors.

use aes::Aes256;
use async_trait::async_trait;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use tracing::{debug, warn};

use crate::keys::{CipherKey, IV_LENGTH};
use kdbxcore_common::{Error, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Key-bound AES-256-CBC session.
///
/// Implementations perform no internal locking. Callers that need to use one
/// key from several tasks concurrently should create one session per task.
#[async_trait]
pub trait AesCbc: Send + Sync {
    /// Bind a 256-bit key to this session.
    ///
    /// # Preconditions
    /// - No key has been imported into this session yet
    ///
    /// # Postconditions
    /// - The session holds a copy of `key` until it is dropped
    /// - `encrypt` and `decrypt` become usable
    ///
    /// # Errors
    /// - `InvalidInput` if the key is not 32 bytes
    /// - `InvalidState` if a key was already imported
    async fn import_key(&mut self, key: &[u8]) -> Result<()>;

    /// Encrypt with PKCS#7 padding; the output includes the padding block.
    ///
    /// # Preconditions
    /// - A key has been imported
    /// - `iv` is exactly 16 bytes
    ///
    /// # Postconditions
    /// - Output length is the next multiple of 16 strictly above `data.len()`
    ///
    /// # Errors
    /// - `InvalidState` if no key has been imported
    /// - `InvalidInput` if `iv` is not 16 bytes
    async fn encrypt(&self, data: &[u8], iv: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt and strip PKCS#7 padding.
    ///
    /// # Preconditions
    /// - A key has been imported
    ///
    /// # Postconditions
    /// - Returns the plaintext that `encrypt` was given under the same key and IV
    ///
    /// # Errors
    /// - `InvalidState` if no key has been imported
    /// - `InvalidKey` for any failure of the underlying primitive
    async fn decrypt(&self, data: &[u8], iv: &[u8]) -> Result<Vec<u8>>;
}

/// AES-CBC session backed by the RustCrypto `aes` and `cbc` crates.
#[derive(Debug, Default)]
pub struct SoftwareAesCbc {
    key: Option<CipherKey>,
}

impl SoftwareAesCbc {
    /// Create a session with no key.
    pub fn new() -> Self {
        Self { key: None }
    }

    fn key(&self) -> Result<&CipherKey> {
        self.key
            .as_ref()
            .ok_or_else(|| Error::InvalidState("no key".to_string()))
    }
}

#[async_trait]
impl AesCbc for SoftwareAesCbc {
    async fn import_key(&mut self, key: &[u8]) -> Result<()> {
        if self.key.is_some() {
            return Err(Error::InvalidState("key already imported".to_string()));
        }
        self.key = Some(CipherKey::from_slice(key)?);
        debug!("AES-CBC key imported");
        Ok(())
    }

    async fn encrypt(&self, data: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        let key = self.key()?;
        let cipher = Aes256CbcEnc::new_from_slices(key.as_bytes(), iv).map_err(|_| {
            Error::InvalidInput(format!(
                "Invalid IV length: expected {}, got {}",
                IV_LENGTH,
                iv.len()
            ))
        })?;
        Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(data))
    }

    async fn decrypt(&self, data: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        let key = self.key()?;
        let plaintext = Aes256CbcDec::new_from_slices(key.as_bytes(), iv)
            .ok()
            .and_then(|cipher| cipher.decrypt_padded_vec_mut::<Pkcs7>(data).ok());

        plaintext.ok_or_else(|| {
            warn!(len = data.len(), "AES-CBC decryption failed");
            Error::InvalidKey("invalid key".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KEY_LENGTH;
    use cbc::cipher::block_padding::NoPadding;
    use kdbxcore_common::ErrorKind;
    use proptest::prelude::*;

    const KEY: [u8; KEY_LENGTH] = [42u8; KEY_LENGTH];
    const IV: [u8; IV_LENGTH] = [7u8; IV_LENGTH];

    async fn session(key: &[u8]) -> SoftwareAesCbc {
        let mut session = SoftwareAesCbc::new();
        session.import_key(key).await.unwrap();
        session
    }

    #[tokio::test]
    async fn test_encrypt_decrypt_roundtrip() {
        let session = session(&KEY).await;
        let plaintext = b"Hello, KDBX!";

        let ciphertext = session.encrypt(plaintext, &IV).await.unwrap();
        let decrypted = session.decrypt(&ciphertext, &IV).await.unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[tokio::test]
    async fn test_known_answer() {
        let key: Vec<u8> = (0u8..32).collect();
        let iv: Vec<u8> = (0u8..16).collect();
        let session = session(&key).await;

        let ciphertext = session.encrypt(b"kdbx payload", &iv).await.unwrap();
        assert_eq!(hex::encode(ciphertext), "9fac5d768cec82bbccae65464ce4f39c");
    }

    #[tokio::test]
    async fn test_ciphertext_includes_padding_block() {
        let session = session(&KEY).await;

        assert_eq!(session.encrypt(b"", &IV).await.unwrap().len(), 16);
        assert_eq!(session.encrypt(&[0u8; 16], &IV).await.unwrap().len(), 32);
        assert_eq!(session.encrypt(&[0u8; 17], &IV).await.unwrap().len(), 32);
    }

    #[tokio::test]
    async fn test_no_key_is_invalid_state() {
        let session = SoftwareAesCbc::new();

        let err = session.encrypt(b"data", &IV).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(err.message(), "no key");

        let err = session.decrypt(&[0u8; 16], &IV).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[tokio::test]
    async fn test_rekey_is_rejected() {
        let mut session = session(&KEY).await;
        let err = session.import_key(&[1u8; KEY_LENGTH]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);

        // Original key remains bound
        let ciphertext = session.encrypt(b"still here", &IV).await.unwrap();
        let other = self::session(&KEY).await;
        assert_eq!(other.decrypt(&ciphertext, &IV).await.unwrap(), b"still here");
    }

    #[tokio::test]
    async fn test_short_key_rejected() {
        let mut session = SoftwareAesCbc::new();
        let err = session.import_key(&[0u8; 16]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        // Failed import leaves the session unkeyed
        let err = session.encrypt(b"data", &IV).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[tokio::test]
    async fn test_bad_iv_length() {
        let session = session(&KEY).await;

        let err = session.encrypt(b"data", &[0u8; 8]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err = session.decrypt(&[0u8; 16], &[0u8; 8]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey);
    }

    #[tokio::test]
    async fn test_invalid_padding_is_invalid_key() {
        // A block whose plaintext ends in 0x00 can never carry valid PKCS#7 padding
        let raw = Aes256CbcEnc::new_from_slices(&KEY, &IV)
            .unwrap()
            .encrypt_padded_vec_mut::<NoPadding>(&[0u8; 16]);

        let session = session(&KEY).await;
        let err = session.decrypt(&raw, &IV).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey);
    }

    #[tokio::test]
    async fn test_truncated_ciphertext_is_invalid_key() {
        let session = session(&KEY).await;
        let mut ciphertext = session.encrypt(b"some secret data", &IV).await.unwrap();
        ciphertext.truncate(ciphertext.len() - 3);

        let err = session.decrypt(&ciphertext, &IV).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey);

        let err = session.decrypt(&[], &IV).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey);
    }

    #[tokio::test]
    async fn test_wrong_key_never_yields_plaintext() {
        let plaintext = b"Secret data that must stay secret";
        let ciphertext = session(&KEY).await.encrypt(plaintext, &IV).await.unwrap();

        let mut failures = 0;
        for i in 0u8..32 {
            let wrong = session(&[i; KEY_LENGTH]).await;
            match wrong.decrypt(&ciphertext, &IV).await {
                Ok(decrypted) => assert_ne!(decrypted, plaintext),
                Err(err) => {
                    assert_eq!(err.kind(), ErrorKind::InvalidKey);
                    failures += 1;
                }
            }
        }
        assert!(failures > 0);
    }

    proptest! {
        #[test]
        fn prop_roundtrip(
            key in proptest::array::uniform32(any::<u8>()),
            iv in proptest::array::uniform16(any::<u8>()),
            data in proptest::collection::vec(any::<u8>(), 0..512),
        ) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let decrypted = rt.block_on(async {
                let session = session(&key).await;
                let ciphertext = session.encrypt(&data, &iv).await.unwrap();
                session.decrypt(&ciphertext, &iv).await.unwrap()
            });
            prop_assert_eq!(decrypted, data);
        }
    }
}
