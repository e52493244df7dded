//! Crypto provider trait definition.

use async_trait::async_trait;

use crate::aes_cbc::{AesCbc, SoftwareAesCbc};
use crate::hash::{SHA256_LENGTH, SHA512_LENGTH};
use crate::mac::HMAC_SHA256_LENGTH;
use crate::random::MAX_RANDOM_QUOTA;
use crate::{chacha, hash, mac, random};
use kdbxcore_common::Result;

/// Backend supplying the stateless primitives and AES-CBC sessions.
///
/// Implementations may be platform-native or pure software; the engine
/// treats them interchangeably. Errors from the underlying primitives must
/// already be mapped to [`kdbxcore_common::Error`] when they leave a provider.
#[async_trait]
pub trait CryptoProvider: Send + Sync {
    /// Get the provider name (e.g., "software").
    fn name(&self) -> &str;

    /// SHA-256 of `data`. Never called with empty input by the engine.
    async fn sha256(&self, data: &[u8]) -> Result<[u8; SHA256_LENGTH]>;

    /// SHA-512 of `data`. Never called with empty input by the engine.
    async fn sha512(&self, data: &[u8]) -> Result<[u8; SHA512_LENGTH]>;

    /// HMAC-SHA256 of `data` under `key`.
    async fn hmac_sha256(&self, key: &[u8], data: &[u8]) -> Result<[u8; HMAC_SHA256_LENGTH]>;

    /// Create a fresh, unkeyed AES-CBC session.
    ///
    /// # Postconditions
    /// - The session is independent of every other session from this provider
    /// - `AesCbc::import_key` must be called before it can encrypt or decrypt
    fn create_aes_cbc(&self) -> Box<dyn AesCbc>;

    /// XOR `data` with the ChaCha20 keystream for `key` and `iv`.
    ///
    /// # Preconditions
    /// - `key` is 32 bytes
    /// - `iv` is 12 bytes (IETF) or 8 bytes (original variant)
    ///
    /// # Postconditions
    /// - Output has the same length as `data`
    /// - Applying it twice with the same key and IV returns `data`
    async fn chacha20(&self, data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>>;

    /// Exactly `len` secure random bytes.
    ///
    /// Requests above [`CryptoProvider::max_random_len`] are the provider's
    /// to serve or reject.
    ///
    /// # Postconditions
    /// - On success the buffer is exactly `len` bytes long
    async fn random(&self, len: usize) -> Result<Vec<u8>>;

    /// Advisory ceiling for a single [`CryptoProvider::random`] call.
    fn max_random_len(&self) -> usize {
        MAX_RANDOM_QUOTA
    }
}

/// Provider built on the RustCrypto crates and the OS random source.
#[derive(Debug, Clone)]
pub struct SoftwareProvider {
    max_random_len: usize,
}

impl SoftwareProvider {
    /// Create a provider advertising the default random ceiling.
    pub fn new() -> Self {
        Self {
            max_random_len: MAX_RANDOM_QUOTA,
        }
    }

    /// Advertise a different random ceiling.
    pub fn with_max_random_len(mut self, max_random_len: usize) -> Self {
        self.max_random_len = max_random_len;
        self
    }
}

impl Default for SoftwareProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CryptoProvider for SoftwareProvider {
    fn name(&self) -> &str {
        "software"
    }

    async fn sha256(&self, data: &[u8]) -> Result<[u8; SHA256_LENGTH]> {
        Ok(hash::sha256(data))
    }

    async fn sha512(&self, data: &[u8]) -> Result<[u8; SHA512_LENGTH]> {
        Ok(hash::sha512(data))
    }

    async fn hmac_sha256(&self, key: &[u8], data: &[u8]) -> Result<[u8; HMAC_SHA256_LENGTH]> {
        mac::hmac_sha256(key, data)
    }

    fn create_aes_cbc(&self) -> Box<dyn AesCbc> {
        Box::new(SoftwareAesCbc::new())
    }

    async fn chacha20(&self, data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        chacha::chacha20(data, key, iv)
    }

    async fn random(&self, len: usize) -> Result<Vec<u8>> {
        random::random_bytes(len)
    }

    fn max_random_len(&self) -> usize {
        self.max_random_len
    }
}
