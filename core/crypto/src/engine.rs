//! The crypto engine facade.
//!
//! [`CryptoEngine`] is what the database pipeline holds. It forwards to the
//! configured [`CryptoProvider`] and [`KdfRegistry`]. Empty input hashes to
//! a fixed constant here, before any provider is consulted.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::aes_cbc::AesCbc;
use crate::config::EngineConfig;
use crate::hash::{EMPTY_SHA256, EMPTY_SHA512, SHA256_LENGTH, SHA512_LENGTH};
use crate::kdf::{Argon2Impl, Argon2Params, KdfRegistry, SoftwareArgon2};
use crate::mac::HMAC_SHA256_LENGTH;
use crate::provider::{CryptoProvider, SoftwareProvider};
use crate::registry::ProviderRegistry;
use kdbxcore_common::Result;

/// Entry point for all primitives.
///
/// Cheap operations are stateless and may be called concurrently. Share one
/// engine (e.g. behind an `Arc`) for the life of the process.
pub struct CryptoEngine {
    provider: Arc<dyn CryptoProvider>,
    kdf: KdfRegistry,
}

impl CryptoEngine {
    /// Create an engine over `provider` with no Argon2 backend registered.
    pub fn new(provider: Arc<dyn CryptoProvider>) -> Self {
        debug!(provider = %provider.name(), "Crypto engine created");
        Self {
            provider,
            kdf: KdfRegistry::new(),
        }
    }

    /// Software provider with the software Argon2 backend registered.
    pub fn software() -> Self {
        let engine = Self::new(Arc::new(SoftwareProvider::new()));
        engine.set_argon2_impl(SoftwareArgon2);
        engine
    }

    /// Build an engine from configuration.
    ///
    /// # Preconditions
    /// - `config.provider` names a factory in `registry`
    ///
    /// # Postconditions
    /// - The engine uses the provider the factory built from `config.provider_config`
    /// - The software Argon2 backend is registered iff `config.software_argon2` is set
    ///
    /// # Errors
    /// - `NotFound` if the configured provider is not registered
    /// - Any error the provider factory reports for its configuration
    pub fn from_config(config: &EngineConfig, registry: &ProviderRegistry) -> Result<Self> {
        let provider = registry.resolve(&config.provider, &config.provider_config)?;
        let engine = Self::new(provider);
        if config.software_argon2 {
            engine.set_argon2_impl(SoftwareArgon2);
        }
        Ok(engine)
    }

    /// Name of the active provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// The KDF registry owned by this engine.
    pub fn kdf(&self) -> &KdfRegistry {
        &self.kdf
    }

    /// SHA-256 of `data`; empty input returns [`EMPTY_SHA256`] without
    /// consulting the provider.
    pub async fn sha256(&self, data: &[u8]) -> Result<[u8; SHA256_LENGTH]> {
        if data.is_empty() {
            return Ok(EMPTY_SHA256);
        }
        self.provider.sha256(data).await
    }

    /// SHA-512 of `data`; empty input returns [`EMPTY_SHA512`].
    pub async fn sha512(&self, data: &[u8]) -> Result<[u8; SHA512_LENGTH]> {
        if data.is_empty() {
            return Ok(EMPTY_SHA512);
        }
        self.provider.sha512(data).await
    }

    pub async fn hmac_sha256(&self, key: &[u8], data: &[u8]) -> Result<[u8; HMAC_SHA256_LENGTH]> {
        self.provider.hmac_sha256(key, data).await
    }

    /// Create a fresh AES-256-CBC session. Import a key before use.
    pub fn create_aes_cbc(&self) -> Box<dyn AesCbc> {
        self.provider.create_aes_cbc()
    }

    /// ChaCha20 keystream XOR. Encrypts and decrypts.
    pub async fn chacha20(&self, data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        self.provider.chacha20(data, key, iv).await
    }

    /// Exactly `len` secure random bytes.
    ///
    /// Requests above [`CryptoEngine::max_random_len`] are passed through
    /// unchanged; whether they succeed is up to the provider.
    pub async fn random(&self, len: usize) -> Result<Vec<u8>> {
        let max = self.provider.max_random_len();
        if len > max {
            warn!(len, max, "Random request exceeds provider ceiling");
        }
        self.provider.random(len).await
    }

    /// Advisory per-call ceiling of the active provider.
    pub fn max_random_len(&self) -> usize {
        self.provider.max_random_len()
    }

    /// Argon2 through the registered backend.
    ///
    /// # Errors
    /// - `NotImplemented` before any backend is registered
    /// - Backend errors, unchanged
    pub async fn argon2(&self, params: &Argon2Params) -> Result<Vec<u8>> {
        self.kdf.argon2(params).await
    }

    /// Register (or replace) the Argon2 backend.
    pub fn set_argon2_impl<I>(&self, backend: I)
    where
        I: Argon2Impl + 'static,
    {
        self.kdf.set_argon2_impl(backend);
    }
}

impl fmt::Debug for CryptoEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoEngine")
            .field("provider", &self.provider.name())
            .field("kdf", &self.kdf)
            .finish()
    }
}
