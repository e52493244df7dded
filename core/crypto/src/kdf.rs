//! Pluggable Argon2 key derivation.
//!
//! Argon2 is memory-hard and slow, so the engine does not hard-wire an
//! implementation. A backend is registered on a [`KdfRegistry`] at start-up
//! (the bundled [`SoftwareArgon2`], an externally hosted one, or a stub in
//! tests) and every [`KdfRegistry::argon2`] call is delegated to it.
//!
//! # Re-registration
//! The last registration wins. A call that already picked up a backend
//! finishes on that backend. Registering while calls are in flight gives no
//! ordering guarantee about which backend later calls observe first; register
//! once during start-up.

use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::runtime::Handle;
use tracing::{debug, info};

use kdbxcore_common::{Error, Result, SensitiveBytes};

/// Argon2 variant as stored in the KDBX header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Argon2Type {
    /// Data-dependent addressing.
    Argon2d = 0,
    /// Hybrid addressing.
    Argon2id = 2,
}

impl Argon2Type {
    /// Numeric header value.
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    fn algorithm(self) -> Algorithm {
        match self {
            Argon2Type::Argon2d => Algorithm::Argon2d,
            Argon2Type::Argon2id => Algorithm::Argon2id,
        }
    }
}

impl TryFrom<u32> for Argon2Type {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(Argon2Type::Argon2d),
            2 => Ok(Argon2Type::Argon2id),
            other => Err(Error::InvalidInput(format!(
                "Unsupported Argon2 type: {}",
                other
            ))),
        }
    }
}

/// Argon2 algorithm version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Argon2Version {
    /// Version 1.0 (0x10).
    V0x10 = 0x10,
    /// Version 1.3 (0x13).
    V0x13 = 0x13,
}

impl Argon2Version {
    /// Numeric header value.
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    fn version(self) -> Version {
        match self {
            Argon2Version::V0x10 => Version::V0x10,
            Argon2Version::V0x13 => Version::V0x13,
        }
    }
}

impl TryFrom<u32> for Argon2Version {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0x10 => Ok(Argon2Version::V0x10),
            0x13 => Ok(Argon2Version::V0x13),
            other => Err(Error::InvalidInput(format!(
                "Unsupported Argon2 version: {:#x}",
                other
            ))),
        }
    }
}

/// Default memory cost in KiB (64 MiB).
pub const DEFAULT_MEMORY_KB: u32 = 65536;

/// Default number of passes.
pub const DEFAULT_ITERATIONS: u32 = 2;

/// Default degree of parallelism.
pub const DEFAULT_PARALLELISM: u32 = 2;

/// Default output length in bytes.
pub const DEFAULT_OUTPUT_LENGTH: usize = 32;

/// Inputs to one Argon2 derivation.
///
/// A value object: two parameter sets are interchangeable when their fields
/// are equal. The password is zeroized on drop and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Argon2Params {
    password: SensitiveBytes,
    salt: Vec<u8>,
    memory_kb: u32,
    iterations: u32,
    length: usize,
    parallelism: u32,
    variant: Argon2Type,
    version: Argon2Version,
}

impl Argon2Params {
    /// Create parameters for `password` and `salt` with default costs,
    /// Argon2d, version 0x13 and a 32-byte output.
    pub fn new(password: &[u8], salt: &[u8]) -> Self {
        Self {
            password: SensitiveBytes::from(password),
            salt: salt.to_vec(),
            memory_kb: DEFAULT_MEMORY_KB,
            iterations: DEFAULT_ITERATIONS,
            length: DEFAULT_OUTPUT_LENGTH,
            parallelism: DEFAULT_PARALLELISM,
            variant: Argon2Type::Argon2d,
            version: Argon2Version::V0x13,
        }
    }

    /// Set memory cost in KiB.
    pub fn with_memory_kb(mut self, memory_kb: u32) -> Self {
        self.memory_kb = memory_kb;
        self
    }

    /// Set number of passes.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set output length in bytes.
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Set degree of parallelism.
    pub fn with_parallelism(mut self, parallelism: u32) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Set the Argon2 variant.
    pub fn with_variant(mut self, variant: Argon2Type) -> Self {
        self.variant = variant;
        self
    }

    /// Set the Argon2 version.
    pub fn with_version(mut self, version: Argon2Version) -> Self {
        self.version = version;
        self
    }

    /// Password bytes.
    pub fn password(&self) -> &[u8] {
        self.password.as_bytes()
    }

    /// Salt bytes.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Memory cost in KiB.
    pub fn memory_kb(&self) -> u32 {
        self.memory_kb
    }

    /// Number of passes.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Output length in bytes.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Degree of parallelism.
    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    /// Argon2 variant.
    pub fn variant(&self) -> Argon2Type {
        self.variant
    }

    /// Argon2 version.
    pub fn version(&self) -> Argon2Version {
        self.version
    }
}

impl fmt::Debug for Argon2Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Params")
            .field("password", &"[REDACTED]")
            .field("salt_len", &self.salt.len())
            .field("memory_kb", &self.memory_kb)
            .field("iterations", &self.iterations)
            .field("length", &self.length)
            .field("parallelism", &self.parallelism)
            .field("variant", &self.variant)
            .field("version", &self.version)
            .finish()
    }
}

/// An Argon2 backend.
///
/// Implemented by [`SoftwareArgon2`] and by any closure
/// `Fn(&Argon2Params) -> Result<impl AsRef<[u8]>>`, which lets tests and
/// embedders plug in a stub or a remote implementation.
#[async_trait]
pub trait Argon2Impl: Send + Sync {
    /// Derive `params.length()` bytes.
    ///
    /// # Preconditions
    /// - `params` is passed through unchanged from the caller
    ///
    /// # Postconditions
    /// - Returns exactly the bytes this backend derived, with no partial output on failure
    ///
    /// # Errors
    /// - Backend-defined; the registry forwards them unchanged
    async fn hash(&self, params: &Argon2Params) -> Result<Vec<u8>>;

    /// Short backend name for logs.
    fn name(&self) -> &str {
        "custom"
    }
}

#[async_trait]
impl<F, R> Argon2Impl for F
where
    F: Fn(&Argon2Params) -> Result<R> + Send + Sync,
    R: AsRef<[u8]>,
{
    async fn hash(&self, params: &Argon2Params) -> Result<Vec<u8>> {
        (self)(params).map(|out| out.as_ref().to_vec())
    }
}

/// Single-slot registry holding the active Argon2 backend.
///
/// Owned by the engine and passed to callers explicitly rather than kept
/// in a process global.
#[derive(Default)]
pub struct KdfRegistry {
    active: RwLock<Option<Arc<dyn Argon2Impl>>>,
}

impl KdfRegistry {
    /// Create a registry with no backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `backend` as the active implementation, replacing any previous one.
    pub fn set_argon2_impl<I>(&self, backend: I)
    where
        I: Argon2Impl + 'static,
    {
        self.set_shared(Arc::new(backend));
    }

    /// Install an already shared backend.
    pub fn set_shared(&self, backend: Arc<dyn Argon2Impl>) {
        let name = backend.name().to_string();
        let previous = self
            .active
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(backend);

        match previous {
            Some(old) => info!(backend = %name, replaced = %old.name(), "Argon2 backend replaced"),
            None => info!(backend = %name, "Argon2 backend registered"),
        }
    }

    /// Whether a backend has been registered.
    pub fn is_registered(&self) -> bool {
        self.current().is_some()
    }

    fn current(&self) -> Option<Arc<dyn Argon2Impl>> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Derive a key with the active backend.
    ///
    /// # Errors
    /// - `NotImplemented` if no backend is registered
    /// - Any error the backend returns, unchanged
    pub async fn argon2(&self, params: &Argon2Params) -> Result<Vec<u8>> {
        let backend = self
            .current()
            .ok_or_else(|| Error::NotImplemented("argon2 not implemented".to_string()))?;

        debug!(
            backend = %backend.name(),
            variant = params.variant().as_u32(),
            version = params.version().as_u32(),
            memory_kb = params.memory_kb(),
            iterations = params.iterations(),
            "Dispatching Argon2 derivation"
        );
        backend.hash(params).await
    }
}

impl fmt::Debug for KdfRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let backend = self.current();
        f.debug_struct("KdfRegistry")
            .field("backend", &backend.as_ref().map(|b| b.name().to_string()))
            .finish()
    }
}

/// Argon2 backend using the RustCrypto `argon2` crate.
///
/// Inside a tokio runtime, derivation runs on the blocking pool so it does
/// not stall the caller's executor. Outside one it runs inline.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwareArgon2;

#[async_trait]
impl Argon2Impl for SoftwareArgon2 {
    async fn hash(&self, params: &Argon2Params) -> Result<Vec<u8>> {
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => return derive(params),
        };

        let params = params.clone();
        handle
            .spawn_blocking(move || derive(&params))
            .await
            .map_err(|e| Error::Crypto(format!("Argon2 worker failed: {}", e)))?
    }

    fn name(&self) -> &str {
        "software"
    }
}

/// Derive `params.length()` bytes with Argon2 on the current thread.
///
/// # Errors
/// - `InvalidInput` if the parameters are outside what Argon2 accepts
///   (salt shorter than 8 bytes, memory below 8 KiB per lane, zero passes,
///   output shorter than 4 bytes)
pub fn derive(params: &Argon2Params) -> Result<Vec<u8>> {
    let argon2_params = Params::new(
        params.memory_kb(),
        params.iterations(),
        params.parallelism(),
        Some(params.length()),
    )
    .map_err(|e| Error::InvalidInput(format!("Invalid Argon2 parameters: {}", e)))?;

    let argon2 = Argon2::new(
        params.variant().algorithm(),
        params.version().version(),
        argon2_params,
    );

    let mut output = vec![0u8; params.length()];
    argon2
        .hash_password_into(params.password(), params.salt(), &mut output)
        .map_err(|e| Error::InvalidInput(format!("Key derivation failed: {}", e)))?;

    Ok(output)
}
