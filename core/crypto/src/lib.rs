//! Cryptographic primitives for the kdbxcore database format.
//!
//! This module provides:
//! - SHA-256/512 digests with a fixed result for empty input
//! - HMAC-SHA256
//! - AES-256-CBC sessions bound to one key
//! - One-shot ChaCha20 keystream transforms
//! - OS-sourced secure random bytes
//! - A pluggable Argon2 backend registry
//!
//! Callers use [`CryptoEngine`], which hides which [`CryptoProvider`] and
//! Argon2 backend are active.
//!
//! # Security Guarantees
//! - Imported keys and KDF passwords are zeroized on drop
//! - No plaintext or key material is ever logged
//! - Decryption failures never expose provider-specific errors

pub mod aes_cbc;
pub mod chacha;
pub mod config;
pub mod engine;
pub mod hash;
pub mod kdf;
pub mod keys;
pub mod mac;
pub mod provider;
pub mod random;
pub mod registry;

pub use aes_cbc::{AesCbc, SoftwareAesCbc};
pub use config::EngineConfig;
pub use engine::CryptoEngine;
pub use hash::{EMPTY_SHA256, EMPTY_SHA512};
pub use kdf::{Argon2Impl, Argon2Params, Argon2Type, Argon2Version, KdfRegistry, SoftwareArgon2};
pub use keys::{CipherKey, IV_LENGTH, KEY_LENGTH};
pub use provider::{CryptoProvider, SoftwareProvider};
pub use random::MAX_RANDOM_QUOTA;
pub use registry::{create_default_registry, ProviderRegistry};
