//! Common error types for the kdbxcore crypto layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Kind tag attached to every [`Error`].
///
/// Callers branch on the kind, never on the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A cipher operation was invoked before the key was imported.
    InvalidState,
    /// Decryption failed, usually because of a wrong key or corrupted data.
    InvalidKey,
    /// No backend is registered for the requested operation.
    NotImplemented,
    /// Malformed argument (key or IV length, KDF parameters).
    InvalidInput,
    /// Failure reported by an underlying primitive.
    Crypto,
    /// Named resource not found.
    NotFound,
    /// Named resource already exists.
    AlreadyExists,
    /// Configuration could not be parsed.
    Serialization,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidState => "InvalidState",
            ErrorKind::InvalidKey => "InvalidKey",
            ErrorKind::NotImplemented => "NotImplemented",
            ErrorKind::InvalidInput => "InvalidInput",
            ErrorKind::Crypto => "Crypto",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::AlreadyExists => "AlreadyExists",
            ErrorKind::Serialization => "Serialization",
        };
        f.write_str(name)
    }
}

/// Top-level error type for crypto engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Operation invoked in a state that does not permit it.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Decryption failed; the key is wrong or the data is corrupted.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Required backend has not been registered.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Cryptographic operation failed.
    #[error("Cryptographic error: {0}")]
    Crypto(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Resource already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// The kind tag of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidState(_) => ErrorKind::InvalidState,
            Error::InvalidKey(_) => ErrorKind::InvalidKey,
            Error::NotImplemented(_) => ErrorKind::NotImplemented,
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::Crypto(_) => ErrorKind::Crypto,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Error::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// The human-readable message, without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Error::InvalidState(m)
            | Error::InvalidKey(m)
            | Error::NotImplemented(m)
            | Error::InvalidInput(m)
            | Error::Crypto(m)
            | Error::NotFound(m)
            | Error::AlreadyExists(m)
            | Error::Serialization(m) => m,
        }
    }
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
