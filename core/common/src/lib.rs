//! Common utilities and types shared across kdbxcore crates.
//!
//! This module provides the error taxonomy every crypto operation reports
//! through, and the zeroizing byte buffer used for secrets.

pub mod error;
pub mod types;

pub use error::{Error, ErrorKind, Result};
pub use types::SensitiveBytes;
