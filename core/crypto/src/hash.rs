//! SHA-256 and SHA-512 digests.
//!
//! The digests of empty input are kept as constants. The engine returns them
//! directly for zero-length data, so no backend is consulted in that case.

use sha2::{Digest, Sha256, Sha512};

/// SHA-256 output size in bytes.
pub const SHA256_LENGTH: usize = 32;

/// SHA-512 output size in bytes.
pub const SHA512_LENGTH: usize = 64;

/// SHA-256 of zero bytes (`e3b0c442...7852b855`).
pub const EMPTY_SHA256: [u8; SHA256_LENGTH] = [
    0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14,
    0x9a, 0xfb, 0xf4, 0xc8, 0x99, 0x6f, 0xb9, 0x24,
    0x27, 0xae, 0x41, 0xe4, 0x64, 0x9b, 0x93, 0x4c,
    0xa4, 0x95, 0x99, 0x1b, 0x78, 0x52, 0xb8, 0x55,
];

/// SHA-512 of zero bytes (`cf83e135...f927da3e`).
pub const EMPTY_SHA512: [u8; SHA512_LENGTH] = [
    0xcf, 0x83, 0xe1, 0x35, 0x7e, 0xef, 0xb8, 0xbd,
    0xf1, 0x54, 0x28, 0x50, 0xd6, 0x6d, 0x80, 0x07,
    0xd6, 0x20, 0xe4, 0x05, 0x0b, 0x57, 0x15, 0xdc,
    0x83, 0xf4, 0xa9, 0x21, 0xd3, 0x6c, 0xe9, 0xce,
    0x47, 0xd0, 0xd1, 0x3c, 0x5d, 0x85, 0xf2, 0xb0,
    0xff, 0x83, 0x18, 0xd2, 0x87, 0x7e, 0xec, 0x2f,
    0x63, 0xb9, 0x31, 0xbd, 0x47, 0x41, 0x7a, 0x81,
    0xa5, 0x38, 0x32, 0x7a, 0xf9, 0x27, 0xda, 0x3e,
];

/// Compute SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> [u8; SHA256_LENGTH] {
    let mut out = [0u8; SHA256_LENGTH];
    out.copy_from_slice(&Sha256::digest(data));
    out
}

/// Compute SHA-512 of `data`.
pub fn sha512(data: &[u8]) -> [u8; SHA512_LENGTH] {
    let mut out = [0u8; SHA512_LENGTH];
    out.copy_from_slice(&Sha512::digest(data));
    out
}
