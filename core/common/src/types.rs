//! Common types used throughout kdbxcore.

use std::fmt;
use zeroize::Zeroize;

/// Sensitive data wrapper that zeroizes on drop.
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct SensitiveBytes(Vec<u8>);

impl SensitiveBytes {
    /// Create new sensitive bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    /// Get a reference to the inner bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Get the length.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[u8]> for SensitiveBytes {
    fn from(data: &[u8]) -> Self {
        Self(data.to_vec())
    }
}

impl From<Vec<u8>> for SensitiveBytes {
    fn from(data: Vec<u8>) -> Self {
        Self(data)
    }
}

impl AsRef<[u8]> for SensitiveBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SensitiveBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SensitiveBytes([REDACTED; {} bytes])", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_debug_is_redacted() {
        let bytes = SensitiveBytes::new(b"hunter2".to_vec());
        let shown = format!("{:?}", bytes);
        assert_eq!(shown, "SensitiveBytes([REDACTED; 7 bytes])");
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn test_empty() {
        let bytes = SensitiveBytes::from(&b""[..]);
        assert!(bytes.is_empty());
        assert_eq!(bytes.len(), 0);
    }

    proptest! {
        #[test]
        fn prop_preserves_contents(data in proptest::collection::vec(any::<u8>(), 0..256)) {
            let bytes = SensitiveBytes::from(data.clone());
            prop_assert_eq!(bytes.as_bytes(), &data[..]);
            prop_assert_eq!(bytes.len(), data.len());
        }
    }
}
