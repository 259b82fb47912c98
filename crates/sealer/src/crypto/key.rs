//! [`SecretKey`]: a validated AES key that lives for a single call.

use common::SealError;
use zeroize::Zeroizing;

use super::{KEY_LEN_128, KEY_LEN_256};

/// AES variant selected by the key length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyVariant {
    Aes128,
    Aes256,
}

/// Key material of exactly 16 or 32 bytes.
///
/// The bytes are copied into a buffer that is overwritten with zeroes on drop.
/// Seal and open build one of these per call and drop it before returning, so
/// the caller's key is never retained.
pub struct SecretKey {
    bytes: Zeroizing<Vec<u8>>,
    variant: KeyVariant,
}

impl SecretKey {
    /// Validate and copy `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SealError::InvalidKeyLength`] unless `key` is 16 or 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self, SealError> {
        let variant = match key.len() {
            KEY_LEN_128 => KeyVariant::Aes128,
            KEY_LEN_256 => KeyVariant::Aes256,
            got => return Err(SealError::InvalidKeyLength { got }),
        };
        Ok(Self {
            bytes: Zeroizing::new(key.to_vec()),
            variant,
        })
    }

    /// Which AES variant this key selects.
    pub fn variant(&self) -> KeyVariant {
        self.variant
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.debug_struct("SecretKey")
            .field("variant", &self.variant)
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_variant_by_length() {
        let short = SecretKey::new(&[0u8; 16]).unwrap();
        assert_eq!(short.variant(), KeyVariant::Aes128);
        let long = SecretKey::new(&[0u8; 32]).unwrap();
        assert_eq!(long.variant(), KeyVariant::Aes256);
    }

    #[test]
    fn rejects_other_lengths() {
        for len in [0, 10, 15, 17, 24, 31, 33, 64] {
            let err = SecretKey::new(&vec![0u8; len]).unwrap_err();
            assert_eq!(err, SealError::InvalidKeyLength { got: len });
        }
    }

    #[test]
    fn redacted_in_debug() {
        let key = SecretKey::new(&[0xAB; 32]).unwrap();
        let dbg = format!("{key:?}");
        assert!(dbg.contains("REDACTED"));
        assert!(!dbg.contains("171"));
        assert!(!dbg.to_lowercase().contains("ab, "));
    }
}
