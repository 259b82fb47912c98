//! Textual representations exchanged at the edge of the system.
//!
//! Binary values cross textual boundaries (logs, transport, fixtures) as
//! lowercase hexadecimal strings.

use serde::{Deserialize, Serialize};

use crate::error::SealError;

// ---------------------------------------------------------------------------
// Sealed message
// ---------------------------------------------------------------------------

/// A sealed message with both halves hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexSealed {
    /// Lowercase hex of the 12-byte nonce.
    pub nonce: String,
    /// Lowercase hex of the ciphertext with its trailing 16-byte tag.
    pub ciphertext: String,
}

impl HexSealed {
    /// Construct a [`HexSealed`] from already-encoded strings.
    pub fn new(nonce: impl Into<String>, ciphertext: impl Into<String>) -> Self {
        Self {
            nonce: nonce.into(),
            ciphertext: ciphertext.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Error body written when an operation fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"decode_error"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&SealError> for ErrorResponse {
    fn from(e: &SealError) -> Self {
        Self::new(e.code(), e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HexField;

    #[test]
    fn hex_sealed_serde() {
        let sealed = HexSealed::new("13298648720762faad1b678e", "da269a96");
        let json = serde_json::to_string(&sealed).unwrap();
        assert!(json.contains("\"nonce\":\"13298648720762faad1b678e\""));
        let decoded: HexSealed = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, sealed);
    }

    #[test]
    fn error_response_from_seal_error() {
        let e = SealError::DecodeError {
            field: HexField::Nonce,
        };
        let resp = ErrorResponse::from(&e);
        assert_eq!(resp.code, "decode_error");
        assert!(resp.message.contains("nonce"));
    }
}
