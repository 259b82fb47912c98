//! Error taxonomy for sealing and opening.

use std::fmt;

use thiserror::Error;

/// Which textual input failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexField {
    Ciphertext,
    Nonce,
    Key,
}

impl fmt::Display for HexField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HexField::Ciphertext => "ciphertext",
            HexField::Nonce => "nonce",
            HexField::Key => "key",
        })
    }
}

/// Errors returned by seal and open.
///
/// Variants fall into three groups:
/// - usage errors: [`SealError::InvalidKeyLength`], [`SealError::InvalidNonceLength`],
///   [`SealError::DecodeError`]
/// - system errors: [`SealError::RandomnessFailure`] (the only retryable one)
/// - integrity errors: [`SealError::AuthenticationFailure`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SealError {
    /// The key is neither 16 (AES-128) nor 32 (AES-256) bytes.
    #[error("invalid key length: expected 16 or 32 bytes, got {got}")]
    InvalidKeyLength { got: usize },

    /// The nonce is not exactly 12 bytes.
    #[error("invalid nonce length: expected 12 bytes, got {got}")]
    InvalidNonceLength { got: usize },

    /// A hex-encoded input was odd-length or contained a non-hex digit.
    #[error("malformed hex encoding in {field}")]
    DecodeError { field: HexField },

    /// The random source could not produce a nonce.
    #[error("random source failure: {0}")]
    RandomnessFailure(String),

    /// The ciphertext did not authenticate under this key, nonce and AAD.
    ///
    /// Deliberately opaque: a truncated ciphertext and a tag mismatch are
    /// indistinguishable to the caller.
    #[error("message authentication failed")]
    AuthenticationFailure,
}

impl SealError {
    /// Short machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            SealError::InvalidKeyLength { .. } => "invalid_key_length",
            SealError::InvalidNonceLength { .. } => "invalid_nonce_length",
            SealError::DecodeError { .. } => "decode_error",
            SealError::RandomnessFailure(_) => "randomness_failure",
            SealError::AuthenticationFailure => "authentication_failure",
        }
    }

    /// Returns `true` if retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SealError::RandomnessFailure(_))
    }

    /// Returns `true` if the caller supplied malformed input.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            SealError::InvalidKeyLength { .. }
                | SealError::InvalidNonceLength { .. }
                | SealError::DecodeError { .. }
        )
    }
}
