//! AES-GCM sealing primitives.
//!
//! # Sealed message layout
//!
//! ```text
//! nonce:      12 bytes, fresh from a CSPRNG for every seal
//! ciphertext: len(plaintext) bytes || 16-byte authentication tag
//! ```
//!
//! Random 96-bit nonces stay safe up to roughly 2^32 messages per key. Callers
//! sealing more than that under one key should move to a counter-based nonce.

pub mod cipher;
pub mod key;
pub mod rng;

/// Byte length of an AES-128 key.
pub const KEY_LEN_128: usize = 16;

/// Byte length of an AES-256 key.
pub const KEY_LEN_256: usize = 32;

/// Byte length of a GCM nonce (96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the GCM authentication tag appended to every ciphertext.
pub const TAG_LEN: usize = 16;

/// Largest plaintext GCM can seal under one nonce: 2^36 - 32 bytes.
pub const MAX_PLAINTEXT_LEN: u64 = (1 << 36) - 32;
