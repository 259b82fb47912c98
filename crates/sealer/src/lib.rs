//! Authenticated symmetric encryption of short messages with AES-GCM.
//!
//! Two operations make up the whole surface:
//!
//! - [`seal`] encrypts a plaintext under a 16- or 32-byte key with a fresh
//!   random nonce and returns the nonce alongside the ciphertext and tag.
//! - [`open`] verifies and decrypts a hex-encoded ciphertext and nonce.
//!
//! ```
//! let key = b"AES256Key-32Characters1234567890";
//! let sealed = sealer::seal(key, b"testing 123").unwrap();
//! let hex = sealed.to_hex();
//! let opened = sealer::open(key, &hex.ciphertext, &hex.nonce).unwrap();
//! assert_eq!(opened.as_bytes(), b"testing 123");
//! ```

pub mod crypto;

pub use common::{HexField, HexSealed, SealError};
pub use crypto::cipher::{
    open, open_hex_sealed, open_sealed, open_with_aad, seal, seal_with_aad, seal_with_rng,
    RecoveredMessage, SealedMessage,
};
pub use crypto::key::{KeyVariant, SecretKey};
pub use crypto::{KEY_LEN_128, KEY_LEN_256, MAX_PLAINTEXT_LEN, NONCE_LEN, TAG_LEN};
