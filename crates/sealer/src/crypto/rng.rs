//! Nonce generation from an injected random-byte provider.
//!
//! Production code passes [`OsRng`]; tests pass a deterministic generator to
//! pin the nonce and reproduce known-answer vectors.

pub use aes_gcm::aead::rand_core::{CryptoRng, RngCore};
pub use aes_gcm::aead::OsRng;

use common::SealError;

use super::NONCE_LEN;

/// Draw a fresh [`NONCE_LEN`]-byte nonce from `rng`.
///
/// # Errors
///
/// Returns [`SealError::RandomnessFailure`] if the provider cannot produce bytes.
pub fn generate_nonce<R>(rng: &mut R) -> Result<[u8; NONCE_LEN], SealError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut nonce = [0u8; NONCE_LEN];
    rng.try_fill_bytes(&mut nonce)
        .map_err(|e| SealError::RandomnessFailure(e.to_string()))?;
    Ok(nonce)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::num::NonZeroU32;

    use aes_gcm::aead::rand_core::{self, CryptoRng, RngCore};

    /// Repeats a fixed byte pattern.
    pub struct FixedRng(pub Vec<u8>);

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            let mut buf = [0u8; 4];
            self.fill_bytes(&mut buf);
            u32::from_le_bytes(buf)
        }

        fn next_u64(&mut self) -> u64 {
            let mut buf = [0u8; 8];
            self.fill_bytes(&mut buf);
            u64::from_le_bytes(buf)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for (d, s) in dest.iter_mut().zip(self.0.iter().cycle()) {
                *d = *s;
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for FixedRng {}

    /// Always fails, as an exhausted or unavailable entropy source would.
    pub struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {}

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
            Err(rand_core::Error::from(
                NonZeroU32::new(rand_core::Error::CUSTOM_START).unwrap(),
            ))
        }
    }

    impl CryptoRng for FailingRng {}
}
