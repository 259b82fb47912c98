//! AES-GCM sealing and opening of individual messages.
//!
//! **Algorithm choice:** AES-128-GCM or AES-256-GCM, selected by key length,
//! with a random 96-bit nonce per seal and a 16-byte tag appended to the
//! ciphertext.
//!
//! **Never reuse a nonce under the same key.** GCM nonce reuse is catastrophic:
//! it breaks both confidentiality and authentication. Every seal draws a fresh
//! nonce from the supplied CSPRNG.

use aes_gcm::{
    aead::{self, Aead, KeyInit, Payload},
    Aes128Gcm, Aes256Gcm, Nonce,
};
use common::{HexField, HexSealed, SealError};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::key::{KeyVariant, SecretKey};
use super::rng::{generate_nonce, CryptoRng, OsRng, RngCore};
use super::{MAX_PLAINTEXT_LEN, NONCE_LEN, TAG_LEN};

/// Output of a seal: the nonce and the ciphertext with its trailing tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedMessage {
    nonce: [u8; NONCE_LEN],
    ciphertext: Vec<u8>,
}

impl SealedMessage {
    /// Reassemble a sealed message from raw parts.
    ///
    /// # Errors
    ///
    /// Returns [`SealError::InvalidNonceLength`] if `nonce` is not [`NONCE_LEN`] bytes.
    pub fn from_parts(nonce: &[u8], ciphertext: Vec<u8>) -> Result<Self, SealError> {
        let nonce: [u8; NONCE_LEN] = nonce
            .try_into()
            .map_err(|_| SealError::InvalidNonceLength { got: nonce.len() })?;
        Ok(Self { nonce, ciphertext })
    }

    /// Parse hex-encoded ciphertext and nonce.
    ///
    /// # Errors
    ///
    /// Returns [`SealError::DecodeError`] for malformed hex and
    /// [`SealError::InvalidNonceLength`] if the nonce does not decode to
    /// [`NONCE_LEN`] bytes.
    pub fn from_hex(ciphertext_hex: &str, nonce_hex: &str) -> Result<Self, SealError> {
        let ciphertext = hex::decode(ciphertext_hex).map_err(|_| SealError::DecodeError {
            field: HexField::Ciphertext,
        })?;
        let nonce = hex::decode(nonce_hex).map_err(|_| SealError::DecodeError {
            field: HexField::Nonce,
        })?;
        Self::from_parts(&nonce, ciphertext)
    }

    /// The public nonce, to be sent alongside the ciphertext.
    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }

    /// Ciphertext followed by the [`TAG_LEN`]-byte authentication tag.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Lowercase hex encoding of both halves.
    pub fn to_hex(&self) -> HexSealed {
        HexSealed::new(hex::encode(self.nonce), hex::encode(&self.ciphertext))
    }

    /// Split into the nonce and the ciphertext with its tag.
    pub fn into_parts(self) -> ([u8; NONCE_LEN], Vec<u8>) {
        (self.nonce, self.ciphertext)
    }
}

/// Authenticated plaintext returned by a successful open.
///
/// Held in a buffer that is zeroed on drop.
pub struct RecoveredMessage {
    bytes: Zeroizing<Vec<u8>>,
}

impl RecoveredMessage {
    /// The authenticated plaintext.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Plaintext length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the sealed plaintext was empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Convert into a `String`, failing if the plaintext is not UTF-8.
    pub fn into_string(mut self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(std::mem::take(&mut *self.bytes))
    }
}

impl std::fmt::Debug for RecoveredMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RecoveredMessage({} bytes)", self.bytes.len())
    }
}

/// Seal `plaintext` under `key` with a fresh nonce from the OS CSPRNG.
///
/// The ciphertext is always `plaintext.len() + TAG_LEN` bytes. No associated
/// data is bound; see [`seal_with_aad`].
///
/// # Errors
///
/// Returns [`SealError::InvalidKeyLength`] if `key` is not 16 or 32 bytes and
/// [`SealError::RandomnessFailure`] if the OS random source is unavailable.
pub fn seal(key: &[u8], plaintext: &[u8]) -> Result<SealedMessage, SealError> {
    seal_with_rng(key, plaintext, &[], &mut OsRng)
}

/// Seal `plaintext`, binding `aad` into the authentication tag.
///
/// The same `aad` must be supplied to open.
pub fn seal_with_aad(
    key: &[u8],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<SealedMessage, SealError> {
    seal_with_rng(key, plaintext, aad, &mut OsRng)
}

/// Seal with an injected random source for the nonce.
///
/// The key is validated before any bytes are drawn from `rng`.
pub fn seal_with_rng<R>(
    key: &[u8],
    plaintext: &[u8],
    aad: &[u8],
    rng: &mut R,
) -> Result<SealedMessage, SealError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let key = SecretKey::new(key)?;
    let nonce = generate_nonce(rng)?;
    let cipher = GcmCipher::new(&key)?;

    let payload = Payload {
        msg: plaintext,
        aad,
    };
    let ciphertext = cipher
        .encrypt(&nonce, payload)
        .map_err(|_| oversized_plaintext(plaintext.len()))?;

    debug!(
        variant = ?key.variant(),
        plaintext_len = plaintext.len(),
        aad_len = aad.len(),
        "message sealed"
    );
    Ok(SealedMessage { nonce, ciphertext })
}

/// Open a hex-encoded ciphertext with its hex-encoded nonce.
///
/// # Errors
///
/// - [`SealError::InvalidKeyLength`] if `key` is not 16 or 32 bytes.
/// - [`SealError::DecodeError`] if either input is not valid hex.
/// - [`SealError::InvalidNonceLength`] if the nonce is not 12 bytes.
/// - [`SealError::AuthenticationFailure`] if the ciphertext is shorter than the
///   tag or does not verify under this key and nonce.
pub fn open(
    key: &[u8],
    ciphertext_hex: &str,
    nonce_hex: &str,
) -> Result<RecoveredMessage, SealError> {
    open_with_aad(key, ciphertext_hex, nonce_hex, &[])
}

/// [`open`] with associated data that must match what was sealed.
pub fn open_with_aad(
    key: &[u8],
    ciphertext_hex: &str,
    nonce_hex: &str,
    aad: &[u8],
) -> Result<RecoveredMessage, SealError> {
    let key = SecretKey::new(key)?;
    let sealed = SealedMessage::from_hex(ciphertext_hex, nonce_hex)?;
    open_with_key(&key, &sealed, aad)
}

/// Open a [`HexSealed`] pair as produced by [`SealedMessage::to_hex`].
pub fn open_hex_sealed(
    key: &[u8],
    sealed: &HexSealed,
    aad: &[u8],
) -> Result<RecoveredMessage, SealError> {
    open_with_aad(key, &sealed.ciphertext, &sealed.nonce, aad)
}

/// Open raw sealed bytes without a hex round trip.
pub fn open_sealed(
    key: &[u8],
    sealed: &SealedMessage,
    aad: &[u8],
) -> Result<RecoveredMessage, SealError> {
    let key = SecretKey::new(key)?;
    open_with_key(&key, sealed, aad)
}

/// Encryption only fails once the plaintext passes [`MAX_PLAINTEXT_LEN`].
///
/// The taxonomy has no size variant, so the failure surfaces as the opaque
/// [`SealError::AuthenticationFailure`]; the log line names the real cause.
fn oversized_plaintext(plaintext_len: usize) -> SealError {
    warn!(
        plaintext_len,
        max_len = MAX_PLAINTEXT_LEN,
        "plaintext exceeds GCM message size limit"
    );
    SealError::AuthenticationFailure
}

fn open_with_key(
    key: &SecretKey,
    sealed: &SealedMessage,
    aad: &[u8],
) -> Result<RecoveredMessage, SealError> {
    if sealed.ciphertext.len() < TAG_LEN {
        warn!("sealed message rejected");
        return Err(SealError::AuthenticationFailure);
    }

    let cipher = GcmCipher::new(key)?;
    let payload = Payload {
        msg: sealed.ciphertext.as_slice(),
        aad,
    };
    let plaintext = cipher.decrypt(&sealed.nonce, payload).map_err(|_| {
        warn!("sealed message rejected");
        SealError::AuthenticationFailure
    })?;

    debug!(
        variant = ?key.variant(),
        plaintext_len = plaintext.len(),
        "message opened"
    );
    Ok(RecoveredMessage {
        bytes: Zeroizing::new(plaintext),
    })
}

/// GCM construction over AES-128 or AES-256.
enum GcmCipher {
    Aes128(Aes128Gcm),
    Aes256(Aes256Gcm),
}

impl GcmCipher {
    fn new(key: &SecretKey) -> Result<Self, SealError> {
        let bytes = key.as_bytes();
        let cipher = match key.variant() {
            KeyVariant::Aes128 => Aes128Gcm::new_from_slice(bytes).map(Self::Aes128),
            KeyVariant::Aes256 => Aes256Gcm::new_from_slice(bytes).map(Self::Aes256),
        };
        cipher.map_err(|_| SealError::InvalidKeyLength { got: bytes.len() })
    }

    fn encrypt(&self, nonce: &[u8; NONCE_LEN], payload: Payload<'_, '_>) -> aead::Result<Vec<u8>> {
        let nonce = Nonce::from_slice(nonce);
        match self {
            Self::Aes128(c) => c.encrypt(nonce, payload),
            Self::Aes256(c) => c.encrypt(nonce, payload),
        }
    }

    fn decrypt(&self, nonce: &[u8; NONCE_LEN], payload: Payload<'_, '_>) -> aead::Result<Vec<u8>> {
        let nonce = Nonce::from_slice(nonce);
        match self {
            Self::Aes128(c) => c.decrypt(nonce, payload),
            Self::Aes256(c) => c.decrypt(nonce, payload),
        }
    }
}
