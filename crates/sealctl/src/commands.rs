//! `seal` and `open` subcommands.

use anyhow::{Context, Result};
use common::HexSealed;
use tracing::info;

use crate::config::Config;

/// Seal `message` under the configured key.
pub fn seal(cfg: &Config, message: &str, aad: Option<&str>) -> Result<HexSealed> {
    let key = cfg.key_bytes()?;
    let aad = aad.unwrap_or_default().as_bytes();
    let sealed = sealer::seal_with_aad(&key, message.as_bytes(), aad)
        .context("failed to seal message")?;
    info!(ciphertext_len = sealed.ciphertext().len(), "sealed");
    Ok(sealed.to_hex())
}

/// Open a hex ciphertext and nonce under the configured key.
pub fn open(cfg: &Config, ciphertext: &str, nonce: &str, aad: Option<&str>) -> Result<String> {
    let key = cfg.key_bytes()?;
    let aad = aad.unwrap_or_default().as_bytes();
    let recovered = sealer::open_with_aad(&key, ciphertext, nonce, aad)
        .context("failed to open message")?;
    info!(plaintext_len = recovered.len(), "opened");
    recovered
        .into_string()
        .context("opened message is not valid UTF-8")
}
