//! Configuration loading and validation for `sealctl`.
//!
//! All values are read from environment variables at startup. The process
//! exits with a clear error message if the key is missing or malformed.

use anyhow::{Context, Result};
use common::{HexField, SealError};
use serde::Deserialize;
use thiserror::Error;
use zeroize::{Zeroize, Zeroizing};

/// Attached as context to every failure raised while loading [`Config`].
#[derive(Debug, Error)]
#[error("sealctl configuration invalid")]
pub struct ConfigError;

/// How `SEAL_KEY` is turned into key bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEncoding {
    /// The UTF-8 bytes of the variable, used as-is.
    Utf8,
    /// Hex-decoded bytes.
    Hex,
}

impl KeyEncoding {
    fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf8" => Ok(Self::Utf8),
            "hex" => Ok(Self::Hex),
            other => anyhow::bail!("SEAL_KEY_ENCODING must be `utf8` or `hex`, got `{other}`"),
        }
    }
}

/// Validated `sealctl` configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Secret key, 16 or 32 bytes once decoded. **Required.**
    pub seal_key: String,

    /// Encoding of `seal_key`: `utf8` or `hex`.
    #[serde(default = "default_key_encoding")]
    pub seal_key_encoding: String,

    /// Tracing log level (e.g. `"warn"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_key_encoding() -> String {
    "utf8".into()
}
fn default_log_level() -> String {
    "warn".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error carrying [`ConfigError`] if `SEAL_KEY` is absent or
    /// does not decode to a valid key.
    pub fn from_env() -> Result<Self> {
        Self::load().context(ConfigError)
    }

    fn load() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build sealctl configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise sealctl configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Key bytes decoded per [`Config::seal_key_encoding`].
    pub fn key_bytes(&self) -> Result<Zeroizing<Vec<u8>>> {
        let bytes = match KeyEncoding::parse(&self.seal_key_encoding)? {
            KeyEncoding::Utf8 => self.seal_key.as_bytes().to_vec(),
            KeyEncoding::Hex => hex::decode(self.seal_key.trim())
                .map_err(|_| SealError::DecodeError {
                    field: HexField::Key,
                })
                .context("SEAL_KEY is not valid hex")?,
        };
        Ok(Zeroizing::new(bytes))
    }

    fn validate(&self) -> Result<()> {
        if self.seal_key.is_empty() {
            anyhow::bail!("SEAL_KEY is required and must not be empty");
        }
        let key = self.key_bytes()?;
        sealer::SecretKey::new(&key).context("SEAL_KEY must be 16 or 32 bytes")?;
        Ok(())
    }
}

impl Drop for Config {
    fn drop(&mut self) {
        self.seal_key.zeroize();
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("seal_key", &"[REDACTED]")
            .field("seal_key_encoding", &self.seal_key_encoding)
            .field("log_level", &self.log_level)
            .finish()
    }
}
