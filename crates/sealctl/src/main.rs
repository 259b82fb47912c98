//! `sealctl` — seal and open short messages with AES-GCM from the shell.
//!
//! Startup sequence:
//! 1. Parse the command line.
//! 2. Load and validate [`config::Config`] from environment variables.
//! 3. Initialise structured JSON logging on stderr.
//! 4. Run the subcommand and print its result on stdout.
//!
//! Every failure is printed once, as a JSON `ErrorResponse` on stderr. Exit
//! status is 2 for usage errors (invalid configuration, bad key, nonce or hex)
//! and 1 for everything else.

mod commands;
mod config;
mod telemetry;

use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use common::{ErrorResponse, SealError};
use tracing::error;

use crate::config::ConfigError;

/// Exit status for invalid input or configuration.
const EXIT_USAGE: i32 = 2;

/// Exit status for every other failure.
const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Parser)]
#[command(name = "sealctl", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Seal a message and print `{"nonce", "ciphertext"}` as hex JSON.
    Seal {
        /// Plaintext message.
        message: String,
        /// Associated data to bind into the tag.
        #[arg(long)]
        aad: Option<String>,
    },
    /// Open a hex ciphertext and nonce and print the plaintext.
    Open {
        /// Hex-encoded ciphertext with trailing tag.
        ciphertext: String,
        /// Hex-encoded 12-byte nonce.
        nonce: String,
        /// Associated data supplied when sealing.
        #[arg(long)]
        aad: Option<String>,
    },
}

fn main() {
    let Err(e) = run() else {
        process::exit(0);
    };

    let (body, status) = failure(&e);
    error!(code = %body.code, "sealctl failed");
    match serde_json::to_string(&body) {
        Ok(json) => eprintln!("{json}"),
        Err(_) => eprintln!("{{\"code\":\"{}\"}}", body.code),
    }
    process::exit(status);
}

/// Map a failure to the error body and exit status reported for it.
fn failure(e: &anyhow::Error) -> (ErrorResponse, i32) {
    if e.downcast_ref::<ConfigError>().is_some() {
        let body = ErrorResponse::new("invalid_config", format!("{e:#}"));
        return (body, EXIT_USAGE);
    }
    match e.downcast_ref::<SealError>() {
        Some(se) => {
            let status = if se.is_usage_error() {
                EXIT_USAGE
            } else {
                EXIT_FAILURE
            };
            (ErrorResponse::from(se), status)
        }
        None => (ErrorResponse::new("error", format!("{e:#}")), EXIT_FAILURE),
    }
}

fn run() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Command line
    // -----------------------------------------------------------------------
    let cli = Cli::parse();

    // -----------------------------------------------------------------------
    // 2. Configuration
    // -----------------------------------------------------------------------
    let cfg = config::Config::from_env()?;

    // -----------------------------------------------------------------------
    // 3. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;

    // -----------------------------------------------------------------------
    // 4. Command
    // -----------------------------------------------------------------------
    match &cli.command {
        Command::Seal { message, aad } => {
            let sealed = commands::seal(&cfg, message, aad.as_deref())?;
            println!("{}", serde_json::to_string(&sealed)?);
        }
        Command::Open {
            ciphertext,
            nonce,
            aad,
        } => {
            let plaintext = commands::open(&cfg, ciphertext, nonce, aad.as_deref())?;
            println!("{plaintext}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use clap::CommandFactory;
    use common::HexField;

    #[test]
    fn authentication_failure_exits_with_failure() {
        let e = anyhow::Error::new(SealError::AuthenticationFailure).context("failed to open");
        let (body, status) = failure(&e);
        assert_eq!(body.code, "authentication_failure");
        assert_eq!(body.message, "message authentication failed");
        assert_eq!(status, EXIT_FAILURE);
    }

    #[test]
    fn decode_error_exits_with_usage() {
        let res: Result<(), SealError> = Err(SealError::DecodeError {
            field: HexField::Nonce,
        });
        let e = res.context("failed to open message").unwrap_err();
        let (body, status) = failure(&e);
        assert_eq!(body.code, "decode_error");
        assert_eq!(status, EXIT_USAGE);
    }

    #[test]
    fn randomness_failure_exits_with_failure() {
        let e = anyhow::Error::new(SealError::RandomnessFailure("exhausted".into()));
        let (body, status) = failure(&e);
        assert_eq!(body.code, "randomness_failure");
        assert_eq!(status, EXIT_FAILURE);
    }

    #[test]
    fn other_errors_exit_with_failure() {
        let e = anyhow::anyhow!("stdout closed");
        let (body, status) = failure(&e);
        assert_eq!(body.code, "error");
        assert!(body.message.contains("stdout closed"));
        assert_eq!(status, EXIT_FAILURE);
    }

    #[test]
    fn missing_key_is_usage_error() {
        let e = anyhow::anyhow!("missing field `seal_key`").context(ConfigError);
        let (body, status) = failure(&e);
        assert_eq!(body.code, "invalid_config");
        assert!(body.message.contains("missing field `seal_key`"));
        assert_eq!(status, EXIT_USAGE);
    }

    #[test]
    fn bad_key_length_in_config_is_usage_error() {
        let res: Result<(), SealError> = Err(SealError::InvalidKeyLength { got: 5 });
        let e = res
            .context("SEAL_KEY must be 16 or 32 bytes")
            .context(ConfigError)
            .unwrap_err();
        let (body, status) = failure(&e);
        assert_eq!(body.code, "invalid_config");
        assert_eq!(status, EXIT_USAGE);
    }

    #[test]
    fn failure_body_is_single_json_line() {
        let e = anyhow::anyhow!("missing field `seal_key`").context(ConfigError);
        let (body, _) = failure(&e);
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains('\n'));
        let decoded: ErrorResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.code, "invalid_config");
        assert!(decoded.message.starts_with("sealctl configuration invalid"));
    }

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_open_with_aad() {
        let cli = Cli::try_parse_from([
            "sealctl",
            "open",
            "da269a96",
            "13298648720762faad1b678e",
            "--aad",
            "session-42",
        ])
        .unwrap();
        match cli.command {
            Command::Open { nonce, aad, .. } => {
                assert_eq!(nonce, "13298648720762faad1b678e");
                assert_eq!(aad.as_deref(), Some("session-42"));
            }
            Command::Seal { .. } => panic!("expected open"),
        }
    }
}
