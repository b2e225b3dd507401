//! Structured JSON logging for processes that embed the encryption services.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the embedding process, which can opt in through the `telemetry`
//! feature and call [`init`] once at startup.
//!
//! # Telemetry invariants
//!
//! - **No passwords, plaintext, or key material** may appear in any log field.
//!   The services log algorithm identifiers, sizes, and iteration counts only.
//! - Log level comes from [`Config::log_level`] (`LOG_LEVEL`, default `info`);
//!   `RUST_LOG` takes precedence when set.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Initialise the global tracing subscriber from `cfg`.
///
/// Outputs structured JSON logs to stdout.
///
/// # Errors
///
/// Returns an error if the level directive is invalid or a global subscriber
/// has already been set.
pub fn init(cfg: &Config) -> Result<()> {
    let filter = env_filter(std::env::var("RUST_LOG").ok().as_deref(), &cfg.log_level)?;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}

/// `rust_log` wins over the configured level when present and non-empty.
fn env_filter(rust_log: Option<&str>, log_level: &str) -> Result<EnvFilter> {
    match rust_log.filter(|s| !s.trim().is_empty()) {
        Some(directives) => {
            EnvFilter::try_new(directives).context("RUST_LOG is not a valid filter")
        }
        None => EnvFilter::try_new(log_level).context("LOG_LEVEL is not a valid filter"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_used_without_rust_log() {
        let filter = env_filter(None, "debug").unwrap();
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn rust_log_overrides_configured_level() {
        let filter = env_filter(Some("encryption_service=trace"), "info").unwrap();
        assert_eq!(filter.to_string(), "encryption_service=trace");

        let blank = env_filter(Some("  "), "warn").unwrap();
        assert_eq!(blank.to_string(), "warn");
    }

    #[test]
    fn invalid_level_rejected() {
        let err = env_filter(None, "encryption_service=loud").unwrap_err();
        assert!(err.to_string().contains("LOG_LEVEL"));
    }
}
