//! Configuration loading and validation for the encryption services.
//!
//! All values are read from environment variables. Every variable is
//! optional; unset variables fall back to the built-in service policy
//! (PBKDF2-HMAC-SHA1, 64000 iterations, AES-128).

use anyhow::{Context, Result};
use common::{KeyAlgorithm, PbkdfAlgorithm};
use serde::Deserialize;

use crate::key_service::{PbkdfParams, DEFAULT_KEY_SIZE_BITS, DEFAULT_PBKDF_ITERATIONS};

/// Raw service configuration as read from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// PBKDF identifier used when the caller does not name one.
    #[serde(default = "default_pbkdf_algorithm")]
    pub pbkdf_algorithm: String,

    /// PBKDF iteration count used when the caller does not give one.
    #[serde(default = "default_pbkdf_iterations")]
    pub pbkdf_iterations: u32,

    /// Derived key size in bits.
    #[serde(default = "default_key_size_bits")]
    pub pbkdf_key_size_bits: u32,

    /// Key algorithm for parameterless symmetric key generation.
    #[serde(default = "default_symmetric_key_algorithm")]
    pub symmetric_key_algorithm: String,

    /// Key size in bits for parameterless symmetric key generation.
    #[serde(default = "default_key_size_bits")]
    pub symmetric_key_size_bits: u32,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_pbkdf_algorithm() -> String {
    PbkdfAlgorithm::default().identifier().into()
}
fn default_pbkdf_iterations() -> u32 {
    DEFAULT_PBKDF_ITERATIONS
}
fn default_key_size_bits() -> u32 {
    DEFAULT_KEY_SIZE_BITS
}
fn default_symmetric_key_algorithm() -> String {
    KeyAlgorithm::default().identifier().into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pbkdf_algorithm: default_pbkdf_algorithm(),
            pbkdf_iterations: default_pbkdf_iterations(),
            pbkdf_key_size_bits: default_key_size_bits(),
            symmetric_key_algorithm: default_symmetric_key_algorithm(),
            symmetric_key_size_bits: default_key_size_bits(),
            log_level: default_log_level(),
        }
    }
}

/// Typed defaults the key service falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDefaults {
    pub pbkdf: PbkdfParams,
    pub symmetric_key_algorithm: KeyAlgorithm,
    pub symmetric_key_size_bits: u32,
}

impl Default for ServiceDefaults {
    fn default() -> Self {
        Self {
            pbkdf: PbkdfParams::default(),
            symmetric_key_algorithm: KeyAlgorithm::default(),
            symmetric_key_size_bits: DEFAULT_KEY_SIZE_BITS,
        }
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Resolve the typed defaults, validating algorithm names, the iteration
    /// count and both key sizes.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending variable.
    pub fn service_defaults(&self) -> Result<ServiceDefaults> {
        if self.pbkdf_iterations == 0 {
            anyhow::bail!("PBKDF_ITERATIONS must be > 0");
        }
        ensure_byte_multiple(self.pbkdf_key_size_bits, "PBKDF_KEY_SIZE_BITS")?;
        ensure_byte_multiple(self.symmetric_key_size_bits, "SYMMETRIC_KEY_SIZE_BITS")?;

        let pbkdf_algorithm: PbkdfAlgorithm = self
            .pbkdf_algorithm
            .parse()
            .context("PBKDF_ALGORITHM is not a known PBKDF identifier")?;
        let symmetric_key_algorithm: KeyAlgorithm = self
            .symmetric_key_algorithm
            .parse()
            .context("SYMMETRIC_KEY_ALGORITHM is not a known key algorithm identifier")?;

        Ok(ServiceDefaults {
            pbkdf: PbkdfParams {
                algorithm: pbkdf_algorithm,
                key_size_bits: self.pbkdf_key_size_bits,
                iterations: self.pbkdf_iterations,
            },
            symmetric_key_algorithm,
            symmetric_key_size_bits: self.symmetric_key_size_bits,
        })
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("LOG_LEVEL must not be empty");
        }
        self.service_defaults()?;
        Ok(())
    }
}

fn ensure_byte_multiple(bits: u32, name: &str) -> Result<()> {
    if bits == 0 || bits % 8 != 0 {
        anyhow::bail!("{name} must be a positive multiple of 8, got {bits}");
    }
    Ok(())
}
