//! Cryptographic provider seam.
//!
//! The key and string services never touch a primitive directly: they pick
//! parameters and hand them to a [`KeyProvider`] or [`CipherProvider`]. The
//! bundled [`RustCryptoProvider`] implements both on top of the RustCrypto
//! crates.
//!
//! # Ciphertext layout
//!
//! ```text
//! explicit IV:        <ciphertext[+tag]>
//! AEAD, no IV given:  <nonce (12 bytes)><ciphertext+tag>
//! ```

pub mod cipher;
pub mod kdf;
pub mod keygen;
pub mod provider;

pub use provider::RustCryptoProvider;

use common::{KeyAlgorithm, PbkdfAlgorithm, SymmetricEncryptionAlgorithm};
use rand_core::RngCore;
use thiserror::Error;

/// Errors produced by the provider layer.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider has no implementation for this algorithm.
    #[error("no such algorithm: {0}")]
    NoSuchAlgorithm(&'static str),

    /// Key size is not one the algorithm accepts.
    #[error("invalid key size for {algorithm}: {key_size_bits} bits")]
    InvalidKeySize {
        algorithm: &'static str,
        key_size_bits: u32,
    },

    /// A KDF parameter was rejected.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// The cipher mode needs an explicit IV and none was given.
    #[error("{0} requires an IV")]
    MissingIv(&'static str),

    /// The IV has the wrong length for the cipher mode.
    #[error("invalid IV length for {algorithm}: expected {expected} bytes, got {actual}")]
    InvalidIv {
        algorithm: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Ciphertext is too short to contain its nonce or tag.
    #[error("ciphertext truncated")]
    Truncated,

    /// Block padding did not verify after decryption.
    #[error("bad padding")]
    BadPadding,

    /// AEAD encryption or decryption failed (wrong key or tampered data).
    #[error("aead operation failed")]
    AeadFailure,
}

impl ProviderError {
    /// Whether the error arose while setting up the primitive, before any
    /// data was transformed.
    pub fn is_init_error(&self) -> bool {
        matches!(
            self,
            ProviderError::NoSuchAlgorithm(_)
                | ProviderError::InvalidKeySize { .. }
                | ProviderError::InvalidParameter(_)
                | ProviderError::MissingIv(_)
                | ProviderError::InvalidIv { .. }
        )
    }
}

/// Key derivation and raw key generation.
#[cfg_attr(test, mockall::automock)]
pub trait KeyProvider: Send + Sync {
    /// Derive `key_size_bits` of key material from a password and salt.
    fn derive_key(
        &self,
        algorithm: PbkdfAlgorithm,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        key_size_bits: u32,
    ) -> Result<Vec<u8>, ProviderError>;

    /// Generate a random key of `key_size_bits` for `algorithm`.
    fn generate_key(
        &self,
        algorithm: KeyAlgorithm,
        key_size_bits: u32,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<u8>, ProviderError>;
}

/// Single-shot symmetric encryption and decryption.
pub trait CipherProvider: Send + Sync {
    fn encrypt(
        &self,
        algorithm: SymmetricEncryptionAlgorithm,
        key: &[u8],
        iv: Option<&[u8]>,
        plaintext: &[u8],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<u8>, ProviderError>;

    fn decrypt(
        &self,
        algorithm: SymmetricEncryptionAlgorithm,
        key: &[u8],
        iv: Option<&[u8]>,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, ProviderError>;
}
