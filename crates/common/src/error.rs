//! Common error types shared across crates.

use thiserror::Error;

use crate::capability::Capability;

/// Error returned by every key and string service operation.
///
/// Each variant has a stable machine-readable [`code`](ServiceError::code).
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The provider rejected the key-derivation parameters.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// The provider failed to generate a key for a reason other than key size.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// The requested key size is not valid for the algorithm.
    #[error("invalid key size for {algorithm}: {key_size_bits} bits")]
    InvalidKeySize { algorithm: String, key_size_bits: u32 },

    /// The cipher could not be set up (wrong key length, missing or malformed IV).
    #[error("cipher initialisation failed: {0}")]
    CipherInit(String),

    /// The cipher failed while encrypting.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// The ciphertext was not valid Base64.
    #[error("invalid base64 input: {0}")]
    Decoding(String),

    /// Decryption failed: bad padding, failed authentication, or non-UTF-8 output.
    #[error("decryption failed: {0}")]
    Cipher(String),

    /// The operation belongs to a capability this service does not implement.
    #[error("not implemented: {0}")]
    NotImplemented(Capability),
}

impl ServiceError {
    /// Short machine-readable error code (e.g. `"cipher_init_error"`).
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::KeyDerivation(_) => "key_derivation_error",
            ServiceError::KeyGeneration(_) => "key_generation_error",
            ServiceError::InvalidKeySize { .. } => "invalid_key_size",
            ServiceError::CipherInit(_) => "cipher_init_error",
            ServiceError::Encryption(_) => "encryption_error",
            ServiceError::Decoding(_) => "decoding_error",
            ServiceError::Cipher(_) => "cipher_error",
            ServiceError::NotImplemented(_) => "not_implemented",
        }
    }
}
