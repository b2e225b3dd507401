//! `encryption-service`: key generation and string encryption over a
//! pluggable cryptographic provider.
//!
//! Two stateless façades:
//! 1. [`KeyService`] derives keys from passwords (PBKDF2) and generates random
//!    symmetric keys.
//! 2. [`StringService`] encrypts and decrypts text, carrying ciphertext as
//!    Base64.
//!
//! Both forward all cryptographic work to a [`crypto::KeyProvider`] /
//! [`crypto::CipherProvider`]. Asymmetric operations are declared and always
//! return [`ServiceError::NotImplemented`]; check
//! [`KeyService::capabilities`] / [`StringService::capabilities`] first.

pub mod config;
pub mod crypto;
pub mod factory;
pub mod key_service;
pub mod random;
pub mod string_service;
#[cfg(feature = "telemetry")]
pub mod telemetry;

pub use common::{
    AsymmetricEncryptionAlgorithm, AsymmetricKeyAlgorithm, Capability, CapabilitySet, KeyAlgorithm,
    KeyPair, PbkdfAlgorithm, PrivateKey, PublicKey, SecretKey, ServiceError,
    SymmetricEncryptionAlgorithm,
};
pub use config::{Config, ServiceDefaults};
pub use crypto::RustCryptoProvider;
pub use factory::{EncryptionServiceFactory, RustCryptoServiceFactory};
pub use key_service::{KeyService, PbkdfParams, DEFAULT_KEY_SIZE_BITS, DEFAULT_PBKDF_ITERATIONS};
pub use random::RandomSource;
pub use string_service::StringService;
