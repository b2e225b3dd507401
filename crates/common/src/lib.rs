//! Algorithm selectors, key material, capabilities, and errors shared across
//! the `encryption-service` crates.

pub mod algorithm;
pub mod capability;
pub mod error;
pub mod key;

pub use algorithm::{
    AsymmetricEncryptionAlgorithm, AsymmetricKeyAlgorithm, KeyAlgorithm, PbkdfAlgorithm,
    SymmetricEncryptionAlgorithm, UnknownAlgorithm,
};
pub use capability::{Capability, CapabilitySet};
pub use error::ServiceError;
pub use key::{KeyPair, PrivateKey, PublicKey, SecretKey};
