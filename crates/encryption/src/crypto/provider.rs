//! [`RustCryptoProvider`]: the bundled provider backed by the RustCrypto crates.

use common::{KeyAlgorithm, PbkdfAlgorithm, SymmetricEncryptionAlgorithm};
use rand_core::RngCore;

use super::{cipher, kdf, keygen, CipherProvider, KeyProvider, ProviderError};

/// Stateless provider; cheap to construct and safe to share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoProvider;

impl RustCryptoProvider {
    pub const NAME: &'static str = "RustCrypto";

    pub fn new() -> Self {
        Self
    }
}

impl KeyProvider for RustCryptoProvider {
    fn derive_key(
        &self,
        algorithm: PbkdfAlgorithm,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        key_size_bits: u32,
    ) -> Result<Vec<u8>, ProviderError> {
        kdf::derive(algorithm, password, salt, iterations, key_size_bits)
    }

    fn generate_key(
        &self,
        algorithm: KeyAlgorithm,
        key_size_bits: u32,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<u8>, ProviderError> {
        keygen::generate(algorithm, key_size_bits, rng)
    }
}

impl CipherProvider for RustCryptoProvider {
    fn encrypt(
        &self,
        algorithm: SymmetricEncryptionAlgorithm,
        key: &[u8],
        iv: Option<&[u8]>,
        plaintext: &[u8],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<u8>, ProviderError> {
        cipher::encrypt(algorithm, key, iv, plaintext, rng)
    }

    fn decrypt(
        &self,
        algorithm: SymmetricEncryptionAlgorithm,
        key: &[u8],
        iv: Option<&[u8]>,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, ProviderError> {
        cipher::decrypt(algorithm, key, iv, ciphertext)
    }
}
