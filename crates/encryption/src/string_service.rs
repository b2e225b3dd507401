//! [`StringService`]: encrypt and decrypt short strings, carried as Base64 text.
//!
//! Each call is a single-shot transform of the whole input. Ciphertext is
//! standard-alphabet, padded Base64. Whitespace inside Base64 input (line
//! wraps) is ignored on decryption.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::{
    AsymmetricEncryptionAlgorithm, Capability, CapabilitySet, PrivateKey, PublicKey, SecretKey,
    ServiceError, SymmetricEncryptionAlgorithm,
};
use tracing::debug;

use crate::crypto::{CipherProvider, ProviderError, RustCryptoProvider};
use crate::random::{with_rng, RandomSource};

/// Encrypts and decrypts text through a [`CipherProvider`].
#[derive(Debug)]
pub struct StringService<P = RustCryptoProvider> {
    provider: Arc<P>,
}

impl<P> Clone for StringService<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl Default for StringService<RustCryptoProvider> {
    fn default() -> Self {
        Self::new(Arc::new(RustCryptoProvider))
    }
}

impl<P: CipherProvider> StringService<P> {
    /// Operations this service implements. Asymmetric encryption is absent.
    pub const CAPABILITIES: CapabilitySet =
        CapabilitySet::new(&[Capability::SymmetricEncryption]);

    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub fn capabilities(&self) -> CapabilitySet {
        Self::CAPABILITIES
    }

    /// Encrypt the UTF-8 bytes of `plaintext` and return Base64 text.
    ///
    /// For AEAD algorithms `iv` may be `None`; a nonce is then drawn from `rng`
    /// (or the OS CSPRNG) and carried at the front of the ciphertext.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::CipherInit`] if the key size does not suit
    /// `algorithm` or the IV is missing or the wrong length, and
    /// [`ServiceError::Encryption`] if the cipher itself fails.
    pub fn encrypt_symmetric(
        &self,
        plaintext: &str,
        key: &SecretKey,
        algorithm: SymmetricEncryptionAlgorithm,
        iv: Option<&[u8]>,
        rng: Option<RandomSource<'_>>,
    ) -> Result<String, ServiceError> {
        debug!(
            algorithm = %algorithm,
            key_size_bits = key.size_bits(),
            explicit_iv = iv.is_some(),
            "encrypting string"
        );
        let ciphertext = with_rng(rng, |rng| {
            self.provider
                .encrypt(algorithm, key.as_bytes(), iv, plaintext.as_bytes(), rng)
        })
        .map_err(|e| classify(e, ServiceError::Encryption))?;
        Ok(STANDARD.encode(ciphertext))
    }

    /// Decode Base64 `ciphertext`, decrypt it, and return the text.
    ///
    /// `iv` must match what was used for encryption; for AEAD ciphertext
    /// produced without an explicit IV, pass `None`. The random source is
    /// accepted for symmetry with encryption; no supported mode consumes
    /// randomness when decrypting.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Decoding`] if the input is not Base64,
    /// [`ServiceError::CipherInit`] for key or IV problems, and
    /// [`ServiceError::Cipher`] on padding or authentication failure, or if the
    /// decrypted bytes are not UTF-8.
    pub fn decrypt_symmetric(
        &self,
        ciphertext: &str,
        key: &SecretKey,
        algorithm: SymmetricEncryptionAlgorithm,
        iv: Option<&[u8]>,
        _rng: Option<RandomSource<'_>>,
    ) -> Result<String, ServiceError> {
        debug!(
            algorithm = %algorithm,
            key_size_bits = key.size_bits(),
            explicit_iv = iv.is_some(),
            "decrypting string"
        );
        let compact: String = ciphertext
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let bytes = STANDARD
            .decode(compact)
            .map_err(|e| ServiceError::Decoding(e.to_string()))?;

        let plaintext = self
            .provider
            .decrypt(algorithm, key.as_bytes(), iv, &bytes)
            .map_err(|e| classify(e, ServiceError::Cipher))?;

        String::from_utf8(plaintext)
            .map_err(|_| ServiceError::Cipher("decrypted bytes are not valid UTF-8".into()))
    }

    /// A fresh random IV (or nonce) of the length `algorithm` requires.
    pub fn generate_iv(
        &self,
        algorithm: SymmetricEncryptionAlgorithm,
        rng: Option<RandomSource<'_>>,
    ) -> Vec<u8> {
        let mut iv = vec![0u8; algorithm.iv_len()];
        with_rng(rng, |rng| rng.fill_bytes(&mut iv));
        iv
    }

    /// Asymmetric encryption. Not implemented by this service.
    ///
    /// # Errors
    ///
    /// Always returns
    /// [`ServiceError::NotImplemented`]`(`[`Capability::AsymmetricEncryption`]`)`.
    pub fn encrypt_asymmetric(
        &self,
        _plaintext: &str,
        _key: &PublicKey,
        _algorithm: AsymmetricEncryptionAlgorithm,
        _iv: Option<&[u8]>,
        _rng: Option<RandomSource<'_>>,
    ) -> Result<String, ServiceError> {
        Err(ServiceError::NotImplemented(Capability::AsymmetricEncryption))
    }

    /// Asymmetric decryption. Not implemented by this service.
    ///
    /// # Errors
    ///
    /// Always returns
    /// [`ServiceError::NotImplemented`]`(`[`Capability::AsymmetricEncryption`]`)`.
    pub fn decrypt_asymmetric(
        &self,
        _ciphertext: &str,
        _key: &PrivateKey,
        _algorithm: AsymmetricEncryptionAlgorithm,
        _iv: Option<&[u8]>,
        _rng: Option<RandomSource<'_>>,
    ) -> Result<String, ServiceError> {
        Err(ServiceError::NotImplemented(Capability::AsymmetricEncryption))
    }
}

/// Map setup failures to `CipherInit`, everything else through `otherwise`.
fn classify(e: ProviderError, otherwise: fn(String) -> ServiceError) -> ServiceError {
    if e.is_init_error() {
        ServiceError::CipherInit(e.to_string())
    } else {
        otherwise(e.to_string())
    }
}
