//! [`KeyService`]: password-based key derivation and symmetric key generation.
//!
//! # Failure policy
//!
//! Derivation errors propagate. Symmetric key generation is the one place a
//! failure is recovered locally: if the provider does not implement the
//! requested algorithm the error is logged and the call returns `Ok(None)`.
//! Callers must treat `None` as "generation failed". An invalid key size for
//! an algorithm the provider does implement is still an error.

use std::sync::Arc;

use common::{
    AsymmetricKeyAlgorithm, Capability, CapabilitySet, KeyAlgorithm, KeyPair, PbkdfAlgorithm,
    SecretKey, ServiceError,
};
use tracing::{debug, error};

use crate::config::ServiceDefaults;
use crate::crypto::{KeyProvider, ProviderError, RustCryptoProvider};
use crate::random::{with_rng, RandomSource};

/// PBKDF iteration count used when the caller does not give one.
pub const DEFAULT_PBKDF_ITERATIONS: u32 = 64_000;

/// Key size (bits) for derived and generated keys when the caller does not give one.
pub const DEFAULT_KEY_SIZE_BITS: u32 = 128;

/// Parameters for password-based key derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PbkdfParams {
    pub algorithm: PbkdfAlgorithm,
    pub key_size_bits: u32,
    pub iterations: u32,
}

impl Default for PbkdfParams {
    fn default() -> Self {
        Self {
            algorithm: PbkdfAlgorithm::default(),
            key_size_bits: DEFAULT_KEY_SIZE_BITS,
            iterations: DEFAULT_PBKDF_ITERATIONS,
        }
    }
}

/// Generates and derives symmetric keys through a [`KeyProvider`].
///
/// Holds no per-call state; clone it or share it behind an `Arc` freely.
#[derive(Debug)]
pub struct KeyService<P = RustCryptoProvider> {
    provider: Arc<P>,
    defaults: ServiceDefaults,
}

impl<P> Clone for KeyService<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            defaults: self.defaults,
        }
    }
}

impl Default for KeyService<RustCryptoProvider> {
    fn default() -> Self {
        Self::new(Arc::new(RustCryptoProvider), ServiceDefaults::default())
    }
}

impl<P: KeyProvider> KeyService<P> {
    /// Operations this service implements. Asymmetric key generation is absent.
    pub const CAPABILITIES: CapabilitySet = CapabilitySet::new(&[
        Capability::PasswordKeyDerivation,
        Capability::SymmetricKeyGeneration,
    ]);

    pub fn new(provider: Arc<P>, defaults: ServiceDefaults) -> Self {
        Self { provider, defaults }
    }

    pub fn capabilities(&self) -> CapabilitySet {
        Self::CAPABILITIES
    }

    pub fn defaults(&self) -> &ServiceDefaults {
        &self.defaults
    }

    /// Derive a key from `password` and `salt` with the configured PBKDF defaults.
    ///
    /// # Errors
    ///
    /// See [`derive_password_key_with`](Self::derive_password_key_with).
    pub fn derive_password_key(
        &self,
        password: &str,
        salt: &[u8],
    ) -> Result<SecretKey, ServiceError> {
        self.derive_password_key_with(password, salt, self.defaults.pbkdf)
    }

    /// Derive a key of `params.key_size_bits` from `password` and `salt`.
    ///
    /// The returned key is tagged with the PBKDF identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::KeyDerivation`] if the provider rejects the
    /// parameters: empty salt, zero iterations, or an unusable key size.
    pub fn derive_password_key_with(
        &self,
        password: &str,
        salt: &[u8],
        params: PbkdfParams,
    ) -> Result<SecretKey, ServiceError> {
        debug!(
            algorithm = %params.algorithm,
            key_size_bits = params.key_size_bits,
            iterations = params.iterations,
            "deriving password-based key"
        );
        let bytes = self
            .provider
            .derive_key(
                params.algorithm,
                password.as_bytes(),
                salt,
                params.iterations,
                params.key_size_bits,
            )
            .map_err(|e| ServiceError::KeyDerivation(e.to_string()))?;
        Ok(SecretKey::new(params.algorithm.identifier(), bytes))
    }

    /// Generate a key with the configured default algorithm and size from the
    /// OS random source.
    ///
    /// # Errors
    ///
    /// See [`generate_symmetric_key_with`](Self::generate_symmetric_key_with).
    pub fn generate_symmetric_key(&self) -> Result<Option<SecretKey>, ServiceError> {
        self.generate_symmetric_key_with(
            self.defaults.symmetric_key_algorithm,
            self.defaults.symmetric_key_size_bits,
            None,
        )
    }

    /// Generate a key of `algorithm` and `key_size_bits` from the OS random source.
    ///
    /// # Errors
    ///
    /// See [`generate_symmetric_key_with`](Self::generate_symmetric_key_with).
    pub fn generate_symmetric_key_sized(
        &self,
        algorithm: KeyAlgorithm,
        key_size_bits: u32,
    ) -> Result<Option<SecretKey>, ServiceError> {
        self.generate_symmetric_key_with(algorithm, key_size_bits, None)
    }

    /// Generate a key of `algorithm` and `key_size_bits`, drawing from `rng`
    /// (or the OS CSPRNG when `None`).
    ///
    /// Returns `Ok(None)` when the provider does not implement `algorithm`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidKeySize`] if `key_size_bits` is not valid
    /// for `algorithm`.
    pub fn generate_symmetric_key_with(
        &self,
        algorithm: KeyAlgorithm,
        key_size_bits: u32,
        rng: Option<RandomSource<'_>>,
    ) -> Result<Option<SecretKey>, ServiceError> {
        debug!(algorithm = %algorithm, key_size_bits, "generating symmetric key");
        let result =
            with_rng(rng, |rng| self.provider.generate_key(algorithm, key_size_bits, rng));

        match result {
            Ok(bytes) => Ok(Some(SecretKey::new(algorithm.identifier(), bytes))),
            Err(e @ ProviderError::NoSuchAlgorithm(_)) => {
                error!(algorithm = %algorithm, key_size_bits, error = %e, "unsupported algorithm");
                Ok(None)
            }
            Err(ProviderError::InvalidKeySize { .. }) => Err(ServiceError::InvalidKeySize {
                algorithm: algorithm.identifier().into(),
                key_size_bits,
            }),
            Err(e) => Err(ServiceError::KeyGeneration(e.to_string())),
        }
    }

    /// Asymmetric key-pair generation. Not implemented by this service.
    ///
    /// # Errors
    ///
    /// Always returns
    /// [`ServiceError::NotImplemented`]`(`[`Capability::AsymmetricKeyGeneration`]`)`.
    pub fn generate_asymmetric_key_pair(
        &self,
        _algorithm: AsymmetricKeyAlgorithm,
        _key_size_bits: u32,
        _rng: Option<RandomSource<'_>>,
    ) -> Result<KeyPair, ServiceError> {
        Err(ServiceError::NotImplemented(Capability::AsymmetricKeyGeneration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::MockKeyProvider;
    use rand::{rngs::StdRng, SeedableRng};

    fn service(mock: MockKeyProvider) -> KeyService<MockKeyProvider> {
        KeyService::new(Arc::new(mock), ServiceDefaults::default())
    }

    #[test]
    fn derive_uses_default_policy() {
        let mut mock = MockKeyProvider::new();
        mock.expect_derive_key()
            .withf(|alg, password, salt, iterations, bits| {
                *alg == PbkdfAlgorithm::Pbkdf2HmacSha1
                    && password == b"hunter2".as_slice()
                    && salt == b"NaCl".as_slice()
                    && *iterations == 64_000
                    && *bits == 128
            })
            .times(1)
            .returning(|_, _, _, _, _| Ok(vec![1u8; 16]));

        let key = service(mock).derive_password_key("hunter2", b"NaCl").unwrap();
        assert_eq!(key.size_bits(), 128);
        assert_eq!(key.algorithm(), "PBKDF2WithHmacSHA1");
    }

    #[test]
    fn derive_propagates_provider_rejection() {
        let mut mock = MockKeyProvider::new();
        mock.expect_derive_key().returning(|_, _, _, _, _| {
            Err(ProviderError::InvalidParameter("salt must not be empty"))
        });

        let err = service(mock).derive_password_key("pw", b"").unwrap_err();
        assert!(matches!(err, ServiceError::KeyDerivation(ref m) if m.contains("salt")));
    }

    #[test]
    fn unsupported_algorithm_yields_none() {
        let mut mock = MockKeyProvider::new();
        mock.expect_generate_key()
            .times(1)
            .returning(|_, _, _| Err(ProviderError::NoSuchAlgorithm("Twofish")));

        let key = service(mock)
            .generate_symmetric_key_sized(KeyAlgorithm::Twofish, 128)
            .unwrap();
        assert!(key.is_none());
    }

    #[test]
    fn invalid_key_size_is_an_error() {
        let mut mock = MockKeyProvider::new();
        mock.expect_generate_key().returning(|_, _, _| {
            Err(ProviderError::InvalidKeySize {
                algorithm: "AES",
                key_size_bits: 100,
            })
        });

        let err = service(mock)
            .generate_symmetric_key_sized(KeyAlgorithm::Aes, 100)
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidKeySize { key_size_bits: 100, .. }));
    }

    #[test]
    fn generate_defaults_to_aes_128() {
        let mut mock = MockKeyProvider::new();
        mock.expect_generate_key()
            .times(1)
            .returning(|alg, bits, rng| {
                assert_eq!(alg, KeyAlgorithm::Aes);
                assert_eq!(bits, 128);
                let mut key = vec![0u8; 16];
                rng.fill_bytes(&mut key);
                Ok(key)
            });

        let key = service(mock).generate_symmetric_key().unwrap().unwrap();
        assert_eq!(key.algorithm(), "AES");
        assert_eq!(key.size_bits(), 128);
    }

    #[test]
    fn caller_random_source_is_forwarded() {
        let mut mock = MockKeyProvider::new();
        mock.expect_generate_key().times(2).returning(|_, bits, rng| {
            let mut key = vec![0u8; (bits / 8) as usize];
            rng.fill_bytes(&mut key);
            Ok(key)
        });
        let svc = service(mock);

        let seeded = || StdRng::seed_from_u64(3);
        let a = svc
            .generate_symmetric_key_with(KeyAlgorithm::Aes, 256, Some(&mut seeded()))
            .unwrap()
            .unwrap();
        let b = svc
            .generate_symmetric_key_with(KeyAlgorithm::Aes, 256, Some(&mut seeded()))
            .unwrap()
            .unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn asymmetric_generation_not_implemented() {
        let svc = service(MockKeyProvider::new());
        for alg in AsymmetricKeyAlgorithm::ALL {
            let err = svc.generate_asymmetric_key_pair(*alg, 2048, None).unwrap_err();
            assert!(matches!(
                err,
                ServiceError::NotImplemented(Capability::AsymmetricKeyGeneration)
            ));
        }
        assert!(!svc.capabilities().contains(Capability::AsymmetricKeyGeneration));
        assert!(svc.capabilities().contains(Capability::PasswordKeyDerivation));
    }
}
