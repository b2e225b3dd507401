//! Random symmetric key generation.

use common::KeyAlgorithm;
use rand_core::RngCore;

use super::ProviderError;

/// Key sizes (in bits) the provider can generate for `algorithm`, or `None`
/// if it does not implement the algorithm at all.
pub fn supported_key_sizes(algorithm: KeyAlgorithm) -> Option<&'static [u32]> {
    match algorithm {
        KeyAlgorithm::Aes => Some(&[128, 192, 256]),
        KeyAlgorithm::ChaCha20 => Some(&[256]),
        KeyAlgorithm::Des
        | KeyAlgorithm::DesEde
        | KeyAlgorithm::Blowfish
        | KeyAlgorithm::Twofish
        | KeyAlgorithm::Camellia => None,
    }
}

/// Fill a fresh key of `key_size_bits` from `rng`.
///
/// # Errors
///
/// Returns [`ProviderError::NoSuchAlgorithm`] for algorithms this provider
/// does not implement and [`ProviderError::InvalidKeySize`] for sizes the
/// algorithm does not accept.
pub fn generate(
    algorithm: KeyAlgorithm,
    key_size_bits: u32,
    rng: &mut dyn RngCore,
) -> Result<Vec<u8>, ProviderError> {
    let sizes = supported_key_sizes(algorithm)
        .ok_or(ProviderError::NoSuchAlgorithm(algorithm.identifier()))?;
    if !sizes.contains(&key_size_bits) {
        return Err(ProviderError::InvalidKeySize {
            algorithm: algorithm.identifier(),
            key_size_bits,
        });
    }
    let mut key = vec![0u8; (key_size_bits / 8) as usize];
    rng.fill_bytes(&mut key);
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use rand_core::OsRng;

    #[test]
    fn generates_requested_size() {
        for bits in [128, 192, 256] {
            let key = generate(KeyAlgorithm::Aes, bits, &mut OsRng).unwrap();
            assert_eq!(key.len() * 8, bits as usize);
        }
        assert_eq!(generate(KeyAlgorithm::ChaCha20, 256, &mut OsRng).unwrap().len(), 32);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let a = generate(KeyAlgorithm::Aes, 128, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = generate(KeyAlgorithm::Aes, 128, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unimplemented_algorithm() {
        let err = generate(KeyAlgorithm::Blowfish, 128, &mut OsRng).unwrap_err();
        assert!(matches!(err, ProviderError::NoSuchAlgorithm("Blowfish")));
    }

    #[test]
    fn rejects_size_outside_algorithm() {
        let err = generate(KeyAlgorithm::Aes, 100, &mut OsRng).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidKeySize { key_size_bits: 100, .. }));
        assert!(generate(KeyAlgorithm::ChaCha20, 128, &mut OsRng).is_err());
    }
}
