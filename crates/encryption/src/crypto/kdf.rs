//! PBKDF2 key derivation over HMAC-SHA1/SHA-256/SHA-512.

use common::PbkdfAlgorithm;
use hmac::Hmac;
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use super::ProviderError;

/// Upper bound on derived key length, in bits.
pub const MAX_DERIVED_KEY_BITS: u32 = 4096;

/// Derive `key_size_bits` of key material with PBKDF2.
///
/// # Errors
///
/// Returns [`ProviderError::InvalidParameter`] for an empty salt or zero
/// iterations, and [`ProviderError::InvalidKeySize`] when the key size is zero,
/// not a whole number of bytes, or above [`MAX_DERIVED_KEY_BITS`].
pub fn derive(
    algorithm: PbkdfAlgorithm,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    key_size_bits: u32,
) -> Result<Vec<u8>, ProviderError> {
    if salt.is_empty() {
        return Err(ProviderError::InvalidParameter("salt must not be empty"));
    }
    if iterations == 0 {
        return Err(ProviderError::InvalidParameter("iteration count must be positive"));
    }
    if key_size_bits == 0 || key_size_bits % 8 != 0 || key_size_bits > MAX_DERIVED_KEY_BITS {
        return Err(ProviderError::InvalidKeySize {
            algorithm: algorithm.identifier(),
            key_size_bits,
        });
    }

    let mut out = vec![0u8; (key_size_bits / 8) as usize];
    let result = match algorithm {
        PbkdfAlgorithm::Pbkdf2HmacSha1 => {
            pbkdf2::pbkdf2::<Hmac<Sha1>>(password, salt, iterations, &mut out)
        }
        PbkdfAlgorithm::Pbkdf2HmacSha256 => {
            pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, iterations, &mut out)
        }
        PbkdfAlgorithm::Pbkdf2HmacSha512 => {
            pbkdf2::pbkdf2::<Hmac<Sha512>>(password, salt, iterations, &mut out)
        }
    };
    result.map_err(|_| ProviderError::InvalidParameter("HMAC rejected the password"))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 6070, PBKDF2-HMAC-SHA1, P = "password", S = "salt", dkLen = 20.
    const RFC6070_C1: [u8; 20] = [
        0x0c, 0x60, 0xc8, 0x0f, 0x96, 0x1f, 0x0e, 0x71, 0xf3, 0xa9, 0xb5, 0x24, 0xaf, 0x60, 0x12,
        0x06, 0x2f, 0xe0, 0x37, 0xa6,
    ];
    const RFC6070_C2: [u8; 20] = [
        0xea, 0x6c, 0x01, 0x4d, 0xc7, 0x2d, 0x6f, 0x8c, 0xcd, 0x1e, 0xd9, 0x2a, 0xce, 0x1d, 0x41,
        0xf0, 0xd8, 0xde, 0x89, 0x57,
    ];

    #[test]
    fn rfc6070_vectors() {
        let dk = derive(PbkdfAlgorithm::Pbkdf2HmacSha1, b"password", b"salt", 1, 160).unwrap();
        assert_eq!(dk, RFC6070_C1);
        let dk = derive(PbkdfAlgorithm::Pbkdf2HmacSha1, b"password", b"salt", 2, 160).unwrap();
        assert_eq!(dk, RFC6070_C2);
    }

    #[test]
    fn output_length_follows_key_size() {
        for bits in [128, 192, 256, 512] {
            let dk = derive(PbkdfAlgorithm::Pbkdf2HmacSha256, b"pw", b"salt", 10, bits).unwrap();
            assert_eq!(dk.len() * 8, bits as usize);
        }
    }

    #[test]
    fn prf_choice_changes_output() {
        let a = derive(PbkdfAlgorithm::Pbkdf2HmacSha1, b"pw", b"salt", 10, 128).unwrap();
        let b = derive(PbkdfAlgorithm::Pbkdf2HmacSha512, b"pw", b"salt", 10, 128).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_empty_salt() {
        let err = derive(PbkdfAlgorithm::Pbkdf2HmacSha1, b"pw", b"", 10, 128).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidParameter(_)));
    }

    #[test]
    fn rejects_zero_iterations() {
        let err = derive(PbkdfAlgorithm::Pbkdf2HmacSha1, b"pw", b"salt", 0, 128).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidParameter(_)));
    }

    #[test]
    fn rejects_bad_key_sizes() {
        for bits in [0, 100, MAX_DERIVED_KEY_BITS + 8] {
            let err = derive(PbkdfAlgorithm::Pbkdf2HmacSha1, b"pw", b"salt", 1, bits).unwrap_err();
            assert!(matches!(err, ProviderError::InvalidKeySize { .. }));
        }
    }
}
