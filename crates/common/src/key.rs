//! Key material handed between the key service and the string service.

use std::fmt;

use crate::algorithm::AsymmetricKeyAlgorithm;

/// Symmetric key bytes tagged with the algorithm identifier that produced them.
///
/// The buffer is overwritten with zeroes on drop and never printed by `Debug`.
#[derive(Clone)]
pub struct SecretKey {
    algorithm: String,
    bytes: Box<[u8]>,
}

impl SecretKey {
    pub fn new(algorithm: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            algorithm: algorithm.into(),
            bytes: bytes.into_boxed_slice(),
        }
    }

    /// Identifier of the algorithm or KDF the key came from (e.g. `"AES"`).
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Key length in bits, saturating at `u32::MAX`.
    pub fn size_bits(&self) -> u32 {
        bits_for_len(self.bytes.len())
    }
}

fn bits_for_len(len: usize) -> u32 {
    u32::try_from(len)
        .ok()
        .and_then(|n| n.checked_mul(8))
        .unwrap_or(u32::MAX)
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.bytes.iter_mut().for_each(|b| *b = 0);
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("algorithm", &self.algorithm)
            .field("size_bits", &self.size_bits())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Encoded public half of an asymmetric key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub algorithm: AsymmetricKeyAlgorithm,
    pub encoded: Vec<u8>,
}

/// Encoded private half of an asymmetric key pair.
#[derive(Clone)]
pub struct PrivateKey {
    pub algorithm: AsymmetricKeyAlgorithm,
    pub encoded: Vec<u8>,
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.encoded.iter_mut().for_each(|b| *b = 0);
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("algorithm", &self.algorithm)
            .field("encoded", &"[REDACTED]")
            .finish()
    }
}

/// An asymmetric key pair.
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_key_reports_size_and_algorithm() {
        let key = SecretKey::new("AES", vec![0x42; 16]);
        assert_eq!(key.size_bits(), 128);
        assert_eq!(key.algorithm(), "AES");
        assert_eq!(key.as_bytes(), &[0x42; 16]);
    }

    #[test]
    fn bit_length_saturates_instead_of_wrapping() {
        assert_eq!(bits_for_len(32), 256);
        assert_eq!(bits_for_len((1usize << 29) + 16), u32::MAX);
    }

    #[test]
    fn secret_key_redacted_in_debug() {
        let key = SecretKey::new("AES", vec![0xAB; 16]);
        let dbg = format!("{key:?}");
        assert!(dbg.contains("REDACTED"));
        assert!(!dbg.contains("171"));
    }

    #[test]
    fn private_key_redacted_in_debug() {
        let key = PrivateKey {
            algorithm: AsymmetricKeyAlgorithm::Rsa,
            encoded: vec![1, 2, 3],
        };
        assert!(format!("{key:?}").contains("REDACTED"));
    }
}
