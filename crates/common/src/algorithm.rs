//! Algorithm selectors and their provider identifier strings.
//!
//! Each selector serialises as (and parses from) the identifier a provider
//! registry knows it by, e.g. `"PBKDF2WithHmacSHA1"` or `"AES/CBC/PKCS7Padding"`.
//! Parsing is ASCII case-insensitive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An identifier string did not match any known algorithm selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm identifier: {0}")]
pub struct UnknownAlgorithm(pub String);

macro_rules! algorithm_selector {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $id:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $id)] $variant, )+
        }

        impl $name {
            /// Every selector of this kind, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The provider identifier string for this selector.
            pub fn identifier(&self) -> &'static str {
                match self {
                    $( $name::$variant => $id, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.identifier())
            }
        }

        impl FromStr for $name {
            type Err = UnknownAlgorithm;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|a| a.identifier().eq_ignore_ascii_case(s))
                    .ok_or_else(|| UnknownAlgorithm(s.to_owned()))
            }
        }
    };
}

algorithm_selector! {
    /// Password-based key derivation functions.
    pub enum PbkdfAlgorithm {
        Pbkdf2HmacSha1 => "PBKDF2WithHmacSHA1",
        Pbkdf2HmacSha256 => "PBKDF2WithHmacSHA256",
        Pbkdf2HmacSha512 => "PBKDF2WithHmacSHA512",
    }
}

impl Default for PbkdfAlgorithm {
    fn default() -> Self {
        PbkdfAlgorithm::Pbkdf2HmacSha1
    }
}

algorithm_selector! {
    /// Symmetric key algorithms as named in a provider registry.
    ///
    /// Not every name here is implemented by every provider; asking a provider
    /// for a key it cannot generate is reported as an unsupported algorithm.
    pub enum KeyAlgorithm {
        Aes => "AES",
        ChaCha20 => "ChaCha20",
        Des => "DES",
        DesEde => "DESede",
        Blowfish => "Blowfish",
        Twofish => "Twofish",
        Camellia => "Camellia",
    }
}

impl Default for KeyAlgorithm {
    fn default() -> Self {
        KeyAlgorithm::Aes
    }
}

algorithm_selector! {
    /// Asymmetric key-pair algorithms. Names only: no provider generates these.
    pub enum AsymmetricKeyAlgorithm {
        Rsa => "RSA",
        Ec => "EC",
    }
}

algorithm_selector! {
    /// Symmetric cipher/mode/padding combinations.
    pub enum SymmetricEncryptionAlgorithm {
        AesCbcPkcs7 => "AES/CBC/PKCS7Padding",
        AesCtr => "AES/CTR/NoPadding",
        AesGcm => "AES/GCM/NoPadding",
        AesGcmSiv => "AES/GCM-SIV/NoPadding",
        ChaCha20Poly1305 => "ChaCha20-Poly1305",
    }
}

impl SymmetricEncryptionAlgorithm {
    /// The key algorithm whose keys this cipher consumes.
    pub fn key_algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::ChaCha20Poly1305 => KeyAlgorithm::ChaCha20,
            _ => KeyAlgorithm::Aes,
        }
    }

    /// Required IV (or nonce) length in bytes.
    pub fn iv_len(&self) -> usize {
        match self {
            Self::AesCbcPkcs7 | Self::AesCtr => 16,
            Self::AesGcm | Self::AesGcmSiv | Self::ChaCha20Poly1305 => 12,
        }
    }

    /// Whether the mode authenticates its ciphertext.
    pub fn is_aead(&self) -> bool {
        !matches!(self, Self::AesCbcPkcs7 | Self::AesCtr)
    }

    /// Key sizes (in bits) this cipher accepts.
    pub fn key_sizes_bits(&self) -> &'static [u32] {
        match self {
            Self::AesCbcPkcs7 | Self::AesCtr | Self::AesGcm => &[128, 192, 256],
            Self::AesGcmSiv => &[128, 256],
            Self::ChaCha20Poly1305 => &[256],
        }
    }
}

algorithm_selector! {
    /// Asymmetric cipher/padding combinations. Names only.
    pub enum AsymmetricEncryptionAlgorithm {
        RsaOaepSha256 => "RSA/ECB/OAEPWithSHA-256AndMGF1Padding",
        RsaPkcs1 => "RSA/ECB/PKCS1Padding",
    }
}
