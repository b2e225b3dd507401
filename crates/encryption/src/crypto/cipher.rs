//! Single-shot symmetric encryption and decryption.
//!
//! **Modes:**
//! - `AES/CBC/PKCS7Padding` and `AES/CTR/NoPadding` take a caller-supplied
//!   16-byte IV. Neither authenticates its output.
//! - `AES/GCM/NoPadding`, `AES/GCM-SIV/NoPadding` and `ChaCha20-Poly1305` take
//!   an optional 12-byte nonce. Without one, a fresh nonce is drawn from the
//!   random source and prepended to the ciphertext.
//!
//! **Never reuse a GCM or ChaCha20-Poly1305 nonce under the same key.** Pass
//! an explicit nonce only when the caller guarantees its uniqueness.

use aes::{Aes128, Aes192, Aes256};
use aes_gcm::aead::{consts::U12, Aead, KeyInit, Nonce};
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm};
use aes_gcm_siv::{Aes128GcmSiv, Aes256GcmSiv};
use cbc::cipher::{
    block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit, StreamCipher,
};
use chacha20poly1305::ChaCha20Poly1305;
use common::SymmetricEncryptionAlgorithm as Alg;
use rand_core::RngCore;

use super::ProviderError;

type Aes192Gcm = AesGcm<Aes192, U12>;
type Aes128Ctr = ctr::Ctr128BE<Aes128>;
type Aes192Ctr = ctr::Ctr128BE<Aes192>;
type Aes256Ctr = ctr::Ctr128BE<Aes256>;

/// Encrypt `plaintext` under `key`.
///
/// # Errors
///
/// Returns [`ProviderError::InvalidKeySize`] if the key length does not suit
/// `algorithm`, [`ProviderError::MissingIv`] / [`ProviderError::InvalidIv`]
/// for IV problems, and [`ProviderError::AeadFailure`] on an internal AEAD
/// error.
pub fn encrypt(
    algorithm: Alg,
    key: &[u8],
    iv: Option<&[u8]>,
    plaintext: &[u8],
    rng: &mut dyn RngCore,
) -> Result<Vec<u8>, ProviderError> {
    check_key(algorithm, key)?;

    if !algorithm.is_aead() {
        let iv = required_iv(algorithm, iv)?;
        return Ok(match algorithm {
            Alg::AesCbcPkcs7 => cbc_encrypt(key, iv, plaintext),
            _ => ctr_apply(key, iv, plaintext),
        });
    }

    match iv {
        Some(nonce) => {
            check_iv(algorithm, nonce)?;
            seal(algorithm, key, nonce, plaintext)
        }
        None => {
            let mut nonce = vec![0u8; algorithm.iv_len()];
            rng.fill_bytes(&mut nonce);
            let sealed = seal(algorithm, key, &nonce, plaintext)?;
            nonce.extend_from_slice(&sealed);
            Ok(nonce)
        }
    }
}

/// Decrypt `ciphertext` under `key`.
///
/// # Errors
///
/// Key and IV problems as for [`encrypt`]; [`ProviderError::BadPadding`] if CBC
/// padding does not verify, [`ProviderError::AeadFailure`] if authentication
/// fails, and [`ProviderError::Truncated`] if a prepended nonce is missing.
pub fn decrypt(
    algorithm: Alg,
    key: &[u8],
    iv: Option<&[u8]>,
    ciphertext: &[u8],
) -> Result<Vec<u8>, ProviderError> {
    check_key(algorithm, key)?;

    if !algorithm.is_aead() {
        let iv = required_iv(algorithm, iv)?;
        return match algorithm {
            Alg::AesCbcPkcs7 => cbc_decrypt(key, iv, ciphertext),
            _ => Ok(ctr_apply(key, iv, ciphertext)),
        };
    }

    match iv {
        Some(nonce) => {
            check_iv(algorithm, nonce)?;
            open(algorithm, key, nonce, ciphertext)
        }
        None => {
            if ciphertext.len() < algorithm.iv_len() {
                return Err(ProviderError::Truncated);
            }
            let (nonce, body) = ciphertext.split_at(algorithm.iv_len());
            open(algorithm, key, nonce, body)
        }
    }
}

fn check_key(algorithm: Alg, key: &[u8]) -> Result<(), ProviderError> {
    let len_matches = algorithm
        .key_sizes_bits()
        .iter()
        .any(|&bits| (bits / 8) as usize == key.len());
    if len_matches {
        Ok(())
    } else {
        Err(ProviderError::InvalidKeySize {
            algorithm: algorithm.identifier(),
            key_size_bits: key_bits(key.len()),
        })
    }
}

/// Bit length of a `len`-byte key, saturating at `u32::MAX`.
fn key_bits(len: usize) -> u32 {
    u32::try_from(len)
        .ok()
        .and_then(|n| n.checked_mul(8))
        .unwrap_or(u32::MAX)
}

fn check_iv(algorithm: Alg, iv: &[u8]) -> Result<(), ProviderError> {
    if iv.len() != algorithm.iv_len() {
        return Err(ProviderError::InvalidIv {
            algorithm: algorithm.identifier(),
            expected: algorithm.iv_len(),
            actual: iv.len(),
        });
    }
    Ok(())
}

fn required_iv(algorithm: Alg, iv: Option<&[u8]>) -> Result<&[u8], ProviderError> {
    let iv = iv.ok_or(ProviderError::MissingIv(algorithm.identifier()))?;
    check_iv(algorithm, iv)?;
    Ok(iv)
}

// Key and IV lengths are validated by `encrypt`/`decrypt`, so the slice to
// array conversions below cannot panic.

fn cbc_encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Vec<u8> {
    match key.len() {
        16 => cbc::Encryptor::<Aes128>::new(key.into(), iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        24 => cbc::Encryptor::<Aes192>::new(key.into(), iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        _ => cbc::Encryptor::<Aes256>::new(key.into(), iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
    }
}

fn cbc_decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, ProviderError> {
    let result = match key.len() {
        16 => cbc::Decryptor::<Aes128>::new(key.into(), iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        24 => cbc::Decryptor::<Aes192>::new(key.into(), iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        _ => cbc::Decryptor::<Aes256>::new(key.into(), iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
    };
    result.map_err(|_| ProviderError::BadPadding)
}

fn ctr_apply(key: &[u8], iv: &[u8], input: &[u8]) -> Vec<u8> {
    let mut buf = input.to_vec();
    match key.len() {
        16 => Aes128Ctr::new(key.into(), iv.into()).apply_keystream(&mut buf),
        24 => Aes192Ctr::new(key.into(), iv.into()).apply_keystream(&mut buf),
        _ => Aes256Ctr::new(key.into(), iv.into()).apply_keystream(&mut buf),
    }
    buf
}

fn seal(
    algorithm: Alg,
    key: &[u8],
    nonce: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>, ProviderError> {
    match (algorithm, key.len()) {
        (Alg::AesGcm, 16) => aead_encrypt::<Aes128Gcm>(key, nonce, plaintext),
        (Alg::AesGcm, 24) => aead_encrypt::<Aes192Gcm>(key, nonce, plaintext),
        (Alg::AesGcm, _) => aead_encrypt::<Aes256Gcm>(key, nonce, plaintext),
        (Alg::AesGcmSiv, 16) => aead_encrypt::<Aes128GcmSiv>(key, nonce, plaintext),
        (Alg::AesGcmSiv, _) => aead_encrypt::<Aes256GcmSiv>(key, nonce, plaintext),
        _ => aead_encrypt::<ChaCha20Poly1305>(key, nonce, plaintext),
    }
}

fn open(
    algorithm: Alg,
    key: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, ProviderError> {
    match (algorithm, key.len()) {
        (Alg::AesGcm, 16) => aead_decrypt::<Aes128Gcm>(key, nonce, ciphertext),
        (Alg::AesGcm, 24) => aead_decrypt::<Aes192Gcm>(key, nonce, ciphertext),
        (Alg::AesGcm, _) => aead_decrypt::<Aes256Gcm>(key, nonce, ciphertext),
        (Alg::AesGcmSiv, 16) => aead_decrypt::<Aes128GcmSiv>(key, nonce, ciphertext),
        (Alg::AesGcmSiv, _) => aead_decrypt::<Aes256GcmSiv>(key, nonce, ciphertext),
        _ => aead_decrypt::<ChaCha20Poly1305>(key, nonce, ciphertext),
    }
}

fn aead_encrypt<C: Aead + KeyInit>(
    key: &[u8],
    nonce: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>, ProviderError> {
    let cipher = C::new_from_slice(key).map_err(|_| ProviderError::AeadFailure)?;
    cipher
        .encrypt(Nonce::<C>::from_slice(nonce), plaintext)
        .map_err(|_| ProviderError::AeadFailure)
}

fn aead_decrypt<C: Aead + KeyInit>(
    key: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, ProviderError> {
    let cipher = C::new_from_slice(key).map_err(|_| ProviderError::AeadFailure)?;
    cipher
        .decrypt(Nonce::<C>::from_slice(nonce), ciphertext)
        .map_err(|_| ProviderError::AeadFailure)
}
