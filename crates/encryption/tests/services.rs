//! End-to-end flows through the factory, key service and string service.

use encryption_service::{
    AsymmetricKeyAlgorithm, Capability, EncryptionServiceFactory, KeyAlgorithm, PbkdfAlgorithm,
    PbkdfParams, RustCryptoServiceFactory, ServiceError, SymmetricEncryptionAlgorithm,
};

fn factory() -> RustCryptoServiceFactory {
    RustCryptoServiceFactory::default()
}

#[test]
fn password_key_encrypts_and_decrypts() {
    let factory = factory();
    let params = PbkdfParams {
        algorithm: PbkdfAlgorithm::Pbkdf2HmacSha256,
        key_size_bits: 256,
        iterations: 1_000,
    };
    let key = factory
        .key_service()
        .derive_password_key_with("correct horse battery staple", b"per-user-salt", params)
        .unwrap();
    assert_eq!(key.size_bits(), 256);

    let strings = factory.string_service();
    let alg = SymmetricEncryptionAlgorithm::AesGcm;
    let ct = strings.encrypt_symmetric("account #42", &key, alg, None, None).unwrap();
    assert_eq!(strings.decrypt_symmetric(&ct, &key, alg, None, None).unwrap(), "account #42");
}

#[test]
fn default_derivation_is_deterministic_and_128_bits() {
    let keys = factory().key_service();
    let a = keys.derive_password_key("pw", b"salt").unwrap();
    let b = keys.derive_password_key("pw", b"salt").unwrap();
    assert_eq!(a.as_bytes(), b.as_bytes());
    assert_eq!(a.size_bits(), 128);
    assert_eq!(a.algorithm(), "PBKDF2WithHmacSHA1");

    let c = keys.derive_password_key("pw", b"pepper").unwrap();
    assert_ne!(a.as_bytes(), c.as_bytes());
}

#[test]
fn derivation_rejects_empty_salt_and_zero_iterations() {
    let keys = factory().key_service();
    let err = keys.derive_password_key("pw", b"").unwrap_err();
    assert!(matches!(err, ServiceError::KeyDerivation(_)));

    let params = PbkdfParams {
        iterations: 0,
        ..PbkdfParams::default()
    };
    let err = keys.derive_password_key_with("pw", b"salt", params).unwrap_err();
    assert_eq!(err.code(), "key_derivation_error");
}

#[test]
fn generated_key_round_trips_every_algorithm() {
    let factory = factory();
    let keys = factory.key_service();
    let strings = factory.string_service();

    for alg in SymmetricEncryptionAlgorithm::ALL {
        let bits = *alg.key_sizes_bits().last().unwrap();
        let key = keys
            .generate_symmetric_key_sized(alg.key_algorithm(), bits)
            .unwrap()
            .expect("bundled provider implements AES and ChaCha20");
        let iv = strings.generate_iv(*alg, None);
        let ct = strings.encrypt_symmetric("hello world", &key, *alg, Some(&iv), None).unwrap();
        let pt = strings.decrypt_symmetric(&ct, &key, *alg, Some(&iv), None).unwrap();
        assert_eq!(pt, "hello world", "{alg}");
    }
}

#[test]
fn unimplemented_key_algorithm_yields_none() {
    let keys = factory().key_service();
    for alg in [KeyAlgorithm::Des, KeyAlgorithm::Blowfish, KeyAlgorithm::Camellia] {
        assert!(keys.generate_symmetric_key_sized(alg, 128).unwrap().is_none());
    }
}

#[test]
fn asymmetric_capability_gaps() {
    let factory = factory();
    let keys = factory.key_service();
    assert!(!keys.capabilities().contains(Capability::AsymmetricKeyGeneration));
    let err = keys
        .generate_asymmetric_key_pair(AsymmetricKeyAlgorithm::Ec, 256, None)
        .unwrap_err();
    assert_eq!(err.code(), "not_implemented");

    let strings = factory.string_service();
    assert!(!strings.capabilities().contains(Capability::AsymmetricEncryption));
}

#[test]
fn garbage_ciphertext_is_never_returned_as_text() {
    let factory = factory();
    let key = factory.key_service().generate_symmetric_key().unwrap().unwrap();
    let strings = factory.string_service();
    let alg = SymmetricEncryptionAlgorithm::AesCbcPkcs7;
    let iv = [0u8; 16];

    let err = strings
        .decrypt_symmetric("%%%", &key, alg, Some(&iv), None)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Decoding(_)));

    // Valid Base64, but 3 bytes is not a whole AES block.
    let err = strings
        .decrypt_symmetric("AAAA", &key, alg, Some(&iv), None)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Cipher(_)));
}

#[test]
fn services_are_shareable_across_threads() {
    let factory = factory();
    let keys = factory.key_service();
    let strings = factory.string_service();
    let alg = SymmetricEncryptionAlgorithm::ChaCha20Poly1305;

    std::thread::scope(|s| {
        for i in 0..8 {
            let keys = &keys;
            let strings = &strings;
            s.spawn(move || {
                let key = keys
                    .generate_symmetric_key_sized(KeyAlgorithm::ChaCha20, 256)
                    .unwrap()
                    .unwrap();
                let msg = format!("message {i}");
                let ct = strings.encrypt_symmetric(&msg, &key, alg, None, None).unwrap();
                assert_eq!(strings.decrypt_symmetric(&ct, &key, alg, None, None).unwrap(), msg);
            });
        }
    });
}
