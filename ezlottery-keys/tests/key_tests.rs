mod common;

use common::{fixture, fixture_pem};
use ezlottery_keys::{
    Ed25519SigningKey, Ed25519VerifyingKey, KeyError, KeyUnwrapper, KeyWrapper, MessageSigner,
    RsaUnwrappingKey, RsaWrappingKey, SignatureVerifier,
};

// ── Ed25519 ──────────────────────────────────────────────────────

#[test]
fn ed25519_pem_pair_matches() {
    let sk = Ed25519SigningKey::from_pem_file(fixture("ed25519-priv.pem")).unwrap();
    let vk = Ed25519VerifyingKey::from_pem_file(fixture("ed25519-pub.pem")).unwrap();
    assert_eq!(sk.verifying_key(), vk);

    let sig = sk.sign(b"license payload");
    assert!(vk.verify(b"license payload", &sig).is_ok());
}

#[test]
fn ed25519_public_key_from_spki_der() {
    let vk = Ed25519VerifyingKey::from_pem_file(fixture("ed25519-pub.pem")).unwrap();
    // Ed25519 SPKI is a fixed 12-byte prefix followed by the raw key.
    let mut der = vec![
        0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00,
    ];
    der.extend_from_slice(&vk.to_bytes());
    let parsed = Ed25519VerifyingKey::from_public_key_der(&der).unwrap();
    assert_eq!(parsed, vk);
}

#[test]
fn ed25519_rejects_rsa_pem() {
    let result = Ed25519SigningKey::from_pkcs8_pem(&fixture_pem("rsa-priv.pem"));
    assert!(matches!(result, Err(KeyError::InvalidKey(_))));
}

#[test]
fn ed25519_rejects_garbage_pem() {
    let result = Ed25519VerifyingKey::from_public_key_pem("not a pem");
    assert!(matches!(result, Err(KeyError::InvalidKey(_))));
}

#[test]
fn missing_key_file_reports_path() {
    let err = Ed25519SigningKey::from_pem_file("/nonexistent/ed25519-priv.pem").unwrap_err();
    assert!(matches!(err, KeyError::Read { .. }));
    assert!(format!("{err}").contains("ed25519-priv.pem"));
}

// ── RSA-OAEP ─────────────────────────────────────────────────────

#[test]
fn rsa_wrap_unwrap_roundtrip() {
    let public = RsaWrappingKey::from_pem_file(fixture("rsa-pub.pem")).unwrap();
    let private = RsaUnwrappingKey::from_pem_file(fixture("rsa-priv.pem")).unwrap();

    let secret = [0x42u8; 32];
    let wrapped = public.wrap(&secret).unwrap();
    assert_eq!(wrapped.len(), public.modulus_len());

    let unwrapped = private.unwrap_key(&wrapped).unwrap();
    assert_eq!(unwrapped.as_slice(), &secret);
}

#[test]
fn rsa_unwrap_is_repeatable() {
    let public = RsaWrappingKey::from_pem_file(fixture("rsa-pub.pem")).unwrap();
    let private = RsaUnwrappingKey::from_pem_file(fixture("rsa-priv.pem")).unwrap();
    let wrapped = public.wrap(&[5u8; 32]).unwrap();

    // Each unwrap draws fresh blinding; the recovered secret must not vary.
    for _ in 0..3 {
        assert_eq!(private.unwrap_key(&wrapped).unwrap().as_slice(), &[5u8; 32]);
    }
}

#[test]
fn rsa_wrap_is_randomized() {
    let public = RsaWrappingKey::from_pem_file(fixture("rsa-pub.pem")).unwrap();
    let a = public.wrap(&[1u8; 32]).unwrap();
    let b = public.wrap(&[1u8; 32]).unwrap();
    assert_ne!(a, b);
}

#[test]
fn rsa_pkcs1_private_key_accepted() {
    let pkcs8 = RsaUnwrappingKey::from_pem_file(fixture("rsa-priv.pem")).unwrap();
    let pkcs1 = RsaUnwrappingKey::from_pem_file(fixture("rsa-priv-pkcs1.pem")).unwrap();
    assert_eq!(pkcs8.wrapping_key(), pkcs1.wrapping_key());
}

#[test]
fn rsa_public_half_matches_fixture() {
    let public = RsaWrappingKey::from_pem_file(fixture("rsa-pub.pem")).unwrap();
    let private = RsaUnwrappingKey::from_pem_file(fixture("rsa-priv.pem")).unwrap();
    assert_eq!(private.wrapping_key(), public);
}

#[test]
fn rsa_wrong_private_key_fails_unwrap() {
    let public = RsaWrappingKey::from_pem_file(fixture("rsa-pub.pem")).unwrap();
    let other = RsaUnwrappingKey::from_pem_file(fixture("rsa-other-priv.pem")).unwrap();
    let wrapped = public.wrap(&[9u8; 32]).unwrap();
    assert!(matches!(
        other.unwrap_key(&wrapped),
        Err(KeyError::UnwrapFailed)
    ));
}

#[test]
fn rsa_tampered_wrapped_key_fails_unwrap() {
    let public = RsaWrappingKey::from_pem_file(fixture("rsa-pub.pem")).unwrap();
    let private = RsaUnwrappingKey::from_pem_file(fixture("rsa-priv.pem")).unwrap();
    let mut wrapped = public.wrap(&[9u8; 32]).unwrap();
    wrapped[10] ^= 0x01;
    assert!(matches!(
        private.unwrap_key(&wrapped),
        Err(KeyError::UnwrapFailed)
    ));
}

#[test]
fn rsa_private_debug_is_redacted() {
    let private = RsaUnwrappingKey::from_pem_file(fixture("rsa-priv.pem")).unwrap();
    let shown = format!("{private:?}");
    assert!(shown.contains("REDACTED"));
    assert!(shown.contains("2048"));
}

#[test]
fn unwrap_error_has_no_detail() {
    assert_eq!(format!("{}", KeyError::UnwrapFailed), "key unwrap failed");
}
