//! Shared test helpers for license tests.

#![allow(dead_code)]

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::NaiveDate;
use ezlottery_keys::{Ed25519SigningKey, Ed25519VerifyingKey, MessageSigner};

/// Returns a deterministic Ed25519 key pair from a fixed seed.
pub fn test_keypair() -> (Ed25519SigningKey, Ed25519VerifyingKey) {
    let seed: [u8; 32] = [
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24,
        25, 26, 27, 28, 29, 30, 31, 32,
    ];
    let signing_key = Ed25519SigningKey::from_bytes(&seed);
    let verifying_key = signing_key.verifying_key();
    (signing_key, verifying_key)
}

/// A second, unrelated key pair.
pub fn other_keypair() -> (Ed25519SigningKey, Ed25519VerifyingKey) {
    let signing_key = Ed25519SigningKey::from_bytes(&[0xAB; 32]);
    let verifying_key = signing_key.verifying_key();
    (signing_key, verifying_key)
}

/// Signs arbitrary payload bytes into token form, bypassing the encoder.
pub fn sign_raw(signing_key: &Ed25519SigningKey, payload: &[u8]) -> String {
    let signature = signing_key.sign(payload);
    format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(payload),
        URL_SAFE_NO_PAD.encode(signature)
    )
}

/// Fixed "today" for policy tests.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
}
