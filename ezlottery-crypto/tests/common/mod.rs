//! Shared RSA fixtures for container tests.

#![allow(dead_code)]

use std::path::PathBuf;

use ezlottery_keys::{RsaUnwrappingKey, RsaWrappingKey};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("testdata")
        .join(name)
}

/// The recipient key pair (2048-bit).
pub fn recipient() -> (RsaWrappingKey, RsaUnwrappingKey) {
    let public = RsaWrappingKey::from_pem_file(fixture("rsa-pub.pem")).expect("public fixture");
    let private =
        RsaUnwrappingKey::from_pem_file(fixture("rsa-priv.pem")).expect("private fixture");
    (public, private)
}

/// A private key that does not belong to [`recipient`].
pub fn stranger() -> RsaUnwrappingKey {
    RsaUnwrappingKey::from_pem_file(fixture("rsa-other-priv.pem")).expect("other fixture")
}

/// Wrapped key length for the 2048-bit fixtures.
pub const WRAPPED_LEN: usize = 256;
