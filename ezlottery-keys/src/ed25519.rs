//! Ed25519 handles for license signing and verification.

use std::path::Path;

use ed25519_dalek::pkcs8::{DecodePrivateKey as _, DecodePublicKey as _};
use ed25519_dalek::{
    Signature as DalekSignature, Signer as _, SigningKey as DalekSigningKey,
    VerifyingKey as DalekVerifyingKey,
};

use crate::capability::{MessageSigner, SignatureVerifier};
use crate::error::{KeyError, KeyResult};
use crate::read_pem;

/// Size of an Ed25519 signature in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// Ed25519 signing key (secret). Held by the vendor-side issuer.
pub struct Ed25519SigningKey(DalekSigningKey);

/// Ed25519 verifying key (public). Embedded in or shipped with the application.
#[derive(Clone, PartialEq, Eq)]
pub struct Ed25519VerifyingKey(DalekVerifyingKey);

impl Ed25519SigningKey {
    /// Creates a signing key from a raw 32-byte seed.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self(DalekSigningKey::from_bytes(bytes))
    }

    /// Parses a PKCS#8 `PRIVATE KEY` PEM document.
    pub fn from_pkcs8_pem(pem: &str) -> KeyResult<Self> {
        DalekSigningKey::from_pkcs8_pem(pem)
            .map(Self)
            .map_err(|e| KeyError::InvalidKey(format!("ed25519 private key: {e}")))
    }

    /// Reads and parses a PKCS#8 PEM file.
    pub fn from_pem_file(path: impl AsRef<Path>) -> KeyResult<Self> {
        Self::from_pkcs8_pem(&read_pem(path.as_ref())?)
    }

    /// Returns the corresponding verifying key.
    pub fn verifying_key(&self) -> Ed25519VerifyingKey {
        Ed25519VerifyingKey(self.0.verifying_key())
    }
}

impl MessageSigner for Ed25519SigningKey {
    fn sign(&self, message: &[u8]) -> Vec<u8> {
        self.0.sign(message).to_bytes().to_vec()
    }
}

impl std::fmt::Debug for Ed25519SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519SigningKey")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl Ed25519VerifyingKey {
    /// Creates a verifying key from the raw 32-byte public key.
    pub fn from_bytes(bytes: &[u8; 32]) -> KeyResult<Self> {
        DalekVerifyingKey::from_bytes(bytes)
            .map(Self)
            .map_err(|e| KeyError::InvalidKey(format!("ed25519 public key: {e}")))
    }

    /// Parses an SPKI `PUBLIC KEY` PEM document.
    pub fn from_public_key_pem(pem: &str) -> KeyResult<Self> {
        DalekVerifyingKey::from_public_key_pem(pem)
            .map(Self)
            .map_err(|e| KeyError::InvalidKey(format!("ed25519 public key: {e}")))
    }

    /// Parses a DER-encoded SPKI structure.
    pub fn from_public_key_der(der: &[u8]) -> KeyResult<Self> {
        DalekVerifyingKey::from_public_key_der(der)
            .map(Self)
            .map_err(|e| KeyError::InvalidKey(format!("ed25519 public key: {e}")))
    }

    /// Reads and parses an SPKI PEM file.
    pub fn from_pem_file(path: impl AsRef<Path>) -> KeyResult<Self> {
        Self::from_public_key_pem(&read_pem(path.as_ref())?)
    }

    /// Returns the raw 32-byte public key.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }
}

impl SignatureVerifier for Ed25519VerifyingKey {
    fn verify(&self, message: &[u8], signature: &[u8]) -> KeyResult<()> {
        let signature =
            DalekSignature::from_slice(signature).map_err(|_| KeyError::SignatureMismatch)?;
        self.0
            .verify_strict(message, &signature)
            .map_err(|_| KeyError::SignatureMismatch)
    }
}

impl std::fmt::Debug for Ed25519VerifyingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Ed25519VerifyingKey")
            .field(&self.0.to_bytes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: [u8; 32] = [7u8; 32];

    #[test]
    fn sign_verify_roundtrip() {
        let sk = Ed25519SigningKey::from_bytes(&SEED);
        let sig = sk.sign(b"hello world");
        assert_eq!(sig.len(), SIGNATURE_SIZE);
        assert!(sk.verifying_key().verify(b"hello world", &sig).is_ok());
    }

    #[test]
    fn signing_is_deterministic() {
        let sk = Ed25519SigningKey::from_bytes(&SEED);
        assert_eq!(sk.sign(b"payload"), sk.sign(b"payload"));
    }

    #[test]
    fn wrong_message_fails() {
        let sk = Ed25519SigningKey::from_bytes(&SEED);
        let sig = sk.sign(b"correct");
        assert!(matches!(
            sk.verifying_key().verify(b"wrong", &sig),
            Err(KeyError::SignatureMismatch)
        ));
    }

    #[test]
    fn short_signature_fails() {
        let sk = Ed25519SigningKey::from_bytes(&SEED);
        assert!(sk.verifying_key().verify(b"msg", &[0u8; 10]).is_err());
    }

    #[test]
    fn public_key_bytes_roundtrip() {
        let vk = Ed25519SigningKey::from_bytes(&SEED).verifying_key();
        let restored = Ed25519VerifyingKey::from_bytes(&vk.to_bytes()).unwrap();
        assert_eq!(vk, restored);
    }

    #[test]
    fn debug_redacts_secret() {
        let sk = Ed25519SigningKey::from_bytes(&SEED);
        assert!(format!("{sk:?}").contains("REDACTED"));
    }
}
