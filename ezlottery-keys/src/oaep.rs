//! RSA-OAEP (SHA-256) handles for wrapping per-file symmetric keys.
//!
//! Both the OAEP label hash and MGF1 use SHA-256, which is what the data-file
//! tooling has always produced.

use std::path::Path;

use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey as _, DecodeRsaPublicKey as _};
use rsa::pkcs8::{DecodePrivateKey as _, DecodePublicKey as _};
use rsa::traits::PublicKeyParts as _;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::capability::{KeyUnwrapper, KeyWrapper};
use crate::error::{KeyError, KeyResult};
use crate::read_pem;

/// RSA public key used by the data owner to wrap container keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaWrappingKey(RsaPublicKey);

/// RSA private key used by the application to unwrap container keys.
#[derive(Clone)]
pub struct RsaUnwrappingKey(RsaPrivateKey);

impl RsaWrappingKey {
    /// Parses a public key PEM. Accepts SPKI (`PUBLIC KEY`) and PKCS#1
    /// (`RSA PUBLIC KEY`) documents.
    pub fn from_public_key_pem(pem: &str) -> KeyResult<Self> {
        RsaPublicKey::from_public_key_pem(pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
            .map(Self)
            .map_err(|e| KeyError::InvalidKey(format!("rsa public key: {e}")))
    }

    /// Reads and parses a public key PEM file.
    pub fn from_pem_file(path: impl AsRef<Path>) -> KeyResult<Self> {
        Self::from_public_key_pem(&read_pem(path.as_ref())?)
    }

    /// Size of the modulus in bytes; also the length of every wrapped key.
    pub fn modulus_len(&self) -> usize {
        self.0.size()
    }
}

impl KeyWrapper for RsaWrappingKey {
    fn wrap(&self, secret: &[u8]) -> KeyResult<Vec<u8>> {
        self.0
            .encrypt(&mut OsRng, Oaep::new::<Sha256>(), secret)
            .map_err(|e| KeyError::WrapFailed(e.to_string()))
    }
}

impl RsaUnwrappingKey {
    /// Parses a private key PEM. Accepts PKCS#8 (`PRIVATE KEY`) and PKCS#1
    /// (`RSA PRIVATE KEY`) documents.
    pub fn from_private_key_pem(pem: &str) -> KeyResult<Self> {
        RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map(Self)
            .map_err(|e| KeyError::InvalidKey(format!("rsa private key: {e}")))
    }

    /// Reads and parses a private key PEM file.
    pub fn from_pem_file(path: impl AsRef<Path>) -> KeyResult<Self> {
        let pem = Zeroizing::new(read_pem(path.as_ref())?);
        Self::from_private_key_pem(&pem)
    }

    /// Returns the matching public half.
    pub fn wrapping_key(&self) -> RsaWrappingKey {
        RsaWrappingKey(self.0.to_public_key())
    }
}

impl KeyUnwrapper for RsaUnwrappingKey {
    fn unwrap_key(&self, wrapped: &[u8]) -> KeyResult<Zeroizing<Vec<u8>>> {
        self.0
            .decrypt_blinded(&mut OsRng, Oaep::new::<Sha256>(), wrapped)
            .map(Zeroizing::new)
            .map_err(|_| KeyError::UnwrapFailed)
    }
}

impl std::fmt::Debug for RsaUnwrappingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaUnwrappingKey")
            .field("modulus_bits", &(self.0.size() * 8))
            .field("private", &"[REDACTED]")
            .finish()
    }
}
