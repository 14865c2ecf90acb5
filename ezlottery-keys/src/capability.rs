//! Capability traits the codecs depend on.
//!
//! The license and container codecs never touch a concrete key type. They
//! take `&dyn` (or generic) references to these traits, so where the key
//! lives (PEM file, embedded constant, hardware token) is the caller's
//! business. Implementations own the key material.

use crate::error::KeyResult;
use zeroize::Zeroizing;

/// Produces detached signatures.
///
/// Implementations must be deterministic: the same message and key always
/// yield the same signature bytes.
pub trait MessageSigner: Send + Sync {
    /// Signs `message` and returns the raw signature bytes.
    fn sign(&self, message: &[u8]) -> Vec<u8>;
}

/// Checks detached signatures.
pub trait SignatureVerifier: Send + Sync {
    /// Verifies `signature` over `message`.
    fn verify(&self, message: &[u8], signature: &[u8]) -> KeyResult<()>;
}

/// Encrypts a short secret (a symmetric key) for a recipient.
pub trait KeyWrapper: Send + Sync {
    /// Wraps `secret`, returning the recipient-encrypted bytes.
    fn wrap(&self, secret: &[u8]) -> KeyResult<Vec<u8>>;
}

/// Recovers a secret produced by the matching [`KeyWrapper`].
pub trait KeyUnwrapper: Send + Sync {
    /// Unwraps `wrapped`. Every failure collapses to
    /// [`KeyError::UnwrapFailed`](crate::KeyError::UnwrapFailed).
    fn unwrap_key(&self, wrapped: &[u8]) -> KeyResult<Zeroizing<Vec<u8>>>;
}
