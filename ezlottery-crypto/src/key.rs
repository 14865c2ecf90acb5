//! Per-container data keys.

use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of data keys in bytes (256 bits for AES-256-GCM).
pub const KEY_SIZE: usize = 32;

/// A single-use data key, zeroized on drop.
///
/// Not `Clone`: each key seals exactly one container and is dropped when
/// the encrypt call returns.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct DataKey {
    bytes: [u8; KEY_SIZE],
}

impl DataKey {
    /// Generates a fresh random key from the OS RNG.
    pub(crate) fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Rebuilds a key recovered from a wrapped secret. `None` unless the
    /// secret is exactly [`KEY_SIZE`] bytes.
    pub(crate) fn from_slice(secret: &[u8]) -> Option<Self> {
        let bytes: [u8; KEY_SIZE] = secret.try_into().ok()?;
        Some(Self { bytes })
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for DataKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
