//! AES-256-GCM with a detached tag.
//!
//! The container stores the tag in its own field ahead of the ciphertext,
//! so the in-place detached API is used instead of the tag-appending one.

use aes_gcm::{
    Aes256Gcm, Nonce, Tag,
    aead::{AeadInPlace, KeyInit},
};
use rand::RngCore;

use crate::error::{ContainerError, ContainerResult};
use crate::key::DataKey;

/// Size of the IV in bytes (96 bits, the GCM standard).
pub const IV_SIZE: usize = 12;

/// Size of the authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Output of [`seal`]. Ciphertext has exactly the plaintext's length.
pub(crate) struct Sealed {
    pub iv: [u8; IV_SIZE],
    pub tag: [u8; TAG_SIZE],
    pub ciphertext: Vec<u8>,
}

/// Encrypts under `key` with a fresh random IV. No associated data.
pub(crate) fn seal(key: &DataKey, plaintext: &[u8]) -> ContainerResult<Sealed> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    let mut iv = [0u8; IV_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut iv);

    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(&iv), b"", &mut buffer)
        .map_err(|e| ContainerError::Encryption(e.to_string()))?;

    let mut tag_bytes = [0u8; TAG_SIZE];
    tag_bytes.copy_from_slice(&tag);

    Ok(Sealed {
        iv,
        tag: tag_bytes,
        ciphertext: buffer,
    })
}

/// Verifies the tag and decrypts. The tag is checked before any plaintext
/// is produced; on failure nothing is returned.
pub(crate) fn open(
    key: &DataKey,
    iv: &[u8; IV_SIZE],
    tag: &[u8; TAG_SIZE],
    ciphertext: &[u8],
) -> ContainerResult<Vec<u8>> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    let mut buffer = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(Nonce::from_slice(iv), b"", &mut buffer, Tag::from_slice(tag))
        .map_err(|_| ContainerError::AuthenticationFailed)?;
    Ok(buffer)
}
