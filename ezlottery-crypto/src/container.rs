//! The `.dat` container: one data file, one fresh key, one recipient.
//!
//! # Layout
//!
//! ```text
//! offset  size  field
//! 0       9     magic "EZLOTTERY"
//! 9       1     version (1)
//! 10      3     reserved, zero
//! 13      2     wrapped key length, little-endian
//! 15      n     wrapped key (RSA-OAEP/SHA-256)
//! 15+n    12    IV
//! 27+n    16    GCM tag
//! 43+n    ..    ciphertext, same length as the plaintext
//! ```
//!
//! # Process
//! 1. Generate a random data key (never reused, never cached)
//! 2. Wrap the data key for the recipient's public key
//! 3. Encrypt the data with the data key under a random IV

use ezlottery_keys::{KeyUnwrapper, KeyWrapper};
use tracing::debug;

use crate::cipher::{self, IV_SIZE, TAG_SIZE};
use crate::error::{ContainerError, ContainerResult};
use crate::key::DataKey;

/// Magic tag at the start of every container.
pub const MAGIC: &[u8; 9] = b"EZLOTTERY";

/// Current container format version.
pub const FORMAT_VERSION: u8 = 1;

/// Size of the reserved field.
pub const RESERVED_SIZE: usize = 3;

/// Bytes before the wrapped key: magic, version, reserved, key length.
pub const HEADER_SIZE: usize = MAGIC.len() + 1 + RESERVED_SIZE + 2;

/// Conventional file extension for containers.
pub const CONTAINER_EXTENSION: &str = "dat";

/// Borrowed view over the fields of a well-formed container.
///
/// Parsing checks framing only; nothing here has been authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerView<'a> {
    pub version: u8,
    pub wrapped_key: &'a [u8],
    pub iv: &'a [u8; IV_SIZE],
    pub tag: &'a [u8; TAG_SIZE],
    pub ciphertext: &'a [u8],
}

impl<'a> ContainerView<'a> {
    /// Splits `data` into its fields.
    ///
    /// # Errors
    ///
    /// - [`ContainerError::UnsupportedFormat`] for a foreign magic tag or an
    ///   unknown version
    /// - [`ContainerError::Truncated`] when the declared wrapped key length
    ///   plus the fixed fields exceed the input
    pub fn parse(data: &'a [u8]) -> ContainerResult<Self> {
        if !data.starts_with(MAGIC) {
            return Err(if MAGIC.starts_with(data) {
                ContainerError::Truncated
            } else {
                ContainerError::UnsupportedFormat
            });
        }

        let version = *data.get(MAGIC.len()).ok_or(ContainerError::Truncated)?;
        if version != FORMAT_VERSION {
            return Err(ContainerError::UnsupportedFormat);
        }

        if data.len() < HEADER_SIZE {
            return Err(ContainerError::Truncated);
        }
        let (header, body) = data.split_at(HEADER_SIZE);
        let key_len = usize::from(u16::from_le_bytes([
            header[HEADER_SIZE - 2],
            header[HEADER_SIZE - 1],
        ]));

        if body.len() < key_len + IV_SIZE + TAG_SIZE {
            return Err(ContainerError::Truncated);
        }
        let (wrapped_key, rest) = body.split_at(key_len);
        let (iv, rest) = rest.split_at(IV_SIZE);
        let (tag, ciphertext) = rest.split_at(TAG_SIZE);

        Ok(Self {
            version,
            wrapped_key,
            iv: iv.try_into().map_err(|_| ContainerError::Truncated)?,
            tag: tag.try_into().map_err(|_| ContainerError::Truncated)?,
            ciphertext,
        })
    }

    /// Length of the plaintext this container decrypts to.
    #[must_use]
    pub fn plaintext_len(&self) -> usize {
        self.ciphertext.len()
    }
}

/// Encrypts `plaintext` for the holder of the private half of `recipient`.
///
/// Every call draws a new data key and IV, so encrypting the same input
/// twice never yields the same container.
pub fn encrypt(plaintext: &[u8], recipient: &dyn KeyWrapper) -> ContainerResult<Vec<u8>> {
    let key = DataKey::generate();

    let wrapped_key = recipient
        .wrap(key.as_bytes())
        .map_err(|e| ContainerError::KeyWrapFailed(e.to_string()))?;
    let wrapped_len = u16::try_from(wrapped_key.len()).map_err(|_| {
        ContainerError::KeyWrapFailed(format!(
            "wrapped key is {} bytes, format limit is {}",
            wrapped_key.len(),
            u16::MAX
        ))
    })?;

    let sealed = cipher::seal(&key, plaintext)?;

    let mut out = Vec::with_capacity(
        HEADER_SIZE + wrapped_key.len() + IV_SIZE + TAG_SIZE + sealed.ciphertext.len(),
    );
    out.extend_from_slice(MAGIC);
    out.push(FORMAT_VERSION);
    out.extend_from_slice(&[0u8; RESERVED_SIZE]);
    out.extend_from_slice(&wrapped_len.to_le_bytes());
    out.extend_from_slice(&wrapped_key);
    out.extend_from_slice(&sealed.iv);
    out.extend_from_slice(&sealed.tag);
    out.extend_from_slice(&sealed.ciphertext);

    debug!(
        plaintext_len = plaintext.len(),
        wrapped_key_len = wrapped_key.len(),
        "container sealed"
    );
    Ok(out)
}

/// Decrypts a container with the recipient's private key.
///
/// # Errors
///
/// [`ContainerError::UnsupportedFormat`] and [`ContainerError::Truncated`]
/// from framing, [`ContainerError::KeyUnwrapFailed`] if the data key cannot
/// be recovered, [`ContainerError::AuthenticationFailed`] if the tag does
/// not verify. No plaintext is returned on any failure.
pub fn decrypt(container: &[u8], recipient: &dyn KeyUnwrapper) -> ContainerResult<Vec<u8>> {
    let view = ContainerView::parse(container)?;

    let secret = recipient
        .unwrap_key(view.wrapped_key)
        .map_err(|_| ContainerError::KeyUnwrapFailed)?;
    let key = DataKey::from_slice(&secret).ok_or(ContainerError::KeyUnwrapFailed)?;

    let plaintext = cipher::open(&key, view.iv, view.tag, view.ciphertext)?;
    debug!(plaintext_len = plaintext.len(), "container opened");
    Ok(plaintext)
}
