//! Key material for EzLottery offline licensing and data-file protection.
//!
//! Two keypairs are involved:
//! - an Ed25519 pair: the vendor signs licenses, the application verifies
//! - an RSA pair: the data owner wraps per-file keys, the application unwraps
//!
//! Keys are supplied by the surrounding tooling (PEM files, embedded
//! constants). Nothing in this crate generates or stores keys; it only turns
//! key bytes into handles exposing the [`capability`] traits.

mod capability;
mod ed25519;
mod error;
mod oaep;

use std::path::Path;

pub use capability::{KeyUnwrapper, KeyWrapper, MessageSigner, SignatureVerifier};
pub use ed25519::{Ed25519SigningKey, Ed25519VerifyingKey, SIGNATURE_SIZE};
pub use error::{KeyError, KeyResult};
pub use oaep::{RsaUnwrappingKey, RsaWrappingKey};

fn read_pem(path: &Path) -> KeyResult<String> {
    std::fs::read_to_string(path).map_err(|source| KeyError::Read {
        path: path.to_path_buf(),
        source,
    })
}
