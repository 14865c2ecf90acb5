//! Hybrid encryption for EzLottery data files.
//!
//! A data owner encrypts a file (typically a ticket CSV export) for the
//! application's RSA public key; only an installation holding the private
//! key can read it. The encryption uses:
//!
//! - **AES-256-GCM** for the data, under a key generated per file
//! - **RSA-OAEP (SHA-256)** to wrap that key for the recipient
//!
//! All operations are stateless and may run concurrently.

mod cipher;
mod container;
mod error;
mod key;

pub use cipher::{IV_SIZE, TAG_SIZE};
pub use container::{
    CONTAINER_EXTENSION, ContainerView, FORMAT_VERSION, HEADER_SIZE, MAGIC, RESERVED_SIZE,
    decrypt, encrypt,
};
pub use error::{ContainerError, ContainerResult};
pub use key::KEY_SIZE;
