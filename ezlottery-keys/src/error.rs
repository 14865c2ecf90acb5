//! Error types for key material handling.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for key operations.
pub type KeyResult<T> = Result<T, KeyError>;

/// Errors raised while loading or using key material.
#[derive(Debug, Error)]
pub enum KeyError {
    /// Key bytes could not be parsed (bad PEM, wrong algorithm, wrong length).
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Key file could not be read.
    #[error("failed to read key file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Signature did not verify against the message.
    #[error("signature verification failed")]
    SignatureMismatch,

    /// Secret could not be wrapped for the recipient.
    #[error("key wrap failed: {0}")]
    WrapFailed(String),

    /// Wrapped secret could not be recovered. Carries no detail on purpose.
    #[error("key unwrap failed")]
    UnwrapFailed,
}
