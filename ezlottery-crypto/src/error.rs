//! Error types for the container layer.

use thiserror::Error;

/// Result type for container operations.
pub type ContainerResult<T> = Result<T, ContainerError>;

/// Errors that can occur sealing or opening a container.
///
/// Decryption failures are deliberately coarse: a caller can tell *which*
/// stage rejected the input, never why.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Magic tag or version not recognised.
    #[error("unsupported container format")]
    UnsupportedFormat,

    /// Fewer bytes than the header declares.
    #[error("container truncated")]
    Truncated,

    /// Wrapped key could not be recovered with this private key.
    #[error("failed to unwrap container key")]
    KeyUnwrapFailed,

    /// Ciphertext or tag altered, or wrong key.
    #[error("container authentication failed")]
    AuthenticationFailed,

    /// Recipient key could not wrap the data key.
    #[error("failed to wrap container key: {0}")]
    KeyWrapFailed(String),

    /// Encryption failed.
    #[error("encryption failed: {0}")]
    Encryption(String),
}
