//! Error types for the licensing module.

use thiserror::Error;

/// Licensing errors.
///
/// The three token kinds (`MalformedToken`, `InvalidSignature`,
/// `MalformedPayload`) never carry detail about which sub-step failed.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Missing separator, empty half, or invalid base64url.
    #[error("malformed license token")]
    MalformedToken,

    /// Ed25519 signature verification failed.
    #[error("license signature invalid")]
    InvalidSignature,

    /// Payload bytes are signed but do not decode to a license payload.
    #[error("malformed license payload")]
    MalformedPayload,

    /// Expiry string rejected at issuance (reject policy only).
    #[error("invalid expiry date: {0:?}")]
    InvalidExpiry(String),

    /// License was issued for a different machine.
    #[error("license is bound to a different device")]
    DeviceMismatch,

    /// License has expired.
    #[error("license expired on {0}")]
    Expired(String),

    /// A required capability is not granted.
    #[error("license does not include feature: {0}")]
    MissingFeature(String),

    /// Activation cache could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
