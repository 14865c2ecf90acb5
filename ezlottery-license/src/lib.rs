//! Offline licensing for EzLottery.
//!
//! This module handles:
//! - Machine identity: the user-visible machine code and its normalized form
//! - License issuance (vendor side) with Ed25519 signatures
//! - License verification (application side), with no network access
//! - Local activation cache
//!
//! # License Token Format
//!
//! Tokens are formatted as: `base64url(payload).base64url(signature)`
//! The payload is canonical JSON: `{"device_id":…,"expires":…,"features":[…]}`
//!
//! # Lifecycle
//!
//! 1. The application displays [`machine_code`]; the user sends it to the vendor.
//! 2. The vendor runs [`encode`] with the code, an expiry and a feature list.
//! 3. The application runs [`verify_license`] (or [`ActivationStore::activate`])
//!    against the current machine code and today's date.

mod activation;
mod device;
mod error;
mod payload;
mod policy;
mod token;

pub use activation::{ActivationStore, LICENSE_FILE_NAME};
pub use device::{machine_code, machine_code_from_components, normalize};
pub use error::{LicenseError, LicenseResult};
pub use payload::{
    ALL_FEATURES, LicensePayload, SENTINEL_EXPIRY, parse_expiry, parse_features,
};
pub use policy::{LicensePolicy, verify_license};
pub use token::{
    ExpiryFallback, IssueOptions, LicenseToken, decode_and_verify, encode, encode_with,
};
