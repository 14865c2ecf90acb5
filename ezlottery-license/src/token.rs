//! License token issuance and verification.
//!
//! Tokens use the format: `base64url(payload).base64url(signature)`
//!
//! The payload is the canonical JSON encoding from
//! [`LicensePayload::to_canonical_bytes`]; the Ed25519 signature covers the
//! decoded payload bytes exactly. Both halves use the URL-safe alphabet
//! without padding, so a token is plain ASCII safe to paste into a text
//! field or store in a flat file.
//!
//! Verification here is purely cryptographic. Whether the license is for
//! *this* machine, still in date, and grants the requested feature is the
//! caller's decision; see [`crate::LicensePolicy`].

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use ezlottery_keys::{MessageSigner, SignatureVerifier};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::device::normalize;
use crate::error::{LicenseError, LicenseResult};
use crate::payload::{LicensePayload, SENTINEL_EXPIRY, parse_expiry, parse_features};

/// What the issuer does with an expiry string that is not `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryFallback {
    /// Substitute [`SENTINEL_EXPIRY`], effectively a perpetual license.
    /// Permissive: a typo silently issues a license valid until 2099.
    #[default]
    Sentinel,
    /// Refuse to issue.
    Reject,
}

/// Issuance options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueOptions {
    #[serde(default)]
    pub expiry_fallback: ExpiryFallback,
}

/// An issued license token together with the payload it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseToken {
    /// The token text.
    raw: String,
    /// Payload as signed.
    payload: LicensePayload,
}

impl LicenseToken {
    /// Returns the token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the signed payload.
    #[must_use]
    pub fn payload(&self) -> &LicensePayload {
        &self.payload
    }

    /// Consumes the token, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.raw
    }
}

impl std::fmt::Display for LicenseToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Issues a license with the default (sentinel) expiry policy.
///
/// `device_id` is normalized, a malformed `expires_raw` becomes
/// `2099-12-31`, and `features_raw` is a comma-separated list where an empty
/// list means `all`. Signing is deterministic: identical inputs and key
/// always produce the identical token.
pub fn encode(
    device_id: &str,
    expires_raw: &str,
    features_raw: &str,
    signer: &dyn MessageSigner,
) -> LicenseToken {
    let expires = resolve_expiry(expires_raw, ExpiryFallback::Sentinel)
        .unwrap_or_else(|_| SENTINEL_EXPIRY.to_string());
    sign_payload(build_payload(device_id, expires, features_raw), signer)
}

/// Issues a license with an explicit policy.
///
/// # Errors
///
/// Returns [`LicenseError::InvalidExpiry`] when `expires_raw` is malformed
/// and the policy is [`ExpiryFallback::Reject`].
pub fn encode_with(
    device_id: &str,
    expires_raw: &str,
    features_raw: &str,
    signer: &dyn MessageSigner,
    options: &IssueOptions,
) -> LicenseResult<LicenseToken> {
    let expires = resolve_expiry(expires_raw, options.expiry_fallback)?;
    Ok(sign_payload(
        build_payload(device_id, expires, features_raw),
        signer,
    ))
}

/// Decodes a token and verifies its signature, returning the payload.
///
/// Surrounding whitespace is ignored. Policy checks (device, expiry,
/// features) are not performed.
///
/// # Errors
///
/// - [`LicenseError::MalformedToken`] if there is no `.` separator, either
///   half is empty, or either half is not base64url
/// - [`LicenseError::InvalidSignature`] if the signature does not verify
/// - [`LicenseError::MalformedPayload`] if the signed bytes are not a payload
pub fn decode_and_verify(
    token: &str,
    verifier: &dyn SignatureVerifier,
) -> LicenseResult<LicensePayload> {
    let (payload_b64, signature_b64) = token
        .trim()
        .split_once('.')
        .filter(|(p, s)| !p.is_empty() && !s.is_empty())
        .ok_or(LicenseError::MalformedToken)?;

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .map_err(|_| LicenseError::MalformedToken)?;
    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| LicenseError::MalformedToken)?;

    verifier
        .verify(&payload_bytes, &signature)
        .map_err(|_| LicenseError::InvalidSignature)?;

    let payload = LicensePayload::from_bytes(&payload_bytes)?;
    debug!(expires = %payload.expires, "license token verified");
    Ok(payload)
}

fn resolve_expiry(expires_raw: &str, fallback: ExpiryFallback) -> LicenseResult<String> {
    let trimmed = expires_raw.trim();
    if parse_expiry(trimmed).is_some() {
        return Ok(trimmed.to_string());
    }
    match fallback {
        ExpiryFallback::Sentinel => {
            warn!(
                input = trimmed,
                sentinel = SENTINEL_EXPIRY,
                "expiry is not YYYY-MM-DD, issuing with sentinel expiry"
            );
            Ok(SENTINEL_EXPIRY.to_string())
        }
        ExpiryFallback::Reject => Err(LicenseError::InvalidExpiry(trimmed.to_string())),
    }
}

fn build_payload(device_id: &str, expires: String, features_raw: &str) -> LicensePayload {
    LicensePayload {
        device_id: normalize(device_id),
        expires,
        features: parse_features(features_raw),
    }
}

fn sign_payload(payload: LicensePayload, signer: &dyn MessageSigner) -> LicenseToken {
    let bytes = payload.to_canonical_bytes();
    let signature = signer.sign(&bytes);
    let raw = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(&bytes),
        URL_SAFE_NO_PAD.encode(&signature)
    );
    debug!(device_id = %payload.device_id, expires = %payload.expires, "license issued");
    LicenseToken { raw, payload }
}
