//! Verifier-side license policy.
//!
//! A verified token only proves the vendor signed it. Before unlocking
//! anything the application must also confirm the license is for this
//! machine, is still in date, and grants what is being asked for.

use chrono::NaiveDate;
use ezlottery_keys::SignatureVerifier;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::device::normalize;
use crate::error::{LicenseError, LicenseResult};
use crate::payload::LicensePayload;
use crate::token::decode_and_verify;

/// Checks applied to a cryptographically valid payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicensePolicy {
    /// Accept licenses whose `device_id` is empty. Off by default: an empty
    /// identity would otherwise match any machine whose code normalizes to
    /// nothing.
    #[serde(default)]
    pub allow_empty_identity: bool,
}

impl LicensePolicy {
    /// Checks device binding, expiry and features.
    ///
    /// Both identities are normalized before comparison. The license is
    /// valid through the whole of its `expires` day.
    ///
    /// # Errors
    ///
    /// [`LicenseError::DeviceMismatch`], [`LicenseError::Expired`],
    /// [`LicenseError::MissingFeature`], or
    /// [`LicenseError::MalformedPayload`] if `expires` is not a date.
    pub fn check(
        &self,
        payload: &LicensePayload,
        current_identity: &str,
        today: NaiveDate,
        required_features: &[&str],
    ) -> LicenseResult<()> {
        let licensed = normalize(&payload.device_id);
        if licensed.is_empty() && !self.allow_empty_identity {
            return Err(LicenseError::DeviceMismatch);
        }
        if licensed != normalize(current_identity) {
            return Err(LicenseError::DeviceMismatch);
        }

        let expires = payload
            .expiry_date()
            .ok_or(LicenseError::MalformedPayload)?;
        if today > expires {
            return Err(LicenseError::Expired(payload.expires.clone()));
        }

        if let Some(missing) = required_features.iter().find(|f| !payload.grants(f)) {
            return Err(LicenseError::MissingFeature((*missing).to_string()));
        }

        Ok(())
    }

    /// Verifies `token` and applies this policy, returning the payload.
    pub fn verify(
        &self,
        token: &str,
        verifier: &dyn SignatureVerifier,
        current_identity: &str,
        today: NaiveDate,
        required_features: &[&str],
    ) -> LicenseResult<LicensePayload> {
        let payload = decode_and_verify(token, verifier)?;
        self.check(&payload, current_identity, today, required_features)?;
        debug!(expires = %payload.expires, "license accepted");
        Ok(payload)
    }
}

/// Verifies a token with the default policy.
pub fn verify_license(
    token: &str,
    verifier: &dyn SignatureVerifier,
    current_identity: &str,
    today: NaiveDate,
    required_features: &[&str],
) -> LicenseResult<LicensePayload> {
    LicensePolicy::default().verify(token, verifier, current_identity, today, required_features)
}
