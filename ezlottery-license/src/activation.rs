//! Local activation cache.
//!
//! After the user pastes a license that passes full verification, the token
//! is written to disk so later launches can re-verify it without asking
//! again. The cache is never trusted: every read goes through the same
//! signature and policy checks as a fresh activation.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use ezlottery_keys::SignatureVerifier;
use tracing::{debug, warn};

use crate::error::{LicenseError, LicenseResult};
use crate::payload::LicensePayload;
use crate::policy::LicensePolicy;

/// File name of the cached license.
pub const LICENSE_FILE_NAME: &str = ".license";

/// File-backed store for the activated license token.
#[derive(Debug, Clone)]
pub struct ActivationStore {
    path: PathBuf,
    policy: LicensePolicy,
}

impl ActivationStore {
    /// Store at an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            policy: LicensePolicy::default(),
        }
    }

    /// Store under the platform's local data directory
    /// (`<data_local_dir>/ezlottery/.license`), falling back to the
    /// working directory when there is none.
    pub fn default_location() -> Self {
        let dir = dirs::data_local_dir()
            .map(|d| d.join("ezlottery"))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir.join(LICENSE_FILE_NAME))
    }

    /// Replaces the policy applied on activation and on every check.
    #[must_use]
    pub fn with_policy(mut self, policy: LicensePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Path of the cache file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Verifies `token` and, if it is accepted, caches it.
    ///
    /// Failing to write the cache does not fail the activation; the user
    /// simply has to activate again on the next launch.
    pub fn activate(
        &self,
        token: &str,
        verifier: &dyn SignatureVerifier,
        current_identity: &str,
        today: NaiveDate,
    ) -> LicenseResult<LicensePayload> {
        let payload = self
            .policy
            .verify(token, verifier, current_identity, today, &[])?;

        if let Err(e) = self.save(token.trim()) {
            warn!(path = %self.path.display(), error = %e, "failed to cache license");
        }
        Ok(payload)
    }

    /// Writes `token` to the cache file, creating parent directories.
    pub fn save(&self, token: &str) -> LicenseResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| LicenseError::Storage(format!("{}: {e}", parent.display())))?;
        }
        std::fs::write(&self.path, token)
            .map_err(|e| LicenseError::Storage(format!("{}: {e}", self.path.display())))
    }

    /// Reads the cached token, if any.
    pub fn load(&self) -> LicenseResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(token) => Ok(Some(token.trim().to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LicenseError::Storage(format!(
                "{}: {e}",
                self.path.display()
            ))),
        }
    }

    /// Deletes the cached token. Missing cache is not an error.
    pub fn clear(&self) -> LicenseResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LicenseError::Storage(format!(
                "{}: {e}",
                self.path.display()
            ))),
        }
    }

    /// Re-verifies the cached token, returning its payload.
    ///
    /// # Errors
    ///
    /// Whatever verification or policy error the cached token produces, or
    /// [`LicenseError::Storage`]. A missing cache is `Ok(None)`.
    pub fn check(
        &self,
        verifier: &dyn SignatureVerifier,
        current_identity: &str,
        today: NaiveDate,
        required_features: &[&str],
    ) -> LicenseResult<Option<LicensePayload>> {
        let Some(token) = self.load()? else {
            return Ok(None);
        };
        self.policy
            .verify(&token, verifier, current_identity, today, required_features)
            .map(Some)
    }

    /// Whether a valid license for this machine is cached. Any failure,
    /// including an unreadable cache, counts as not activated.
    pub fn is_activated(
        &self,
        verifier: &dyn SignatureVerifier,
        current_identity: &str,
        today: NaiveDate,
    ) -> bool {
        match self.check(verifier, current_identity, today, &[]) {
            Ok(Some(_)) => true,
            Ok(None) => false,
            Err(e) => {
                debug!(error = %e, "cached license rejected");
                false
            }
        }
    }
}
