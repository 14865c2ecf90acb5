//! Tool configuration, read from `ezlottery.toml`.
//!
//! ```toml
//! [keys]
//! signing_key = "./ed25519-priv.pem"
//! verifying_key = "./ed25519-pub.pem"
//! encryption_key = "./rsa-pub.pem"
//! decryption_key = "./rsa-priv.pem"
//!
//! [issue]
//! expiry_fallback = "sentinel"   # or "reject"
//!
//! [activation]
//! store_path = "/var/lib/ezlottery/.license"
//!
//! [activation.policy]
//! allow_empty_identity = false
//! ```
//!
//! Every section and field is optional.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ezlottery_keys::{Ed25519SigningKey, Ed25519VerifyingKey, RsaUnwrappingKey, RsaWrappingKey};
use ezlottery_license::{ActivationStore, IssueOptions, LicensePolicy};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "ezlottery.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub keys: KeyPaths,
    pub issue: IssueOptions,
    pub activation: ActivationConfig,
}

/// Locations of the PEM key files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyPaths {
    /// Ed25519 private key, vendor side only.
    pub signing_key: PathBuf,
    /// Ed25519 public key shipped with the application.
    pub verifying_key: PathBuf,
    /// RSA public key data owners encrypt for.
    pub encryption_key: PathBuf,
    /// RSA private key held by the application.
    pub decryption_key: PathBuf,
}

impl Default for KeyPaths {
    fn default() -> Self {
        Self {
            signing_key: PathBuf::from("./ed25519-priv.pem"),
            verifying_key: PathBuf::from("./ed25519-pub.pem"),
            encryption_key: PathBuf::from("./rsa-pub.pem"),
            decryption_key: PathBuf::from("./rsa-priv.pem"),
        }
    }
}

impl KeyPaths {
    pub fn signing_key(&self) -> Result<Ed25519SigningKey> {
        Ed25519SigningKey::from_pem_file(&self.signing_key)
            .with_context(|| format!("loading signing key {}", self.signing_key.display()))
    }

    pub fn verifying_key(&self) -> Result<Ed25519VerifyingKey> {
        Ed25519VerifyingKey::from_pem_file(&self.verifying_key)
            .with_context(|| format!("loading verifying key {}", self.verifying_key.display()))
    }

    pub fn encryption_key(&self) -> Result<RsaWrappingKey> {
        RsaWrappingKey::from_pem_file(&self.encryption_key)
            .with_context(|| format!("loading encryption key {}", self.encryption_key.display()))
    }

    pub fn decryption_key(&self) -> Result<RsaUnwrappingKey> {
        RsaUnwrappingKey::from_pem_file(&self.decryption_key)
            .with_context(|| format!("loading decryption key {}", self.decryption_key.display()))
    }
}

/// Where the activated license is cached, and the checks applied to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationConfig {
    /// Cache file; the platform data directory when unset.
    pub store_path: Option<PathBuf>,
    /// Policy for `verify`, `activate` and `status`.
    pub policy: LicensePolicy,
}

impl ActivationConfig {
    pub fn store(&self) -> ActivationStore {
        let store = match &self.store_path {
            Some(path) => ActivationStore::new(path),
            None => ActivationStore::default_location(),
        };
        store.with_policy(self.policy)
    }
}

impl Config {
    /// Parses a config document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("parsing config")
    }

    /// Loads the config at `path`, or `ezlottery.toml` in the working
    /// directory if it exists, or the defaults.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    debug!("no {DEFAULT_CONFIG_FILE}, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("in {}", path.display()))?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }
}
