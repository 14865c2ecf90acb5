//! Shared helpers for CLI command tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use ezlottery_cli::Config;
use ezlottery_cli::config::{ActivationConfig, KeyPaths};

pub const MACHINE: &str = "3F2A-9C01-77BE-D410";

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("testdata")
        .join(name)
}

/// Config pointing at the `testdata/` key pairs, caching activations at
/// `store`.
pub fn test_config(store: &Path) -> Config {
    Config {
        keys: KeyPaths {
            signing_key: fixture("ed25519-priv.pem"),
            verifying_key: fixture("ed25519-pub.pem"),
            encryption_key: fixture("rsa-pub.pem"),
            decryption_key: fixture("rsa-priv.pem"),
        },
        activation: ActivationConfig {
            store_path: Some(store.to_path_buf()),
            ..ActivationConfig::default()
        },
        ..Config::default()
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date")
}
