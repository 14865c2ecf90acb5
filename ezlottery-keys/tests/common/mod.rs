//! Shared fixture helpers for key tests.

#![allow(dead_code)]

use std::path::PathBuf;

/// Path to a PEM fixture under the workspace `testdata/` directory.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("testdata")
        .join(name)
}

/// Reads a PEM fixture into a string.
pub fn fixture_pem(name: &str) -> String {
    std::fs::read_to_string(fixture(name)).expect("fixture should exist")
}
