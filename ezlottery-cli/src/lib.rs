//! Command implementations for the `ezlottery` tool.
//!
//! Each command is a plain function over a [`Config`] so it can be driven
//! from tests without a process boundary; `main.rs` only parses arguments
//! and prints.

pub mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use ezlottery_crypto::CONTAINER_EXTENSION;
use ezlottery_keys::{KeyUnwrapper, KeyWrapper};
use ezlottery_license::{LicensePayload, LicenseToken, encode_with};
use tracing::info;

pub use config::Config;

/// Number of machine code characters used in default license file names.
const LICENSE_NAME_PREFIX_LEN: usize = 8;

/// Resolves a token argument: `@path` reads the token from a file,
/// anything else is the token itself.
pub fn read_token_arg(arg: &str) -> Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => {
            let token = std::fs::read_to_string(path)
                .with_context(|| format!("reading token file {path}"))?;
            Ok(token.trim().to_string())
        }
        None => Ok(arg.trim().to_string()),
    }
}

/// Signs a license for `machine` with the configured signing key.
pub fn issue(config: &Config, machine: &str, expires: &str, features: &str) -> Result<LicenseToken> {
    let signer = config.keys.signing_key()?;
    let token = encode_with(machine, expires, features, &signer, &config.issue)?;
    info!(
        device = %token.payload().device_id,
        expires = %token.payload().expires,
        "license issued"
    );
    Ok(token)
}

/// `license-<first 8 characters of the machine code>.txt`
pub fn default_license_path(token: &LicenseToken) -> PathBuf {
    let prefix: String = token
        .payload()
        .device_id
        .chars()
        .take(LICENSE_NAME_PREFIX_LEN)
        .collect();
    PathBuf::from(format!("license-{prefix}.txt"))
}

pub fn write_license(token: &LicenseToken, path: &Path) -> Result<()> {
    std::fs::write(path, token.as_str())
        .with_context(|| format!("writing license {}", path.display()))
}

/// The calendar date licenses are checked against, in UTC so the result
/// does not depend on the machine's timezone setting.
pub fn current_date() -> NaiveDate {
    Utc::now().date_naive()
}

/// Days of validity left on `today`, counting `today` and the expiry day.
/// `None` if the payload's expiry is not a date.
pub fn days_remaining(payload: &LicensePayload, today: NaiveDate) -> Option<i64> {
    payload
        .expiry_date()
        .map(|expires| (expires - today).num_days() + 1)
}

/// Verifies a token against `machine` (this machine when `None`).
pub fn verify(
    config: &Config,
    token: &str,
    machine: Option<&str>,
    features: &[String],
    today: NaiveDate,
) -> Result<LicensePayload> {
    let verifier = config.keys.verifying_key()?;
    let machine = machine.map_or_else(ezlottery_license::machine_code, str::to_string);
    let required: Vec<&str> = features.iter().map(String::as_str).collect();

    let payload = config
        .activation
        .policy
        .verify(token, &verifier, &machine, today, &required)?;
    Ok(payload)
}

/// Verifies a token for `machine` and caches it in the configured store.
pub fn activate(
    config: &Config,
    token: &str,
    machine: &str,
    today: NaiveDate,
) -> Result<LicensePayload> {
    let verifier = config.keys.verifying_key()?;
    let store = config.activation.store();
    let payload = store.activate(token, &verifier, machine, today)?;
    info!(path = %store.path().display(), "license activated");
    Ok(payload)
}

/// Re-verifies the cached license for `machine`. `Ok(None)` when nothing
/// is cached.
pub fn status(config: &Config, machine: &str, today: NaiveDate) -> Result<Option<LicensePayload>> {
    let verifier = config.keys.verifying_key()?;
    let payload = config
        .activation
        .store()
        .check(&verifier, machine, today, &[])?;
    Ok(payload)
}

/// `input` with its extension replaced by `dat`.
pub fn default_container_path(input: &Path) -> PathBuf {
    input.with_extension(CONTAINER_EXTENSION)
}

/// Encrypts `input` into a container at `output`, or next to the input
/// with a `.dat` extension. Returns the path written.
pub fn encrypt_file(
    input: &Path,
    output: Option<&Path>,
    recipient: &dyn KeyWrapper,
) -> Result<PathBuf> {
    let output = output.map_or_else(|| default_container_path(input), Path::to_path_buf);
    if output == input {
        bail!("output would overwrite input {}", input.display());
    }

    let plaintext =
        std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let container = ezlottery_crypto::encrypt(&plaintext, recipient)?;
    std::fs::write(&output, &container)
        .with_context(|| format!("writing {}", output.display()))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        bytes = container.len(),
        "encrypted"
    );
    Ok(output)
}

/// Decrypts the container at `input` into `output`. Nothing is written if
/// decryption fails.
pub fn decrypt_file(input: &Path, output: &Path, recipient: &dyn KeyUnwrapper) -> Result<()> {
    let container =
        std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let plaintext = ezlottery_crypto::decrypt(&container, recipient)
        .with_context(|| format!("decrypting {}", input.display()))?;
    std::fs::write(output, &plaintext)
        .with_context(|| format!("writing {}", output.display()))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        bytes = plaintext.len(),
        "decrypted"
    );
    Ok(())
}
