//! The signed license claim and its canonical byte encoding.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LicenseError, LicenseResult};

/// Expiry substituted when the issuer is given a malformed date.
pub const SENTINEL_EXPIRY: &str = "2099-12-31";

/// Feature tag meaning "every capability enabled".
pub const ALL_FEATURES: &str = "all";

/// The license claim: which machine, until when, and which capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicensePayload {
    /// Normalized machine identity.
    pub device_id: String,
    /// Expiry date, `YYYY-MM-DD`.
    pub expires: String,
    /// Capability tags, in issuance order.
    pub features: Vec<String>,
}

impl LicensePayload {
    /// Encodes the payload as the bytes that get signed.
    ///
    /// `{"device_id":…,"expires":…,"features":[…]}` with this exact field
    /// order and no whitespace. Any change here invalidates every issued
    /// license.
    #[must_use]
    pub fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut out = String::with_capacity(64 + self.features.len() * 16);
        out.push_str("{\"device_id\":");
        push_json_string(&mut out, &self.device_id);
        out.push_str(",\"expires\":");
        push_json_string(&mut out, &self.expires);
        out.push_str(",\"features\":[");
        for (i, feature) in self.features.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            push_json_string(&mut out, feature);
        }
        out.push_str("]}");
        out.into_bytes()
    }

    /// Parses signed payload bytes. An empty feature list is rejected; the
    /// issuer always writes at least `all`.
    pub fn from_bytes(bytes: &[u8]) -> LicenseResult<Self> {
        let payload: Self =
            serde_json::from_slice(bytes).map_err(|_| LicenseError::MalformedPayload)?;
        if payload.features.is_empty() {
            return Err(LicenseError::MalformedPayload);
        }
        Ok(payload)
    }

    /// The expiry as a date, if it is one.
    #[must_use]
    pub fn expiry_date(&self) -> Option<NaiveDate> {
        parse_expiry(&self.expires)
    }

    /// Whether the license grants `feature`, either by name or through `all`.
    #[must_use]
    pub fn grants(&self, feature: &str) -> bool {
        self.features
            .iter()
            .any(|f| f == ALL_FEATURES || f == feature)
    }
}

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// Both the shape (four, two and two ASCII digits) and the calendar are
/// checked, so `2024-1-5` and `2023-02-30` are rejected.
#[must_use]
pub fn parse_expiry(raw: &str) -> Option<NaiveDate> {
    let b = raw.as_bytes();
    let shaped = b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Splits a comma-separated feature list.
///
/// Entries are trimmed and blanks dropped; an empty result becomes
/// `["all"]`.
#[must_use]
pub fn parse_features(raw: &str) -> Vec<String> {
    let features: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(String::from)
        .collect();

    if features.is_empty() {
        vec![ALL_FEATURES.to_string()]
    } else {
        features
    }
}

fn push_json_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if c < '\u{20}' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}
