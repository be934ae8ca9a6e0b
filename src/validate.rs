//! Syntactic validation for route parameters
//!
//! These filters reject malformed input before it reaches the lookup
//! components. They are purely syntactic: a string passing here may
//! still be unknown to the timezone rules database or the geo database.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Word characters, a path separator (`/` or its percent-encoded form),
/// then anything up to a literal `.`.
static TZ_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+(?:/|%2F)[^.]+$").unwrap());

/// Four dot-separated groups of 1-3 digits. No octet range check; the
/// geo database reports not-found for addresses that cannot exist.
static IP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0-9]{1,3}\.){3}[0-9]{1,3}$").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidFormat {
    #[error("malformed timezone identifier: {0:?}")]
    TimezoneId(String),
    #[error("malformed IP address: {0:?}")]
    IpAddress(String),
}

/// A timezone identifier that passed the syntactic filter, with any
/// `%2F` separator normalized to `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedId(String);

impl ValidatedId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidatedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A dotted-quad string that passed the syntactic filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedIp(String);

impl ValidatedIp {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidatedIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn validate_timezone_id(s: &str) -> Result<ValidatedId, InvalidFormat> {
    if TZ_ID_PATTERN.is_match(s) {
        Ok(ValidatedId(s.replace("%2F", "/")))
    } else {
        Err(InvalidFormat::TimezoneId(s.to_string()))
    }
}

pub fn validate_ip(s: &str) -> Result<ValidatedIp, InvalidFormat> {
    if IP_PATTERN.is_match(s) {
        Ok(ValidatedIp(s.to_string()))
    } else {
        Err(InvalidFormat::IpAddress(s.to_string()))
    }
}
