//! Host version identifiers
//!
//! Visual Studio registers each installation under a `major.minor` key
//! (`14.0`, `15.0`, ...). Keys are compared as decimal numbers, so `9.0 < 10.0`
//! and `16.0 == 16.00`, while the original key text is kept for lookups.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A numeric `major.minor` host version
#[derive(Debug, Clone)]
pub struct HostVersion {
    major: u32,
    /// Fractional digits with trailing zeros removed
    fraction: String,
    /// Registry key text this version was read from
    key: String,
}

/// Reason a string is not a host version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVersionError {
    input: String,
}

impl fmt::Display for ParseVersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a version number", self.input)
    }
}

impl std::error::Error for ParseVersionError {}

impl HostVersion {
    /// Parse a registry key name as a version.
    ///
    /// Accepts digits with at most one `.` followed by at least one digit.
    /// Signs, grouping separators, whitespace and zero are rejected.
    pub fn parse(key: &str) -> Result<Self, ParseVersionError> {
        let invalid = || ParseVersionError {
            input: key.to_string(),
        };

        let (major_text, fraction_text) = match key.split_once('.') {
            Some((major, fraction)) => (major, fraction),
            None => (key, ""),
        };

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if major_text.is_empty() || !all_digits(major_text) || !all_digits(fraction_text) {
            return Err(invalid());
        }
        if key.contains('.') && fraction_text.is_empty() {
            return Err(invalid());
        }

        let major: u32 = major_text.parse().map_err(|_| invalid())?;
        let fraction = fraction_text.trim_end_matches('0').to_string();
        if major == 0 && fraction.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            major,
            fraction,
            key: key.to_string(),
        })
    }

    /// Parse user input, treating a bare major version as `<major>.0`
    pub fn from_request(input: &str) -> Result<Self, ParseVersionError> {
        Self::parse(&normalize_request(input))
    }

    /// Registry key text for this version
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Normalize a requested version: trims whitespace and appends `.0` to
/// digit-only input, mirroring how installation keys are always `major.minor`.
pub fn normalize_request(input: &str) -> String {
    let trimmed = input.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        format!("{trimmed}.0")
    } else {
        trimmed.to_string()
    }
}

/// Compare two fractional digit strings as the decimals `0.<a>` and `0.<b>`
fn compare_fractions(a: &str, b: &str) -> Ordering {
    let width = a.len().max(b.len());
    let pad = |s: &str| format!("{s:0<width$}");
    pad(a).cmp(&pad(b))
}

impl PartialEq for HostVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HostVersion {}

impl PartialOrd for HostVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HostVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| compare_fractions(&self.fraction, &other.fraction))
    }
}

impl FromStr for HostVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HostVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}
