// src/version/mod.rs

//! Release version handling for the update catalog
//!
//! Catalog entries and client requests carry plain numeric versions:
//! `major.minor.patch`, or the legacy `major.minor` form where the patch
//! component is implied to be zero. Anything else (pre-release tags, build
//! metadata, signs, padding) is rejected.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced by strict version parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionParseError {
    /// Input was empty
    #[error("Empty version string")]
    Empty,

    /// Wrong number of dot-separated components
    #[error("Invalid version '{input}': expected 2 or 3 components, found {count}")]
    ComponentCount { input: String, count: usize },

    /// A component is empty or contains something other than ASCII digits
    #[error("Invalid version '{input}': component '{component}' is not a number")]
    NotNumeric { input: String, component: String },

    /// A component has a redundant leading zero (e.g. "01")
    #[error("Invalid version '{input}': component '{component}' has a leading zero")]
    LeadingZero { input: String, component: String },

    /// A component does not fit in 64 bits
    #[error("Invalid version '{input}': component '{component}' is too large")]
    Overflow { input: String, component: String },
}

/// A release version: an immutable, totally ordered numeric triple
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(semver::Version);

impl Version {
    /// Build a version from its components
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    /// Parse a version string strictly
    ///
    /// Accepted forms:
    /// - "1.2.3" -> 1.2.3
    /// - "1.2"   -> 1.2.0 (legacy two-component form)
    ///
    /// Rejected: "1", "1.2.3.4", "1.2.x", "1.2.3-beta", "1.2.3+build", "01.2.3", "-1.2.3"
    pub fn parse_strict(s: &str) -> Result<Self, VersionParseError> {
        if s.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let parts: Vec<&str> = s.split('.').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(VersionParseError::ComponentCount {
                input: s.to_string(),
                count: parts.len(),
            });
        }

        let mut numbers = [0u64; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = parse_component(s, part)?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }
}

fn parse_component(input: &str, part: &str) -> Result<u64, VersionParseError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersionParseError::NotNumeric {
            input: input.to_string(),
            component: part.to_string(),
        });
    }

    if part.len() > 1 && part.starts_with('0') {
        return Err(VersionParseError::LeadingZero {
            input: input.to_string(),
            component: part.to_string(),
        });
    }

    // Only digits remain, so overflow is the sole failure mode
    part.parse::<u64>().map_err(|_| VersionParseError::Overflow {
        input: input.to_string(),
        component: part.to_string(),
    })
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_strict(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.0.major, self.0.minor, self.0.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_components() {
        let v = Version::parse_strict("1.2.3").unwrap();
        assert_eq!((v.major(), v.minor(), v.patch()), (1, 2, 3));
    }

    #[test]
    fn test_parse_two_components_legacy() {
        let v = Version::parse_strict("1.2").unwrap();
        assert_eq!(v, Version::new(1, 2, 0));
        assert_eq!(v, Version::parse_strict("1.2.0").unwrap());
    }

    #[test]
    fn test_parse_zero_components() {
        assert_eq!(Version::parse_strict("0.0.0").unwrap(), Version::new(0, 0, 0));
        assert_eq!(Version::parse_strict("10.0.20").unwrap(), Version::new(10, 0, 20));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in [
            "", "1", "1.2.3.4", "1.2.x", "1..2", ".1.2", "1.2.", "a.b.c", "1.2.3-beta",
            "1.2.3+build", "1.2.3a1", "-1.2.3", "+1.2.3", " 1.2.3", "1.2.3 ", "latest",
        ] {
            assert!(
                Version::parse_strict(input).is_err(),
                "expected '{}' to be rejected",
                input
            );
        }
    }

    #[test]
    fn test_parse_rejects_leading_zero() {
        let err = Version::parse_strict("1.02.3").unwrap_err();
        assert!(matches!(err, VersionParseError::LeadingZero { .. }));
        assert!(Version::parse_strict("01.2").is_err());
    }

    #[test]
    fn test_parse_rejects_overflow() {
        let err = Version::parse_strict("1.2.99999999999999999999").unwrap_err();
        assert!(matches!(err, VersionParseError::Overflow { .. }));
    }

    #[test]
    fn test_parse_error_kinds() {
        assert_eq!(Version::parse_strict(""), Err(VersionParseError::Empty));
        assert!(matches!(
            Version::parse_strict("1"),
            Err(VersionParseError::ComponentCount { count: 1, .. })
        ));
        assert!(matches!(
            Version::parse_strict("1.2.x"),
            Err(VersionParseError::NotNumeric { .. })
        ));
    }

    #[test]
    fn test_ordering() {
        let v = |s: &str| Version::parse_strict(s).unwrap();
        assert!(v("2.0.0") > v("1.9.9"));
        assert!(v("1.10.0") > v("1.9.0")); // numeric, not lexical
        assert!(v("1.2.1") > v("1.2"));
        assert!(v("0.0.1") < v("0.1.0"));
    }

    #[test]
    fn test_display_always_three_components() {
        assert_eq!(Version::parse_strict("1.2").unwrap().to_string(), "1.2.0");
        assert_eq!(Version::parse_strict("4.5.6").unwrap().to_string(), "4.5.6");
    }

    #[test]
    fn test_from_str() {
        let v: Version = "3.1.4".parse().unwrap();
        assert_eq!(v, Version::new(3, 1, 4));
    }
}
