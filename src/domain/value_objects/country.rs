//! # Country Code
//!
//! ISO-3166 alpha-2 country codes used for corridor eligibility.

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An ISO-3166 alpha-2 country code, always upper case.
///
/// # Examples
///
/// ```
/// use remittance_hub::domain::value_objects::CountryCode;
///
/// let ph = CountryCode::new("ph").unwrap();
/// assert_eq!(ph.as_str(), "PH");
/// assert!(CountryCode::new("PHL").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Creates a validated country code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCountryCode` unless the input is exactly
    /// two ASCII letters.
    pub fn new(code: impl AsRef<str>) -> DomainResult<Self> {
        let raw = code.as_ref().trim();
        if raw.len() != 2 || !raw.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidCountryCode(raw.to_string()));
        }
        Ok(Self(raw.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CountryCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_to_upper_case() {
        assert_eq!(CountryCode::new("gb").unwrap().as_str(), "GB");
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(CountryCode::new("").is_err());
        assert!(CountryCode::new("U").is_err());
        assert!(CountryCode::new("USA").is_err());
    }

    #[test]
    fn rejects_non_letters() {
        assert!(CountryCode::new("1A").is_err());
        assert!(CountryCode::new("É1").is_err());
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let ok: CountryCode = serde_json::from_str("\"ke\"").unwrap();
        assert_eq!(ok.as_str(), "KE");
        assert!(serde_json::from_str::<CountryCode>("\"KEN\"").is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "\"KE\"");
    }
}
