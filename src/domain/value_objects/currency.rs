//! # Currency
//!
//! ISO-4217 currency codes supported by the remittance corridors.
//!
//! # Examples
//!
//! ```
//! use remittance_hub::domain::value_objects::Currency;
//!
//! let php: Currency = "php".parse().unwrap();
//! assert_eq!(php, Currency::PHP);
//! assert_eq!(php.minor_units(), 2);
//! ```

use crate::domain::value_objects::enums::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An ISO-4217 currency code.
///
/// Every monetary amount in the crate carries exactly one of these; there is
/// no implicit conversion between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum Currency {
    /// United States dollar.
    USD,
    /// Euro.
    EUR,
    /// Pound sterling.
    GBP,
    /// Indian rupee.
    INR,
    /// Philippine peso.
    PHP,
    /// Mexican peso.
    MXN,
    /// Kenyan shilling.
    KES,
    /// Ghanaian cedi.
    GHS,
}

impl Currency {
    /// All supported currencies, in declaration order.
    pub const ALL: [Currency; 8] = [
        Self::USD,
        Self::EUR,
        Self::GBP,
        Self::INR,
        Self::PHP,
        Self::MXN,
        Self::KES,
        Self::GHS,
    ];

    /// Returns the three-letter code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::INR => "INR",
            Self::PHP => "PHP",
            Self::MXN => "MXN",
            Self::KES => "KES",
            Self::GHS => "GHS",
        }
    }

    /// Number of decimal places in the currency's minor unit.
    #[inline]
    #[must_use]
    pub const fn minor_units(self) -> u32 {
        2
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.code() == upper)
            .ok_or_else(|| ParseEnumError::InvalidValue("Currency", s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn display_is_iso_code() {
        assert_eq!(Currency::USD.to_string(), "USD");
        assert_eq!(Currency::GHS.to_string(), "GHS");
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::USD);
        assert_eq!(" Mxn ".parse::<Currency>().unwrap(), Currency::MXN);
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = "XYZ".parse::<Currency>().unwrap_err();
        assert_eq!(err.to_string(), "invalid Currency value: 'XYZ'");
    }

    #[test]
    fn every_code_parses_back() {
        for currency in Currency::ALL {
            assert_eq!(currency.code().parse::<Currency>().unwrap(), currency);
        }
    }

    #[test]
    fn serde_uses_code() {
        let json = serde_json::to_string(&Currency::INR).unwrap();
        assert_eq!(json, "\"INR\"");
        let deserialized: Currency = serde_json::from_str("\"EUR\"").unwrap();
        assert_eq!(deserialized, Currency::EUR);
    }
}
