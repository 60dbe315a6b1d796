//! # Corridor
//!
//! A money-transfer route: where the money leaves from, where it lands, and
//! in which currencies.

use crate::domain::value_objects::country::CountryCode;
use crate::domain::value_objects::currency::Currency;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A (source country, target country, source currency, target currency) route.
///
/// # Examples
///
/// ```
/// use remittance_hub::domain::value_objects::{CountryCode, Corridor, Currency};
///
/// let corridor = Corridor::new(
///     CountryCode::new("US").unwrap(),
///     CountryCode::new("PH").unwrap(),
///     Currency::USD,
///     Currency::PHP,
/// );
/// assert_eq!(corridor.to_string(), "US->PH USD/PHP");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Corridor {
    source_country: CountryCode,
    target_country: CountryCode,
    source_currency: Currency,
    target_currency: Currency,
}

impl Corridor {
    /// Creates a corridor.
    #[must_use]
    pub fn new(
        source_country: CountryCode,
        target_country: CountryCode,
        source_currency: Currency,
        target_currency: Currency,
    ) -> Self {
        Self {
            source_country,
            target_country,
            source_currency,
            target_currency,
        }
    }

    /// Country the transfer is sent from.
    #[inline]
    #[must_use]
    pub fn source_country(&self) -> &CountryCode {
        &self.source_country
    }

    /// Country the transfer is paid out in.
    #[inline]
    #[must_use]
    pub fn target_country(&self) -> &CountryCode {
        &self.target_country
    }

    /// Currency the sender pays in.
    #[inline]
    #[must_use]
    pub fn source_currency(&self) -> Currency {
        self.source_currency
    }

    /// Currency the recipient receives.
    #[inline]
    #[must_use]
    pub fn target_currency(&self) -> Currency {
        self.target_currency
    }

    /// Returns true if source and target currency are the same.
    #[inline]
    #[must_use]
    pub fn is_same_currency(&self) -> bool {
        self.source_currency == self.target_currency
    }
}

impl fmt::Display for Corridor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}->{} {}/{}",
            self.source_country, self.target_country, self.source_currency, self.target_currency
        )
    }
}
