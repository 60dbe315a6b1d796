//! # Exchange Rate
//!
//! An indicative rate for a currency pair, independent of any quote.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{Currency, Money, ProviderName, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Indicative rate and fee for one currency pair at one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    provider: ProviderName,
    from: Currency,
    to: Currency,
    rate: Decimal,
    fee: Money,
    valid_until: Timestamp,
}

impl ExchangeRate {
    /// Creates an exchange rate.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidExchangeRate` if `rate <= 0`
    /// - `DomainError::CurrencyMismatch` if the fee is not in `from`
    /// - `DomainError::InvalidAmount` if the fee is negative
    pub fn new(
        provider: ProviderName,
        from: Currency,
        to: Currency,
        rate: Decimal,
        fee: Money,
        valid_until: Timestamp,
    ) -> DomainResult<Self> {
        if rate <= Decimal::ZERO {
            return Err(DomainError::InvalidExchangeRate(format!(
                "{from}/{to} rate {rate} must be positive"
            )));
        }
        if fee.currency() != from {
            return Err(DomainError::currency_mismatch(from, fee.currency()));
        }
        if fee.is_negative() {
            return Err(DomainError::InvalidAmount(format!(
                "fee {fee} must not be negative"
            )));
        }
        Ok(Self {
            provider,
            from,
            to,
            rate,
            fee,
            valid_until,
        })
    }

    /// Returns the quoting provider.
    #[inline]
    #[must_use]
    pub fn provider(&self) -> &ProviderName {
        &self.provider
    }

    /// Returns the source currency.
    #[inline]
    #[must_use]
    pub fn from(&self) -> Currency {
        self.from
    }

    /// Returns the target currency.
    #[inline]
    #[must_use]
    pub fn to(&self) -> Currency {
        self.to
    }

    /// Returns the rate in target units per source unit.
    #[inline]
    #[must_use]
    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Returns the indicative fee in the source currency.
    #[inline]
    #[must_use]
    pub fn fee(&self) -> Money {
        self.fee
    }

    /// Returns when the rate stops being valid.
    #[inline]
    #[must_use]
    pub fn valid_until(&self) -> Timestamp {
        self.valid_until
    }

    /// Returns true if the rate is past its validity window.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.valid_until.is_expired()
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} @ {} (fee {})", self.from, self.to, self.rate, self.fee)
    }
}
