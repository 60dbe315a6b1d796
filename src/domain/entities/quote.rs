//! # Remittance Quote
//!
//! A priced, time-bounded offer from one provider.
//!
//! Quotes are produced by provider adapters and never modified afterwards.
//! Total cost and received amount are derived at construction so that every
//! provider's offer is comparable on the same terms.
//!
//! # Examples
//!
//! ```
//! use remittance_hub::domain::entities::quote::QuoteBuilder;
//! use remittance_hub::domain::value_objects::{Currency, Money, ProviderName, Timestamp};
//! use rust_decimal::Decimal;
//!
//! let quote = QuoteBuilder::new(
//!     ProviderName::new("WorldRemit"),
//!     Money::new(Decimal::new(1000, 0), Currency::USD),
//!     Money::new(Decimal::new(599, 2), Currency::USD),
//!     Decimal::new(118, 2),
//!     Currency::PHP,
//!     Timestamp::now().add_secs(15 * 60),
//! )
//! .estimated_time("Minutes")
//! .try_build()
//! .unwrap();
//!
//! assert_eq!(quote.total_cost().amount(), Decimal::new(100599, 2));
//! assert_eq!(quote.received_amount().amount(), Decimal::new(1180, 0));
//! assert!(!quote.is_expired());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{
    Currency, Money, ProviderName, QuoteId, Rounding, Timestamp,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized quote from a money-transfer provider.
///
/// # Invariants
///
/// - `amount` is positive; `fee` is non-negative and in the same currency
/// - `exchange_rate` is positive
/// - `total_cost == amount + fee`
/// - `received_amount` is in the target currency
/// - `valid_until` was in the future when the quote was built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemittanceQuote {
    id: QuoteId,
    provider: ProviderName,
    amount: Money,
    fee: Money,
    exchange_rate: Decimal,
    total_cost: Money,
    received_amount: Money,
    estimated_time: String,
    valid_until: Timestamp,
    created_at: Timestamp,
}

impl RemittanceQuote {
    /// Returns the quote id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> QuoteId {
        self.id
    }

    /// Returns the name of the provider that issued the quote.
    #[inline]
    #[must_use]
    pub fn provider(&self) -> &ProviderName {
        &self.provider
    }

    /// Returns the amount the sender sends, before fees.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Returns the provider fee, in the source currency.
    #[inline]
    #[must_use]
    pub fn fee(&self) -> Money {
        self.fee
    }

    /// Returns the exchange rate (target units per source unit).
    #[inline]
    #[must_use]
    pub fn exchange_rate(&self) -> Decimal {
        self.exchange_rate
    }

    /// Returns `amount + fee`: what the sender pays in total.
    #[inline]
    #[must_use]
    pub fn total_cost(&self) -> Money {
        self.total_cost
    }

    /// Returns what the recipient receives, in the target currency.
    #[inline]
    #[must_use]
    pub fn received_amount(&self) -> Money {
        self.received_amount
    }

    /// Returns the human-readable delivery estimate.
    #[inline]
    #[must_use]
    pub fn estimated_time(&self) -> &str {
        &self.estimated_time
    }

    /// Returns when the quote stops being trustworthy for sending.
    #[inline]
    #[must_use]
    pub fn valid_until(&self) -> Timestamp {
        self.valid_until
    }

    /// Returns when the quote was built.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns true if the quote is past its validity window.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.valid_until.is_expired()
    }

    /// Returns the time remaining until expiry, zero once expired.
    #[must_use]
    pub fn time_to_expiry(&self) -> std::time::Duration {
        self.valid_until.remaining()
    }
}

impl fmt::Display for RemittanceQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quote({}: {} -> {} total={})",
            self.provider, self.amount, self.received_amount, self.total_cost
        )
    }
}

/// Builder for [`RemittanceQuote`].
///
/// Derives `total_cost` and, unless the provider reports it directly,
/// `received_amount`.
#[derive(Debug, Clone)]
#[must_use = "builders do nothing unless .try_build() is called"]
pub struct QuoteBuilder {
    provider: ProviderName,
    amount: Money,
    fee: Money,
    exchange_rate: Decimal,
    target_currency: Currency,
    valid_until: Timestamp,
    estimated_time: String,
    rounding: Rounding,
    received_amount: Option<Decimal>,
}

impl QuoteBuilder {
    /// Creates a builder with the required fields.
    pub fn new(
        provider: ProviderName,
        amount: Money,
        fee: Money,
        exchange_rate: Decimal,
        target_currency: Currency,
        valid_until: Timestamp,
    ) -> Self {
        Self {
            provider,
            amount,
            fee,
            exchange_rate,
            target_currency,
            valid_until,
            estimated_time: String::new(),
            rounding: Rounding::default(),
            received_amount: None,
        }
    }

    /// Sets the delivery estimate label.
    pub fn estimated_time(mut self, estimated_time: impl Into<String>) -> Self {
        self.estimated_time = estimated_time.into();
        self
    }

    /// Sets the rounding used to derive the received amount.
    pub fn rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Uses the provider-reported payout instead of deriving it.
    pub fn received_amount(mut self, received: Decimal) -> Self {
        self.received_amount = Some(received);
        self
    }

    /// Validates the inputs and builds the quote.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidAmount` for a non-positive amount, a negative fee
    ///   or a negative reported payout
    /// - `DomainError::CurrencyMismatch` if the fee is not in the amount's currency
    /// - `DomainError::InvalidExchangeRate` for a non-positive rate
    /// - `DomainError::QuoteExpired` if `valid_until` is already in the past
    pub fn try_build(self) -> DomainResult<RemittanceQuote> {
        if !self.amount.is_positive() {
            return Err(DomainError::InvalidAmount(format!(
                "quoted amount {} must be positive",
                self.amount
            )));
        }
        if self.fee.is_negative() {
            return Err(DomainError::InvalidAmount(format!(
                "fee {} must not be negative",
                self.fee
            )));
        }
        if self.exchange_rate <= Decimal::ZERO {
            return Err(DomainError::InvalidExchangeRate(format!(
                "rate {} must be positive",
                self.exchange_rate
            )));
        }

        let now = Timestamp::now();
        if self.valid_until.is_expired_at(&now) {
            return Err(DomainError::QuoteExpired(format!(
                "valid_until {} is in the past",
                self.valid_until
            )));
        }

        let total_cost = self.amount.checked_add(&self.fee)?;
        let received_amount = match self.received_amount {
            Some(received) if received < Decimal::ZERO => {
                return Err(DomainError::InvalidAmount(format!(
                    "received amount {received} must not be negative"
                )));
            }
            Some(received) => Money::new(received, self.target_currency),
            None => self
                .amount
                .convert(self.exchange_rate, self.target_currency, self.rounding)?,
        };

        Ok(RemittanceQuote {
            id: QuoteId::new_v4(),
            provider: self.provider,
            amount: self.amount,
            fee: self.fee,
            exchange_rate: self.exchange_rate,
            total_cost,
            received_amount,
            estimated_time: self.estimated_time,
            valid_until: self.valid_until,
            created_at: now,
        })
    }
}
