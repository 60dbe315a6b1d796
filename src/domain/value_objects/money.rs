//! # Money Value Object
//!
//! A decimal amount tagged with its currency.
//!
//! # Examples
//!
//! ```
//! use remittance_hub::domain::value_objects::{Currency, Money};
//! use rust_decimal::Decimal;
//!
//! let amount = Money::new(Decimal::new(1000, 0), Currency::USD);
//! let fee = Money::new(Decimal::new(599, 2), Currency::USD);
//! let total = amount.checked_add(&fee).unwrap();
//! assert_eq!(total.amount(), Decimal::new(100599, 2));
//!
//! let pesos = Money::new(Decimal::ONE, Currency::PHP);
//! assert!(amount.checked_add(&pesos).is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::arithmetic::{CheckedArithmetic, Rounding};
use crate::domain::value_objects::currency::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A monetary amount in exactly one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a money value. Any sign is accepted; callers validate
    /// positivity where the model requires it.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Zero in the given currency.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Creates a strictly positive amount.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` if `amount <= 0`.
    pub fn positive(amount: Decimal, currency: Currency) -> DomainResult<Self> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::InvalidAmount(format!(
                "{amount} {currency} must be positive"
            )));
        }
        Ok(Self::new(amount, currency))
    }

    /// Returns the decimal amount.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency.
    #[inline]
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is greater than zero.
    #[inline]
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Returns true if the amount is below zero.
    #[inline]
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Adds two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CurrencyMismatch` if the currencies differ, or an
    /// arithmetic error on overflow.
    pub fn checked_add(&self, other: &Self) -> DomainResult<Self> {
        self.ensure_same_currency(other)?;
        Ok(Self::new(self.amount.safe_add(other.amount)?, self.currency))
    }

    /// Subtracts an amount of the same currency.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CurrencyMismatch` if the currencies differ, or an
    /// arithmetic error on underflow.
    pub fn checked_sub(&self, other: &Self) -> DomainResult<Self> {
        self.ensure_same_currency(other)?;
        Ok(Self::new(self.amount.safe_sub(other.amount)?, self.currency))
    }

    /// Converts into `target` at `rate` (units of target per unit of self),
    /// rounding to the target's minor unit with `rounding`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidExchangeRate` if the rate is not positive,
    /// or an arithmetic error on overflow.
    pub fn convert(&self, rate: Decimal, target: Currency, rounding: Rounding) -> DomainResult<Self> {
        if rate <= Decimal::ZERO {
            return Err(DomainError::InvalidExchangeRate(format!(
                "rate {rate} must be positive"
            )));
        }
        let raw = self.amount.safe_mul(rate)?;
        Ok(Self::new(rounding.apply(raw, target.minor_units()), target))
    }

    fn ensure_same_currency(&self, other: &Self) -> DomainResult<()> {
        if self.currency != other.currency {
            return Err(DomainError::currency_mismatch(self.currency, other.currency));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
