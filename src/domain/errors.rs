//! # Domain Errors
//!
//! Error types for validation failures in the normalized remittance model.
//!
//! # Examples
//!
//! ```
//! use remittance_hub::domain::errors::DomainError;
//! use remittance_hub::domain::value_objects::Currency;
//!
//! let err = DomainError::currency_mismatch(Currency::USD, Currency::EUR);
//! assert!(err.to_string().contains("USD"));
//! ```

use crate::domain::value_objects::arithmetic::ArithmeticError;
use crate::domain::value_objects::currency::Currency;
use thiserror::Error;

/// Error type for domain validation and business rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A monetary amount failed validation.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// An exchange rate failed validation.
    #[error("invalid exchange rate: {0}")]
    InvalidExchangeRate(String),

    /// A country code is not a two-letter ISO code.
    #[error("invalid country code: '{0}'")]
    InvalidCountryCode(String),

    /// Two amounts in different currencies were combined.
    #[error("currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch {
        /// The currency the operation required.
        expected: Currency,
        /// The currency that was supplied.
        actual: Currency,
    },

    /// A required field was missing or malformed.
    #[error("validation error: {0}")]
    Validation(String),

    /// A quote is past its validity window.
    #[error("quote expired: {0}")]
    QuoteExpired(String),

    /// Checked arithmetic failed.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl DomainError {
    /// Creates a currency mismatch error.
    #[must_use]
    pub fn currency_mismatch(expected: Currency, actual: Currency) -> Self {
        Self::CurrencyMismatch { expected, actual }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
