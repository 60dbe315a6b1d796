//! # Domain Enums
//!
//! Enumeration types for domain concepts.
//!
//! - [`TransactionStatus`] - Lifecycle of a transfer at a provider
//! - [`PaymentMethod`] - How the sender funds the transfer
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a transfer as reported by a provider.
///
/// `Pending` is the only non-terminal state.
///
/// # Examples
///
/// ```
/// use remittance_hub::domain::value_objects::enums::TransactionStatus;
///
/// assert!(!TransactionStatus::Pending.is_terminal());
/// assert!(TransactionStatus::Completed.is_terminal());
/// assert_eq!(TransactionStatus::Cancelled.to_string(), "CANCELLED");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum TransactionStatus {
    /// Accepted by the provider, not yet settled.
    Pending = 0,
    /// Funds delivered to the recipient.
    Completed = 1,
    /// The provider gave up on the transfer.
    Failed = 2,
    /// Cancelled by the sender or the provider before payout.
    Cancelled = 3,
}

impl TransactionStatus {
    /// Returns true for `Completed`, `Failed`, and `Cancelled`.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns true if the funds reached the recipient.
    #[inline]
    #[must_use]
    pub const fn is_successful(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Failed => write!(f, "FAILED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "COMPLETED" => Ok(Self::Completed),
            "FAILED" => Ok(Self::Failed),
            "CANCELLED" | "CANCELED" => Ok(Self::Cancelled),
            _ => Err(ParseEnumError::InvalidValue(
                "TransactionStatus",
                s.to_string(),
            )),
        }
    }
}

/// How the sender pays for the transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum PaymentMethod {
    /// Bank account debit or wire.
    #[default]
    BankTransfer = 0,
    /// Debit or credit card.
    Card = 1,
    /// Mobile or digital wallet.
    Wallet = 2,
    /// Cash at an agent location.
    Cash = 3,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BankTransfer => write!(f, "BANK_TRANSFER"),
            Self::Card => write!(f, "CARD"),
            Self::Wallet => write!(f, "WALLET"),
            Self::Cash => write!(f, "CASH"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "BANK_TRANSFER" | "BANKTRANSFER" | "BANK" => Ok(Self::BankTransfer),
            "CARD" => Ok(Self::Card),
            "WALLET" => Ok(Self::Wallet),
            "CASH" => Ok(Self::Cash),
            _ => Err(ParseEnumError::InvalidValue("PaymentMethod", s.to_string())),
        }
    }
}

/// Error returned when parsing an enum from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}
