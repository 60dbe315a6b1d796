//! # Transaction Response
//!
//! What a provider reports back after a send or a status lookup.

use crate::domain::value_objects::{Money, ProviderName, TransactionId, TransactionStatus, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of `send_money` or `get_transaction_status`.
///
/// Status lookups may omit the monetary fields; send responses normally
/// carry them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResponse {
    transaction_id: TransactionId,
    provider: ProviderName,
    status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fee: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exchange_rate: Option<Decimal>,
    #[serde(default)]
    estimated_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tracking_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    created_at: Timestamp,
}

impl TransactionResponse {
    /// Creates a response with only identity and status set.
    #[must_use]
    pub fn new(transaction_id: TransactionId, provider: ProviderName, status: TransactionStatus) -> Self {
        Self {
            transaction_id,
            provider,
            status,
            amount: None,
            fee: None,
            exchange_rate: None,
            estimated_time: String::new(),
            tracking_url: None,
            error_message: None,
            created_at: Timestamp::now(),
        }
    }

    /// Sets the amount and fee charged.
    #[must_use]
    pub fn with_amounts(mut self, amount: Money, fee: Money) -> Self {
        self.amount = Some(amount);
        self.fee = Some(fee);
        self
    }

    /// Sets the applied exchange rate.
    #[must_use]
    pub fn with_exchange_rate(mut self, rate: Decimal) -> Self {
        self.exchange_rate = Some(rate);
        self
    }

    /// Sets the delivery estimate.
    #[must_use]
    pub fn with_estimated_time(mut self, estimated_time: impl Into<String>) -> Self {
        self.estimated_time = estimated_time.into();
        self
    }

    /// Sets the public tracking URL.
    #[must_use]
    pub fn with_tracking_url(mut self, url: impl Into<String>) -> Self {
        self.tracking_url = Some(url.into());
        self
    }

    /// Sets the provider's error text.
    #[must_use]
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Returns the provider-assigned transaction id.
    #[inline]
    #[must_use]
    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    /// Returns the provider that handled the transfer.
    #[inline]
    #[must_use]
    pub fn provider(&self) -> &ProviderName {
        &self.provider
    }

    /// Returns the transfer status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    /// Returns the sent amount, if the provider reported it.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> Option<Money> {
        self.amount
    }

    /// Returns the fee charged, if reported.
    #[inline]
    #[must_use]
    pub fn fee(&self) -> Option<Money> {
        self.fee
    }

    /// Returns the applied exchange rate, if reported.
    #[inline]
    #[must_use]
    pub fn exchange_rate(&self) -> Option<Decimal> {
        self.exchange_rate
    }

    /// Returns the delivery estimate label.
    #[inline]
    #[must_use]
    pub fn estimated_time(&self) -> &str {
        &self.estimated_time
    }

    /// Returns the tracking URL, if any.
    #[inline]
    #[must_use]
    pub fn tracking_url(&self) -> Option<&str> {
        self.tracking_url.as_deref()
    }

    /// Returns the provider's error text, if any.
    #[inline]
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns when this response was created.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns true once the transfer can no longer change state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

impl fmt::Display for TransactionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} [{}]", self.provider, self.transaction_id, self.status)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Currency;

    #[test]
    fn status_only_response_has_no_amounts() {
        let response = TransactionResponse::new(
            TransactionId::new("12345"),
            ProviderName::new("Wise"),
            TransactionStatus::Pending,
        );
        assert!(response.amount().is_none());
        assert!(response.fee().is_none());
        assert!(response.tracking_url().is_none());
        assert!(!response.is_terminal());
        assert_eq!(response.to_string(), "Wise:12345 [PENDING]");
    }

    #[test]
    fn builder_methods_fill_fields() {
        let response = TransactionResponse::new(
            TransactionId::new("WR_1700000000"),
            ProviderName::new("WorldRemit"),
            TransactionStatus::Completed,
        )
        .with_amounts(
            Money::new(Decimal::new(1000, 0), Currency::USD),
            Money::new(Decimal::new(599, 2), Currency::USD),
        )
        .with_exchange_rate(Decimal::new(118, 2))
        .with_estimated_time("Minutes")
        .with_tracking_url("https://www.worldremit.com/track/WR_1700000000");

        assert_eq!(response.fee().unwrap().amount(), Decimal::new(599, 2));
        assert_eq!(response.exchange_rate(), Some(Decimal::new(118, 2)));
        assert_eq!(response.estimated_time(), "Minutes");
        assert!(response.is_terminal());
    }

    #[test]
    fn serde_skips_missing_optionals() {
        let response = TransactionResponse::new(
            TransactionId::new("1"),
            ProviderName::new("Remitly"),
            TransactionStatus::Failed,
        )
        .with_error_message("insufficient funds");

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("amount").is_none());
        assert_eq!(json["error_message"], "insufficient funds");

        let back: TransactionResponse = serde_json::from_value(json).unwrap();
        assert_eq!(back, response);
    }
}
