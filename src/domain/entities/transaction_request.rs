//! # Transaction Request
//!
//! A customer's intent to send money, as handed to every provider.
//!
//! Requests are built once per customer operation and never mutated; the hub
//! and the adapters only ever see `&TransactionRequest`.
//!
//! # Examples
//!
//! ```
//! use remittance_hub::domain::entities::{Address, Recipient, TransactionRequest};
//! use remittance_hub::domain::value_objects::{
//!     CountryCode, Currency, Money, PaymentMethod, RecipientId, SenderId,
//! };
//! use rust_decimal::Decimal;
//!
//! let recipient = Recipient::new(
//!     RecipientId::new("recipient-123"),
//!     "John Doe",
//!     Address::in_country(CountryCode::new("PH").unwrap()),
//! );
//!
//! let request = TransactionRequest::builder(
//!     SenderId::new("sender-456"),
//!     CountryCode::new("US").unwrap(),
//!     recipient,
//!     Money::new(Decimal::new(1000, 0), Currency::USD),
//!     Currency::PHP,
//! )
//! .payment_method(PaymentMethod::BankTransfer)
//! .purpose("Family support")
//! .reference("REF-001")
//! .build()
//! .unwrap();
//!
//! assert_eq!(request.corridor().to_string(), "US->PH USD/PHP");
//! ```

use crate::domain::entities::recipient::Recipient;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{
    CountryCode, Corridor, Currency, Money, PaymentMethod, SenderId,
};
use serde::{Deserialize, Serialize};

/// An immutable request to move money from a sender to a recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    sender_id: SenderId,
    sender_country: CountryCode,
    recipient: Recipient,
    amount: Money,
    target_currency: Currency,
    payment_method: PaymentMethod,
    purpose: String,
    reference: String,
}

impl TransactionRequest {
    /// Returns a builder for constructing a request.
    #[must_use]
    pub fn builder(
        sender_id: SenderId,
        sender_country: CountryCode,
        recipient: Recipient,
        amount: Money,
        target_currency: Currency,
    ) -> TransactionRequestBuilder {
        TransactionRequestBuilder::new(
            sender_id,
            sender_country,
            recipient,
            amount,
            target_currency,
        )
    }

    /// Returns the sender id.
    #[inline]
    #[must_use]
    pub fn sender_id(&self) -> &SenderId {
        &self.sender_id
    }

    /// Returns the country the sender pays from.
    #[inline]
    #[must_use]
    pub fn sender_country(&self) -> &CountryCode {
        &self.sender_country
    }

    /// Returns the recipient.
    #[inline]
    #[must_use]
    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    /// Returns the amount the sender wants to send, in the source currency.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Returns the source currency.
    #[inline]
    #[must_use]
    pub fn source_currency(&self) -> Currency {
        self.amount.currency()
    }

    /// Returns the currency the recipient receives.
    #[inline]
    #[must_use]
    pub fn target_currency(&self) -> Currency {
        self.target_currency
    }

    /// Returns the payment method.
    #[inline]
    #[must_use]
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Returns the free-text purpose.
    #[inline]
    #[must_use]
    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    /// Returns the caller's reference. Opaque to the hub, forwarded unchanged
    /// so callers can deduplicate non-idempotent sends.
    #[inline]
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Returns the corridor this request travels on.
    #[must_use]
    pub fn corridor(&self) -> Corridor {
        Corridor::new(
            self.sender_country.clone(),
            self.recipient.address().country_code().clone(),
            self.source_currency(),
            self.target_currency,
        )
    }
}

/// Builder for [`TransactionRequest`].
#[derive(Debug, Clone)]
#[must_use = "builders do nothing unless .build() is called"]
pub struct TransactionRequestBuilder {
    sender_id: SenderId,
    sender_country: CountryCode,
    recipient: Recipient,
    amount: Money,
    target_currency: Currency,
    payment_method: PaymentMethod,
    purpose: String,
    reference: String,
}

impl TransactionRequestBuilder {
    /// Creates a builder with the required fields.
    pub fn new(
        sender_id: SenderId,
        sender_country: CountryCode,
        recipient: Recipient,
        amount: Money,
        target_currency: Currency,
    ) -> Self {
        Self {
            sender_id,
            sender_country,
            recipient,
            amount,
            target_currency,
            payment_method: PaymentMethod::default(),
            purpose: String::new(),
            reference: String::new(),
        }
    }

    /// Sets the payment method.
    pub fn payment_method(mut self, payment_method: PaymentMethod) -> Self {
        self.payment_method = payment_method;
        self
    }

    /// Sets the purpose.
    pub fn purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = purpose.into();
        self
    }

    /// Sets the caller reference.
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Validates and builds the request.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidAmount` if the amount is not positive
    /// - `DomainError::Validation` if the sender or recipient id is blank
    pub fn build(self) -> DomainResult<TransactionRequest> {
        if !self.amount.is_positive() {
            return Err(DomainError::InvalidAmount(format!(
                "send amount {} must be positive",
                self.amount
            )));
        }
        if self.sender_id.is_blank() {
            return Err(DomainError::validation("sender id must not be blank"));
        }
        if self.recipient.id().is_blank() {
            return Err(DomainError::validation("recipient id must not be blank"));
        }

        Ok(TransactionRequest {
            sender_id: self.sender_id,
            sender_country: self.sender_country,
            recipient: self.recipient,
            amount: self.amount,
            target_currency: self.target_currency,
            payment_method: self.payment_method,
            purpose: self.purpose,
            reference: self.reference,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::recipient::Address;
    use crate::domain::value_objects::RecipientId;
    use rust_decimal::Decimal;

    fn recipient(id: &str, country: &str) -> Recipient {
        Recipient::new(
            RecipientId::new(id),
            "Maria Santos",
            Address::in_country(CountryCode::new(country).unwrap()),
        )
    }

    fn builder(amount: Decimal) -> TransactionRequestBuilder {
        TransactionRequest::builder(
            SenderId::new("sender-1"),
            CountryCode::new("US").unwrap(),
            recipient("recipient-1", "PH"),
            Money::new(amount, Currency::USD),
            Currency::PHP,
        )
    }

    #[test]
    fn build_with_defaults() {
        let request = builder(Decimal::new(250, 0)).build().unwrap();
        assert_eq!(request.payment_method(), PaymentMethod::BankTransfer);
        assert_eq!(request.purpose(), "");
        assert_eq!(request.reference(), "");
        assert_eq!(request.source_currency(), Currency::USD);
        assert_eq!(request.target_currency(), Currency::PHP);
    }

    #[test]
    fn build_rejects_non_positive_amount() {
        let err = builder(Decimal::ZERO).build().unwrap_err();
        assert!(matches!(err, DomainError::InvalidAmount(_)));
    }

    #[test]
    fn build_rejects_blank_sender() {
        let err = TransactionRequest::builder(
            SenderId::new(" "),
            CountryCode::new("US").unwrap(),
            recipient("recipient-1", "PH"),
            Money::new(Decimal::ONE, Currency::USD),
            Currency::PHP,
        )
        .build()
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn build_rejects_blank_recipient() {
        let err = TransactionRequest::builder(
            SenderId::new("sender-1"),
            CountryCode::new("US").unwrap(),
            recipient("", "PH"),
            Money::new(Decimal::ONE, Currency::USD),
            Currency::PHP,
        )
        .build()
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn corridor_uses_sender_country_and_recipient_country() {
        let request = TransactionRequest::builder(
            SenderId::new("sender-1"),
            CountryCode::new("GB").unwrap(),
            recipient("recipient-1", "KE"),
            Money::new(Decimal::new(100, 0), Currency::GBP),
            Currency::KES,
        )
        .build()
        .unwrap();

        let corridor = request.corridor();
        assert_eq!(corridor.source_country().as_str(), "GB");
        assert_eq!(corridor.target_country().as_str(), "KE");
        assert_eq!(corridor.source_currency(), Currency::GBP);
        assert_eq!(corridor.target_currency(), Currency::KES);
    }

    #[test]
    fn reference_passes_through_unchanged() {
        let request = builder(Decimal::ONE)
            .reference("  REF/With Spaces  ")
            .build()
            .unwrap();
        assert_eq!(request.reference(), "  REF/With Spaces  ");
    }
}
