//! # Recipient
//!
//! Who receives a transfer and where they live.

use crate::domain::value_objects::{CountryCode, RecipientId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Postal address of a recipient.
///
/// The country code drives corridor eligibility; the other fields are
/// forwarded to providers as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street and number.
    #[serde(default)]
    pub street: String,
    /// City.
    #[serde(default)]
    pub city: String,
    /// State, province or region.
    #[serde(default)]
    pub state: String,
    /// Postal code.
    #[serde(default)]
    pub postal_code: String,
    /// Human-readable country name.
    #[serde(default)]
    pub country: String,
    /// ISO-3166 alpha-2 code.
    pub country_code: CountryCode,
}

impl Address {
    /// Creates an address with only the country code set.
    #[must_use]
    pub fn in_country(country_code: CountryCode) -> Self {
        Self {
            street: String::new(),
            city: String::new(),
            state: String::new(),
            postal_code: String::new(),
            country: String::new(),
            country_code,
        }
    }

    /// Returns the country code.
    #[inline]
    #[must_use]
    pub fn country_code(&self) -> &CountryCode {
        &self.country_code
    }
}

/// The person or business receiving the money.
///
/// # Examples
///
/// ```
/// use remittance_hub::domain::entities::{Address, Recipient};
/// use remittance_hub::domain::value_objects::{CountryCode, RecipientId};
///
/// let recipient = Recipient::new(
///     RecipientId::new("recipient-123"),
///     "John Doe",
///     Address::in_country(CountryCode::new("PH").unwrap()),
/// )
/// .with_email("john@example.com")
/// .with_bank_detail("account_number", "0012345678");
///
/// assert_eq!(recipient.address().country_code().as_str(), "PH");
/// assert_eq!(recipient.bank_details().get("account_number").map(String::as_str), Some("0012345678"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    id: RecipientId,
    name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    address: Address,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    bank_details: BTreeMap<String, String>,
}

impl Recipient {
    /// Creates a recipient.
    #[must_use]
    pub fn new(id: RecipientId, name: impl Into<String>, address: Address) -> Self {
        Self {
            id,
            name: name.into(),
            email: None,
            phone: None,
            address,
            bank_details: BTreeMap::new(),
        }
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Adds a bank detail entry (account number, IBAN, IFSC, ...).
    #[must_use]
    pub fn with_bank_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.bank_details.insert(key.into(), value.into());
        self
    }

    /// Returns the recipient id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &RecipientId {
        &self.id
    }

    /// Returns the recipient name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address, if any.
    #[inline]
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the phone number, if any.
    #[inline]
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the address.
    #[inline]
    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Returns the bank details.
    #[inline]
    #[must_use]
    pub fn bank_details(&self) -> &BTreeMap<String, String> {
        &self.bank_details
    }
}
