//! # Wise Adapter
//!
//! Adapter for the Wise (formerly TransferWise) public API.
//!
//! Authenticates with a bearer token. Transfers are created against a fresh
//! quote, so `send_money` issues two calls: quote, then transfer.
//!
//! # Examples
//!
//! ```
//! use remittance_hub::infrastructure::providers::wise::{WiseConfig, WiseProvider};
//!
//! let config = WiseConfig::new("sk_test_123", "profile-1").with_sandbox(true);
//! let provider = WiseProvider::new(config).unwrap();
//! assert_eq!(provider.base_url(), "https://api.sandbox.transferwise.tech");
//! ```

use crate::domain::entities::{
    ExchangeRate, QuoteBuilder, RemittanceQuote, TransactionRequest, TransactionResponse,
};
use crate::domain::value_objects::{
    CountryCode, Currency, Money, ProviderName, Timestamp, TransactionId, TransactionStatus,
};
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::http_client::HttpClient;
use crate::infrastructure::providers::traits::{RemittanceProvider, country_set, currency_set};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Production API base URL.
pub const WISE_PRODUCTION_URL: &str = "https://api.transferwise.com";

/// Sandbox API base URL.
pub const WISE_SANDBOX_URL: &str = "https://api.sandbox.transferwise.tech";

const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const QUOTE_VALIDITY_SECS: i64 = 24 * 60 * 60;
const RATE_VALIDITY_SECS: i64 = 60 * 60;
const ESTIMATED_TIME: &str = "1-2 business days";
const TRACKING_URL: &str = "https://wise.com/track";

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Configuration for [`WiseProvider`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WiseConfig {
    api_key: String,
    profile_id: String,
    #[serde(default)]
    sandbox: bool,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
    #[serde(default = "default_indicative_fee")]
    indicative_fee: Decimal,
}

fn default_indicative_fee() -> Decimal {
    Decimal::new(5, 0)
}

impl WiseConfig {
    /// Creates a configuration for the production API.
    #[must_use]
    pub fn new(api_key: impl Into<String>, profile_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            profile_id: profile_id.into(),
            sandbox: false,
            base_url: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            indicative_fee: default_indicative_fee(),
        }
    }

    /// Targets the sandbox environment.
    #[must_use]
    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets the fee reported alongside indicative rates.
    #[must_use]
    pub fn with_indicative_fee(mut self, fee: Decimal) -> Self {
        self.indicative_fee = fee;
        self
    }

    /// Returns the profile id.
    #[inline]
    #[must_use]
    pub fn profile_id(&self) -> &str {
        &self.profile_id
    }

    /// Returns the request timeout.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Returns the effective base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        let url = match (&self.base_url, self.sandbox) {
            (Some(url), _) => url.as_str(),
            (None, true) => WISE_SANDBOX_URL,
            (None, false) => WISE_PRODUCTION_URL,
        };
        url.trim_end_matches('/').to_string()
    }
}

impl fmt::Debug for WiseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WiseConfig")
            .field("api_key", &"[REDACTED]")
            .field("profile_id", &self.profile_id)
            .field("sandbox", &self.sandbox)
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

/// Ids are numeric in some API versions and strings in others.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(u64),
    Text(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteRequestBody<'a> {
    profile: &'a str,
    source: Currency,
    target: Currency,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    source_amount: Decimal,
    #[serde(rename = "type")]
    quote_type: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResponseBody {
    #[serde(default)]
    id: Option<WireId>,
    fee: Decimal,
    rate: Decimal,
    #[serde(default)]
    target_amount: Option<Decimal>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransferRequestBody<'a> {
    target_account: &'a str,
    quote: String,
    customer_transaction_id: &'a str,
    details: TransferDetails<'a>,
}

#[derive(Serialize)]
struct TransferDetails<'a> {
    reference: &'a str,
}

#[derive(Debug, Deserialize)]
struct TransferResponseBody {
    id: WireId,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RateBody {
    rate: Decimal,
}

/// Maps a Wise transfer state onto the normalized status.
///
/// Wise has many intermediate states; anything not known to be final is
/// reported as pending.
#[must_use]
pub fn map_transfer_status(status: &str) -> TransactionStatus {
    match status {
        "outgoing_payment_sent" => TransactionStatus::Completed,
        "cancelled" => TransactionStatus::Cancelled,
        "funds_refunded" | "bounced_back" | "charged_back" => TransactionStatus::Failed,
        _ => TransactionStatus::Pending,
    }
}

/// Wise provider adapter.
#[derive(Debug)]
pub struct WiseProvider {
    name: ProviderName,
    config: WiseConfig,
    base_url: String,
    client: HttpClient,
    currencies: BTreeSet<Currency>,
    countries: BTreeSet<CountryCode>,
}

impl WiseProvider {
    /// Creates the adapter.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built from the
    /// credentials.
    pub fn new(config: WiseConfig) -> ProviderResult<Self> {
        let client = HttpClient::with_bearer_token(config.timeout_ms, &config.api_key)?;
        Ok(Self {
            name: ProviderName::new("Wise"),
            base_url: config.base_url(),
            config,
            client,
            currencies: currency_set(&[
                Currency::USD,
                Currency::EUR,
                Currency::GBP,
                Currency::INR,
                Currency::PHP,
            ]),
            countries: country_set(&["US", "GB", "IN", "PH", "DE", "FR", "ES"]),
        })
    }

    /// Returns the base URL in use.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn create_quote(&self, request: &TransactionRequest) -> ProviderResult<QuoteResponseBody> {
        let body = QuoteRequestBody {
            profile: self.config.profile_id(),
            source: request.source_currency(),
            target: request.target_currency(),
            source_amount: request.amount().amount(),
            quote_type: "REGULAR",
        };
        self.client.post(&self.url("/v1/quotes"), &body).await
    }
}

#[async_trait]
impl RemittanceProvider for WiseProvider {
    fn name(&self) -> &ProviderName {
        &self.name
    }

    fn supported_currencies(&self) -> &BTreeSet<Currency> {
        &self.currencies
    }

    fn supported_countries(&self) -> &BTreeSet<CountryCode> {
        &self.countries
    }

    fn timeout_ms(&self) -> u64 {
        self.config.timeout_ms
    }

    async fn get_quote(&self, request: &TransactionRequest) -> ProviderResult<RemittanceQuote> {
        let response = self.create_quote(request).await?;
        tracing::debug!(provider = %self.name, fee = %response.fee, rate = %response.rate, "wise quote received");

        let mut builder = QuoteBuilder::new(
            self.name.clone(),
            request.amount(),
            Money::new(response.fee, request.source_currency()),
            response.rate,
            request.target_currency(),
            Timestamp::now().add_secs(QUOTE_VALIDITY_SECS),
        )
        .estimated_time(ESTIMATED_TIME);
        if let Some(target_amount) = response.target_amount {
            builder = builder.received_amount(target_amount);
        }
        Ok(builder.try_build()?)
    }

    async fn send_money(&self, request: &TransactionRequest) -> ProviderResult<TransactionResponse> {
        let quote = self.create_quote(request).await?;
        let quote_id = quote
            .id
            .as_ref()
            .ok_or_else(|| ProviderError::protocol_error("quote response has no id"))?;

        let body = TransferRequestBody {
            target_account: request.recipient().id().as_str(),
            quote: quote_id.to_string(),
            customer_transaction_id: request.reference(),
            details: TransferDetails {
                reference: request.purpose(),
            },
        };
        let transfer: TransferResponseBody = self.client.post(&self.url("/v1/transfers"), &body).await?;

        let id = transfer.id.to_string();
        let status = transfer
            .status
            .as_deref()
            .map_or(TransactionStatus::Pending, map_transfer_status);
        tracing::info!(provider = %self.name, transaction_id = %id, "wise transfer created");

        Ok(TransactionResponse::new(TransactionId::new(id.clone()), self.name.clone(), status)
            .with_amounts(request.amount(), Money::new(quote.fee, request.source_currency()))
            .with_exchange_rate(quote.rate)
            .with_estimated_time(ESTIMATED_TIME)
            .with_tracking_url(format!("{TRACKING_URL}/{id}")))
    }

    async fn get_transaction_status(
        &self,
        transaction_id: &TransactionId,
    ) -> ProviderResult<TransactionResponse> {
        let url = self.url(&format!("/v1/transfers/{transaction_id}"));
        let transfer: TransferResponseBody = self
            .client
            .get_optional(&url, HeaderMap::new())
            .await?
            .ok_or_else(|| ProviderError::transaction_not_found(transaction_id.clone()))?;

        let status_text = transfer
            .status
            .ok_or_else(|| ProviderError::protocol_error("transfer response has no status"))?;

        Ok(TransactionResponse::new(
            transaction_id.clone(),
            self.name.clone(),
            map_transfer_status(&status_text),
        )
        .with_tracking_url(format!("{TRACKING_URL}/{transaction_id}")))
    }

    async fn get_exchange_rate(&self, from: Currency, to: Currency) -> ProviderResult<ExchangeRate> {
        let rates: Vec<RateBody> = self
            .client
            .get_with_params(&self.url("/v1/rates"), &[("source", from.code()), ("target", to.code())])
            .await?;

        let rate = rates
            .first()
            .ok_or_else(|| ProviderError::quote_unavailable(format!("no exchange rate found for {from}/{to}")))?;

        Ok(ExchangeRate::new(
            self.name.clone(),
            from,
            to,
            rate.rate,
            Money::new(self.config.indicative_fee, from),
            Timestamp::now().add_secs(RATE_VALIDITY_SECS),
        )?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod config {
        use super::*;

        #[test]
        fn base_url_selection() {
            assert_eq!(WiseConfig::new("k", "p").base_url(), WISE_PRODUCTION_URL);
            assert_eq!(
                WiseConfig::new("k", "p").with_sandbox(true).base_url(),
                WISE_SANDBOX_URL
            );
            assert_eq!(
                WiseConfig::new("k", "p")
                    .with_sandbox(true)
                    .with_base_url("http://127.0.0.1:9000/")
                    .base_url(),
                "http://127.0.0.1:9000"
            );
        }

        #[test]
        fn debug_redacts_api_key() {
            let config = WiseConfig::new("sk_live_secret", "p");
            let debug = format!("{config:?}");
            assert!(!debug.contains("sk_live_secret"));
            assert!(debug.contains("REDACTED"));
        }

        #[test]
        fn deserializes_with_defaults() {
            let config: WiseConfig =
                serde_json::from_str(r#"{"api_key":"k","profile_id":"42"}"#).unwrap();
            assert_eq!(config.timeout_ms(), DEFAULT_TIMEOUT_MS);
            assert_eq!(config.profile_id(), "42");
            assert_eq!(config.base_url(), WISE_PRODUCTION_URL);
        }
    }

    #[test]
    fn status_mapping() {
        assert_eq!(map_transfer_status("outgoing_payment_sent"), TransactionStatus::Completed);
        assert_eq!(map_transfer_status("cancelled"), TransactionStatus::Cancelled);
        assert_eq!(map_transfer_status("funds_refunded"), TransactionStatus::Failed);
        assert_eq!(map_transfer_status("processing"), TransactionStatus::Pending);
        assert_eq!(map_transfer_status("incoming_payment_waiting"), TransactionStatus::Pending);
    }

    #[test]
    fn quote_body_serializes_amount_as_number() {
        let body = QuoteRequestBody {
            profile: "42",
            source: Currency::USD,
            target: Currency::PHP,
            source_amount: Decimal::new(100050, 2),
            quote_type: "REGULAR",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["sourceAmount"], serde_json::json!(1000.5));
        assert_eq!(json["source"], "USD");
        assert_eq!(json["type"], "REGULAR");
    }

    #[test]
    fn wire_id_accepts_number_or_string() {
        let numeric: WireId = serde_json::from_str("468956").unwrap();
        let text: WireId = serde_json::from_str("\"abc-1\"").unwrap();
        assert_eq!(numeric.to_string(), "468956");
        assert_eq!(text.to_string(), "abc-1");
    }

    #[test]
    fn advertises_supported_routes() {
        let provider = WiseProvider::new(WiseConfig::new("k", "p")).unwrap();
        assert_eq!(provider.name().as_str(), "Wise");
        assert!(provider.supported_currencies().contains(&Currency::PHP));
        assert!(!provider.supported_currencies().contains(&Currency::MXN));
        assert!(provider.supported_countries().contains(&CountryCode::new("DE").unwrap()));
        assert_eq!(provider.timeout_ms(), DEFAULT_TIMEOUT_MS);
    }
}
