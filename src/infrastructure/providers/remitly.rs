//! # Remitly Adapter
//!
//! Adapter for the Remitly partner API. Bearer-token authenticated JSON
//! over HTTPS.

use crate::domain::entities::{
    ExchangeRate, QuoteBuilder, RemittanceQuote, TransactionRequest, TransactionResponse,
};
use crate::domain::value_objects::{
    CountryCode, Currency, Money, PaymentMethod, ProviderName, Timestamp, TransactionId,
    TransactionStatus,
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
pub const REMITLY_PRODUCTION_URL: &str = "https://api.remitly.com";

const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const QUOTE_VALIDITY_SECS: i64 = 30 * 60;
const ESTIMATED_TIME: &str = "Minutes to hours";
const TRACKING_URL: &str = "https://remitly.com/track";

fn default_base_url() -> String {
    REMITLY_PRODUCTION_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Configuration for [`RemitlyProvider`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemitlyConfig {
    api_key: String,
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
}

impl RemitlyConfig {
    /// Creates a configuration for the production API.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Returns the request timeout.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }
}

impl fmt::Debug for RemitlyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemitlyConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

#[derive(Serialize)]
struct QuoteRequestBody<'a> {
    source_currency: Currency,
    target_currency: Currency,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    source_amount: Decimal,
    destination_country: &'a str,
    payment_method: PaymentMethod,
}

#[derive(Debug, Deserialize)]
struct QuoteResponseBody {
    fee: Decimal,
    rate: Decimal,
    #[serde(default)]
    receive_amount: Option<Decimal>,
    #[serde(default)]
    delivery_estimate: Option<String>,
    #[serde(default)]
    expires_at: Option<String>,
}

#[derive(Serialize)]
struct TransferRecipient<'a> {
    id: &'a str,
    name: &'a str,
    country: &'a str,
}

#[derive(Serialize)]
struct TransferRequestBody<'a> {
    sender_id: &'a str,
    recipient: TransferRecipient<'a>,
    source_currency: Currency,
    target_currency: Currency,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    source_amount: Decimal,
    payment_method: PaymentMethod,
    purpose: &'a str,
    reference: &'a str,
}

#[derive(Debug, Deserialize)]
struct TransferResponseBody {
    id: String,
    status: String,
    #[serde(default)]
    fee: Option<Decimal>,
    #[serde(default)]
    rate: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct RateResponseBody {
    rate: Decimal,
    fee: Decimal,
    #[serde(default)]
    expires_at: Option<String>,
}

fn parse_status(status: &str) -> ProviderResult<TransactionStatus> {
    status
        .parse()
        .map_err(|e| ProviderError::protocol_error(format!("unexpected transfer status: {e}")))
}

fn parse_expiry(expires_at: Option<&str>, fallback_secs: i64) -> ProviderResult<Timestamp> {
    match expires_at {
        Some(text) => Timestamp::parse_rfc3339(text)
            .ok_or_else(|| ProviderError::protocol_error(format!("invalid expires_at: '{text}'"))),
        None => Ok(Timestamp::now().add_secs(fallback_secs)),
    }
}

/// Remitly provider adapter.
#[derive(Debug)]
pub struct RemitlyProvider {
    name: ProviderName,
    config: RemitlyConfig,
    client: HttpClient,
    currencies: BTreeSet<Currency>,
    countries: BTreeSet<CountryCode>,
}

impl RemitlyProvider {
    /// Creates the adapter.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built from the
    /// credentials.
    pub fn new(config: RemitlyConfig) -> ProviderResult<Self> {
        let client = HttpClient::with_bearer_token(config.timeout_ms, &config.api_key)?;
        Ok(Self {
            name: ProviderName::new("Remitly"),
            config,
            client,
            currencies: currency_set(&[
                Currency::USD,
                Currency::EUR,
                Currency::PHP,
                Currency::INR,
                Currency::MXN,
            ]),
            countries: country_set(&["US", "PH", "IN", "MX", "GB"]),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl RemittanceProvider for RemitlyProvider {
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
        let body = QuoteRequestBody {
            source_currency: request.source_currency(),
            target_currency: request.target_currency(),
            source_amount: request.amount().amount(),
            destination_country: request.recipient().address().country_code().as_str(),
            payment_method: request.payment_method(),
        };
        let response: QuoteResponseBody = self.client.post(&self.url("/v1/quotes"), &body).await?;
        tracing::debug!(provider = %self.name, fee = %response.fee, rate = %response.rate, "remitly quote received");

        let valid_until = parse_expiry(response.expires_at.as_deref(), QUOTE_VALIDITY_SECS)?;
        let mut builder = QuoteBuilder::new(
            self.name.clone(),
            request.amount(),
            Money::new(response.fee, request.source_currency()),
            response.rate,
            request.target_currency(),
            valid_until,
        )
        .estimated_time(
            response
                .delivery_estimate
                .unwrap_or_else(|| ESTIMATED_TIME.to_string()),
        );
        if let Some(received) = response.receive_amount {
            builder = builder.received_amount(received);
        }
        Ok(builder.try_build()?)
    }

    async fn send_money(&self, request: &TransactionRequest) -> ProviderResult<TransactionResponse> {
        let recipient = request.recipient();
        let body = TransferRequestBody {
            sender_id: request.sender_id().as_str(),
            recipient: TransferRecipient {
                id: recipient.id().as_str(),
                name: recipient.name(),
                country: recipient.address().country_code().as_str(),
            },
            source_currency: request.source_currency(),
            target_currency: request.target_currency(),
            source_amount: request.amount().amount(),
            payment_method: request.payment_method(),
            purpose: request.purpose(),
            reference: request.reference(),
        };
        let transfer: TransferResponseBody = self.client.post(&self.url("/v1/transfers"), &body).await?;
        let status = parse_status(&transfer.status)?;
        tracing::info!(provider = %self.name, transaction_id = %transfer.id, %status, "remitly transfer created");

        let mut response = TransactionResponse::new(
            TransactionId::new(transfer.id.clone()),
            self.name.clone(),
            status,
        )
        .with_estimated_time(ESTIMATED_TIME)
        .with_tracking_url(format!("{TRACKING_URL}/{}", transfer.id));
        if let Some(fee) = transfer.fee {
            response = response.with_amounts(request.amount(), Money::new(fee, request.source_currency()));
        }
        if let Some(rate) = transfer.rate {
            response = response.with_exchange_rate(rate);
        }
        Ok(response)
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

        Ok(TransactionResponse::new(
            transaction_id.clone(),
            self.name.clone(),
            parse_status(&transfer.status)?,
        )
        .with_tracking_url(format!("{TRACKING_URL}/{transaction_id}")))
    }

    async fn get_exchange_rate(&self, from: Currency, to: Currency) -> ProviderResult<ExchangeRate> {
        let response: RateResponseBody = self
            .client
            .get_with_params(&self.url("/v1/rates"), &[("source", from.code()), ("target", to.code())])
            .await?;

        Ok(ExchangeRate::new(
            self.name.clone(),
            from,
            to,
            response.rate,
            Money::new(response.fee, from),
            parse_expiry(response.expires_at.as_deref(), QUOTE_VALIDITY_SECS)?,
        )?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_api_key() {
        let debug = format!("{:?}", RemitlyConfig::new("rk_live_secret"));
        assert!(!debug.contains("rk_live_secret"));
    }

    #[test]
    fn status_parsing() {
        assert_eq!(parse_status("pending").unwrap(), TransactionStatus::Pending);
        assert_eq!(parse_status("COMPLETED").unwrap(), TransactionStatus::Completed);
        assert_eq!(parse_status("canceled").unwrap(), TransactionStatus::Cancelled);
        assert!(matches!(
            parse_status("on_hold").unwrap_err(),
            ProviderError::ProtocolError { .. }
        ));
    }

    #[test]
    fn expiry_parsing() {
        let parsed = parse_expiry(Some("2030-01-01T00:00:00Z"), 60).unwrap();
        assert_eq!(parsed.to_rfc3339(), "2030-01-01T00:00:00+00:00");
        assert!(parse_expiry(Some("tomorrow"), 60).is_err());
        assert!(!parse_expiry(None, 60).unwrap().is_expired());
    }

    #[test]
    fn advertises_supported_routes() {
        let provider = RemitlyProvider::new(RemitlyConfig::new("k")).unwrap();
        assert_eq!(provider.name().as_str(), "Remitly");
        assert!(provider.supported_currencies().contains(&Currency::MXN));
        assert!(!provider.supported_currencies().contains(&Currency::GBP));
        assert!(provider.supported_countries().contains(&CountryCode::new("MX").unwrap()));
    }

    #[test]
    fn url_joins_without_double_slash() {
        let provider =
            RemitlyProvider::new(RemitlyConfig::new("k").with_base_url("http://localhost:1/")).unwrap();
        assert_eq!(provider.url("/v1/quotes"), "http://localhost:1/v1/quotes");
    }
}
