//! # WorldRemit Adapter
//!
//! Adapter for the WorldRemit API. Every request is signed: the adapter
//! sends `X-API-Key`, `X-Timestamp` (Unix seconds) and `X-Signature`, the
//! hex HMAC-SHA256 of `METHOD \n endpoint \n timestamp \n body` keyed by the
//! API secret. The endpoint includes the query string.

use crate::domain::entities::{
    ExchangeRate, QuoteBuilder, RemittanceQuote, TransactionRequest, TransactionResponse,
};
use crate::domain::value_objects::{
    CountryCode, Currency, Money, PaymentMethod, ProviderName, Timestamp, TransactionId,
    TransactionStatus,
};
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::http_client::HttpClient;
use crate::infrastructure::providers::signing::RequestSigner;
use crate::infrastructure::providers::traits::{RemittanceProvider, country_set, currency_set};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Production API base URL.
pub const WORLDREMIT_PRODUCTION_URL: &str = "https://api.worldremit.com";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";
/// Header carrying the signing timestamp.
pub const TIMESTAMP_HEADER: &str = "x-timestamp";
/// Header carrying the hex signature.
pub const SIGNATURE_HEADER: &str = "x-signature";

const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const QUOTE_VALIDITY_SECS: i64 = 15 * 60;
const ESTIMATED_TIME: &str = "Minutes";
const TRACKING_URL: &str = "https://worldremit.com/track";

fn default_base_url() -> String {
    WORLDREMIT_PRODUCTION_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Configuration for [`WorldRemitProvider`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldRemitConfig {
    api_key: String,
    api_secret: String,
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
}

impl WorldRemitConfig {
    /// Creates a configuration for the production API.
    #[must_use]
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
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

impl fmt::Debug for WorldRemitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorldRemitConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

#[derive(Serialize)]
struct QuoteRequestBody<'a> {
    send_currency: Currency,
    receive_currency: Currency,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    send_amount: Decimal,
    receive_country: &'a str,
    payment_method: PaymentMethod,
}

#[derive(Debug, Deserialize)]
struct QuoteResponseBody {
    fee: Decimal,
    rate: Decimal,
    #[serde(default)]
    receive_amount: Option<Decimal>,
    #[serde(default)]
    delivery_time: Option<String>,
}

#[derive(Serialize)]
struct TransferRequestBody<'a> {
    sender_id: &'a str,
    recipient_id: &'a str,
    recipient_name: &'a str,
    receive_country: &'a str,
    send_currency: Currency,
    receive_currency: Currency,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    send_amount: Decimal,
    payment_method: PaymentMethod,
    purpose: &'a str,
    reference: &'a str,
}

#[derive(Debug, Deserialize)]
struct TransferResponseBody {
    transaction_id: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct RateResponseBody {
    rate: Decimal,
    fee: Decimal,
}

fn parse_status(status: &str) -> ProviderResult<TransactionStatus> {
    status
        .parse()
        .map_err(|e| ProviderError::protocol_error(format!("unexpected transaction status: {e}")))
}

/// WorldRemit provider adapter.
#[derive(Debug)]
pub struct WorldRemitProvider {
    name: ProviderName,
    config: WorldRemitConfig,
    signer: RequestSigner,
    client: HttpClient,
    currencies: BTreeSet<Currency>,
    countries: BTreeSet<CountryCode>,
}

impl WorldRemitProvider {
    /// Creates the adapter.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: WorldRemitConfig) -> ProviderResult<Self> {
        let client = HttpClient::new(config.timeout_ms)?;
        Ok(Self {
            name: ProviderName::new("WorldRemit"),
            signer: RequestSigner::new(config.api_secret.clone()),
            config,
            client,
            currencies: currency_set(&[
                Currency::USD,
                Currency::EUR,
                Currency::GBP,
                Currency::INR,
                Currency::PHP,
            ]),
            countries: country_set(&["US", "GB", "IN", "PH", "KE", "GH"]),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    /// Builds the authentication headers for one request.
    fn signed_headers(&self, method: &str, endpoint: &str, body: &str) -> ProviderResult<HeaderMap> {
        let timestamp = Timestamp::now().timestamp_secs().to_string();
        let signature = self.signer.sign(method, endpoint, &timestamp, body)?;

        let mut api_key = HeaderValue::from_str(&self.config.api_key)
            .map_err(|_| ProviderError::authentication("API key is not a valid header value"))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
        headers.insert(
            HeaderName::from_static(TIMESTAMP_HEADER),
            HeaderValue::from_str(&timestamp)
                .map_err(|e| ProviderError::internal_error(format!("invalid timestamp header: {e}")))?,
        );
        headers.insert(
            HeaderName::from_static(SIGNATURE_HEADER),
            HeaderValue::from_str(&signature)
                .map_err(|e| ProviderError::internal_error(format!("invalid signature header: {e}")))?,
        );
        Ok(headers)
    }

    async fn signed_post<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ProviderResult<T> {
        let payload = serde_json::to_string(body)
            .map_err(|e| ProviderError::internal_error(format!("failed to encode request: {e}")))?;
        let headers = self.signed_headers("POST", endpoint, &payload)?;
        self.client.post_raw(&self.url(endpoint), payload, headers).await
    }
}

#[async_trait]
impl RemittanceProvider for WorldRemitProvider {
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
            send_currency: request.source_currency(),
            receive_currency: request.target_currency(),
            send_amount: request.amount().amount(),
            receive_country: request.recipient().address().country_code().as_str(),
            payment_method: request.payment_method(),
        };
        let response: QuoteResponseBody = self.signed_post("/v1/quotes", &body).await?;
        tracing::debug!(provider = %self.name, fee = %response.fee, rate = %response.rate, "worldremit quote received");

        let mut builder = QuoteBuilder::new(
            self.name.clone(),
            request.amount(),
            Money::new(response.fee, request.source_currency()),
            response.rate,
            request.target_currency(),
            Timestamp::now().add_secs(QUOTE_VALIDITY_SECS),
        )
        .estimated_time(
            response
                .delivery_time
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
            recipient_id: recipient.id().as_str(),
            recipient_name: recipient.name(),
            receive_country: recipient.address().country_code().as_str(),
            send_currency: request.source_currency(),
            receive_currency: request.target_currency(),
            send_amount: request.amount().amount(),
            payment_method: request.payment_method(),
            purpose: request.purpose(),
            reference: request.reference(),
        };
        let transfer: TransferResponseBody = self.signed_post("/v1/transfers", &body).await?;
        let status = parse_status(&transfer.status)?;
        tracing::info!(provider = %self.name, transaction_id = %transfer.transaction_id, %status, "worldremit transfer created");

        Ok(TransactionResponse::new(
            TransactionId::new(transfer.transaction_id.clone()),
            self.name.clone(),
            status,
        )
        .with_estimated_time(ESTIMATED_TIME)
        .with_tracking_url(format!("{TRACKING_URL}/{}", transfer.transaction_id)))
    }

    async fn get_transaction_status(
        &self,
        transaction_id: &TransactionId,
    ) -> ProviderResult<TransactionResponse> {
        let endpoint = format!("/v1/transfers/{transaction_id}");
        let headers = self.signed_headers("GET", &endpoint, "")?;
        let transfer: TransferResponseBody = self
            .client
            .get_optional(&self.url(&endpoint), headers)
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
        let endpoint = format!("/v1/rates?send_currency={from}&receive_currency={to}");
        let headers = self.signed_headers("GET", &endpoint, "")?;
        let response: RateResponseBody = self.client.get_with_headers(&self.url(&endpoint), headers).await?;

        Ok(ExchangeRate::new(
            self.name.clone(),
            from,
            to,
            response.rate,
            Money::new(response.fee, from),
            Timestamp::now().add_secs(QUOTE_VALIDITY_SECS),
        )?)
    }
}
