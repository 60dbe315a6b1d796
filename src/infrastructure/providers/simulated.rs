//! # Simulated Provider
//!
//! In-process provider with a configurable fee model, fixed exchange rate
//! and delivery label.
//!
//! Issued transfers are kept in a [`DashMap`] so `get_transaction_status`
//! round-trips and [`SimulatedProvider::settle`] can move a transfer to a
//! terminal state. Optional latency and failure injection make it usable
//! for exercising the hub's partial-failure and timeout handling.
//!
//! # Examples
//!
//! ```
//! use remittance_hub::infrastructure::providers::simulated::{
//!     FeeModel, SimulatedProvider, SimulatedProviderConfig,
//! };
//! use rust_decimal::Decimal;
//!
//! let provider = SimulatedProvider::new(
//!     SimulatedProviderConfig::new("Sandbox", Decimal::new(118, 2))
//!         .with_fee_model(FeeModel::Flat(Decimal::new(599, 2)))
//!         .with_currencies(&["USD", "PHP"])
//!         .with_countries(&["US", "PH"]),
//! )
//! .unwrap();
//! assert_eq!(provider.transfer_count(), 0);
//! ```

use crate::domain::entities::{
    ExchangeRate, QuoteBuilder, RemittanceQuote, TransactionRequest, TransactionResponse,
};
use crate::domain::value_objects::{
    CheckedArithmetic, CountryCode, Currency, Money, ProviderName, Rounding, Timestamp,
    TransactionId, TransactionStatus,
};
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::traits::{DEFAULT_PROVIDER_TIMEOUT_MS, RemittanceProvider};
use async_trait::async_trait;
use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// How the simulated provider prices its fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FeeModel {
    /// A fixed fee in the source currency.
    Flat(Decimal),
    /// A percentage of the sent amount (`2` means 2%).
    Percentage(Decimal),
}

impl FeeModel {
    /// Computes the fee for `amount`, rounded to the currency's minor unit.
    ///
    /// # Errors
    ///
    /// Returns an error on arithmetic overflow.
    pub fn fee_for(&self, amount: Money, rounding: Rounding) -> ProviderResult<Money> {
        let fee = match self {
            Self::Flat(fee) => *fee,
            Self::Percentage(percent) => {
                let raw = amount
                    .amount()
                    .safe_mul(*percent)
                    .and_then(|v| v.safe_div(Decimal::ONE_HUNDRED))
                    .map_err(|e| ProviderError::internal_error(format!("fee calculation failed: {e}")))?;
                rounding.apply(raw, amount.currency().minor_units())
            }
        };
        Ok(Money::new(fee, amount.currency()))
    }
}

impl Default for FeeModel {
    fn default() -> Self {
        Self::Flat(Decimal::ZERO)
    }
}

impl fmt::Display for FeeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat(fee) => write!(f, "flat {fee}"),
            Self::Percentage(pct) => write!(f, "{pct}%"),
        }
    }
}

/// Longest quote validity the simulated provider accepts: seven days.
pub const MAX_QUOTE_VALIDITY_SECS: i64 = 7 * 24 * 60 * 60;

fn default_estimated_time() -> String {
    "Minutes".to_string()
}

fn default_quote_validity_secs() -> i64 {
    15 * 60
}

fn default_timeout_ms() -> u64 {
    DEFAULT_PROVIDER_TIMEOUT_MS
}

fn default_id_prefix() -> String {
    "SIM".to_string()
}

/// Configuration for [`SimulatedProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedProviderConfig {
    name: String,
    exchange_rate: Decimal,
    #[serde(default)]
    fee_model: FeeModel,
    #[serde(default)]
    indicative_fee: Decimal,
    #[serde(default)]
    currencies: Vec<String>,
    #[serde(default)]
    countries: Vec<String>,
    #[serde(default = "default_estimated_time")]
    estimated_time: String,
    #[serde(default = "default_quote_validity_secs")]
    quote_validity_secs: i64,
    #[serde(default)]
    rounding: Rounding,
    #[serde(default = "default_id_prefix")]
    id_prefix: String,
    #[serde(default)]
    tracking_base_url: Option<String>,
    #[serde(default)]
    latency_ms: u64,
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
}

impl SimulatedProviderConfig {
    /// Creates a configuration with a zero flat fee and no supported routes.
    #[must_use]
    pub fn new(name: impl Into<String>, exchange_rate: Decimal) -> Self {
        Self {
            name: name.into(),
            exchange_rate,
            fee_model: FeeModel::default(),
            indicative_fee: Decimal::ZERO,
            currencies: Vec::new(),
            countries: Vec::new(),
            estimated_time: default_estimated_time(),
            quote_validity_secs: default_quote_validity_secs(),
            rounding: Rounding::default(),
            id_prefix: default_id_prefix(),
            tracking_base_url: None,
            latency_ms: 0,
            timeout_ms: DEFAULT_PROVIDER_TIMEOUT_MS,
        }
    }

    /// Sets the fee model.
    #[must_use]
    pub fn with_fee_model(mut self, fee_model: FeeModel) -> Self {
        self.fee_model = fee_model;
        self
    }

    /// Sets the fee reported with indicative exchange rates.
    #[must_use]
    pub fn with_indicative_fee(mut self, fee: Decimal) -> Self {
        self.indicative_fee = fee;
        self
    }

    /// Sets the supported currency codes.
    #[must_use]
    pub fn with_currencies(mut self, codes: &[&str]) -> Self {
        self.currencies = codes.iter().map(|c| (*c).to_string()).collect();
        self
    }

    /// Sets the supported country codes.
    #[must_use]
    pub fn with_countries(mut self, codes: &[&str]) -> Self {
        self.countries = codes.iter().map(|c| (*c).to_string()).collect();
        self
    }

    /// Sets the delivery estimate label.
    #[must_use]
    pub fn with_estimated_time(mut self, label: impl Into<String>) -> Self {
        self.estimated_time = label.into();
        self
    }

    /// Sets how long quotes stay valid.
    #[must_use]
    pub fn with_quote_validity_secs(mut self, secs: i64) -> Self {
        self.quote_validity_secs = secs;
        self
    }

    /// Sets the rounding used for fees and received amounts.
    #[must_use]
    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Sets the transaction id prefix.
    #[must_use]
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Sets the tracking URL base; ids are appended after a slash.
    #[must_use]
    pub fn with_tracking_base_url(mut self, url: impl Into<String>) -> Self {
        self.tracking_base_url = Some(url.into());
        self
    }

    /// Delays every call by `latency_ms`.
    #[must_use]
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Sets the advertised call budget.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Returns the provider name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// In-process provider adapter.
#[derive(Debug)]
pub struct SimulatedProvider {
    name: ProviderName,
    config: SimulatedProviderConfig,
    currencies: BTreeSet<Currency>,
    countries: BTreeSet<CountryCode>,
    failure: Option<ProviderError>,
    transfers: DashMap<TransactionId, TransactionResponse>,
    sequence: AtomicU64,
}

impl SimulatedProvider {
    /// Creates the adapter.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidRequest` if a currency or country code
    /// in the configuration is unknown, if the exchange rate is not
    /// positive, or if the quote validity is outside
    /// `1..=MAX_QUOTE_VALIDITY_SECS`.
    pub fn new(config: SimulatedProviderConfig) -> ProviderResult<Self> {
        if config.exchange_rate <= Decimal::ZERO {
            return Err(ProviderError::invalid_request(format!(
                "{}: exchange rate {} must be positive",
                config.name, config.exchange_rate
            )));
        }
        if !(1..=MAX_QUOTE_VALIDITY_SECS).contains(&config.quote_validity_secs) {
            return Err(ProviderError::invalid_request(format!(
                "{}: quote validity {}s must be between 1 and {MAX_QUOTE_VALIDITY_SECS}",
                config.name, config.quote_validity_secs
            )));
        }
        let currencies = config
            .currencies
            .iter()
            .map(|code| {
                code.parse::<Currency>()
                    .map_err(|e| ProviderError::invalid_request(e.to_string()))
            })
            .collect::<ProviderResult<BTreeSet<_>>>()?;
        let countries = config
            .countries
            .iter()
            .map(|code| CountryCode::new(code).map_err(|e| ProviderError::invalid_request(e.to_string())))
            .collect::<ProviderResult<BTreeSet<_>>>()?;

        Ok(Self {
            name: ProviderName::new(config.name.clone()),
            config,
            currencies,
            countries,
            failure: None,
            transfers: DashMap::new(),
            sequence: AtomicU64::new(0),
        })
    }

    /// Sandbox stand-in for Remitly: 2% fee, rate 1.15, quotes valid 30 minutes.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in values; the signature matches [`new`](Self::new).
    pub fn remitly_sandbox() -> ProviderResult<Self> {
        Self::new(
            SimulatedProviderConfig::new("Remitly", Decimal::new(115, 2))
                .with_fee_model(FeeModel::Percentage(Decimal::new(2, 0)))
                .with_indicative_fee(Decimal::new(3, 0))
                .with_currencies(&["USD", "EUR", "PHP", "INR", "MXN"])
                .with_countries(&["US", "PH", "IN", "MX", "GB"])
                .with_estimated_time("Minutes to hours")
                .with_quote_validity_secs(30 * 60)
                .with_id_prefix("REM")
                .with_tracking_base_url("https://remitly.com/track"),
        )
    }

    /// Sandbox stand-in for WorldRemit: 5.99 flat fee, rate 1.18, quotes valid 15 minutes.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in values; the signature matches [`new`](Self::new).
    pub fn worldremit_sandbox() -> ProviderResult<Self> {
        Self::new(
            SimulatedProviderConfig::new("WorldRemit", Decimal::new(118, 2))
                .with_fee_model(FeeModel::Flat(Decimal::new(599, 2)))
                .with_indicative_fee(Decimal::new(599, 2))
                .with_currencies(&["USD", "EUR", "GBP", "INR", "PHP"])
                .with_countries(&["US", "GB", "IN", "PH", "KE", "GH"])
                .with_estimated_time("Minutes")
                .with_quote_validity_secs(15 * 60)
                .with_id_prefix("WR")
                .with_tracking_base_url("https://worldremit.com/track"),
        )
    }

    /// Makes every subsequent call fail with `error`.
    #[must_use]
    pub fn failing_with(mut self, error: ProviderError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Number of transfers issued so far.
    #[must_use]
    pub fn transfer_count(&self) -> usize {
        self.transfers.len()
    }

    /// Moves a transfer to a new status, as the provider's back office would.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::TransactionNotFound` for an unknown id, or
    /// `ProviderError::InvalidRequest` if the transfer is already terminal.
    pub fn settle(
        &self,
        transaction_id: &TransactionId,
        status: TransactionStatus,
    ) -> ProviderResult<TransactionResponse> {
        let mut entry = self
            .transfers
            .get_mut(transaction_id)
            .ok_or_else(|| ProviderError::transaction_not_found(transaction_id.clone()))?;

        if entry.is_terminal() {
            return Err(ProviderError::invalid_request(format!(
                "transaction {transaction_id} is already {}",
                entry.status()
            )));
        }

        let mut updated = TransactionResponse::new(transaction_id.clone(), self.name.clone(), status)
            .with_estimated_time(entry.estimated_time().to_string());
        if let (Some(amount), Some(fee)) = (entry.amount(), entry.fee()) {
            updated = updated.with_amounts(amount, fee);
        }
        if let Some(rate) = entry.exchange_rate() {
            updated = updated.with_exchange_rate(rate);
        }
        if let Some(url) = entry.tracking_url() {
            updated = updated.with_tracking_url(url.to_string());
        }
        *entry = updated.clone();
        tracing::info!(provider = %self.name, transaction_id = %transaction_id, %status, "simulated transfer settled");
        Ok(updated)
    }

    async fn simulate_call(&self) -> ProviderResult<()> {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        }
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    /// Both currencies and the recipient's country must be served.
    fn ensure_corridor(&self, request: &TransactionRequest) -> ProviderResult<()> {
        let served = self.currencies.contains(&request.source_currency())
            && self.currencies.contains(&request.target_currency())
            && self
                .countries
                .contains(request.recipient().address().country_code());
        if served {
            Ok(())
        } else {
            Err(ProviderError::unsupported_corridor(request.corridor()))
        }
    }

    fn next_transaction_id(&self) -> TransactionId {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed).saturating_add(1);
        TransactionId::new(format!(
            "{}_{}_{}",
            self.config.id_prefix,
            Timestamp::now().timestamp_secs(),
            seq
        ))
    }

    fn tracking_url(&self, transaction_id: &TransactionId) -> Option<String> {
        self.config
            .tracking_base_url
            .as_ref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), transaction_id))
    }
}

#[async_trait]
impl RemittanceProvider for SimulatedProvider {
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
        self.simulate_call().await?;
        self.ensure_corridor(request)?;
        let fee = self.config.fee_model.fee_for(request.amount(), self.config.rounding)?;

        Ok(QuoteBuilder::new(
            self.name.clone(),
            request.amount(),
            fee,
            self.config.exchange_rate,
            request.target_currency(),
            Timestamp::now().add_secs(self.config.quote_validity_secs),
        )
        .estimated_time(self.config.estimated_time.clone())
        .rounding(self.config.rounding)
        .try_build()?)
    }

    async fn send_money(&self, request: &TransactionRequest) -> ProviderResult<TransactionResponse> {
        self.simulate_call().await?;
        self.ensure_corridor(request)?;
        let fee = self.config.fee_model.fee_for(request.amount(), self.config.rounding)?;
        let transaction_id = self.next_transaction_id();

        let mut response = TransactionResponse::new(
            transaction_id.clone(),
            self.name.clone(),
            TransactionStatus::Pending,
        )
        .with_amounts(request.amount(), fee)
        .with_exchange_rate(self.config.exchange_rate)
        .with_estimated_time(self.config.estimated_time.clone());
        if let Some(url) = self.tracking_url(&transaction_id) {
            response = response.with_tracking_url(url);
        }

        self.transfers.insert(transaction_id.clone(), response.clone());
        tracing::info!(
            provider = %self.name,
            transaction_id = %transaction_id,
            reference = request.reference(),
            "simulated transfer created"
        );
        Ok(response)
    }

    async fn get_transaction_status(
        &self,
        transaction_id: &TransactionId,
    ) -> ProviderResult<TransactionResponse> {
        self.simulate_call().await?;
        self.transfers
            .get(transaction_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ProviderError::transaction_not_found(transaction_id.clone()))
    }

    async fn get_exchange_rate(&self, from: Currency, to: Currency) -> ProviderResult<ExchangeRate> {
        self.simulate_call().await?;
        Ok(ExchangeRate::new(
            self.name.clone(),
            from,
            to,
            self.config.exchange_rate,
            Money::new(self.config.indicative_fee, from),
            Timestamp::now().add_secs(self.config.quote_validity_secs),
        )?)
    }
}
