//! # Remittance Provider Trait
//!
//! Port definition for money-transfer provider integrations.
//!
//! Every provider, whether a live HTTP API or the in-process simulator,
//! implements [`RemittanceProvider`]. The hub only ever holds
//! `Arc<dyn RemittanceProvider>` and never names a concrete adapter.
//!
//! # Examples
//!
//! ```ignore
//! use remittance_hub::infrastructure::providers::traits::RemittanceProvider;
//!
//! #[derive(Debug)]
//! struct MyProvider { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl RemittanceProvider for MyProvider {
//!     // ... implement required methods
//! }
//! ```

use crate::domain::entities::{ExchangeRate, RemittanceQuote, TransactionRequest, TransactionResponse};
use crate::domain::value_objects::{CountryCode, Currency, ProviderName, TransactionId};
use crate::infrastructure::providers::error::ProviderResult;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::fmt;

/// Default per-call budget for provider operations.
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 10_000;

/// Contract every money-transfer provider satisfies.
///
/// # Error Handling
///
/// Methods return `ProviderResult<T>`. Implementations map transport
/// failures, HTTP status codes and malformed payloads onto
/// [`ProviderError`](crate::infrastructure::providers::error::ProviderError)
/// variants and must never panic on upstream data.
///
/// # Concurrency
///
/// The hub calls `get_quote` on many providers at once and may call the
/// same provider from several requests concurrently. Adapters that keep
/// state synchronize it internally.
#[async_trait]
pub trait RemittanceProvider: Send + Sync + fmt::Debug {
    /// Stable, unique name of this provider.
    fn name(&self) -> &ProviderName;

    /// Currencies this provider can send or pay out.
    fn supported_currencies(&self) -> &BTreeSet<Currency>;

    /// Countries this provider operates in.
    fn supported_countries(&self) -> &BTreeSet<CountryCode>;

    /// Budget in milliseconds for a single call to this provider.
    fn timeout_ms(&self) -> u64 {
        DEFAULT_PROVIDER_TIMEOUT_MS
    }

    /// Prices a transfer without committing to it.
    ///
    /// The returned quote always carries an expiry.
    ///
    /// # Errors
    ///
    /// - `ProviderError::QuoteUnavailable` - Provider cannot price the request
    /// - `ProviderError::UnsupportedCorridor` - Corridor not served
    /// - `ProviderError::ProtocolError` - Malformed upstream payload
    /// - transport errors (`Timeout`, `Connection`, `Authentication`, ...)
    async fn get_quote(&self, request: &TransactionRequest) -> ProviderResult<RemittanceQuote>;

    /// Initiates a transfer.
    ///
    /// Not idempotent: two calls create two transfers. The request's
    /// `reference` is forwarded unchanged.
    ///
    /// # Errors
    ///
    /// - `ProviderError::TransferFailed` - Provider refused the transfer
    /// - transport and protocol errors as for [`get_quote`](Self::get_quote)
    async fn send_money(&self, request: &TransactionRequest) -> ProviderResult<TransactionResponse>;

    /// Looks up the current state of a transfer.
    ///
    /// # Errors
    ///
    /// - `ProviderError::TransactionNotFound` - Unknown id
    /// - transport and protocol errors
    async fn get_transaction_status(
        &self,
        transaction_id: &TransactionId,
    ) -> ProviderResult<TransactionResponse>;

    /// Returns an indicative rate for a currency pair.
    ///
    /// # Errors
    ///
    /// - `ProviderError::QuoteUnavailable` - No rate for the pair
    /// - transport and protocol errors
    async fn get_exchange_rate(&self, from: Currency, to: Currency) -> ProviderResult<ExchangeRate>;
}

/// Builds a currency set from a list.
#[must_use]
pub fn currency_set(currencies: &[Currency]) -> BTreeSet<Currency> {
    currencies.iter().copied().collect()
}

/// Builds a country set from ISO codes, skipping any that fail validation.
#[must_use]
pub fn country_set(codes: &[&str]) -> BTreeSet<CountryCode> {
    codes
        .iter()
        .filter_map(|code| CountryCode::new(code).ok())
        .collect()
}
