//! # Remittance Hub
//!
//! Fans a transaction request out to every eligible provider, collects the
//! quotes that come back, and ranks them.
//!
//! # Concurrency
//!
//! Each eligible provider gets its own task in a [`JoinSet`], bounded by
//! the smaller of the provider's own budget and
//! [`AggregationConfig::per_provider_timeout_ms`]. The whole collection is
//! bounded by [`AggregationConfig::timeout_ms`]; stragglers are aborted and
//! counted as failures. Dropping an in-flight aggregation drops the
//! `JoinSet`, which aborts every outstanding provider call.
//!
//! A provider that errors, times out or panics is logged and left out. It
//! never fails the aggregation.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::provider_registry::ProviderRegistry;
use crate::application::services::ranking_strategy::{
    LowestTotalCostStrategy, RankedQuote, RankingStrategy,
};
use crate::domain::entities::{
    ExchangeRate, RemittanceQuote, TransactionRequest, TransactionResponse,
};
use crate::domain::value_objects::{Corridor, Currency, ProviderName, TransactionId};
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::traits::RemittanceProvider;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::{Instant, timeout, timeout_at};

const DEFAULT_TIMEOUT_MS: u64 = 15_000;
const DEFAULT_PER_PROVIDER_TIMEOUT_MS: u64 = 10_000;

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_per_provider_timeout_ms() -> u64 {
    DEFAULT_PER_PROVIDER_TIMEOUT_MS
}

/// Configuration for quote aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Overall deadline for collecting quotes, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Upper bound on a single provider's quote call, in milliseconds.
    #[serde(default = "default_per_provider_timeout_ms")]
    pub per_provider_timeout_ms: u64,
    /// Maximum number of quotes to return after ranking.
    #[serde(default)]
    pub max_quotes: Option<usize>,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            per_provider_timeout_ms: DEFAULT_PER_PROVIDER_TIMEOUT_MS,
            max_quotes: None,
        }
    }
}

impl AggregationConfig {
    /// Creates a configuration with the specified overall timeout.
    #[must_use]
    pub fn with_timeout(timeout_ms: u64) -> Self {
        Self {
            timeout_ms,
            ..Default::default()
        }
    }

    /// Sets the per-provider timeout.
    #[must_use]
    pub fn with_per_provider_timeout(mut self, timeout_ms: u64) -> Self {
        self.per_provider_timeout_ms = timeout_ms;
        self
    }

    /// Sets the maximum number of quotes to return.
    #[must_use]
    pub fn with_max_quotes(mut self, max: usize) -> Self {
        self.max_quotes = Some(max);
        self
    }
}

/// Outcome of one aggregation round.
#[derive(Debug, Clone, Default)]
pub struct AggregationResult {
    /// Ranked quotes (best first).
    pub ranked_quotes: Vec<RankedQuote>,
    /// Number of eligible providers that were asked.
    pub providers_queried: usize,
    /// Number of providers that returned a usable quote.
    pub providers_responded: usize,
    /// Number of providers that errored, timed out or panicked.
    pub providers_failed: usize,
}

impl AggregationResult {
    /// Returns the best quote, if any.
    #[must_use]
    pub fn best_quote(&self) -> Option<&RankedQuote> {
        self.ranked_quotes.first()
    }

    /// Returns true if no quote was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranked_quotes.is_empty()
    }

    /// Drops the ranking metadata and returns the quotes, best first.
    #[must_use]
    pub fn into_quotes(self) -> Vec<RemittanceQuote> {
        self.ranked_quotes
            .into_iter()
            .map(RankedQuote::into_quote)
            .collect()
    }
}

/// Orchestrates quoting and routing across registered providers.
#[derive(Debug, Clone)]
pub struct RemittanceHub {
    registry: Arc<ProviderRegistry>,
    ranking_strategy: Arc<dyn RankingStrategy>,
    config: AggregationConfig,
}

impl RemittanceHub {
    /// Creates a hub over already-configured providers, ranked by lowest
    /// total cost.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::DuplicateProvider` if two providers share
    /// a name.
    pub fn new(providers: Vec<Arc<dyn RemittanceProvider>>) -> ApplicationResult<Self> {
        Ok(Self::from_registry(ProviderRegistry::new(providers)?))
    }

    /// Creates a hub over an existing registry.
    #[must_use]
    pub fn from_registry(registry: ProviderRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            ranking_strategy: Arc::new(LowestTotalCostStrategy),
            config: AggregationConfig::default(),
        }
    }

    /// Replaces the aggregation configuration.
    #[must_use]
    pub fn with_config(mut self, config: AggregationConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the ranking strategy.
    #[must_use]
    pub fn with_ranking_strategy(mut self, strategy: Arc<dyn RankingStrategy>) -> Self {
        self.ranking_strategy = strategy;
        self
    }

    /// Collects quotes from every eligible provider, best first.
    ///
    /// Providers that fail are logged and left out. An empty list is a
    /// valid result.
    pub async fn get_quotes(&self, request: &TransactionRequest) -> Vec<RemittanceQuote> {
        self.aggregate_quotes(request).await.into_quotes()
    }

    /// Like [`get_quotes`](Self::get_quotes), but keeps the ranking
    /// metadata and the per-round provider counts.
    pub async fn aggregate_quotes(&self, request: &TransactionRequest) -> AggregationResult {
        let corridor = request.corridor();
        let providers = self.registry.eligible(&corridor);
        let providers_queried = providers.len();

        if providers.is_empty() {
            tracing::info!(%corridor, "no eligible providers");
            return AggregationResult::default();
        }

        let quotes: Vec<RemittanceQuote> = self
            .collect_quotes(&providers, request)
            .await
            .into_iter()
            .flatten()
            .collect();
        let providers_responded = quotes.len();

        let mut ranked_quotes = self.ranking_strategy.rank(quotes);
        if let Some(max) = self.config.max_quotes {
            ranked_quotes.truncate(max);
        }

        tracing::info!(
            %corridor,
            queried = providers_queried,
            responded = providers_responded,
            strategy = self.ranking_strategy.name(),
            "quote aggregation complete"
        );

        AggregationResult {
            ranked_quotes,
            providers_queried,
            providers_responded,
            providers_failed: providers_queried - providers_responded,
        }
    }

    /// Returns the cheapest quote.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NoQuotesAvailable` if no provider
    /// returned a quote.
    pub async fn get_best_quote(
        &self,
        request: &TransactionRequest,
    ) -> ApplicationResult<RemittanceQuote> {
        self.get_quotes(request)
            .await
            .into_iter()
            .next()
            .ok_or_else(|| ApplicationError::no_quotes_available(request.corridor()))
    }

    /// Sends money through the named provider. There is no fallback to
    /// another provider.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::ProviderNotFound` if no provider has that name;
    ///   no adapter is called
    /// - `ApplicationError::Provider` with the provider's error unchanged
    pub async fn send_money_with_provider(
        &self,
        provider_name: &ProviderName,
        request: &TransactionRequest,
    ) -> ApplicationResult<TransactionResponse> {
        let provider = self.provider(provider_name)?;
        let response = provider
            .send_money(request)
            .await
            .map_err(|e| ApplicationError::provider(provider_name.clone(), e))?;

        tracing::info!(
            provider = %provider_name,
            transaction_id = %response.transaction_id(),
            status = %response.status(),
            "transfer submitted"
        );
        Ok(response)
    }

    /// Looks up a transaction on the provider that issued it.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::ProviderNotFound` if no provider has that name
    /// - `ApplicationError::Provider` with the provider's error unchanged
    pub async fn get_transaction_status(
        &self,
        provider_name: &ProviderName,
        transaction_id: &TransactionId,
    ) -> ApplicationResult<TransactionResponse> {
        let provider = self.provider(provider_name)?;
        provider
            .get_transaction_status(transaction_id)
            .await
            .map_err(|e| ApplicationError::provider(provider_name.clone(), e))
    }

    /// Fetches an indicative rate from the named provider.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::ProviderNotFound` if no provider has that name
    /// - `ApplicationError::Provider` with the provider's error unchanged
    pub async fn get_exchange_rate(
        &self,
        provider_name: &ProviderName,
        from: Currency,
        to: Currency,
    ) -> ApplicationResult<ExchangeRate> {
        let provider = self.provider(provider_name)?;
        provider
            .get_exchange_rate(from, to)
            .await
            .map_err(|e| ApplicationError::provider(provider_name.clone(), e))
    }

    /// Names of the providers eligible for `corridor`, in registration order.
    #[must_use]
    pub fn available_providers(&self, corridor: &Corridor) -> Vec<ProviderName> {
        self.registry
            .eligible(corridor)
            .iter()
            .map(|p| p.name().clone())
            .collect()
    }

    /// Returns the provider registry.
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Returns the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Returns the ranking strategy name.
    #[must_use]
    pub fn ranking_strategy_name(&self) -> &'static str {
        self.ranking_strategy.name()
    }

    fn provider(&self, name: &ProviderName) -> ApplicationResult<&Arc<dyn RemittanceProvider>> {
        self.registry
            .find(name)
            .ok_or_else(|| ApplicationError::provider_not_found(name.clone()))
    }

    /// Queries every provider concurrently. The returned slots are indexed
    /// by position in `providers`; `None` marks a failure.
    async fn collect_quotes(
        &self,
        providers: &[Arc<dyn RemittanceProvider>],
        request: &TransactionRequest,
    ) -> Vec<Option<RemittanceQuote>> {
        let request = Arc::new(request.clone());
        let mut tasks = JoinSet::new();
        let mut task_index = HashMap::with_capacity(providers.len());

        for (index, provider) in providers.iter().enumerate() {
            let provider = Arc::clone(provider);
            let request = Arc::clone(&request);
            let budget_ms = provider.timeout_ms().min(self.config.per_provider_timeout_ms);

            let handle = tasks.spawn(async move {
                tracing::debug!(provider = %provider.name(), budget_ms, "requesting quote");
                let call = provider.get_quote(&request);
                let outcome = match timeout(Duration::from_millis(budget_ms), call).await {
                    Ok(result) => result,
                    Err(_) => Err(ProviderError::timeout_with_duration(
                        "quote request timed out",
                        budget_ms,
                    )),
                };
                (index, outcome.and_then(|quote| check_currency(&request, quote)))
            });
            task_index.insert(handle.id(), index);
        }

        let mut slots: Vec<Option<RemittanceQuote>> = vec![None; providers.len()];
        let deadline = Instant::now() + Duration::from_millis(self.config.timeout_ms);

        loop {
            match timeout_at(deadline, tasks.join_next_with_id()).await {
                Ok(Some(Ok((_, (index, Ok(quote)))))) => {
                    tracing::debug!(
                        provider = %quote.provider(),
                        total = %quote.total_cost(),
                        "quote received"
                    );
                    if let Some(slot) = slots.get_mut(index) {
                        *slot = Some(quote);
                    }
                }
                Ok(Some(Ok((_, (index, Err(e)))))) => {
                    if let Some(provider) = providers.get(index) {
                        tracing::warn!(
                            provider = %provider.name(),
                            error = %e,
                            "provider excluded from quotes"
                        );
                    }
                }
                Ok(Some(Err(join_error))) => {
                    let name = task_index
                        .get(&join_error.id())
                        .and_then(|i| providers.get(*i))
                        .map(|p| p.name().to_string())
                        .unwrap_or_default();
                    tracing::warn!(provider = %name, error = %join_error, "provider task aborted");
                }
                Ok(None) => break,
                Err(_) => {
                    tracing::warn!(
                        pending = tasks.len(),
                        timeout_ms = self.config.timeout_ms,
                        "aggregation deadline reached, aborting pending providers"
                    );
                    tasks.abort_all();
                    break;
                }
            }
        }

        slots
    }
}

/// Rejects a quote priced in a different currency than the request.
fn check_currency(
    request: &TransactionRequest,
    quote: RemittanceQuote,
) -> ProviderResult<RemittanceQuote> {
    if quote.amount().currency() != request.source_currency()
        || quote.received_amount().currency() != request.target_currency()
    {
        return Err(ProviderError::protocol_error(format!(
            "quote {} does not match {}",
            quote,
            request.corridor()
        )));
    }
    Ok(quote)
}
