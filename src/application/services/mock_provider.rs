//! Scriptable provider used by the application-layer unit tests.

#![allow(clippy::unwrap_used, clippy::panic)]

use crate::domain::entities::{
    Address, ExchangeRate, QuoteBuilder, Recipient, RemittanceQuote, TransactionRequest,
    TransactionResponse,
};
use crate::domain::value_objects::{
    CountryCode, Currency, Money, ProviderName, RecipientId, SenderId, Timestamp, TransactionId,
    TransactionStatus,
};
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::traits::{RemittanceProvider, country_set, currency_set};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone)]
pub(crate) enum Behavior {
    Quote { fee: Decimal, rate: Decimal },
    Fail(ProviderError),
    Slow { delay_ms: u64, fee: Decimal },
    Panic,
}

#[derive(Debug)]
pub(crate) struct MockProvider {
    name: ProviderName,
    currencies: BTreeSet<Currency>,
    countries: BTreeSet<CountryCode>,
    behavior: Behavior,
    timeout_ms: u64,
    calls: AtomicUsize,
    completed: AtomicUsize,
}

impl MockProvider {
    pub(crate) fn new(name: &str, behavior: Behavior) -> Self {
        Self {
            name: ProviderName::new(name),
            currencies: currency_set(&[Currency::USD, Currency::PHP, Currency::EUR]),
            countries: country_set(&["US", "PH", "DE"]),
            behavior,
            timeout_ms: 1_000,
            calls: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        }
    }

    pub(crate) fn quoting(name: &str, fee: &str, rate: &str) -> Self {
        Self::new(
            name,
            Behavior::Quote {
                fee: fee.parse().unwrap(),
                rate: rate.parse().unwrap(),
            },
        )
    }

    pub(crate) fn failing(name: &str) -> Self {
        Self::new(name, Behavior::Fail(ProviderError::quote_unavailable("no corridor pricing")))
    }

    pub(crate) fn slow(name: &str, delay_ms: u64) -> Self {
        Self::new(
            name,
            Behavior::Slow {
                delay_ms,
                fee: Decimal::ONE,
            },
        )
    }

    pub(crate) fn panicking(name: &str) -> Self {
        Self::new(name, Behavior::Panic)
    }

    pub(crate) fn with_routes(mut self, currencies: &[Currency], countries: &[&str]) -> Self {
        self.currencies = currency_set(currencies);
        self.countries = country_set(countries);
        self
    }

    pub(crate) fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Quote calls that ran to the end, after any delay.
    pub(crate) fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    fn quote_for(
        &self,
        request: &TransactionRequest,
        fee: Decimal,
        rate: Decimal,
    ) -> ProviderResult<RemittanceQuote> {
        Ok(QuoteBuilder::new(
            self.name.clone(),
            request.amount(),
            Money::new(fee, request.source_currency()),
            rate,
            request.target_currency(),
            Timestamp::now().add_secs(300),
        )
        .estimated_time("Minutes")
        .try_build()?)
    }
}

#[async_trait]
impl RemittanceProvider for MockProvider {
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
        self.timeout_ms
    }

    async fn get_quote(&self, request: &TransactionRequest) -> ProviderResult<RemittanceQuote> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Quote { fee, rate } => self.quote_for(request, *fee, *rate),
            Behavior::Fail(error) => Err(error.clone()),
            Behavior::Slow { delay_ms, fee } => {
                tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                self.completed.fetch_add(1, Ordering::SeqCst);
                self.quote_for(request, *fee, Decimal::ONE)
            }
            Behavior::Panic => panic!("mock provider {} panicked", self.name),
        }
    }

    async fn send_money(&self, request: &TransactionRequest) -> ProviderResult<TransactionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Behavior::Fail(error) = &self.behavior {
            return Err(error.clone());
        }
        Ok(TransactionResponse::new(
            TransactionId::new(format!("{}-1", self.name)),
            self.name.clone(),
            TransactionStatus::Pending,
        )
        .with_amounts(request.amount(), Money::zero(request.source_currency())))
    }

    async fn get_transaction_status(
        &self,
        transaction_id: &TransactionId,
    ) -> ProviderResult<TransactionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Behavior::Fail(error) = &self.behavior {
            return Err(error.clone());
        }
        Ok(TransactionResponse::new(
            transaction_id.clone(),
            self.name.clone(),
            TransactionStatus::Completed,
        ))
    }

    async fn get_exchange_rate(&self, from: Currency, to: Currency) -> ProviderResult<ExchangeRate> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let rate = match &self.behavior {
            Behavior::Quote { rate, .. } => *rate,
            Behavior::Fail(error) => return Err(error.clone()),
            _ => Decimal::ONE,
        };
        Ok(ExchangeRate::new(
            self.name.clone(),
            from,
            to,
            rate,
            Money::zero(from),
            Timestamp::now().add_secs(60),
        )?)
    }
}

/// USD 1000 from a US sender to a recipient in `country`, paid out in `target`.
pub(crate) fn request_to(country: &str, target: Currency) -> TransactionRequest {
    let recipient = Recipient::new(
        RecipientId::new("rcp-1"),
        "Maria Santos",
        Address::in_country(CountryCode::new(country).unwrap()),
    );
    TransactionRequest::builder(
        SenderId::new("snd-1"),
        CountryCode::new("US").unwrap(),
        recipient,
        Money::new(Decimal::new(1000, 0), Currency::USD),
        target,
    )
    .build()
    .unwrap()
}

/// The default USD to PHP request.
pub(crate) fn usd_to_php() -> TransactionRequest {
    request_to("PH", Currency::PHP)
}
