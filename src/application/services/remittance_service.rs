//! # Remittance Service
//!
//! Inbound facade over [`RemittanceHub`]. Callers that only need to price,
//! send and track remittances use this type.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::remittance_hub::RemittanceHub;
use crate::domain::entities::{RemittanceQuote, TransactionRequest, TransactionResponse};
use crate::domain::value_objects::{ProviderName, TransactionId};
use crate::infrastructure::providers::traits::RemittanceProvider;
use std::sync::Arc;

/// Facade for pricing, sending and tracking remittances.
#[derive(Debug, Clone)]
pub struct RemittanceService {
    hub: Arc<RemittanceHub>,
}

impl RemittanceService {
    /// Creates a service over an existing hub.
    #[must_use]
    pub fn new(hub: Arc<RemittanceHub>) -> Self {
        Self { hub }
    }

    /// Creates a service and its hub from already-configured providers.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::DuplicateProvider` if two providers share
    /// a name.
    pub fn from_providers(providers: Vec<Arc<dyn RemittanceProvider>>) -> ApplicationResult<Self> {
        Ok(Self::new(Arc::new(RemittanceHub::new(providers)?)))
    }

    /// Returns the underlying hub.
    #[inline]
    #[must_use]
    pub fn hub(&self) -> &RemittanceHub {
        &self.hub
    }

    /// All available quotes, cheapest first.
    pub async fn get_remittance_options(
        &self,
        request: &TransactionRequest,
    ) -> Vec<RemittanceQuote> {
        self.hub.get_quotes(request).await
    }

    /// The cheapest available quote.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NoQuotesAvailable` if no provider
    /// returned a quote.
    pub async fn get_best_option(
        &self,
        request: &TransactionRequest,
    ) -> ApplicationResult<RemittanceQuote> {
        self.hub.get_best_quote(request).await
    }

    /// Sends through the named provider. The quote the caller may have
    /// picked earlier is not checked for expiry.
    ///
    /// # Errors
    ///
    /// Same as [`RemittanceHub::send_money_with_provider`].
    pub async fn send_remittance(
        &self,
        provider_name: &ProviderName,
        request: &TransactionRequest,
    ) -> ApplicationResult<TransactionResponse> {
        self.hub.send_money_with_provider(provider_name, request).await
    }

    /// Sends through the provider that issued `quote`, after checking that
    /// the quote is still valid and was priced for this request.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::QuoteExpired` if the quote's validity window has
    ///   passed; no provider is called
    /// - `ApplicationError::Validation` if the quote was priced for a
    ///   different amount or target currency
    /// - anything [`RemittanceHub::send_money_with_provider`] returns
    pub async fn send_with_quote(
        &self,
        quote: &RemittanceQuote,
        request: &TransactionRequest,
    ) -> ApplicationResult<TransactionResponse> {
        if quote.is_expired() {
            tracing::warn!(
                provider = %quote.provider(),
                quote_id = %quote.id(),
                valid_until = %quote.valid_until(),
                "refusing to send on an expired quote"
            );
            return Err(ApplicationError::QuoteExpired {
                quote_id: quote.id(),
                provider: quote.provider().clone(),
                valid_until: quote.valid_until(),
            });
        }
        if quote.amount() != request.amount()
            || quote.received_amount().currency() != request.target_currency()
        {
            return Err(ApplicationError::validation(format!(
                "quote {} was not priced for {} to {}",
                quote.id(),
                request.amount(),
                request.target_currency()
            )));
        }

        self.hub.send_money_with_provider(quote.provider(), request).await
    }

    /// Current state of a transfer on the provider that issued it.
    ///
    /// # Errors
    ///
    /// Same as [`RemittanceHub::get_transaction_status`].
    pub async fn track_remittance(
        &self,
        provider_name: &ProviderName,
        transaction_id: &TransactionId,
    ) -> ApplicationResult<TransactionResponse> {
        self.hub.get_transaction_status(provider_name, transaction_id).await
    }
}
