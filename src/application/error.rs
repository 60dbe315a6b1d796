//! # Application Errors
//!
//! Error types for the hub and the facade service.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)          - Model validation failures
//! ├── Provider { provider, source } - A single named provider failed
//! ├── NoQuotesAvailable            - Aggregation produced an empty list
//! ├── ProviderNotFound             - Unknown routing name
//! ├── DuplicateProvider            - Two adapters share a name
//! ├── QuoteExpired                 - Opt-in expiry check rejected a quote
//! ├── Validation(String)           - Input validation failures
//! └── Configuration(String)        - Hub or service misconfiguration
//! ```
//!
//! # Examples
//!
//! ```
//! use remittance_hub::application::error::ApplicationError;
//! use remittance_hub::domain::value_objects::ProviderName;
//!
//! let err = ApplicationError::provider_not_found(ProviderName::new("Xoom"));
//! assert!(err.is_not_found());
//! assert_eq!(err.to_string(), "provider not found: Xoom");
//! ```

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{Corridor, ProviderName, QuoteId, Timestamp};
use crate::infrastructure::providers::error::ProviderError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain error from model validation.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The named provider returned an error. The provider's error is kept
    /// unchanged as the source.
    #[error("provider {provider} failed: {source}")]
    Provider {
        /// The provider that failed.
        provider: ProviderName,
        /// The provider's own error.
        #[source]
        source: ProviderError,
    },

    /// No eligible provider returned a quote.
    #[error("no quotes available for {corridor}")]
    NoQuotesAvailable {
        /// The corridor that was priced.
        corridor: Corridor,
    },

    /// No provider is registered under this name.
    #[error("provider not found: {0}")]
    ProviderNotFound(ProviderName),

    /// A provider name was registered twice.
    #[error("duplicate provider name: {0}")]
    DuplicateProvider(ProviderName),

    /// The quote passed its validity window before it was used.
    #[error("quote {quote_id} from {provider} expired at {valid_until}")]
    QuoteExpired {
        /// The expired quote.
        quote_id: QuoteId,
        /// The provider that issued it.
        provider: ProviderName,
        /// When it expired.
        valid_until: Timestamp,
    },

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Hub or service misconfiguration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Wraps a provider error with the provider's name.
    #[must_use]
    pub fn provider(provider: ProviderName, source: ProviderError) -> Self {
        Self::Provider { provider, source }
    }

    /// Creates a no quotes available error.
    #[must_use]
    pub fn no_quotes_available(corridor: Corridor) -> Self {
        Self::NoQuotesAvailable { corridor }
    }

    /// Creates a provider not found error.
    #[must_use]
    pub fn provider_not_found(provider: ProviderName) -> Self {
        Self::ProviderNotFound(provider)
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns the underlying provider error, if any.
    #[must_use]
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            Self::Provider { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.provider_error().is_some_and(ProviderError::is_retryable)
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProviderNotFound(_)
                | Self::Provider {
                    source: ProviderError::TransactionNotFound { .. },
                    ..
                }
        )
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Domain(_))
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
