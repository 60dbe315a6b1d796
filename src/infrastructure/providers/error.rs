//! # Provider Errors
//!
//! Error types for provider adapter operations.
//!
//! Every failure an adapter can hit, whether transport, HTTP status or a
//! malformed upstream payload, is mapped onto one of these variants. Adapters
//! never panic on bad input.
//!
//! # Examples
//!
//! ```
//! use remittance_hub::infrastructure::providers::error::ProviderError;
//!
//! let error = ProviderError::timeout("quote request timed out after 5000ms");
//! assert!(error.is_retryable());
//!
//! let error = ProviderError::authentication("invalid API key");
//! assert!(!error.is_retryable());
//! assert!(error.is_client_error());
//! ```

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{Corridor, TransactionId};
use thiserror::Error;

/// Error type for provider adapter operations.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Request timed out.
    #[error("provider timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// Network or connection error.
    #[error("provider connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Credentials were rejected.
    #[error("provider authentication error: {message}")]
    Authentication {
        /// Error message.
        message: String,
    },

    /// Upstream rate limit hit.
    #[error("provider rate limit exceeded: {message}")]
    RateLimited {
        /// Error message.
        message: String,
        /// Retry after duration in milliseconds.
        retry_after_ms: Option<u64>,
    },

    /// Upstream rejected the request parameters.
    #[error("provider invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// The provider does not serve this corridor.
    #[error("provider does not support corridor {corridor}")]
    UnsupportedCorridor {
        /// The requested corridor.
        corridor: Corridor,
    },

    /// The provider could not price the request.
    #[error("provider quote unavailable: {message}")]
    QuoteUnavailable {
        /// Error message.
        message: String,
    },

    /// The transfer was not accepted.
    #[error("provider transfer failed: {message}")]
    TransferFailed {
        /// Error message.
        message: String,
        /// Provider-specific error code.
        error_code: Option<String>,
    },

    /// The provider does not know the transaction.
    #[error("transaction not found: {transaction_id}")]
    TransactionNotFound {
        /// The id that was looked up.
        transaction_id: TransactionId,
    },

    /// The upstream payload could not be decoded or violated the model.
    #[error("provider protocol error: {message}")]
    ProtocolError {
        /// Error message.
        message: String,
    },

    /// Upstream server error or adapter bug.
    #[error("provider internal error: {message}")]
    InternalError {
        /// Error message.
        message: String,
    },
}

impl ProviderError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Creates a rate limited error.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
            retry_after_ms: None,
        }
    }

    /// Creates a rate limited error with retry duration.
    #[must_use]
    pub fn rate_limited_with_retry(message: impl Into<String>, retry_after_ms: u64) -> Self {
        Self::RateLimited {
            message: message.into(),
            retry_after_ms: Some(retry_after_ms),
        }
    }

    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates an unsupported corridor error.
    #[must_use]
    pub fn unsupported_corridor(corridor: Corridor) -> Self {
        Self::UnsupportedCorridor { corridor }
    }

    /// Creates a quote unavailable error.
    #[must_use]
    pub fn quote_unavailable(message: impl Into<String>) -> Self {
        Self::QuoteUnavailable {
            message: message.into(),
        }
    }

    /// Creates a transfer failed error.
    #[must_use]
    pub fn transfer_failed(message: impl Into<String>) -> Self {
        Self::TransferFailed {
            message: message.into(),
            error_code: None,
        }
    }

    /// Creates a transfer failed error with error code.
    #[must_use]
    pub fn transfer_failed_with_code(
        message: impl Into<String>,
        error_code: impl Into<String>,
    ) -> Self {
        Self::TransferFailed {
            message: message.into(),
            error_code: Some(error_code.into()),
        }
    }

    /// Creates a transaction not found error.
    #[must_use]
    pub fn transaction_not_found(transaction_id: TransactionId) -> Self {
        Self::TransactionNotFound { transaction_id }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol_error(message: impl Into<String>) -> Self {
        Self::ProtocolError {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Returns true if this error is transient and may succeed on retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Connection { .. } | Self::RateLimited { .. }
        )
    }

    /// Returns true if the request itself was at fault.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest { .. }
                | Self::Authentication { .. }
                | Self::UnsupportedCorridor { .. }
                | Self::TransactionNotFound { .. }
        )
    }

    /// Returns true if the provider side was at fault.
    #[must_use]
    pub fn is_provider_error(&self) -> bool {
        matches!(self, Self::InternalError { .. } | Self::ProtocolError { .. })
    }

    /// Returns the retry delay in milliseconds, if applicable.
    #[must_use]
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_ms, .. } => *retry_after_ms,
            _ => None,
        }
    }

    /// Returns the provider error code, if any.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::TransferFailed { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }
}

impl From<DomainError> for ProviderError {
    fn from(err: DomainError) -> Self {
        Self::protocol_error(format!("upstream payload rejected: {err}"))
    }
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
