//! # Domain Entities
//!
//! The normalized remittance model shared by every provider adapter.
//!
//! ## Requests
//!
//! - [`TransactionRequest`]: Immutable customer intent to send money
//! - [`Recipient`], [`Address`]: Who receives the money and where
//!
//! ## Provider Answers
//!
//! - [`RemittanceQuote`]: Priced, time-bounded offer
//! - [`TransactionResponse`]: Result of a send or status lookup
//! - [`ExchangeRate`]: Indicative rate for a currency pair

pub mod exchange_rate;
pub mod quote;
pub mod recipient;
pub mod transaction;
pub mod transaction_request;

pub use exchange_rate::ExchangeRate;
pub use quote::{QuoteBuilder, RemittanceQuote};
pub use recipient::{Address, Recipient};
pub use transaction::TransactionResponse;
pub use transaction_request::{TransactionRequest, TransactionRequestBuilder};
