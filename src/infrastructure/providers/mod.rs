//! # Provider Adapters
//!
//! Integrations with money-transfer providers.
//!
//! ## Available Adapters
//!
//! - [`WiseProvider`]: Wise public API, bearer token
//! - [`RemitlyProvider`]: Remitly partner API, bearer token
//! - [`WorldRemitProvider`]: WorldRemit API, HMAC-signed requests
//! - [`SimulatedProvider`]: in-process adapter for sandboxes and tests

pub mod error;
pub mod http_client;
pub mod remitly;
pub mod signing;
pub mod simulated;
pub mod traits;
pub mod wise;
pub mod worldremit;

pub use error::{ProviderError, ProviderResult};
pub use remitly::{RemitlyConfig, RemitlyProvider};
pub use simulated::{FeeModel, SimulatedProvider, SimulatedProviderConfig};
pub use traits::RemittanceProvider;
pub use wise::{WiseConfig, WiseProvider};
pub use worldremit::{WorldRemitConfig, WorldRemitProvider};
