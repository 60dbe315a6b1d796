//! # Application Services
//!
//! Services that orchestrate providers on behalf of callers.
//!
//! - [`ProviderRegistry`]: Ordered set of providers and the eligibility filter
//! - [`RemittanceHub`]: Concurrent quote fan-out, ranking and routing
//! - [`RemittanceService`]: Inbound facade over the hub
//! - [`RankingStrategy`]: Strategies for ranking quotes

#[cfg(test)]
pub(crate) mod mock_provider;
pub mod provider_registry;
pub mod ranking_strategy;
pub mod remittance_hub;
pub mod remittance_service;

pub use provider_registry::{ProviderRegistry, is_eligible};
pub use ranking_strategy::{
    BestReceivedAmountStrategy, LowestTotalCostStrategy, RankedQuote, RankingStrategy,
};
pub use remittance_hub::{AggregationConfig, AggregationResult, RemittanceHub};
pub use remittance_service::RemittanceService;
