//! # Remittance Hub
//!
//! Compares money-transfer providers for a single remittance and routes the
//! transfer to the one the caller picks.
//!
//! A [`RemittanceHub`](application::services::RemittanceHub) holds a list of
//! [`RemittanceProvider`](infrastructure::providers::RemittanceProvider)
//! adapters. For a [`TransactionRequest`](domain::entities::TransactionRequest)
//! it asks every provider that serves the corridor for a quote at the same
//! time, drops the ones that fail, and returns the rest cheapest first.
//!
//! # Layers
//!
//! - [`domain`]: money, currencies, countries, quotes, requests and responses
//! - [`infrastructure`]: provider adapters (Wise, Remitly, WorldRemit,
//!   simulated), HTTP plumbing, request signing and logging setup
//! - [`application`]: provider registry, the hub, ranking and the
//!   [`RemittanceService`](application::services::RemittanceService) facade
//! - [`settings`]: file and environment configuration wired into a service
//!
//! # Example
//!
//! ```
//! use remittance_hub::application::services::RemittanceService;
//! use remittance_hub::domain::entities::{Address, Recipient, TransactionRequest};
//! use remittance_hub::domain::value_objects::{CountryCode, Currency, Money, RecipientId, SenderId};
//! use remittance_hub::infrastructure::providers::{
//!     FeeModel, RemittanceProvider, SimulatedProvider, SimulatedProviderConfig,
//! };
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sandbox = SimulatedProvider::new(
//!     SimulatedProviderConfig::new("Sandbox", Decimal::new(12, 1))
//!         .with_fee_model(FeeModel::Flat(Decimal::new(15, 0)))
//!         .with_currencies(&["USD", "PHP"])
//!         .with_countries(&["US", "PH"]),
//! )?;
//! let providers: Vec<Arc<dyn RemittanceProvider>> = vec![Arc::new(sandbox)];
//! let service = RemittanceService::from_providers(providers)?;
//!
//! let recipient = Recipient::new(
//!     RecipientId::new("rcp-1"),
//!     "Maria Santos",
//!     Address::in_country(CountryCode::new("PH")?),
//! );
//! let request = TransactionRequest::builder(
//!     SenderId::new("snd-1"),
//!     CountryCode::new("US")?,
//!     recipient,
//!     Money::new(Decimal::new(1000, 0), Currency::USD),
//!     Currency::PHP,
//! )
//! .build()?;
//!
//! let best = service.get_best_option(&request).await?;
//! assert_eq!(best.total_cost().amount(), Decimal::new(1015, 0));
//!
//! let sent = service.send_remittance(best.provider(), &request).await?;
//! let tracked = service.track_remittance(best.provider(), sent.transaction_id()).await?;
//! assert_eq!(tracked.transaction_id(), sent.transaction_id());
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod settings;

pub use application::error::{ApplicationError, ApplicationResult};
pub use application::services::{AggregationConfig, RemittanceHub, RemittanceService};
pub use settings::RemittanceSettings;
