//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`QuoteId`]: UUID-based identifier
//! - [`ProviderName`], [`TransactionId`], [`SenderId`], [`RecipientId`]:
//!   String-based identifiers
//!
//! ## Money
//!
//! - [`Currency`]: ISO-4217 code
//! - [`Money`]: Decimal amount paired with exactly one currency
//! - [`CheckedArithmetic`], [`Rounding`]: overflow-safe arithmetic and
//!   provider rounding policies
//!
//! ## Routing
//!
//! - [`CountryCode`]: ISO-3166 alpha-2 code
//! - [`Corridor`]: source/target country and currency
//!
//! ## Domain Enums
//!
//! - `TransactionStatus`: Pending, Completed, Failed, Cancelled
//! - `PaymentMethod`: How the sender funds a transfer

pub mod arithmetic;
pub mod corridor;
pub mod country;
pub mod currency;
pub mod enums;
pub mod ids;
pub mod money;
pub mod timestamp;

pub use arithmetic::{ArithmeticError, ArithmeticResult, CheckedArithmetic, Rounding};
pub use corridor::Corridor;
pub use country::CountryCode;
pub use currency::Currency;
pub use enums::{ParseEnumError, PaymentMethod, TransactionStatus};
pub use ids::{ProviderName, QuoteId, RecipientId, SenderId, TransactionId};
pub use money::Money;
pub use timestamp::Timestamp;
