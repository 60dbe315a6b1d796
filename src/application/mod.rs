//! # Application Layer
//!
//! Orchestration on top of the domain model and the provider adapters.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
