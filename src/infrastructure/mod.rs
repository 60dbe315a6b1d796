//! # Infrastructure Layer
//!
//! Provider adapters, HTTP plumbing and logging setup.

pub mod logging;
pub mod providers;
