//! # Domain Layer
//!
//! The normalized remittance model: value objects, entities and their
//! validation errors. Nothing here performs I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;
