//! Core types for the Matchwood production-rule engine.
//!
//! This crate provides:
//! - [`Value`] - The attribute value type for all fact data
//! - [`Fact`] / [`FactId`] - Titled attribute/value records and their identifiers
//! - [`DerivationRecord`] - Provenance attached to derived facts
//! - [`Error`] - Rich error types with context
//! - Persistent collections ([`MwVec`], [`MwMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod derivation;
pub mod error;
pub mod fact;
pub mod value;

pub use collections::{MwMap, MwVec};
pub use derivation::{DerivationRecord, FactRef};
pub use error::{ChaseLimit, Error, ErrorContext, ErrorKind, Result};
pub use fact::{Fact, FactId};
pub use value::Value;
