//! Matchwood - Forward-chaining production-rule engine
//!
//! This crate re-exports all layers of the Matchwood system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: matchwood_debug      — Proof trees, explanation, fire tracing
//!          matchwood_runtime    — Session, CLI, REPL, serialization
//! Layer 2: matchwood_engine     — Unification, matching, conflict resolution, chaining
//! Layer 1: matchwood_foundation — Core types (Value, Fact, DerivationRecord, Error)
//! ```

pub use matchwood_debug as debug;
pub use matchwood_engine as engine;
pub use matchwood_foundation as foundation;
pub use matchwood_runtime as runtime;
