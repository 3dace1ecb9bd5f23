//! Forward-chaining production-rule engine for Matchwood.
//!
//! This crate provides:
//! - [`Pattern`] / [`Antecedent`] / [`Bindings`] / [`unify`] - Pattern unification
//! - [`WorkingMemory`] / [`KnowledgeBase`] - Fact and rule stores
//! - [`Matcher`] - Trigger-anchored antecedent matching with negation-as-failure
//! - [`ConflictStrategy`] - Pluggable conflict resolution
//! - [`Engine`] - Depth-first derivation chasing with safe refire semantics

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod conflict;
pub mod engine;
pub mod matcher;
pub mod memory;
pub mod pattern;
pub mod rule;

pub use conflict::ConflictStrategy;
pub use engine::{ChainOutcome, Engine, FireRecord};
pub use matcher::{Match, Matcher, RuleMatch};
pub use memory::{KnowledgeBase, WorkingMemory};
pub use pattern::{Antecedent, Bindings, Pattern, PatternValue, unify};
pub use rule::{ActionFn, OutputLog, Rule};
