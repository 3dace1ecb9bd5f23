//! Integration tests for Layer 2: Engine
//!
//! Tests for unification, trigger-anchored matching, conflict resolution,
//! and depth-first chaining.

mod conflict;
mod matching;
mod unification;
