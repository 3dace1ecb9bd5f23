//! Integration tests for Layer 1: Foundation
//!
//! Tests for core types: Value, Fact, DerivationRecord, and errors.

mod facts;
mod values;
