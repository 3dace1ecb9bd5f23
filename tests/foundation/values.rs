//! Integration tests for Value types
//!
//! Tests Value equality, numeric cross-type comparison, hashing, and display.

use std::collections::HashSet;
use std::sync::Arc;

use matchwood_foundation::{MwMap, MwVec, Value};

// =============================================================================
// Value Construction
// =============================================================================

#[test]
fn value_bool() {
    let v = Value::Bool(true);
    assert_eq!(v.as_bool(), Some(true));
    assert_eq!(v.as_int(), None);
}

#[test]
fn value_int() {
    let v = Value::Int(42);
    assert_eq!(v.as_int(), Some(42));
    assert_eq!(v.as_float(), None);
    assert_eq!(v.as_number(), Some(42.0));
    assert!(v.is_number());
}

#[test]
fn value_float() {
    let v = Value::Float(1.5);
    assert_eq!(v.as_float(), Some(1.5));
    assert_eq!(v.as_int(), None);
    assert_eq!(v.as_number(), Some(1.5));
}

#[test]
fn value_string() {
    let v = Value::String(Arc::from("hello"));
    assert_eq!(v.as_str(), Some("hello"));
    assert!(!v.is_number());
}

#[test]
fn value_from_conversions() {
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(7i64), Value::Int(7));
    assert_eq!(Value::from(7i32), Value::Int(7));
    assert_eq!(Value::from(2.5), Value::Float(2.5));
    assert_eq!(Value::from("x"), Value::String(Arc::from("x")));
    assert_eq!(Value::from("x".to_string()), Value::String(Arc::from("x")));
}

#[test]
fn value_list_and_map() {
    let list = Value::from(vec![1i64, 2, 3]);
    assert_eq!(list.as_list().map(MwVec::len), Some(3));

    let mut map = MwMap::new();
    map = map.insert("amount".to_string(), Value::Float(2.0));
    let v = Value::Map(map);
    assert_eq!(
        v.as_map().and_then(|m| m.get(&"amount".to_string())),
        Some(&Value::Float(2.0))
    );
}

// =============================================================================
// Numeric Equality
// =============================================================================

#[test]
fn int_equals_float_of_same_magnitude() {
    assert_eq!(Value::Int(2), Value::Float(2.0));
    assert_eq!(Value::Float(0.0), Value::Int(0));
    assert_eq!(Value::Int(-3), Value::Float(-3.0));
}

#[test]
fn int_does_not_equal_other_floats() {
    assert_ne!(Value::Int(2), Value::Float(2.5));
    assert_ne!(Value::Int(2), Value::Float(-2.0));
}

#[test]
fn huge_int_never_equals_float() {
    // Above 2^53 the f64 conversion collapses neighbors; such integers only
    // ever equal other integers.
    let n = (1i64 << 53) + 1;
    assert_ne!(Value::Int(n), Value::Float(n as f64));
    assert_eq!(Value::Int(n), Value::Int(n));
}

#[test]
fn nan_equals_itself() {
    // Bit-pattern float equality keeps Eq reflexive.
    assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    assert_ne!(Value::Float(f64::NAN), Value::Float(0.0));
}

#[test]
fn number_never_equals_string() {
    assert_ne!(Value::Int(2), Value::from("2"));
    assert_ne!(Value::Float(2.0), Value::from("2.0"));
}

// =============================================================================
// Hashing
// =============================================================================

#[test]
fn equal_numbers_hash_equal() {
    let mut set = HashSet::new();
    set.insert(Value::Int(2));
    // Int(2) == Float(2.0), so the set must treat them as one element.
    assert!(set.contains(&Value::Float(2.0)));
    set.insert(Value::Float(2.0));
    assert_eq!(set.len(), 1);
}

#[test]
fn distinct_values_coexist_in_a_set() {
    let mut set = HashSet::new();
    set.insert(Value::Int(1));
    set.insert(Value::Float(1.5));
    set.insert(Value::from("1"));
    set.insert(Value::Bool(true));
    assert_eq!(set.len(), 4);
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn display_formats() {
    assert_eq!(Value::Int(3).to_string(), "3");
    assert_eq!(Value::Float(1.5).to_string(), "1.5");
    assert_eq!(Value::from("SALT").to_string(), "SALT");
    assert_eq!(Value::Bool(false).to_string(), "false");
}
