//! Integration tests for Fact and DerivationRecord
//!
//! Tests content equality, id bookkeeping, and provenance records.

use matchwood_foundation::{DerivationRecord, Fact, FactId, FactRef, Value};

// =============================================================================
// Facts
// =============================================================================

#[test]
fn fact_builder_and_accessors() {
    let fact = Fact::new("ingredient")
        .with("name", "SALT")
        .with("amount", 1.0)
        .with("unit", "TEASPOONS");

    assert_eq!(fact.title(), "ingredient");
    assert_eq!(fact.get("name"), Some(&Value::from("SALT")));
    assert_eq!(fact.get("amount"), Some(&Value::Float(1.0)));
    assert_eq!(fact.attributes().len(), 3);
    assert_eq!(fact.id(), None);
}

#[test]
fn content_equality_ignores_bookkeeping() {
    let plain = Fact::new("classified").with("name", "SALT");

    let mut derived = plain.clone();
    derived.assign_id(FactId::new(7));
    derived.attach_derivation(DerivationRecord::new(
        "classify-known",
        vec![FactRef::Asserted(FactId::new(1))],
    ));

    assert_eq!(plain, derived);
    assert!(plain.same_content(&derived));
}

#[test]
fn content_equality_uses_numeric_value_equality() {
    let a = Fact::new("measure").with("amount", 2i64);
    let b = Fact::new("measure").with("amount", 2.0);
    assert_eq!(a, b);
}

#[test]
fn attribute_order_does_not_matter() {
    let a = Fact::new("ingredient").with("name", "SALT").with("unit", "TSP");
    let b = Fact::new("ingredient").with("unit", "TSP").with("name", "SALT");
    assert_eq!(a, b);
}

#[test]
fn display_shows_id_and_attributes() {
    let mut fact = Fact::new("ingredient").with("name", "SALT");
    fact.assign_id(FactId::new(3));
    assert_eq!(fact.to_string(), "Fact #3 ('ingredient', name=SALT)");
}

// =============================================================================
// Derivation Records
// =============================================================================

#[test]
fn derivation_record_carries_rule_and_sources() {
    let record = DerivationRecord::new(
        "scale-ingredient-amount",
        vec![
            FactRef::Asserted(FactId::new(4)),
            FactRef::Asserted(FactId::new(1)),
            FactRef::Reference(2),
        ],
    );

    assert_eq!(record.rule_name(), "scale-ingredient-amount");
    assert_eq!(record.antecedents().len(), 3);
    assert_eq!(record.antecedents()[0].id(), Some(FactId::new(4)));
    assert_eq!(record.antecedents()[2].id(), None);
}

#[test]
fn fact_ref_distinguishes_asserted_and_reference() {
    assert_ne!(
        FactRef::Asserted(FactId::new(1)),
        FactRef::Reference(1)
    );
    assert_eq!(FactRef::Reference(1), FactRef::Reference(1));
}
