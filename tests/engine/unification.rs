//! Integration tests for pattern unification.

use matchwood_engine::{Bindings, Pattern, unify};
use matchwood_foundation::{Fact, Value};

#[test]
fn full_variable_pattern_binds_everything() {
    let pattern = Pattern::new("ingredient")
        .with("name", "?name")
        .with("amount", "?amount")
        .with("unit", "?unit");
    let fact = Fact::new("ingredient")
        .with("name", "SALT")
        .with("amount", 1.0)
        .with("unit", "TEASPOONS");

    let bindings = unify(&pattern, &fact, &Bindings::new()).unwrap();
    assert_eq!(bindings.len(), 3);
    assert_eq!(bindings.get("?name"), Some(&Value::from("SALT")));
    assert_eq!(bindings.get("?amount"), Some(&Value::Float(1.0)));
    assert_eq!(bindings.get("?unit"), Some(&Value::from("TEASPOONS")));
}

#[test]
fn mixed_literal_and_variable_pattern() {
    let pattern = Pattern::new("ingredient")
        .with("name", "SALT")
        .with("amount", "?amount");

    let matching = Fact::new("ingredient").with("name", "SALT").with("amount", 1.0);
    let wrong_name = Fact::new("ingredient").with("name", "SUGAR").with("amount", 1.0);

    assert!(unify(&pattern, &matching, &Bindings::new()).is_some());
    assert!(unify(&pattern, &wrong_name, &Bindings::new()).is_none());
}

#[test]
fn bindings_thread_across_patterns() {
    // Unify against one fact, then carry the bindings into a second
    // unification that must agree on the shared variable.
    let ingredient = Pattern::new("ingredient").with("name", "?n");
    let known = Pattern::new("known").with("name", "?n").with("class", "?c");

    let fact_a = Fact::new("ingredient").with("name", "SALT");
    let fact_b = Fact::new("known").with("name", "SALT").with("class", "SEASONING");
    let fact_c = Fact::new("known").with("name", "SUGAR").with("class", "BASE");

    let first = unify(&ingredient, &fact_a, &Bindings::new()).unwrap();
    assert!(unify(&known, &fact_b, &first).is_some());
    assert!(unify(&known, &fact_c, &first).is_none());
}

#[test]
fn structural_non_match_is_silent() {
    // Missing attributes and wrong titles are non-matches, not errors.
    let pattern = Pattern::new("ingredient").with("name", "?n").with("grade", "?g");
    let no_grade = Fact::new("ingredient").with("name", "SALT");
    let wrong_title = Fact::new("equipment").with("name", "SALT").with("grade", "A");

    assert!(unify(&pattern, &no_grade, &Bindings::new()).is_none());
    assert!(unify(&pattern, &wrong_title, &Bindings::new()).is_none());
}

#[test]
fn numeric_literals_match_across_int_and_float() {
    let int_pattern = Pattern::new("measure").with("amount", 2i64);
    let float_fact = Fact::new("measure").with("amount", 2.0);
    assert!(unify(&int_pattern, &float_fact, &Bindings::new()).is_some());

    let float_pattern = Pattern::new("measure").with("amount", 2.0);
    let int_fact = Fact::new("measure").with("amount", 2i64);
    assert!(unify(&float_pattern, &int_fact, &Bindings::new()).is_some());
}

#[test]
fn bound_variable_uses_numeric_equality() {
    let mut bindings = Bindings::new();
    bindings.set("?a", 2i64);

    let pattern = Pattern::new("measure").with("amount", "?a");
    let fact = Fact::new("measure").with("amount", 2.0);
    assert!(unify(&pattern, &fact, &bindings).is_some());
}

#[test]
fn instantiation_round_trip() {
    let template = Pattern::new("classified")
        .with("name", "?n")
        .with("class", "SEASONING");

    let source = Pattern::new("ingredient").with("name", "?n");
    let fact = Fact::new("ingredient").with("name", "SALT");
    let bindings = unify(&source, &fact, &Bindings::new()).unwrap();

    let derived = template.instantiate(&bindings);
    assert_eq!(derived.title(), "classified");
    assert_eq!(derived.get("name"), Some(&Value::from("SALT")));
    assert_eq!(derived.get("class"), Some(&Value::from("SEASONING")));
}
