//! Integration tests for conflict resolution strategies.

use matchwood_engine::{
    ConflictStrategy, Engine, KnowledgeBase, Matcher, OutputLog, Pattern, Rule, WorkingMemory,
};
use matchwood_foundation::{Fact, FactRef, Value};

fn competing_rules() -> KnowledgeBase {
    let mut kb = KnowledgeBase::new();
    kb.add_rules(vec![
        // Registered first, low priority, single antecedent.
        Rule::new("default-route")
            .with_antecedent(Pattern::new("order").with("dish", "?d"))
            .with_consequent(Pattern::new("routed").with("dish", "?d").with("line", "GENERAL"))
            .with_priority(10),
        // Higher priority, more specific.
        Rule::new("grill-route")
            .with_antecedent(Pattern::new("order").with("dish", "?d"))
            .with_antecedent(Pattern::new("grill-dish").with("dish", "?d"))
            .with_consequent(Pattern::new("routed").with("dish", "?d").with("line", "GRILL"))
            .with_priority(90),
    ])
    .unwrap();
    kb
}

#[test]
fn priority_strategy_governs_firing() {
    let kb = competing_rules();
    let mut wm = WorkingMemory::new();
    wm.assert(Fact::new("grill-dish").with("dish", "STEAK"), None);
    let order = wm.assert(Fact::new("order").with("dish", "STEAK"), None);

    let mut engine = Engine::new().with_strategy(ConflictStrategy::Priority);
    let mut out = OutputLog::new();
    engine.begin_run();
    engine.forward_chain(order, &mut wm, &kb, &mut out).unwrap();

    // grill-route wins the first conflict; default-route still fires on the
    // next loop pass since its bindings were never consumed.
    let first = &engine.fire_log()[0];
    assert_eq!(first.rule_name.as_ref(), "grill-route");
    let routed = wm.query("routed", &[("line", Value::from("GRILL"))]);
    assert_eq!(routed.len(), 1);
}

#[test]
fn specificity_strategy_prefers_more_antecedents() {
    let kb = competing_rules();
    let mut wm = WorkingMemory::new();
    wm.assert(Fact::new("grill-dish").with("dish", "STEAK"), None);
    let order = wm.assert(Fact::new("order").with("dish", "STEAK"), None);

    let trigger = wm.get(order).unwrap().clone();
    let matches = Matcher::find_matching_rules(&trigger, FactRef::Asserted(order), &wm, &kb);
    let winner = ConflictStrategy::Specificity.resolve(&matches, &kb).unwrap();
    assert_eq!(matches[winner].rule_name.as_ref(), "grill-route");
}

#[test]
fn recency_strategy_prefers_newer_facts() {
    let mut kb = KnowledgeBase::new();
    kb.add_rule(
        Rule::new("assign")
            .with_antecedent(Pattern::new("order").with("dish", "?d"))
            .with_antecedent(Pattern::new("cook").with("name", "?c"))
            .with_consequent(Pattern::new("assignment").with("cook", "?c")),
    )
    .unwrap();

    let mut wm = WorkingMemory::new();
    wm.assert(Fact::new("cook").with("name", "AVA"), None);
    wm.assert(Fact::new("cook").with("name", "BEN"), None);
    let order = wm.assert(Fact::new("order").with("dish", "SOUP"), None);

    let trigger = wm.get(order).unwrap().clone();
    let matches = Matcher::find_matching_rules(&trigger, FactRef::Asserted(order), &wm, &kb);
    assert_eq!(matches.len(), 2);

    let winner = ConflictStrategy::Recency.resolve(&matches, &kb).unwrap();
    // BEN was asserted after AVA.
    assert_eq!(
        matches[winner].bindings.get("?c"),
        Some(&Value::from("BEN"))
    );
}

#[test]
fn ties_resolve_to_first_registered_rule() {
    let mut kb = KnowledgeBase::new();
    kb.add_rules(vec![
        Rule::new("alpha")
            .with_antecedent(Pattern::new("order").with("dish", "?d"))
            .with_consequent(Pattern::new("tagged").with("by", "alpha"))
            .with_priority(50),
        Rule::new("beta")
            .with_antecedent(Pattern::new("order").with("dish", "?d"))
            .with_consequent(Pattern::new("tagged").with("by", "beta"))
            .with_priority(50),
    ])
    .unwrap();

    let mut wm = WorkingMemory::new();
    let order = wm.assert(Fact::new("order").with("dish", "SOUP"), None);

    let trigger = wm.get(order).unwrap().clone();
    let matches = Matcher::find_matching_rules(&trigger, FactRef::Asserted(order), &wm, &kb);
    let winner = ConflictStrategy::Priority.resolve(&matches, &kb).unwrap();
    assert_eq!(matches[winner].rule_name.as_ref(), "alpha");
}

#[test]
fn resolution_is_deterministic() {
    let kb = competing_rules();
    let mut wm = WorkingMemory::new();
    wm.assert(Fact::new("grill-dish").with("dish", "STEAK"), None);
    let order = wm.assert(Fact::new("order").with("dish", "STEAK"), None);

    let trigger = wm.get(order).unwrap().clone();
    let matches = Matcher::find_matching_rules(&trigger, FactRef::Asserted(order), &wm, &kb);

    let first = ConflictStrategy::Priority.resolve(&matches, &kb);
    for _ in 0..10 {
        assert_eq!(ConflictStrategy::Priority.resolve(&matches, &kb), first);
    }
}
