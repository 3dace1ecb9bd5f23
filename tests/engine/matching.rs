//! Integration tests for trigger-anchored matching.

use matchwood_engine::{KnowledgeBase, Matcher, Pattern, Rule, WorkingMemory};
use matchwood_foundation::{Fact, FactRef, Value};

fn trigger(wm: &WorkingMemory, index: usize) -> (Fact, FactRef) {
    let fact = wm.facts()[index].clone();
    let id = fact.id().unwrap();
    (fact, FactRef::Asserted(id))
}

#[test]
fn reference_facts_join_the_candidate_pool() {
    let mut wm = WorkingMemory::new();
    let mut kb = KnowledgeBase::new();
    kb.add_reference_fact(Fact::new("known").with("name", "SALT").with("class", "SEASONING"));
    kb.add_reference_fact(Fact::new("known").with("name", "PEPPER").with("class", "SEASONING"));
    kb.add_rule(
        Rule::new("classify-known")
            .with_antecedent(Pattern::new("ingredient").with("name", "?n"))
            .with_antecedent(Pattern::new("known").with("name", "?n").with("class", "?c"))
            .with_consequent(Pattern::new("classified").with("name", "?n").with("class", "?c")),
    )
    .unwrap();

    wm.assert(Fact::new("ingredient").with("name", "SALT"), None);
    let (fact, fact_ref) = trigger(&wm, 0);

    // The shared ?n variable joins the trigger to exactly one lookup row.
    let matches = Matcher::find_matching_rules(&fact, fact_ref, &wm, &kb);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].antecedent_facts, vec![fact_ref, FactRef::Reference(0)]);
}

#[test]
fn multiple_rules_can_match_one_trigger() {
    let mut wm = WorkingMemory::new();
    let mut kb = KnowledgeBase::new();
    kb.add_rules(vec![
        Rule::new("first")
            .with_antecedent(Pattern::new("ingredient").with("name", "?n"))
            .with_consequent(Pattern::new("a").with("name", "?n")),
        Rule::new("second")
            .with_antecedent(Pattern::new("ingredient").with("name", "?n"))
            .with_consequent(Pattern::new("b").with("name", "?n")),
    ])
    .unwrap();

    wm.assert(Fact::new("ingredient").with("name", "SALT"), None);
    let (fact, fact_ref) = trigger(&wm, 0);

    let matches = Matcher::find_matching_rules(&fact, fact_ref, &wm, &kb);
    assert_eq!(matches.len(), 2);
    // Matches arrive in rule registration order.
    assert_eq!(matches[0].rule_name.as_ref(), "first");
    assert_eq!(matches[1].rule_name.as_ref(), "second");
}

#[test]
fn cross_product_over_two_open_antecedents() {
    let mut wm = WorkingMemory::new();
    let mut kb = KnowledgeBase::new();
    kb.add_rule(
        Rule::new("combine")
            .with_antecedent(Pattern::new("request").with("id", "?r"))
            .with_antecedent(Pattern::new("cook").with("name", "?c"))
            .with_antecedent(Pattern::new("station").with("name", "?s"))
            .with_consequent(
                Pattern::new("plan").with("cook", "?c").with("station", "?s"),
            ),
    )
    .unwrap();

    wm.assert(Fact::new("cook").with("name", "AVA"), None);
    wm.assert(Fact::new("cook").with("name", "BEN"), None);
    wm.assert(Fact::new("station").with("name", "GRILL"), None);
    wm.assert(Fact::new("station").with("name", "PREP"), None);
    wm.assert(Fact::new("request").with("id", 1), None);
    let (fact, fact_ref) = trigger(&wm, 4);

    let matches = Matcher::find_matching_rules(&fact, fact_ref, &wm, &kb);
    // Two cooks x two stations.
    assert_eq!(matches.len(), 4);
}

#[test]
fn negation_prunes_per_binding_set() {
    let mut wm = WorkingMemory::new();
    let mut kb = KnowledgeBase::new();
    kb.add_rule(
        Rule::new("assign")
            .with_antecedent(Pattern::new("request").with("id", "?r"))
            .with_antecedent(Pattern::new("cook").with("name", "?c"))
            .with_negation(Pattern::new("busy").with("name", "?c"))
            .with_consequent(Pattern::new("assignment").with("cook", "?c")),
    )
    .unwrap();

    wm.assert(Fact::new("cook").with("name", "AVA"), None);
    wm.assert(Fact::new("cook").with("name", "BEN"), None);
    wm.assert(Fact::new("busy").with("name", "AVA"), None);
    wm.assert(Fact::new("request").with("id", 1), None);
    let (fact, fact_ref) = trigger(&wm, 3);

    let matches = Matcher::find_matching_rules(&fact, fact_ref, &wm, &kb);
    // Only BEN survives the negation.
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].bindings.get("?c"), Some(&Value::from("BEN")));
}

#[test]
fn anchor_must_be_a_positive_antecedent() {
    let mut wm = WorkingMemory::new();
    let mut kb = KnowledgeBase::new();
    kb.add_rule(
        Rule::new("flag-unclassified")
            .with_antecedent(Pattern::new("ingredient").with("name", "?n"))
            .with_negation(Pattern::new("classified").with("name", "?n"))
            .with_consequent(Pattern::new("todo").with("name", "?n")),
    )
    .unwrap();

    // A classified fact as trigger unifies the negated pattern, but negated
    // antecedents never anchor, so this trigger matches nothing.
    wm.assert(Fact::new("classified").with("name", "SALT"), None);
    let (fact, fact_ref) = trigger(&wm, 0);

    assert!(Matcher::find_matching_rules(&fact, fact_ref, &wm, &kb).is_empty());
}

#[test]
fn retracted_facts_leave_the_pool() {
    let mut wm = WorkingMemory::new();
    let mut kb = KnowledgeBase::new();
    kb.add_rule(
        Rule::new("pair")
            .with_antecedent(Pattern::new("order").with("dish", "?d"))
            .with_antecedent(Pattern::new("cook").with("name", "?c"))
            .with_consequent(Pattern::new("assignment").with("cook", "?c")),
    )
    .unwrap();

    let cook = wm.assert(Fact::new("cook").with("name", "AVA"), None);
    wm.assert(Fact::new("order").with("dish", "SOUP"), None);
    let (fact, fact_ref) = trigger(&wm, 1);

    assert_eq!(Matcher::find_matching_rules(&fact, fact_ref, &wm, &kb).len(), 1);

    wm.retract(cook);
    assert!(Matcher::find_matching_rules(&fact, fact_ref, &wm, &kb).is_empty());
}
