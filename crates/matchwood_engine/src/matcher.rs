//! Trigger-anchored rule matching.
//!
//! Matching is anchored on a single trigger fact: for each rule, the first
//! positive antecedent that unifies with the trigger becomes the anchor, and
//! the remaining antecedents are matched against the full candidate pool
//! (reference facts plus live working-memory facts). Negated antecedents
//! succeed only when their pattern matches nothing in the pool.

use std::sync::Arc;

use matchwood_foundation::{Fact, FactRef};

use crate::memory::{KnowledgeBase, WorkingMemory};
use crate::pattern::{Antecedent, Bindings, unify};

// =============================================================================
// Match Types
// =============================================================================

/// One complete binding of a rule's remaining antecedents.
#[derive(Clone, Debug)]
pub struct Match {
    /// The accumulated variable bindings.
    pub bindings: Bindings,
    /// The facts matched by positive antecedents, anchor first.
    pub antecedent_facts: Vec<FactRef>,
}

/// A rule whose antecedents fully matched, with one binding set.
///
/// A single rule can yield several `RuleMatch`es for one trigger when the
/// pool offers multiple ways to satisfy its remaining antecedents.
#[derive(Clone, Debug)]
pub struct RuleMatch {
    /// Index of the rule in the knowledge base's registration order.
    pub rule_index: usize,
    /// The rule's name.
    pub rule_name: Arc<str>,
    /// The accumulated variable bindings.
    pub bindings: Bindings,
    /// The facts matched by positive antecedents, anchor first.
    pub antecedent_facts: Vec<FactRef>,
}

// =============================================================================
// Matcher
// =============================================================================

/// Stateless matching routines.
pub struct Matcher;

impl Matcher {
    /// Builds the candidate pool: reference facts first, then live facts.
    ///
    /// Reference facts come first so their positional refs are stable; pool
    /// order otherwise only affects the order of enumerated matches, not
    /// which matches exist.
    #[must_use]
    pub fn candidates<'a>(
        wm: &'a WorkingMemory,
        kb: &'a KnowledgeBase,
    ) -> Vec<(FactRef, &'a Fact)> {
        let mut pool: Vec<(FactRef, &Fact)> = kb
            .reference_facts()
            .iter()
            .enumerate()
            .map(|(i, f)| (FactRef::Reference(i), f))
            .collect();
        pool.extend(
            wm.facts()
                .iter()
                .filter_map(|f| f.id().map(|id| (FactRef::Asserted(id), f))),
        );
        pool
    }

    /// Matches a list of antecedents against the pool, enumerating every
    /// consistent binding set (cross product).
    ///
    /// Positive antecedents try each pool fact in order and recurse on
    /// success; negated antecedents prune the branch if their pattern
    /// unifies with any pool fact, and contribute no bindings otherwise.
    #[must_use]
    pub fn match_antecedents(
        antecedents: &[Antecedent],
        bindings: &Bindings,
        matched: &[FactRef],
        pool: &[(FactRef, &Fact)],
    ) -> Vec<Match> {
        let Some((first, rest)) = antecedents.split_first() else {
            return vec![Match {
                bindings: bindings.clone(),
                antecedent_facts: matched.to_vec(),
            }];
        };

        match first {
            Antecedent::Negated(pattern) => {
                let blocked = pool
                    .iter()
                    .any(|(_, fact)| unify(pattern, fact, bindings).is_some());
                if blocked {
                    Vec::new()
                } else {
                    Self::match_antecedents(rest, bindings, matched, pool)
                }
            }
            Antecedent::Positive(pattern) => {
                let mut results = Vec::new();
                for (fact_ref, fact) in pool {
                    if let Some(extended) = unify(pattern, fact, bindings) {
                        let mut matched_now = matched.to_vec();
                        matched_now.push(*fact_ref);
                        results.extend(Self::match_antecedents(
                            rest,
                            &extended,
                            &matched_now,
                            pool,
                        ));
                    }
                }
                results
            }
        }
    }

    /// Finds every rule match anchored on the given trigger fact.
    ///
    /// For each rule, negated antecedents are skipped as anchor candidates;
    /// the first positive antecedent that unifies with the trigger anchors
    /// the rule, and the remaining antecedents (declaration order preserved)
    /// are matched against the pool. Later positive antecedents of the same
    /// rule are not tried as alternative anchors.
    #[must_use]
    pub fn find_matching_rules(
        trigger: &Fact,
        trigger_ref: FactRef,
        wm: &WorkingMemory,
        kb: &KnowledgeBase,
    ) -> Vec<RuleMatch> {
        let pool = Self::candidates(wm, kb);
        let mut matches = Vec::new();

        for (rule_index, rule) in kb.rules().iter().enumerate() {
            for (anchor_index, antecedent) in rule.antecedents().iter().enumerate() {
                let Antecedent::Positive(pattern) = antecedent else {
                    continue;
                };
                let Some(anchor_bindings) = unify(pattern, trigger, &Bindings::new()) else {
                    continue;
                };

                let remaining: Vec<Antecedent> = rule
                    .antecedents()
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != anchor_index)
                    .map(|(_, a)| a.clone())
                    .collect();

                for m in Self::match_antecedents(
                    &remaining,
                    &anchor_bindings,
                    &[trigger_ref],
                    &pool,
                ) {
                    matches.push(RuleMatch {
                        rule_index,
                        rule_name: rule.name_arc(),
                        bindings: m.bindings,
                        antecedent_facts: m.antecedent_facts,
                    });
                }
                break;
            }
        }

        matches
    }
}

// =============================================================================
// Tests
// =============================================================================
