//! Working memory and the knowledge base.
//!
//! Working memory holds the mutable fact store: facts asserted by the caller
//! or derived by rules, each stamped with a monotonic id. The knowledge base
//! is the immutable configuration half: rules plus reference facts (axioms
//! that participate in matching but are never asserted).

use matchwood_foundation::{DerivationRecord, Error, Fact, FactId, Result, Value};

use crate::rule::Rule;

// =============================================================================
// Working Memory
// =============================================================================

/// The mutable store of asserted facts.
///
/// Ids are assigned monotonically starting at 1 and never reused. Retracted
/// facts move to a retired store rather than disappearing, so explanation can
/// still resolve derivation edges that point at them.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkingMemory {
    facts: Vec<Fact>,
    retired: Vec<Fact>,
    next_id: u64,
}

impl WorkingMemory {
    /// Creates an empty working memory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            facts: Vec::new(),
            retired: Vec::new(),
            next_id: 1,
        }
    }

    /// Asserts a fact, assigning it the next id.
    ///
    /// The derivation record, if any, is attached before storage. Callers
    /// that want idempotent assertion check [`find_content`](Self::find_content)
    /// first; `assert` itself always stores.
    pub fn assert(&mut self, mut fact: Fact, derivation: Option<DerivationRecord>) -> FactId {
        let id = FactId::new(self.next_id);
        self.next_id += 1;
        fact.assign_id(id);
        if let Some(record) = derivation {
            fact.attach_derivation(record);
        }
        self.facts.push(fact);
        id
    }

    /// Retracts a fact by id, returning true if it was live.
    ///
    /// The fact moves to the retired store and remains resolvable through
    /// [`get`](Self::get), but no longer matches rules.
    pub fn retract(&mut self, id: FactId) -> bool {
        if let Some(pos) = self.facts.iter().position(|f| f.id() == Some(id)) {
            let fact = self.facts.remove(pos);
            self.retired.push(fact);
            true
        } else {
            false
        }
    }

    /// Looks up a fact by id, live or retired.
    #[must_use]
    pub fn get(&self, id: FactId) -> Option<&Fact> {
        self.facts
            .iter()
            .chain(self.retired.iter())
            .find(|f| f.id() == Some(id))
    }

    /// Looks up a live fact by id.
    #[must_use]
    pub fn get_live(&self, id: FactId) -> Option<&Fact> {
        self.facts.iter().find(|f| f.id() == Some(id))
    }

    /// Finds a live fact with the same title and attributes, if any.
    #[must_use]
    pub fn find_content(&self, fact: &Fact) -> Option<FactId> {
        self.facts
            .iter()
            .find(|f| f.same_content(fact))
            .and_then(Fact::id)
    }

    /// Returns true if a content-equal live fact exists.
    #[must_use]
    pub fn contains(&self, fact: &Fact) -> bool {
        self.find_content(fact).is_some()
    }

    /// Replaces an attribute value on a live fact.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::FactNotFound`](matchwood_foundation::ErrorKind::FactNotFound)
    /// if no live fact has the given id.
    pub fn set_attr(
        &mut self,
        id: FactId,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<()> {
        let fact = self
            .facts
            .iter_mut()
            .find(|f| f.id() == Some(id))
            .ok_or_else(|| Error::fact_not_found(id))?;
        fact.set(key, value);
        Ok(())
    }

    /// Queries live facts by title and required attribute values.
    #[must_use]
    pub fn query(&self, title: &str, constraints: &[(&str, Value)]) -> Vec<&Fact> {
        self.facts
            .iter()
            .filter(|f| {
                f.title() == title
                    && constraints
                        .iter()
                        .all(|(key, value)| f.get(key) == Some(value))
            })
            .collect()
    }

    /// Queries for the first live fact matching title and constraints.
    #[must_use]
    pub fn query_first(&self, title: &str, constraints: &[(&str, Value)]) -> Option<&Fact> {
        self.query(title, constraints).into_iter().next()
    }

    /// Returns the ids of all live facts, in assertion order.
    #[must_use]
    pub fn live_ids(&self) -> Vec<FactId> {
        self.facts.iter().filter_map(Fact::id).collect()
    }

    /// Returns the live facts, in assertion order.
    #[must_use]
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Returns the number of live facts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Returns true if no live facts exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

// =============================================================================
// Knowledge Base
// =============================================================================

/// The immutable configuration half: rules and reference facts.
///
/// Reference facts are axioms (lookup tables, domain constants). They join
/// the candidate pool during matching but are never assigned ids and never
/// retract.
#[derive(Default)]
pub struct KnowledgeBase {
    rules: Vec<Rule>,
    reference_facts: Vec<Fact>,
}

impl KnowledgeBase {
    /// Creates an empty knowledge base.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule. Registration order is the conflict tie-break order.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MalformedRule`](matchwood_foundation::ErrorKind::MalformedRule)
    /// if the rule has no antecedents, no positive antecedent, or neither a
    /// consequent nor an action.
    pub fn add_rule(&mut self, rule: Rule) -> Result<()> {
        if rule.antecedents().is_empty() {
            return Err(Error::malformed_rule(rule.name(), "rule has no antecedents"));
        }
        if rule.antecedents().iter().all(crate::pattern::Antecedent::is_negated) {
            return Err(Error::malformed_rule(
                rule.name(),
                "rule has no positive antecedent to anchor on",
            ));
        }
        if rule.consequent().is_none() && rule.action().is_none() {
            return Err(Error::malformed_rule(
                rule.name(),
                "rule has neither a consequent nor an action",
            ));
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Registers several rules in order.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed rule; earlier rules stay registered.
    pub fn add_rules(&mut self, rules: impl IntoIterator<Item = Rule>) -> Result<()> {
        for rule in rules {
            self.add_rule(rule)?;
        }
        Ok(())
    }

    /// Adds a reference fact (axiom).
    pub fn add_reference_fact(&mut self, fact: Fact) {
        self.reference_facts.push(fact);
    }

    /// Adds several reference facts in order.
    pub fn add_reference_facts(&mut self, facts: impl IntoIterator<Item = Fact>) {
        self.reference_facts.extend(facts);
    }

    /// Returns the registered rules, in registration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Looks up a rule by name.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name() == name)
    }

    /// Returns the reference facts.
    #[must_use]
    pub fn reference_facts(&self) -> &[Fact] {
        &self.reference_facts
    }

    /// Looks up a reference fact by position.
    #[must_use]
    pub fn reference(&self, index: usize) -> Option<&Fact> {
        self.reference_facts.get(index)
    }
}

// =============================================================================
// Tests
// =============================================================================
