//! Provenance records attached to derived facts.
//!
//! A derived fact remembers which rule produced it and which antecedent
//! facts it matched. References are non-owning: working memory owns live
//! facts, and the knowledge base owns reference facts, so derivation edges
//! store ids and indices that are resolved at explanation time.

use std::sync::Arc;

use crate::fact::FactId;

/// Non-owning reference to a fact that participated in a derivation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FactRef {
    /// A fact asserted into working memory, referenced by id.
    Asserted(FactId),
    /// A knowledge-base reference fact, referenced by position.
    ///
    /// Reference facts are immutable axioms and are never assigned ids.
    Reference(usize),
}

impl FactRef {
    /// Returns the fact id for asserted facts, `None` for reference facts.
    #[must_use]
    pub const fn id(self) -> Option<FactId> {
        match self {
            Self::Asserted(id) => Some(id),
            Self::Reference(_) => None,
        }
    }
}

/// Record of which rule and antecedent facts produced a derived fact.
///
/// Derivation edges only ever point to facts that existed strictly before
/// the derived fact (ids are monotonic; reference facts are always-available
/// axioms), so derivation graphs are acyclic by construction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivationRecord {
    rule_name: Arc<str>,
    antecedents: Vec<FactRef>,
}

impl DerivationRecord {
    /// Creates a derivation record for the given rule and matched facts.
    #[must_use]
    pub fn new(rule_name: impl Into<Arc<str>>, antecedents: Vec<FactRef>) -> Self {
        Self {
            rule_name: rule_name.into(),
            antecedents,
        }
    }

    /// Returns the name of the rule that fired.
    #[must_use]
    pub fn rule_name(&self) -> &str {
        &self.rule_name
    }

    /// Returns the matched antecedent facts, in antecedent order.
    #[must_use]
    pub fn antecedents(&self) -> &[FactRef] {
        &self.antecedents
    }
}
