//! Production rules.
//!
//! A rule pairs an antecedent list (patterns to match, possibly negated)
//! with an effect: a consequent pattern to derive, an action closure to run,
//! or both. Actions are the escape hatch for arithmetic and other work that
//! pattern substitution cannot express; they receive the match bindings and
//! may return enriched bindings for the consequent to use.

use std::fmt;
use std::sync::Arc;

use matchwood_foundation::{Result, Value};

use crate::memory::{KnowledgeBase, WorkingMemory};
use crate::pattern::{Antecedent, Bindings, Pattern};

/// Output collected from rule actions during a run, in firing order.
pub type OutputLog = Vec<Value>;

/// Action closure attached to a rule.
///
/// Receives the match bindings, mutable working memory, the knowledge base,
/// and the run's output log. Returns the (possibly enriched) bindings used
/// to instantiate the consequent.
pub type ActionFn = Arc<
    dyn Fn(Bindings, &mut WorkingMemory, &KnowledgeBase, &mut OutputLog) -> Result<Bindings>
        + Send
        + Sync,
>;

/// A production rule: antecedents, an optional consequent, and an optional
/// action.
#[derive(Clone)]
pub struct Rule {
    name: Arc<str>,
    antecedents: Vec<Antecedent>,
    consequent: Option<Pattern>,
    priority: i32,
    action: Option<ActionFn>,
}

impl Rule {
    /// Creates a rule with the given name and no conditions.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            antecedents: Vec::new(),
            consequent: None,
            priority: 0,
            action: None,
        }
    }

    /// Builder method to append a positive antecedent.
    #[must_use]
    pub fn with_antecedent(mut self, pattern: Pattern) -> Self {
        self.antecedents.push(Antecedent::Positive(pattern));
        self
    }

    /// Builder method to append a negated antecedent.
    ///
    /// Order after the positive antecedents that bind its variables.
    #[must_use]
    pub fn with_negation(mut self, pattern: Pattern) -> Self {
        self.antecedents.push(Antecedent::Negated(pattern));
        self
    }

    /// Builder method to set the consequent pattern.
    #[must_use]
    pub fn with_consequent(mut self, pattern: Pattern) -> Self {
        self.consequent = Some(pattern);
        self
    }

    /// Builder method to set the priority (default 0, higher wins).
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Builder method to attach an action closure.
    #[must_use]
    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: Fn(Bindings, &mut WorkingMemory, &KnowledgeBase, &mut OutputLog) -> Result<Bindings>
            + Send
            + Sync
            + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Returns the rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rule name as a shared string, for derivation records.
    #[must_use]
    pub fn name_arc(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }

    /// Returns the antecedents, in declaration order.
    #[must_use]
    pub fn antecedents(&self) -> &[Antecedent] {
        &self.antecedents
    }

    /// Returns the consequent pattern, if any.
    #[must_use]
    pub const fn consequent(&self) -> Option<&Pattern> {
        self.consequent.as_ref()
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns the action closure, if any.
    #[must_use]
    pub const fn action(&self) -> Option<&ActionFn> {
        self.action.as_ref()
    }

    /// Returns true if any antecedent is negated.
    ///
    /// Rules with negation get weaker refire protection: retracting a fact
    /// can make a previously failed negation succeed, so their fire identity
    /// incorporates the working-memory size.
    #[must_use]
    pub fn has_negation(&self) -> bool {
        self.antecedents.iter().any(Antecedent::is_negated)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("antecedents", &self.antecedents)
            .field("consequent", &self.consequent)
            .field("priority", &self.priority)
            .field("action", &self.action.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
