//! Patterns, variable bindings, and unification.
//!
//! A [`Pattern`] is a fact template whose attribute values may be variables.
//! Variables are written with a leading `?` sigil (`?ingredient_name`), the
//! form rule packs use when building patterns from plain values.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use matchwood_foundation::{Fact, MwMap, Value};

// =============================================================================
// Pattern Types
// =============================================================================

/// The value slot of a pattern attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternValue {
    /// Match against a literal value.
    Literal(Value),
    /// Bind (or check) a variable. The name includes the `?` sigil.
    Var(String),
}

impl PatternValue {
    /// Classifies a plain value: strings with a leading `?` become variables.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(ref s) if s.starts_with('?') => Self::Var(s.to_string()),
            other => Self::Literal(other),
        }
    }

    /// Returns the variable name, if this is a variable slot.
    #[must_use]
    pub fn as_var(&self) -> Option<&str> {
        match self {
            Self::Var(name) => Some(name),
            Self::Literal(_) => None,
        }
    }
}

/// A fact template whose attribute values may be variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    title: Arc<str>,
    attributes: MwMap<String, PatternValue>,
}

impl Pattern {
    /// Creates a pattern with the given title and no attributes.
    #[must_use]
    pub fn new(title: impl Into<Arc<str>>) -> Self {
        Self {
            title: title.into(),
            attributes: MwMap::new(),
        }
    }

    /// Builder method to add an attribute.
    ///
    /// String values with a leading `?` sigil become variables; everything
    /// else is a literal.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes = self
            .attributes
            .insert(key.into(), PatternValue::from_value(value.into()));
        self
    }

    /// Builder method to add an explicit literal attribute.
    ///
    /// Use this when a literal string could be mistaken for a variable.
    #[must_use]
    pub fn with_literal(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes = self
            .attributes
            .insert(key.into(), PatternValue::Literal(value.into()));
        self
    }

    /// Returns the title tag.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the attribute slots.
    #[must_use]
    pub fn attributes(&self) -> &MwMap<String, PatternValue> {
        &self.attributes
    }

    /// Substitutes bindings into this template, producing a concrete fact.
    ///
    /// A variable with no binding degrades to its literal `?name` text in the
    /// output fact rather than failing, so a mis-written rule pack produces a
    /// visibly wrong fact instead of a silent dead end.
    #[must_use]
    pub fn instantiate(&self, bindings: &Bindings) -> Fact {
        let mut fact = Fact::new(Arc::clone(&self.title));
        for (key, slot) in self.attributes.iter() {
            let value = match slot {
                PatternValue::Literal(v) => v.clone(),
                PatternValue::Var(name) => bindings
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| Value::from(name.as_str())),
            };
            fact.set(key.clone(), value);
        }
        fact
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "('{}'", self.title)?;
        for (key, slot) in self.attributes.iter() {
            match slot {
                PatternValue::Literal(v) => write!(f, ", {key}={v}")?,
                PatternValue::Var(name) => write!(f, ", {key}={name}")?,
            }
        }
        write!(f, ")")
    }
}

/// One condition in a rule's antecedent list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Antecedent {
    /// The pattern must match some candidate fact.
    Positive(Pattern),
    /// Negation-as-failure: the pattern must match no candidate fact.
    ///
    /// A negated antecedent contributes no bindings, so it must be ordered
    /// after the antecedents that bind the variables it references.
    Negated(Pattern),
}

impl Antecedent {
    /// Returns the inner pattern.
    #[must_use]
    pub const fn pattern(&self) -> &Pattern {
        match self {
            Self::Positive(p) | Self::Negated(p) => p,
        }
    }

    /// Returns true for negated antecedents.
    #[must_use]
    pub const fn is_negated(&self) -> bool {
        matches!(self, Self::Negated(_))
    }
}

// =============================================================================
// Bindings
// =============================================================================

/// A set of variable bindings accumulated during a match.
#[derive(Clone, Debug, Default)]
pub struct Bindings {
    values: HashMap<String, Value>,
}

impl Bindings {
    /// Creates empty bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a binding by variable name (including the `?` sigil).
    #[must_use]
    pub fn get(&self, var: &str) -> Option<&Value> {
        self.values.get(var)
    }

    /// Sets a binding.
    pub fn set(&mut self, var: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(var.into(), value.into());
    }

    /// Returns true if the variable is bound.
    #[must_use]
    pub fn contains(&self, var: &str) -> bool {
        self.values.contains_key(var)
    }

    /// Returns the number of bound variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no variables are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates all bindings.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Computes a hash identifying this binding set.
    ///
    /// Keys are visited in sorted order so two binding sets with the same
    /// variable/value pairs always produce the same fingerprint. Used for
    /// fire-identity bookkeeping.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        let mut hasher = DefaultHasher::new();

        let mut keys: Vec<_> = self.values.keys().collect();
        keys.sort();

        for key in keys {
            key.hash(&mut hasher);
            self.values[key].hash(&mut hasher);
        }
        hasher.finish()
    }
}

// =============================================================================
// Unification
// =============================================================================

/// Matches one pattern against one fact, producing new bindings or failure.
///
/// The titles must match, and every pattern attribute must be present on the
/// fact (extra fact attributes are ignored). Literals require value equality;
/// a variable binds on first occurrence and must equal its existing binding
/// afterwards. The input bindings are never mutated.
#[must_use]
pub fn unify(pattern: &Pattern, fact: &Fact, bindings: &Bindings) -> Option<Bindings> {
    if pattern.title() != fact.title() {
        return None;
    }

    let mut new_bindings = bindings.clone();

    for (key, slot) in pattern.attributes().iter() {
        // A fact missing a pattern attribute is a non-match, never an error.
        let fact_value = fact.get(key)?;

        match slot {
            PatternValue::Var(name) => {
                if let Some(existing) = new_bindings.get(name) {
                    if existing != fact_value {
                        return None;
                    }
                } else {
                    new_bindings.set(name.clone(), fact_value.clone());
                }
            }
            PatternValue::Literal(expected) => {
                if expected != fact_value {
                    return None;
                }
            }
        }
    }

    Some(new_bindings)
}

// =============================================================================
// Tests
// =============================================================================
