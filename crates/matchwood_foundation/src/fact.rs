//! Facts: titled attribute/value records, the unit of knowledge.

use std::fmt;
use std::sync::Arc;

use crate::collections::MwMap;
use crate::derivation::DerivationRecord;
use crate::value::Value;

/// Identifier assigned to a fact when it is asserted into working memory.
///
/// Ids are assigned monotonically starting at 1 and never reused. Reference
/// facts in the knowledge base are never assigned an id.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactId(u64);

impl FactId {
    /// Creates a fact id from a raw counter value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FactId({})", self.0)
    }
}

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A titled record of attribute/value pairs.
///
/// Equality considers only the title and attributes: the id and derivation
/// are bookkeeping and are excluded, so a derived fact compares equal to an
/// attribute-identical fact that was asserted by hand. This is the equality
/// used for idempotence checks in working memory.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fact {
    title: Arc<str>,
    attributes: MwMap<String, Value>,
    id: Option<FactId>,
    derivation: Option<DerivationRecord>,
}

impl Fact {
    /// Creates a fact with the given title and no attributes.
    #[must_use]
    pub fn new(title: impl Into<Arc<str>>) -> Self {
        Self {
            title: title.into(),
            attributes: MwMap::new(),
            id: None,
            derivation: None,
        }
    }

    /// Builder method to add an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes = self.attributes.insert(key.into(), value.into());
        self
    }

    /// Returns the title tag.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the attribute map.
    #[must_use]
    pub fn attributes(&self) -> &MwMap<String, Value> {
        &self.attributes
    }

    /// Gets an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(&key.to_string())
    }

    /// Replaces an attribute value in place.
    ///
    /// Used by rule actions to model state transitions (e.g. toggling a
    /// status attribute) without re-derivation.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes = self.attributes.insert(key.into(), value.into());
    }

    /// Returns the id, if the fact has been asserted into working memory.
    #[must_use]
    pub const fn id(&self) -> Option<FactId> {
        self.id
    }

    /// Assigns the id. Called by working memory on assertion.
    pub fn assign_id(&mut self, id: FactId) {
        self.id = Some(id);
    }

    /// Returns the derivation record, if this fact was derived by a rule.
    #[must_use]
    pub const fn derivation(&self) -> Option<&DerivationRecord> {
        self.derivation.as_ref()
    }

    /// Attaches a derivation record. Called by working memory on assertion.
    pub fn attach_derivation(&mut self, derivation: DerivationRecord) {
        self.derivation = Some(derivation);
    }

    /// Returns true if the other fact has the same title and attributes.
    ///
    /// Same as `==`, named for call sites where the content-only semantics
    /// should be explicit.
    #[must_use]
    pub fn same_content(&self, other: &Fact) -> bool {
        self.title == other.title && self.attributes == other.attributes
    }
}

impl PartialEq for Fact {
    fn eq(&self, other: &Self) -> bool {
        self.same_content(other)
    }
}

impl Eq for Fact {}

impl fmt::Debug for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fact")
            .field("title", &self.title)
            .field("attributes", &self.attributes)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Fact {id} ('{}'", self.title)?,
            None => write!(f, "Fact ('{}'", self.title)?,
        }
        for (key, value) in self.attributes.iter() {
            write!(f, ", {key}={value}")?;
        }
        write!(f, ")")
    }
}
