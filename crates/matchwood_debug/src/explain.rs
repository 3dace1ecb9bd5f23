//! Proof trees: why does this fact exist?
//!
//! A proof tree is built by walking derivation records backwards from a
//! fact. Input facts (asserted by the caller) and reference facts (knowledge
//! base axioms) are the leaves; every interior node names the rule that
//! derived its fact. Derivation edges only point to strictly older facts,
//! so the walk always terminates.

use std::fmt::Write as _;
use std::sync::Arc;

use matchwood_engine::{KnowledgeBase, WorkingMemory};
use matchwood_foundation::{Error, Fact, FactId, FactRef, Result};

// =============================================================================
// Proof Types
// =============================================================================

/// How a fact came to exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProofStep {
    /// Asserted by the caller; an axiom of the run.
    Input,
    /// A knowledge-base reference fact.
    Reference,
    /// Derived by a rule from the given sub-proofs.
    Derived {
        /// Name of the rule that fired.
        rule_name: Arc<str>,
        /// Proofs of the matched antecedent facts, in antecedent order.
        antecedents: Vec<Proof>,
    },
}

/// A proof tree rooted at one fact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proof {
    /// The fact being explained.
    pub fact: Fact,
    /// How the fact came to exist.
    pub step: ProofStep,
}

impl Proof {
    /// Returns the name of the deriving rule, if the fact was derived.
    #[must_use]
    pub fn rule_name(&self) -> Option<&str> {
        match &self.step {
            ProofStep::Derived { rule_name, .. } => Some(rule_name),
            ProofStep::Input | ProofStep::Reference => None,
        }
    }

    /// Returns the number of nodes in the tree, including this one.
    #[must_use]
    pub fn size(&self) -> usize {
        match &self.step {
            ProofStep::Input | ProofStep::Reference => 1,
            ProofStep::Derived { antecedents, .. } => {
                1 + antecedents.iter().map(Proof::size).sum::<usize>()
            }
        }
    }

    /// Returns the depth of the tree (a leaf has depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        match &self.step {
            ProofStep::Input | ProofStep::Reference => 1,
            ProofStep::Derived { antecedents, .. } => {
                1 + antecedents.iter().map(Proof::depth).max().unwrap_or(0)
            }
        }
    }

    /// Renders the tree as indented text.
    ///
    /// ```text
    /// Fact #3 ('classified', class=SEASONING, name=SALT) derived by rule 'classify-known'
    /// +-- Fact #1 ('ingredient', name=SALT) [INPUT]
    /// +-- Fact ('known', class=SEASONING, name=SALT) [REFERENCE]
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, indent: usize) {
        let pad = "    ".repeat(indent);
        let prefix = if indent == 0 {
            pad
        } else {
            format!("{}+-- ", "    ".repeat(indent - 1))
        };

        match &self.step {
            ProofStep::Input => {
                let _ = writeln!(out, "{prefix}{} [INPUT]", self.fact);
            }
            ProofStep::Reference => {
                let _ = writeln!(out, "{prefix}{} [REFERENCE]", self.fact);
            }
            ProofStep::Derived {
                rule_name,
                antecedents,
            } => {
                let _ = writeln!(out, "{prefix}{} derived by rule '{rule_name}'", self.fact);
                for antecedent in antecedents {
                    antecedent.render_into(out, indent + 1);
                }
            }
        }
    }
}

// =============================================================================
// Explainer
// =============================================================================

/// Builds proof trees from derivation records.
pub struct Explainer;

impl Explainer {
    /// Builds the proof tree for a fact.
    ///
    /// Works for retracted facts too: working memory retains retired facts
    /// precisely so that explanation can still resolve them.
    ///
    /// # Errors
    ///
    /// Returns `FactNotFound` if the id (or any id reachable through
    /// derivation records) does not resolve.
    pub fn explain(id: FactId, wm: &WorkingMemory, kb: &KnowledgeBase) -> Result<Proof> {
        let fact = wm.get(id).ok_or_else(|| Error::fact_not_found(id))?;
        Self::proof_for(fact, wm, kb)
    }

    /// Renders the proof tree for a fact as indented text.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`explain`](Self::explain).
    pub fn explain_text(id: FactId, wm: &WorkingMemory, kb: &KnowledgeBase) -> Result<String> {
        Ok(Self::explain(id, wm, kb)?.render())
    }

    fn proof_for(fact: &Fact, wm: &WorkingMemory, kb: &KnowledgeBase) -> Result<Proof> {
        let Some(record) = fact.derivation() else {
            return Ok(Proof {
                fact: fact.clone(),
                step: ProofStep::Input,
            });
        };

        let mut antecedents = Vec::with_capacity(record.antecedents().len());
        for fact_ref in record.antecedents() {
            antecedents.push(Self::proof_for_ref(*fact_ref, wm, kb)?);
        }

        Ok(Proof {
            fact: fact.clone(),
            step: ProofStep::Derived {
                rule_name: record.rule_name().into(),
                antecedents,
            },
        })
    }

    fn proof_for_ref(fact_ref: FactRef, wm: &WorkingMemory, kb: &KnowledgeBase) -> Result<Proof> {
        match fact_ref {
            FactRef::Asserted(id) => {
                let fact = wm.get(id).ok_or_else(|| Error::fact_not_found(id))?;
                Self::proof_for(fact, wm, kb)
            }
            FactRef::Reference(index) => {
                let fact = kb.reference(index).ok_or_else(|| {
                    Error::internal(format!("reference fact index {index} out of range"))
                })?;
                Ok(Proof {
                    fact: fact.clone(),
                    step: ProofStep::Reference,
                })
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
