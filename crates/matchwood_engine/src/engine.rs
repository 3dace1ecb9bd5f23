//! Depth-first forward chaining.
//!
//! The engine chases each trigger fact depth-first: match rules against the
//! trigger, resolve conflicts, fire the winner, then immediately chase the
//! derived fact before returning to the original trigger. Each chase level
//! keeps its own fired set so a rule can refire at the same level only with
//! different bindings (or, for rules with negation, after working memory
//! changed size).

use std::collections::HashSet;
use std::sync::Arc;

use matchwood_foundation::{
    ChaseLimit, DerivationRecord, Error, ErrorContext, FactId, Result,
};

use crate::conflict::ConflictStrategy;
use crate::matcher::{Matcher, RuleMatch};
use crate::memory::{KnowledgeBase, WorkingMemory};
use crate::rule::OutputLog;

/// Default cap on rule firings per run.
pub const DEFAULT_MAX_FIRINGS: u32 = 10_000;

// =============================================================================
// Run Records
// =============================================================================

/// One entry in the fire log: a rule fired against a trigger.
#[derive(Clone, Debug)]
pub struct FireRecord {
    /// Name of the rule that fired.
    pub rule_name: Arc<str>,
    /// The trigger fact the match was anchored on.
    pub trigger: FactId,
    /// The derived fact, if the rule had a consequent.
    pub derived: Option<FactId>,
    /// Chase depth at which the firing happened (0 = original trigger).
    pub depth: usize,
}

/// Result of chasing one trigger.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChainOutcome {
    /// True if at least one rule fired.
    pub fired: bool,
    /// The last fact derived during the chase, if any.
    pub last_derived: Option<FactId>,
}

// =============================================================================
// Engine
// =============================================================================

/// The forward-chaining engine.
///
/// Holds run configuration and per-run bookkeeping (firing count, fire log).
/// Call [`begin_run`](Self::begin_run) before a fresh run to reset the
/// bookkeeping; `run_all` does this itself.
#[derive(Clone, Debug)]
pub struct Engine {
    strategy: ConflictStrategy,
    max_firings: u32,
    firing_count: u32,
    fire_log: Vec<FireRecord>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with the default strategy and firing cap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategy: ConflictStrategy::default(),
            max_firings: DEFAULT_MAX_FIRINGS,
            firing_count: 0,
            fire_log: Vec::new(),
        }
    }

    /// Builder method to set the conflict resolution strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: ConflictStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Builder method to set the per-run firing cap.
    ///
    /// Termination with a cyclic, non-progressing rule set is a caller
    /// obligation; the cap converts a runaway chase into an error.
    #[must_use]
    pub fn with_max_firings(mut self, max_firings: u32) -> Self {
        self.max_firings = max_firings;
        self
    }

    /// Returns the conflict resolution strategy.
    #[must_use]
    pub const fn strategy(&self) -> ConflictStrategy {
        self.strategy
    }

    /// Resets per-run bookkeeping (firing count and fire log).
    pub fn begin_run(&mut self) {
        self.firing_count = 0;
        self.fire_log.clear();
    }

    /// Returns the fire log for the current run, in firing order.
    #[must_use]
    pub fn fire_log(&self) -> &[FireRecord] {
        &self.fire_log
    }

    /// Returns the number of firings in the current run.
    #[must_use]
    pub const fn firing_count(&self) -> u32 {
        self.firing_count
    }

    /// Chases a single trigger fact depth-first.
    ///
    /// Does not reset bookkeeping; call [`begin_run`](Self::begin_run) first
    /// when this starts a fresh run.
    ///
    /// # Errors
    ///
    /// Returns `LimitExceeded` if the firing cap is hit, or propagates a
    /// failed rule action.
    pub fn forward_chain(
        &mut self,
        trigger: FactId,
        wm: &mut WorkingMemory,
        kb: &KnowledgeBase,
        out: &mut OutputLog,
    ) -> Result<ChainOutcome> {
        let (fired, last_derived) = self.chase(trigger, 0, wm, kb, out)?;
        Ok(ChainOutcome {
            fired,
            last_derived,
        })
    }

    /// Runs every live fact as a trigger, in assertion order.
    ///
    /// Facts retracted by earlier firings are skipped. Returns true if any
    /// rule fired.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`forward_chain`](Self::forward_chain).
    pub fn run_all(
        &mut self,
        wm: &mut WorkingMemory,
        kb: &KnowledgeBase,
        out: &mut OutputLog,
    ) -> Result<bool> {
        self.begin_run();
        let mut any_fired = false;
        for id in wm.live_ids() {
            if wm.get_live(id).is_none() {
                continue;
            }
            let outcome = self.forward_chain(id, wm, kb, out)?;
            any_fired |= outcome.fired;
        }
        Ok(any_fired)
    }

    fn chase(
        &mut self,
        trigger: FactId,
        depth: usize,
        wm: &mut WorkingMemory,
        kb: &KnowledgeBase,
        out: &mut OutputLog,
    ) -> Result<(bool, Option<FactId>)> {
        // Fresh fired set per chase level: the same rule/bindings pair may
        // legitimately fire again at a different level.
        let mut fired: HashSet<u64> = HashSet::new();
        let mut any_fired = false;
        let mut last_derived = None;

        loop {
            // The trigger may have been retracted by an earlier firing.
            let Some(trigger_fact) = wm.get_live(trigger) else {
                break;
            };
            let trigger_fact = trigger_fact.clone();

            let matches = Matcher::find_matching_rules(
                &trigger_fact,
                matchwood_foundation::FactRef::Asserted(trigger),
                wm,
                kb,
            );

            let fresh: Vec<RuleMatch> = matches
                .into_iter()
                .filter(|m| !fired.contains(&Self::fire_key(m, kb, wm)))
                .collect();
            if fresh.is_empty() {
                break;
            }

            let Some(winner) = self.strategy.resolve(&fresh, kb) else {
                break;
            };
            let chosen = &fresh[winner];
            fired.insert(Self::fire_key(chosen, kb, wm));

            let derived = self.fire(chosen, trigger, depth, wm, kb, out)?;
            any_fired = true;
            if derived.is_some() {
                last_derived = derived;
            }
        }

        Ok((any_fired, last_derived))
    }

    /// Identity of one firing, for refire suppression within a chase level.
    ///
    /// Rules with negation additionally key on working-memory size: growth
    /// or shrinkage can flip a negated antecedent, so the same bindings may
    /// validly fire again after memory changed.
    fn fire_key(m: &RuleMatch, kb: &KnowledgeBase, wm: &WorkingMemory) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        m.rule_name.hash(&mut hasher);
        m.bindings.fingerprint().hash(&mut hasher);
        if kb.rules().get(m.rule_index).is_some_and(super::rule::Rule::has_negation) {
            wm.len().hash(&mut hasher);
        }
        hasher.finish()
    }

    fn fire(
        &mut self,
        m: &RuleMatch,
        trigger: FactId,
        depth: usize,
        wm: &mut WorkingMemory,
        kb: &KnowledgeBase,
        out: &mut OutputLog,
    ) -> Result<Option<FactId>> {
        self.firing_count += 1;
        if self.firing_count > self.max_firings {
            return Err(Error::limit_exceeded(ChaseLimit::MaxFirings {
                limit: self.max_firings,
                context: Some(format!("in rule '{}'", m.rule_name)),
            }));
        }

        let rule = kb
            .rules()
            .get(m.rule_index)
            .ok_or_else(|| Error::internal(format!("rule index {} out of range", m.rule_index)))?;

        let mut bindings = m.bindings.clone();
        if let Some(action) = rule.action() {
            bindings = action(bindings, wm, kb, out).map_err(|e| {
                e.with_context(ErrorContext::new().with_rule(rule.name()).with_frame(
                    wm.get(trigger).map_or_else(
                        || trigger.to_string(),
                        std::string::ToString::to_string,
                    ),
                ))
            })?;
        }

        let Some(consequent) = rule.consequent() else {
            self.fire_log.push(FireRecord {
                rule_name: m.rule_name.clone(),
                trigger,
                derived: None,
                depth,
            });
            return Ok(None);
        };

        let fact = consequent.instantiate(&bindings);
        // Idempotent assertion: an existing content-equal fact is chased
        // instead of duplicated.
        let derived_id = match wm.find_content(&fact) {
            Some(existing) => existing,
            None => wm.assert(
                fact,
                Some(DerivationRecord::new(
                    rule.name_arc(),
                    m.antecedent_facts.clone(),
                )),
            ),
        };

        self.fire_log.push(FireRecord {
            rule_name: m.rule_name.clone(),
            trigger,
            derived: Some(derived_id),
            depth,
        });

        let (_, inner_last) = self.chase(derived_id, depth + 1, wm, kb, out)?;
        Ok(Some(inner_last.unwrap_or(derived_id)))
    }
}

// =============================================================================
// Tests
// =============================================================================
