//! Session state: working memory, knowledge base, and engine in one place.

use matchwood_debug::Explainer;
use matchwood_engine::{
    ChainOutcome, ConflictStrategy, Engine, KnowledgeBase, OutputLog, Rule, WorkingMemory,
};
use matchwood_foundation::{Fact, FactId, Result};

/// A configured engine run environment.
///
/// Bundles working memory, the knowledge base, the engine, and the output
/// log so callers can assert facts and chase derivations without threading
/// four values through every call.
pub struct Session {
    memory: WorkingMemory,
    knowledge: KnowledgeBase,
    engine: Engine,
    output: OutputLog,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates an empty session with default engine settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            memory: WorkingMemory::new(),
            knowledge: KnowledgeBase::new(),
            engine: Engine::new(),
            output: OutputLog::new(),
        }
    }

    /// Creates a session around an existing working memory snapshot.
    #[must_use]
    pub fn with_memory(memory: WorkingMemory) -> Self {
        Self {
            memory,
            knowledge: KnowledgeBase::new(),
            engine: Engine::new(),
            output: OutputLog::new(),
        }
    }

    /// Builder method to set the conflict resolution strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: ConflictStrategy) -> Self {
        self.engine = self.engine.with_strategy(strategy);
        self
    }

    /// Builder method to set the per-run firing cap.
    #[must_use]
    pub fn with_max_firings(mut self, max_firings: u32) -> Self {
        self.engine = self.engine.with_max_firings(max_firings);
        self
    }

    /// Registers a rule.
    ///
    /// # Errors
    ///
    /// Returns `MalformedRule` for structurally invalid rules.
    pub fn add_rule(&mut self, rule: Rule) -> Result<()> {
        self.knowledge.add_rule(rule)
    }

    /// Registers several rules in order.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed rule.
    pub fn add_rules(&mut self, rules: impl IntoIterator<Item = Rule>) -> Result<()> {
        self.knowledge.add_rules(rules)
    }

    /// Adds a reference fact (axiom) to the knowledge base.
    pub fn add_reference_fact(&mut self, fact: Fact) {
        self.knowledge.add_reference_fact(fact);
    }

    /// Adds several reference facts in order.
    pub fn add_reference_facts(&mut self, facts: impl IntoIterator<Item = Fact>) {
        self.knowledge.add_reference_facts(facts);
    }

    /// Asserts a fact without chaining.
    pub fn assert(&mut self, fact: Fact) -> FactId {
        self.memory.assert(fact, None)
    }

    /// Asserts a fact and chases its consequences depth-first.
    ///
    /// # Errors
    ///
    /// Propagates firing-cap and action failures from the engine.
    pub fn assert_and_chain(&mut self, fact: Fact) -> Result<ChainOutcome> {
        let id = self.memory.assert(fact, None);
        self.engine.begin_run();
        self.engine
            .forward_chain(id, &mut self.memory, &self.knowledge, &mut self.output)
    }

    /// Runs every live fact as a trigger. Returns true if any rule fired.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`assert_and_chain`](Self::assert_and_chain).
    pub fn run_all(&mut self) -> Result<bool> {
        self.engine
            .run_all(&mut self.memory, &self.knowledge, &mut self.output)
    }

    /// Renders the proof tree for a fact.
    ///
    /// # Errors
    ///
    /// Returns `FactNotFound` for unknown ids.
    pub fn explain(&self, id: FactId) -> Result<String> {
        Explainer::explain_text(id, &self.memory, &self.knowledge)
    }

    /// Renders the current fire log.
    #[must_use]
    pub fn fire_trace(&self) -> String {
        matchwood_debug::trace::format_fire_log(self.engine.fire_log())
    }

    /// Returns the working memory.
    #[must_use]
    pub const fn memory(&self) -> &WorkingMemory {
        &self.memory
    }

    /// Returns the working memory mutably.
    pub fn memory_mut(&mut self) -> &mut WorkingMemory {
        &mut self.memory
    }

    /// Replaces the working memory (e.g. from a loaded snapshot).
    pub fn set_memory(&mut self, memory: WorkingMemory) {
        self.memory = memory;
    }

    /// Returns the knowledge base.
    #[must_use]
    pub const fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Returns the engine.
    #[must_use]
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Returns the output collected from rule actions, in firing order.
    #[must_use]
    pub fn output(&self) -> &OutputLog {
        &self.output
    }
}
