//! Conflict resolution between competing rule matches.

use std::fmt;
use std::str::FromStr;

use crate::matcher::RuleMatch;
use crate::memory::KnowledgeBase;

/// Strategy for choosing one match from a conflict set.
///
/// All strategies break ties by registration order: the first-registered
/// rule (and for equal rules, the first-enumerated binding set) wins, so
/// resolution is deterministic for a given knowledge base.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ConflictStrategy {
    /// Highest rule priority wins.
    #[default]
    Priority,
    /// Most antecedents wins (most specific rule).
    Specificity,
    /// Match involving the most recently asserted fact wins.
    Recency,
}

impl ConflictStrategy {
    /// Picks the winning match, returning its index into `matches`.
    ///
    /// Returns `None` only for an empty conflict set.
    #[must_use]
    pub fn resolve(self, matches: &[RuleMatch], kb: &KnowledgeBase) -> Option<usize> {
        let mut best: Option<(usize, i64)> = None;
        for (index, m) in matches.iter().enumerate() {
            let score = self.score(m, kb);
            // Strictly greater keeps the earliest of equals.
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((index, score)),
            }
        }
        best.map(|(index, _)| index)
    }

    #[allow(clippy::cast_possible_wrap)]
    fn score(self, m: &RuleMatch, kb: &KnowledgeBase) -> i64 {
        match self {
            Self::Priority => kb
                .rules()
                .get(m.rule_index)
                .map_or(0, |rule| i64::from(rule.priority())),
            Self::Specificity => kb
                .rules()
                .get(m.rule_index)
                .map_or(0, |rule| rule.antecedents().len() as i64),
            Self::Recency => m
                .antecedent_facts
                .iter()
                .filter_map(|fact_ref| fact_ref.id())
                .map(|id| id.raw() as i64)
                .max()
                .unwrap_or(0),
        }
    }
}

impl FromStr for ConflictStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "priority" => Ok(Self::Priority),
            "specificity" => Ok(Self::Specificity),
            "recency" => Ok(Self::Recency),
            other => Err(format!(
                "unknown strategy '{other}' (expected priority, specificity, or recency)"
            )),
        }
    }
}

impl fmt::Display for ConflictStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Priority => write!(f, "priority"),
            Self::Specificity => write!(f, "specificity"),
            Self::Recency => write!(f, "recency"),
        }
    }
}
