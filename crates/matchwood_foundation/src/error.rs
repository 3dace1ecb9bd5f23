//! Error types for the Matchwood system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Match failure is expected control flow and is never represented here:
//! a pattern that matches nothing simply has no consequence.

use std::fmt;

use thiserror::Error;

use crate::fact::FactId;

/// Convenient result alias for Matchwood operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Matchwood operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a fact-not-found error.
    #[must_use]
    pub fn fact_not_found(id: FactId) -> Self {
        Self::new(ErrorKind::FactNotFound(id))
    }

    /// Creates an action failure error.
    #[must_use]
    pub fn action_failed(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ActionFailed {
            rule: rule.into(),
            message: message.into(),
        })
    }

    /// Creates a malformed-rule error.
    #[must_use]
    pub fn malformed_rule(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedRule {
            rule: rule.into(),
            message: message.into(),
        })
    }

    /// Creates a chase limit exceeded error.
    #[must_use]
    pub fn limit_exceeded(limit: ChaseLimit) -> Self {
        Self::new(ErrorKind::LimitExceeded(limit))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Fact id was not found in working memory.
    #[error("fact not found: {0}")]
    FactNotFound(FactId),

    /// A rule action signalled failure.
    ///
    /// Side effects the action performed before failing are not rolled
    /// back; actions must validate before mutating.
    #[error("action failed in rule '{rule}': {message}")]
    ActionFailed {
        /// The rule whose action failed.
        rule: String,
        /// Description of the failure.
        message: String,
    },

    /// A rule is structurally invalid (hard configuration fault).
    #[error("malformed rule '{rule}': {message}")]
    MalformedRule {
        /// The offending rule.
        rule: String,
        /// What is wrong with it.
        message: String,
    },

    /// Chase limit exceeded (kill switch triggered).
    #[error("limit exceeded: {0}")]
    LimitExceeded(ChaseLimit),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// I/O failure.
    #[error("io error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Chase limits (kill switches) that can be exceeded.
///
/// Termination with a cyclic, non-progressing rule set is a caller
/// obligation; the kill switch converts runaway chases into a typed error
/// instead of hanging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChaseLimit {
    /// Maximum rule firings per run exceeded.
    MaxFirings {
        /// The configured limit.
        limit: u32,
        /// Additional context about which rule(s) caused the issue.
        context: Option<String>,
    },
}

impl fmt::Display for ChaseLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxFirings { limit, context } => {
                write!(f, "max firings ({limit}) exceeded")?;
                if let Some(ctx) = context {
                    write!(f, ": {ctx}")?;
                }
                Ok(())
            }
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The rule being fired, if any.
    pub rule: Option<String>,
    /// Stack of chase frames (trigger facts), outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule name.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    /// Adds a chase frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "in rule '{rule}'")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  while chasing {frame}")?;
            }
        }
        Ok(())
    }
}
