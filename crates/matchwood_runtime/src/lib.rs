//! Session management, CLI, REPL, and serialization for Matchwood.
//!
//! This crate provides:
//! - [`Session`] - Working memory, knowledge base, and engine bundled together
//! - [`Repl`] - Interactive explanation shell
//! - Snapshot serialization and deserialization for working memory

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod editor;
pub mod repl;
pub mod serialize;
pub mod session;

pub use editor::{LineEditor, ReadResult, RustylineEditor, ScriptedEditor};
pub use repl::Repl;
pub use session::Session;
