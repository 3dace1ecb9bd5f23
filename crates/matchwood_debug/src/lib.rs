//! Explanation and tracing for Matchwood.
//!
//! This crate provides:
//! - [`Explainer`] / [`Proof`] - Proof trees answering "why does this fact exist?"
//! - [`trace`] - Human-readable fire log formatting

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod explain;
pub mod trace;

pub use explain::{Explainer, Proof, ProofStep};
