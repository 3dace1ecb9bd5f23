//! Human-readable formatting of engine fire logs.

use std::fmt::Write as _;

use matchwood_engine::{FireRecord, WorkingMemory};

/// Formats a fire log as indented text, one line per firing.
///
/// Indentation follows chase depth, so derived-fact cascades read as a
/// tree:
///
/// ```text
/// classify-known: #1 => #2
///     note-seasoning: #2 => #3
/// ```
#[must_use]
pub fn format_fire_log(records: &[FireRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let pad = "    ".repeat(record.depth);
        match record.derived {
            Some(derived) => {
                let _ = writeln!(out, "{pad}{}: {} => {derived}", record.rule_name, record.trigger);
            }
            None => {
                let _ = writeln!(out, "{pad}{}: {} (action only)", record.rule_name, record.trigger);
            }
        }
    }
    out
}

/// Formats a fire log with the facts it mentions resolved against working
/// memory.
#[must_use]
pub fn format_fire_log_verbose(records: &[FireRecord], wm: &WorkingMemory) -> String {
    let mut out = String::new();
    for record in records {
        let pad = "    ".repeat(record.depth);
        let trigger = wm
            .get(record.trigger)
            .map_or_else(|| record.trigger.to_string(), ToString::to_string);
        let _ = write!(out, "{pad}{}: {trigger}", record.rule_name);
        if let Some(derived) = record.derived {
            let derived = wm
                .get(derived)
                .map_or_else(|| derived.to_string(), ToString::to_string);
            let _ = write!(out, " => {derived}");
        }
        let _ = writeln!(out);
    }
    out
}
