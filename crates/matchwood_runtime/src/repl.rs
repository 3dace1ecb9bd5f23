//! Interactive explanation shell.
//!
//! A small command loop over a [`Session`]: list facts, run the engine,
//! inspect proof trees and the fire log. Output goes to a generic writer so
//! tests can capture it.

use std::io::Write;

use matchwood_foundation::{Error, ErrorKind, FactId, Result};

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::Session;

/// The interactive explanation shell.
pub struct Repl<E: LineEditor = RustylineEditor> {
    editor: E,
    session: Session,
    show_banner: bool,
    prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, session))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a REPL with the given editor.
    pub fn with_editor(editor: E, session: Session) -> Self {
        Self {
            editor,
            session,
            show_banner: true,
            prompt: "matchwood> ".to_string(),
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the command loop, writing output to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails fatally.
    /// Command-level errors are printed and the loop continues.
    pub fn run(&mut self, out: &mut impl Write) -> Result<()> {
        if self.show_banner {
            write_line(out, &format!("matchwood {}", env!("CARGO_PKG_VERSION")))?;
            write_line(out, "type 'help' for commands")?;
        }

        loop {
            let line = match self.editor.read_line(&self.prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => continue,
                ReadResult::Eof => break,
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            self.editor.add_history(trimmed);

            match self.dispatch(trimmed, out) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => write_line(out, &format!("error: {e}"))?,
            }
        }

        write_line(out, "goodbye")?;
        Ok(())
    }

    /// Executes one command. Returns `Ok(false)` to exit the loop.
    fn dispatch(&mut self, line: &str, out: &mut impl Write) -> Result<bool> {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("");

        match command {
            "help" => {
                write_line(out, "commands:")?;
                write_line(out, "  facts            list live facts")?;
                write_line(out, "  run              chase every live fact")?;
                write_line(out, "  explain <id>     show the proof tree for a fact")?;
                write_line(out, "  trace            show the fire log of the last run")?;
                write_line(out, "  quit             exit")?;
            }
            "facts" => {
                for fact in self.session.memory().facts() {
                    write_line(out, &fact.to_string())?;
                }
                if self.session.memory().is_empty() {
                    write_line(out, "(no facts)")?;
                }
            }
            "run" => {
                let fired = self.session.run_all()?;
                write_line(
                    out,
                    if fired { "rules fired" } else { "nothing fired" },
                )?;
            }
            "explain" => {
                let id = parse_fact_id(parts.next())?;
                let text = self.session.explain(id)?;
                out.write_all(text.as_bytes())
                    .map_err(|e| Error::new(ErrorKind::IoError(e.to_string())))?;
            }
            "trace" => {
                let trace = self.session.fire_trace();
                if trace.is_empty() {
                    write_line(out, "(no firings)")?;
                } else {
                    out.write_all(trace.as_bytes())
                        .map_err(|e| Error::new(ErrorKind::IoError(e.to_string())))?;
                }
            }
            "quit" | "exit" | "q" => return Ok(false),
            other => {
                write_line(out, &format!("unknown command: {other} (try 'help')"))?;
            }
        }

        Ok(true)
    }
}

fn parse_fact_id(arg: Option<&str>) -> Result<FactId> {
    let arg = arg.ok_or_else(|| Error::internal("explain requires a fact id"))?;
    let raw: u64 = arg
        .trim_start_matches('#')
        .parse()
        .map_err(|_| Error::internal(format!("invalid fact id: {arg}")))?;
    Ok(FactId::new(raw))
}

fn write_line(out: &mut impl Write, line: &str) -> Result<()> {
    writeln!(out, "{line}").map_err(|e| Error::new(ErrorKind::IoError(e.to_string())))
}
