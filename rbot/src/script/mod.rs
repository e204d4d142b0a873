//! The script interpreter.
//!
//! A script is a sequence of text lines: label declarations (`#name`),
//! comments (`;…`), and instructions (`command` or `command:arg1,arg2,…`).
//! Execution is two passes — [`engine::scan_labels`] collects jump targets,
//! then [`Engine`] walks the lines with a cursor, a one-shot skip flag set by
//! the `if*` commands, and a per-command dispatch over the parsed [`Command`].
//!
//! # Quick start
//!
//! ```rust
//! use rbot::driver::DryRunDriver;
//! use rbot::script::Engine;
//!
//! let mut engine = Engine::new(DryRunDriver::new());
//! engine.run("set:x,40\nadd:x,2").unwrap();
//! assert_eq!(engine.vars().get("x"), Some(42));
//! ```

pub mod command;
pub mod engine;

pub use command::{parse_line, Command};
pub use engine::{scan_labels, Engine};

use std::fmt::Display;

// ── ScriptError ───────────────────────────────────────────────────────────────

/// The two error tiers of the interpreter.
///
/// Script-level validation failures (wrong argument count, unknown key token,
/// undeclared variable, undefined label, no saved color) are [`Recoverable`]:
/// the run loop prints the diagnostic and carries on at the next line.
/// Everything else — malformed numeric literals, driver failures, output I/O
/// errors — is [`Fatal`] and aborts the whole run.
///
/// [`Recoverable`]: ScriptError::Recoverable
/// [`Fatal`]: ScriptError::Fatal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    Recoverable(String),
    Fatal(String),
}

impl ScriptError {
    /// A recoverable diagnostic in the standard `Error on line N: …` form.
    pub fn on_line(line: usize, msg: impl Display) -> Self {
        ScriptError::Recoverable(format!("Error on line {line}: {msg}"))
    }
}
