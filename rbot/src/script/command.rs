//! Instruction parsing: one text line → one [`Command`].
//!
//! A line splits on its first `:` into a command name and a comma-separated
//! argument list (no colon means zero arguments); each argument is trimmed.
//! There is no escaping of colons or commas.  Argument *counts* are validated
//! here; argument *values* that denote numbers stay raw ([`ValueArg`]) and
//! resolve against the variable store at dispatch time, because a variable
//! written earlier in the run may be read back by a later execution of the
//! same line.

use super::ScriptError;
use crate::var::VarStore;

// ── ValueArg ──────────────────────────────────────────────────────────────────

/// A raw numeric argument: either a variable name or an integer literal.
///
/// Resolution order is fixed — a declared variable wins over a literal
/// spelling of the same text.  A value that is neither a declared variable
/// nor a valid base-10 integer is a *fatal* error, unlike the per-command
/// validation errors which let the run continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueArg(pub String);

impl ValueArg {
    pub fn resolve(&self, vars: &VarStore) -> Result<i32, ScriptError> {
        if let Some(v) = vars.get(&self.0) {
            return Ok(v);
        }
        self.0
            .parse()
            .map_err(|_| ScriptError::Fatal(format!("not a valid integer: {}", self.0)))
    }
}

// ── Command ───────────────────────────────────────────────────────────────────

/// A parsed, count-validated instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `println:text` — emit text plus newline.
    Println(String),
    /// `print:text` — emit text, no newline.
    Print(String),
    /// `printnl` — emit a newline.
    PrintNl,
    /// `move:x,y` — move the pointer.
    Move(ValueArg, ValueArg),
    /// `press:k1,…` — press keys/buttons in order.
    Press(Vec<String>),
    /// `release:k1,…` — release keys/buttons in order.
    Release(Vec<String>),
    /// `autopress:k1,…` — press all, then release all.
    AutoPress(Vec<String>),
    /// `ifpressed:key` — skip next line unless the key is held.
    IfPressed(String),
    /// `ifnotpressed:key` — skip next line if the key is held.
    IfNotPressed(String),
    /// `wait:ms` — sleep.
    Wait(ValueArg),
    /// `savecolor` — sample the pixel under the pointer.
    SaveColor,
    /// `printcolorrgb` — print the saved color as an RGB triple.
    PrintColorRgb,
    /// `printcolorhex` — print the saved color as uppercase hex.
    PrintColorHex,
    /// `ifcolor:hex,threshold` — skip next line unless the saved color
    /// matches within the per-channel threshold.
    IfColor { color: String, threshold: String },
    /// `printvar:name` — print a variable's value.
    PrintVar(String),
    /// `goto:label` — jump to a label.
    Goto(String),
    /// `set:name,value` — declare or overwrite a variable.
    Set(String, ValueArg),
    /// `add:name,value` — add to a variable.
    Add(String, ValueArg),
    /// `sub:name,value` — subtract from a variable.
    Sub(String, ValueArg),
    /// `ifequal:name,value` — skip next line if the variable differs.
    IfEqual(String, ValueArg),
    /// `ifgreater:name,value` — skip next line unless variable > value.
    IfGreater(String, ValueArg),
    /// `ifless:name,value` — skip next line unless variable < value.
    IfLess(String, ValueArg),
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Split a trimmed instruction line into its command name and argument list.
///
/// No colon ⇒ zero arguments.  A colon followed by nothing yields exactly one
/// argument, the empty string (the comma-split of an empty remainder).
pub fn split_line(line: &str) -> (&str, Vec<String>) {
    match line.split_once(':') {
        None => (line, Vec::new()),
        Some((name, rest)) => (
            name.trim(),
            rest.trim().split(',').map(|a| a.trim().to_owned()).collect(),
        ),
    }
}

/// Parse one trimmed instruction line.  `line_no` is 1-based, for
/// diagnostics.
///
/// Argument-count mismatches and unrecognized command names are recoverable.
pub fn parse_line(line: &str, line_no: usize) -> Result<Command, ScriptError> {
    let (name, args) = split_line(line);
    let cmd = match name {
        "println" => {
            exactly(&args, 1, name, line_no)?;
            Command::Println(args[0].clone())
        }
        "print" => {
            exactly(&args, 1, name, line_no)?;
            Command::Print(args[0].clone())
        }
        "printnl" => {
            exactly(&args, 0, name, line_no)?;
            Command::PrintNl
        }
        "move" => {
            exactly(&args, 2, name, line_no)?;
            Command::Move(ValueArg(args[0].clone()), ValueArg(args[1].clone()))
        }
        "press" => {
            at_least_one(&args, name, line_no)?;
            Command::Press(args)
        }
        "release" => {
            at_least_one(&args, name, line_no)?;
            Command::Release(args)
        }
        "autopress" => {
            at_least_one(&args, name, line_no)?;
            Command::AutoPress(args)
        }
        "ifpressed" => {
            exactly(&args, 1, name, line_no)?;
            Command::IfPressed(args[0].clone())
        }
        "ifnotpressed" => {
            exactly(&args, 1, name, line_no)?;
            Command::IfNotPressed(args[0].clone())
        }
        "wait" => {
            exactly(&args, 1, name, line_no)?;
            Command::Wait(ValueArg(args[0].clone()))
        }
        "savecolor" => {
            exactly(&args, 0, name, line_no)?;
            Command::SaveColor
        }
        "printcolorrgb" => {
            exactly(&args, 0, name, line_no)?;
            Command::PrintColorRgb
        }
        "printcolorhex" => {
            exactly(&args, 0, name, line_no)?;
            Command::PrintColorHex
        }
        "ifcolor" => {
            exactly(&args, 2, name, line_no)?;
            Command::IfColor { color: args[0].clone(), threshold: args[1].clone() }
        }
        "printvar" => {
            exactly(&args, 1, name, line_no)?;
            Command::PrintVar(args[0].clone())
        }
        "goto" => {
            exactly(&args, 1, name, line_no)?;
            Command::Goto(args[0].clone())
        }
        "set" => {
            exactly(&args, 2, name, line_no)?;
            Command::Set(args[0].clone(), ValueArg(args[1].clone()))
        }
        "add" => {
            exactly(&args, 2, name, line_no)?;
            Command::Add(args[0].clone(), ValueArg(args[1].clone()))
        }
        "sub" => {
            exactly(&args, 2, name, line_no)?;
            Command::Sub(args[0].clone(), ValueArg(args[1].clone()))
        }
        "ifequal" => {
            exactly(&args, 2, name, line_no)?;
            Command::IfEqual(args[0].clone(), ValueArg(args[1].clone()))
        }
        "ifgreater" => {
            exactly(&args, 2, name, line_no)?;
            Command::IfGreater(args[0].clone(), ValueArg(args[1].clone()))
        }
        "ifless" => {
            exactly(&args, 2, name, line_no)?;
            Command::IfLess(args[0].clone(), ValueArg(args[1].clone()))
        }
        other => {
            return Err(ScriptError::Recoverable(format!("Unknown command: {other}")));
        }
    };
    Ok(cmd)
}

fn exactly(args: &[String], n: usize, cmd: &str, line_no: usize) -> Result<(), ScriptError> {
    if args.len() != n {
        let wanted = match n {
            0 => "no arguments".to_owned(),
            1 => "exactly 1 argument".to_owned(),
            n => format!("exactly {n} arguments"),
        };
        return Err(ScriptError::on_line(
            line_no,
            format!("{cmd} command requires {wanted}"),
        ));
    }
    Ok(())
}

fn at_least_one(args: &[String], cmd: &str, line_no: usize) -> Result<(), ScriptError> {
    if args.is_empty() {
        return Err(ScriptError::on_line(
            line_no,
            format!("{cmd} command requires at least 1 argument"),
        ));
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
