//! Command-line argument parsing.
//!
//! Usage:
//!   rbot [-n] <script-file>

use std::path::PathBuf;

/// Parsed command-line arguments.
#[derive(Debug)]
pub struct CliArgs {
    /// Run against the recording dry-run driver instead of the OS (`-n`).
    pub dry_run: bool,
    /// The script file to execute.
    pub script: PathBuf,
}

/// Parse `std::env::args()` and return [`CliArgs`] or an error message.
pub fn parse_args() -> Result<CliArgs, String> {
    let raw: Vec<String> = std::env::args().collect();
    parse_argv(&raw[1..])
}

/// Parse a slice of argument strings (exposed for testing).
pub fn parse_argv(argv: &[String]) -> Result<CliArgs, String> {
    let mut dry_run = false;
    let mut positional: Vec<String> = Vec::new();
    let mut i = 0;

    while i < argv.len() {
        let arg = argv[i].as_str();

        // `--` ends flag processing.
        if arg == "--" {
            i += 1;
            positional.extend(argv[i..].iter().cloned());
            break;
        }

        if !arg.starts_with('-') || arg == "-" {
            positional.push(arg.to_owned());
            i += 1;
            continue;
        }

        for c in arg[1..].chars() {
            match c {
                'n' => dry_run = true,
                c => return Err(format!("unknown option: -{c}")),
            }
        }
        i += 1;
    }

    match positional.len() {
        0 => Err("missing script file".to_owned()),
        1 => Ok(CliArgs {
            dry_run,
            script: PathBuf::from(positional.remove(0)),
        }),
        n => Err(format!("too many arguments ({n})")),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
