//! rbot — a line-oriented mouse/keyboard automation script interpreter.
//!
//! A script is plain text, one instruction per line: mouse moves, key and
//! button presses, pixel-color inspection, integer variables, and label-based
//! branching with "skip the next line" conditionals.  The interpreter itself
//! lives in [`script`]; everything that touches the OS is injected through
//! [`driver::Driver`], with the real backend behind the `system` Cargo
//! feature.

pub mod cli;
pub mod color;
pub mod driver;
pub mod keymap;
pub mod script;
#[cfg(feature = "system")]
pub mod system;
pub mod var;
