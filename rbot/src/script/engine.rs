//! The execution engine.
//!
//! [`Engine`] owns the whole execution context for one run — variable store,
//! label table, held-keys set, saved color, skip flag — plus the injected
//! [`Driver`] and the output sink.  [`Engine::run`] performs the two passes:
//! a label scan over every line, then the cursor-driven execution loop.
//!
//! ## Skip-flag rules
//!
//! Exactly the `if*` commands ever set the flag, and exactly the next
//! *executable* line consumes it: blank lines, labels, and comments pass
//! underneath without touching it.  A line consumed by the flag is not
//! parsed at all, so even a malformed line is skipped silently.

use std::collections::{HashMap, HashSet};
use std::io::{self, Write};

use crate::color::{colors_match, parse_hex_color, parse_hex_threshold, Rgb};
use crate::driver::Driver;
use crate::keymap::{KeyInput, Keymap};
use crate::var::VarStore;
use super::command::{parse_line, Command};
use super::ScriptError;

/// Pacing between key events for `press`/`release`, in milliseconds.
const PRESS_PACE_MS: u64 = 40;
/// Pacing between key events for `autopress`, in milliseconds.
const AUTOPRESS_PACE_MS: u64 = 80;

// ── Label scan ────────────────────────────────────────────────────────────────

/// First pass: collect `#label` declarations.
///
/// A label maps to the index of the line immediately after its declaration.
/// No validation happens here — duplicate names silently overwrite (last one
/// wins), and the table is fixed for the rest of the run no matter where
/// `goto` sends the cursor.
pub fn scan_labels(lines: &[&str]) -> HashMap<String, usize> {
    let mut labels = HashMap::new();
    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if let Some(name) = trimmed.strip_prefix('#') {
            labels.insert(name.trim().to_owned(), i + 1);
        }
    }
    labels
}

// ── Flow ──────────────────────────────────────────────────────────────────────

/// What the dispatcher tells the run loop to do next.
enum Flow {
    /// Advance to the following line.
    Next,
    /// Set the cursor to an absolute line index.  The loop does not
    /// re-validate the target.
    Jump(usize),
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// One script execution context.
///
/// There is exactly one of these per run; it exclusively owns every piece of
/// interpreter state.  Commands that produce output write to the sink given
/// at construction (stdout by default), and every OS side effect goes through
/// the [`Driver`].
pub struct Engine<D: Driver> {
    keymap: Keymap,
    vars: VarStore,
    labels: HashMap<String, usize>,
    pressed: HashSet<String>,
    saved_color: Option<Rgb>,
    skip_next: bool,
    driver: D,
    out: Box<dyn Write>,
}

impl<D: Driver> Engine<D> {
    /// An engine writing to stdout, with the standard key table.
    pub fn new(driver: D) -> Self {
        Self::with_output(driver, Box::new(io::stdout()))
    }

    /// An engine writing to an arbitrary sink.
    pub fn with_output(driver: D, out: Box<dyn Write>) -> Self {
        Self {
            keymap: Keymap::with_defaults(),
            vars: VarStore::new(),
            labels: HashMap::new(),
            pressed: HashSet::new(),
            saved_color: None,
            skip_next: false,
            driver,
            out,
        }
    }

    /// Replace the key lookup table (the default is
    /// [`Keymap::with_defaults`]).
    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn vars(&self) -> &VarStore {
        &self.vars
    }

    /// The script's own bookkeeping of held keys (not real OS key state).
    pub fn held_keys(&self) -> &HashSet<String> {
        &self.pressed
    }

    /// The most recently sampled color, if any.
    pub fn saved_color(&self) -> Option<Rgb> {
        self.saved_color
    }

    /// The label table recorded by the last [`run`](Self::run).
    pub fn labels(&self) -> &HashMap<String, usize> {
        &self.labels
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    // ── Run loop ──────────────────────────────────────────────────────────

    /// Execute a whole script.
    ///
    /// Returns `Err` only for fatal errors; recoverable diagnostics have
    /// already been printed to the output sink by the time this returns.
    pub fn run(&mut self, script: &str) -> Result<(), String> {
        let lines: Vec<&str> = script.lines().collect();
        self.labels = scan_labels(&lines);

        let mut cursor = 0usize;
        while cursor < lines.len() {
            let line = lines[cursor].trim();

            // Blank lines, labels, and comments fall through without
            // consuming the skip flag.
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                cursor += 1;
                continue;
            }

            if self.skip_next {
                self.skip_next = false;
                cursor += 1;
                continue;
            }

            let line_no = cursor + 1;
            match parse_line(line, line_no).and_then(|cmd| self.dispatch(&cmd, line_no)) {
                Ok(Flow::Next) => cursor += 1,
                Ok(Flow::Jump(target)) => cursor = target,
                Err(ScriptError::Recoverable(msg)) => {
                    writeln!(self.out, "{msg}").map_err(|e| e.to_string())?;
                    cursor += 1;
                }
                Err(ScriptError::Fatal(msg)) => {
                    return Err(format!("fatal error on line {line_no}: {msg}"));
                }
            }
        }
        Ok(())
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    fn dispatch(&mut self, cmd: &Command, line_no: usize) -> Result<Flow, ScriptError> {
        match cmd {
            Command::Println(text) => self.emit_line(text)?,
            Command::Print(text) => self.emit(text)?,
            Command::PrintNl => self.emit_line("")?,

            Command::Move(x, y) => {
                let x = x.resolve(&self.vars)?;
                let y = y.resolve(&self.vars)?;
                self.driver.move_to(x, y).map_err(ScriptError::Fatal)?;
            }

            Command::Press(tokens) => {
                self.driver.sleep(PRESS_PACE_MS);
                self.act_on_list(tokens, true, PRESS_PACE_MS, line_no)?;
            }
            Command::Release(tokens) => {
                self.driver.sleep(PRESS_PACE_MS);
                self.act_on_list(tokens, false, PRESS_PACE_MS, line_no)?;
            }
            Command::AutoPress(tokens) => {
                self.driver.sleep(AUTOPRESS_PACE_MS);
                self.act_on_list(tokens, true, AUTOPRESS_PACE_MS, line_no)?;
                self.driver.sleep(AUTOPRESS_PACE_MS);
                self.act_on_list(tokens, false, AUTOPRESS_PACE_MS, line_no)?;
                self.driver.sleep(AUTOPRESS_PACE_MS);
            }

            Command::IfPressed(token) => {
                self.require_known_key(token, line_no)?;
                if !self.pressed.contains(token) {
                    self.skip_next = true;
                }
            }
            Command::IfNotPressed(token) => {
                self.require_known_key(token, line_no)?;
                if self.pressed.contains(token) {
                    self.skip_next = true;
                }
            }

            Command::Wait(ms) => {
                let ms = ms.resolve(&self.vars)?;
                let ms = u64::try_from(ms)
                    .map_err(|_| ScriptError::Fatal(format!("invalid wait duration: {ms}")))?;
                self.driver.sleep(ms);
            }

            Command::SaveColor => {
                let (x, y) = self.driver.pointer_position().map_err(ScriptError::Fatal)?;
                let color = self.driver.sample_pixel(x, y).map_err(ScriptError::Fatal)?;
                self.saved_color = Some(color);
            }
            Command::PrintColorRgb => {
                let c = self.require_saved_color(line_no)?;
                self.emit(&format!("Saved Color: RGB({}, {}, {})", c.r, c.g, c.b))?;
            }
            Command::PrintColorHex => {
                let c = self.require_saved_color(line_no)?;
                self.emit(&format!("Hex: #{}", c.to_hex()))?;
            }
            Command::IfColor { color, threshold } => {
                let saved = self.require_saved_color(line_no)?;
                let target = parse_hex_color(color).map_err(ScriptError::Fatal)?;
                let threshold = parse_hex_threshold(threshold).map_err(ScriptError::Fatal)?;
                if !colors_match(saved, target, threshold) {
                    self.skip_next = true;
                }
            }

            Command::PrintVar(name) => {
                let value = self.require_var(name, line_no)?;
                self.emit(&value.to_string())?;
            }

            Command::Goto(label) => match self.labels.get(label) {
                Some(&target) => return Ok(Flow::Jump(target)),
                None => {
                    return Err(ScriptError::on_line(
                        line_no,
                        format!("Undefined label: {label}"),
                    ));
                }
            },

            Command::Set(name, value) => {
                let value = value.resolve(&self.vars)?;
                self.vars.set(name.clone(), value);
            }
            Command::Add(name, value) => {
                let current = self.require_var(name, line_no)?;
                let value = value.resolve(&self.vars)?;
                self.vars.set(name.clone(), current.wrapping_add(value));
            }
            Command::Sub(name, value) => {
                let current = self.require_var(name, line_no)?;
                let value = value.resolve(&self.vars)?;
                self.vars.set(name.clone(), current.wrapping_sub(value));
            }

            Command::IfEqual(name, value) => {
                let current = self.require_var(name, line_no)?;
                if current != value.resolve(&self.vars)? {
                    self.skip_next = true;
                }
            }
            Command::IfGreater(name, value) => {
                let current = self.require_var(name, line_no)?;
                if current <= value.resolve(&self.vars)? {
                    self.skip_next = true;
                }
            }
            Command::IfLess(name, value) => {
                let current = self.require_var(name, line_no)?;
                if current >= value.resolve(&self.vars)? {
                    self.skip_next = true;
                }
            }
        }
        Ok(Flow::Next)
    }

    // ── Key events ────────────────────────────────────────────────────────

    /// Press (or release) each token in order, with a pacing sleep after
    /// each event.  An unknown token aborts the rest of the list; events
    /// already delivered stay delivered, and the held-set keeps the partial
    /// update.
    fn act_on_list(
        &mut self,
        tokens: &[String],
        down: bool,
        pace_ms: u64,
        line_no: usize,
    ) -> Result<(), ScriptError> {
        for token in tokens {
            self.act_on_token(token, down, line_no)?;
            self.driver.sleep(pace_ms);
        }
        Ok(())
    }

    fn act_on_token(&mut self, token: &str, down: bool, line_no: usize) -> Result<(), ScriptError> {
        let input = self
            .keymap
            .lookup(token)
            .ok_or_else(|| ScriptError::on_line(line_no, format!("Invalid key: {token}")))?;
        let result = match (input, down) {
            (KeyInput::Key(k), true) => self.driver.key_press(k),
            (KeyInput::Key(k), false) => self.driver.key_release(k),
            (KeyInput::Button(b), true) => self.driver.button_press(b),
            (KeyInput::Button(b), false) => self.driver.button_release(b),
        };
        result.map_err(ScriptError::Fatal)?;
        if down {
            self.pressed.insert(token.to_owned());
        } else {
            self.pressed.remove(token);
        }
        Ok(())
    }

    // ── Validation helpers ────────────────────────────────────────────────

    fn require_known_key(&self, token: &str, line_no: usize) -> Result<(), ScriptError> {
        if self.keymap.contains(token) {
            Ok(())
        } else {
            Err(ScriptError::on_line(line_no, format!("Invalid key: {token}")))
        }
    }

    fn require_var(&self, name: &str, line_no: usize) -> Result<i32, ScriptError> {
        self.vars.get(name).ok_or_else(|| {
            ScriptError::on_line(line_no, format!("Variable not declared: {name}"))
        })
    }

    fn require_saved_color(&self, line_no: usize) -> Result<Rgb, ScriptError> {
        self.saved_color.ok_or_else(|| {
            ScriptError::on_line(line_no, "No color saved, use savecolor command first")
        })
    }

    // ── Output ────────────────────────────────────────────────────────────

    fn emit(&mut self, text: &str) -> Result<(), ScriptError> {
        write!(self.out, "{text}")
            .and_then(|_| self.out.flush())
            .map_err(|e| ScriptError::Fatal(format!("output error: {e}")))
    }

    fn emit_line(&mut self, text: &str) -> Result<(), ScriptError> {
        writeln!(self.out, "{text}")
            .and_then(|_| self.out.flush())
            .map_err(|e| ScriptError::Fatal(format!("output error: {e}")))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{DriverEvent, DryRunDriver};
    use crate::keymap::{Button, Key};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// A clonable output sink so tests can read back what the engine wrote.
    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn run_with(
        script: &str,
        driver: DryRunDriver,
    ) -> (Result<(), String>, String, Engine<DryRunDriver>) {
        let buf = SharedBuf::default();
        let mut engine = Engine::with_output(driver, Box::new(buf.clone()));
        let result = engine.run(script);
        (result, buf.contents(), engine)
    }

    fn run(script: &str) -> (Result<(), String>, String, Engine<DryRunDriver>) {
        run_with(script, DryRunDriver::new())
    }

    /// Output of a script that must complete without a fatal error.
    fn output_of(script: &str) -> String {
        let (result, out, _) = run(script);
        result.unwrap();
        out
    }

    // ── Variables and arithmetic ──────────────────────────────────────────

    #[test]
    fn set_then_printvar() {
        assert_eq!(output_of("set:x,5\nprintvar:x"), "5");
    }

    #[test]
    fn add_and_sub() {
        assert_eq!(output_of("set:x,5\nadd:x,3\nprintvar:x"), "8");
        assert_eq!(output_of("set:x,8\nsub:x,10\nprintvar:x"), "-2");
    }

    #[test]
    fn set_from_another_variable() {
        assert_eq!(output_of("set:a,3\nset:b,a\nprintvar:b"), "3");
    }

    #[test]
    fn add_with_variable_operand() {
        assert_eq!(output_of("set:a,3\nset:b,4\nadd:a,b\nprintvar:a"), "7");
    }

    #[test]
    fn printvar_undeclared_is_recoverable() {
        let (result, out, _) = run("printvar:x\nprintln:still here");
        result.unwrap();
        assert_eq!(out, "Error on line 1: Variable not declared: x\nstill here\n");
    }

    #[test]
    fn add_undeclared_is_recoverable() {
        let (result, out, _) = run("add:x,1");
        result.unwrap();
        assert_eq!(out, "Error on line 1: Variable not declared: x\n");
    }

    #[test]
    fn bad_literal_in_set_is_fatal() {
        let (result, _, _) = run("set:x,banana");
        let err = result.unwrap_err();
        assert!(err.contains("line 1"), "got: {err}");
        assert!(err.contains("banana"), "got: {err}");
    }

    // ── Printing ──────────────────────────────────────────────────────────

    #[test]
    fn print_println_printnl() {
        assert_eq!(output_of("print:a\nprint:b\nprintnl\nprintln:c"), "ab\nc\n");
    }

    #[test]
    fn println_with_empty_arg_prints_blank_line() {
        assert_eq!(output_of("println:"), "\n");
    }

    // ── Conditionals and the skip flag ────────────────────────────────────

    #[test]
    fn ifequal_true_executes_next_line() {
        assert_eq!(output_of("set:x,5\nifequal:x,5\nprintln:yes"), "yes\n");
    }

    #[test]
    fn ifequal_false_skips_next_line() {
        assert_eq!(
            output_of("set:x,6\nifequal:x,5\nprintln:yes\nprintln:after"),
            "after\n"
        );
    }

    #[test]
    fn ifgreater_and_ifless() {
        assert_eq!(output_of("set:x,10\nifgreater:x,5\nprintln:gt"), "gt\n");
        assert_eq!(output_of("set:x,5\nifgreater:x,5\nprintln:gt"), "");
        assert_eq!(output_of("set:x,3\nifless:x,5\nprintln:lt"), "lt\n");
        assert_eq!(output_of("set:x,5\nifless:x,5\nprintln:lt"), "");
    }

    #[test]
    fn skip_flag_passes_over_blank_label_and_comment_lines() {
        let script = "set:x,1\nifequal:x,2\n\n; comment\n#label\nprintln:skipped\nprintln:kept";
        assert_eq!(output_of(script), "kept\n");
    }

    #[test]
    fn skipped_line_is_not_parsed() {
        // The malformed line would be a diagnostic if it were parsed; the
        // skip flag must bypass it silently.
        let script = "set:x,1\nifequal:x,2\nmove:only-one-arg\nprintln:done";
        assert_eq!(output_of(script), "done\n");
    }

    #[test]
    fn skip_flag_is_one_shot() {
        let script = "set:x,1\nifequal:x,2\nprintln:a\nprintln:b";
        assert_eq!(output_of(script), "b\n");
    }

    #[test]
    fn recoverable_error_does_not_consume_skip_flag_target() {
        // A failing conditional (unknown key) must not set the flag.
        let script = "ifpressed:nosuchkey\nprintln:runs";
        let (result, out, _) = run(script);
        result.unwrap();
        assert_eq!(out, "Error on line 1: Invalid key: nosuchkey\nruns\n");
    }

    // ── Labels and goto ───────────────────────────────────────────────────

    #[test]
    fn label_scan_records_line_after_label() {
        let lines = vec!["#start", "println:a", "  #end  ", "println:b"];
        let labels = scan_labels(&lines);
        assert_eq!(labels.get("start"), Some(&1));
        assert_eq!(labels.get("end"), Some(&3));
    }

    #[test]
    fn duplicate_label_last_wins() {
        let lines = vec!["#x", "println:a", "#x", "println:b"];
        let labels = scan_labels(&lines);
        assert_eq!(labels.get("x"), Some(&3));
    }

    #[test]
    fn goto_jumps_to_line_after_label() {
        let script = "goto:end\nprintln:skipped\n#end\nprintln:done";
        assert_eq!(output_of(script), "done\n");
    }

    #[test]
    fn goto_undefined_label_is_recoverable() {
        let (result, out, _) = run("goto:nowhere\nprintln:next");
        result.unwrap();
        assert_eq!(out, "Error on line 1: Undefined label: nowhere\nnext\n");
    }

    #[test]
    fn goto_to_label_on_last_line_terminates() {
        assert_eq!(output_of("goto:end\nprintln:skipped\n#end"), "");
    }

    #[test]
    fn backward_jump_loop_with_ifless_bound() {
        let script = "set:x,0\n#loop\nadd:x,1\nifless:x,3\ngoto:loop\nprintvar:x";
        assert_eq!(output_of(script), "3");
    }

    #[test]
    fn labels_are_fixed_before_execution_starts() {
        // goto reaches a label declared later in the text.
        let script = "goto:below\nprintln:skipped\n#below\nprintln:reached";
        let (result, out, engine) = run(script);
        result.unwrap();
        assert_eq!(out, "reached\n");
        assert_eq!(engine.labels().get("below"), Some(&3));
    }

    #[test]
    fn injected_keymap_controls_token_resolution() {
        let buf = SharedBuf::default();
        let mut engine = Engine::with_output(DryRunDriver::new(), Box::new(buf.clone()))
            .with_keymap(Keymap::empty());
        engine.run("press:a").unwrap();
        assert_eq!(buf.contents(), "Error on line 1: Invalid key: a\n");
    }

    // ── Unknown commands ──────────────────────────────────────────────────

    #[test]
    fn unknown_command_continues() {
        let (result, out, _) = run("foo\nprintln:next");
        result.unwrap();
        assert_eq!(out, "Unknown command: foo\nnext\n");
    }

    // ── Key events and the held-set ───────────────────────────────────────

    #[test]
    fn press_records_events_and_held_keys() {
        let (result, _, engine) = run("press:lshift,a");
        result.unwrap();
        assert!(engine.held_keys().contains("lshift"));
        assert!(engine.held_keys().contains("a"));
        assert_eq!(
            engine.driver().events,
            vec![
                DriverEvent::Sleep(40),
                DriverEvent::KeyPress(Key::Shift),
                DriverEvent::Sleep(40),
                DriverEvent::KeyPress(Key::Char('a')),
                DriverEvent::Sleep(40),
            ]
        );
    }

    #[test]
    fn release_removes_from_held_set() {
        let (result, _, engine) = run("press:a\nrelease:a");
        result.unwrap();
        assert!(engine.held_keys().is_empty());
    }

    #[test]
    fn mouse_tokens_route_to_button_calls() {
        let (result, _, engine) = run("press:lmouse\nrelease:lmouse");
        result.unwrap();
        assert_eq!(
            engine.driver().events,
            vec![
                DriverEvent::Sleep(40),
                DriverEvent::ButtonPress(Button::Left),
                DriverEvent::Sleep(40),
                DriverEvent::Sleep(40),
                DriverEvent::ButtonRelease(Button::Left),
                DriverEvent::Sleep(40),
            ]
        );
    }

    #[test]
    fn autopress_presses_all_then_releases_all() {
        let (result, _, engine) = run("autopress:a,b");
        result.unwrap();
        assert!(engine.held_keys().is_empty());
        assert_eq!(
            engine.driver().events,
            vec![
                DriverEvent::Sleep(80),
                DriverEvent::KeyPress(Key::Char('a')),
                DriverEvent::Sleep(80),
                DriverEvent::KeyPress(Key::Char('b')),
                DriverEvent::Sleep(80),
                DriverEvent::Sleep(80),
                DriverEvent::KeyRelease(Key::Char('a')),
                DriverEvent::Sleep(80),
                DriverEvent::KeyRelease(Key::Char('b')),
                DriverEvent::Sleep(80),
                DriverEvent::Sleep(80),
            ]
        );
    }

    #[test]
    fn unknown_token_mid_list_keeps_partial_update() {
        let (result, out, engine) = run("press:a,mystery,b");
        result.unwrap();
        assert_eq!(out, "Error on line 1: Invalid key: mystery\n");
        assert!(engine.held_keys().contains("a"));
        assert!(!engine.held_keys().contains("b"));
    }

    #[test]
    fn ifpressed_and_ifnotpressed() {
        assert_eq!(output_of("press:a\nifpressed:a\nprintln:held"), "held\n");
        assert_eq!(output_of("ifpressed:a\nprintln:held"), "");
        assert_eq!(output_of("ifnotpressed:a\nprintln:free"), "free\n");
        assert_eq!(output_of("press:a\nifnotpressed:a\nprintln:free"), "");
    }

    // ── Pointer, wait, colors ─────────────────────────────────────────────

    #[test]
    fn move_resolves_variables() {
        let (result, _, engine) = run("set:x,100\nmove:x,200");
        result.unwrap();
        assert_eq!(engine.driver().events, vec![DriverEvent::MoveTo(100, 200)]);
    }

    #[test]
    fn wait_sleeps_through_the_driver() {
        let (result, _, engine) = run("wait:250");
        result.unwrap();
        assert_eq!(engine.driver().slept_ms, 250);
    }

    #[test]
    fn negative_wait_is_fatal() {
        let (result, _, _) = run("set:t,5\nsub:t,10\nwait:t");
        assert!(result.unwrap_err().contains("invalid wait duration"));
    }

    #[test]
    fn savecolor_samples_under_pointer() {
        let driver = DryRunDriver::with_color(Rgb::new(9, 8, 7));
        let (result, _, engine) = run_with("move:30,40\nsavecolor", driver);
        result.unwrap();
        assert_eq!(engine.saved_color(), Some(Rgb::new(9, 8, 7)));
        assert!(engine
            .driver()
            .events
            .contains(&DriverEvent::SamplePixel(30, 40)));
    }

    #[test]
    fn printcolor_formats() {
        let driver = DryRunDriver::with_color(Rgb::new(255, 0, 10));
        let (result, out, _) =
            run_with("savecolor\nprintcolorrgb\nprintnl\nprintcolorhex", driver);
        result.unwrap();
        assert_eq!(out, "Saved Color: RGB(255, 0, 10)\nHex: #FF000A");
    }

    #[test]
    fn printcolor_without_saved_color_is_recoverable() {
        let (result, out, _) = run("printcolorrgb\nprintln:on");
        result.unwrap();
        assert_eq!(
            out,
            "Error on line 1: No color saved, use savecolor command first\non\n"
        );
    }

    #[test]
    fn ifcolor_within_threshold_runs_next_line() {
        let driver = DryRunDriver::with_color(Rgb::new(250, 5, 5));
        let (result, out, _) =
            run_with("savecolor\nifcolor:FF0000,0A\nprintln:match", driver);
        result.unwrap();
        assert_eq!(out, "match\n");
    }

    #[test]
    fn ifcolor_outside_threshold_skips_next_line() {
        let driver = DryRunDriver::with_color(Rgb::new(100, 100, 100));
        let (result, out, _) =
            run_with("savecolor\nifcolor:FF0000,0A\nprintln:match\nprintln:after", driver);
        result.unwrap();
        assert_eq!(out, "after\n");
    }

    #[test]
    fn ifcolor_before_savecolor_is_recoverable() {
        let (result, out, _) = run("ifcolor:FF0000,0A\nprintln:on");
        result.unwrap();
        assert_eq!(
            out,
            "Error on line 1: No color saved, use savecolor command first\non\n"
        );
    }

    #[test]
    fn ifcolor_bad_hex_is_fatal() {
        let (result, _, _) = run("savecolor\nifcolor:nothex,0A");
        assert!(result.unwrap_err().contains("hex color"));
        let (result, _, _) = run("savecolor\nifcolor:FF0000,zz");
        assert!(result.unwrap_err().contains("threshold"));
    }

    // ── Structure ─────────────────────────────────────────────────────────

    #[test]
    fn empty_script_finishes() {
        let (result, out, _) = run("");
        result.unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn comments_and_blanks_are_ignored() {
        assert_eq!(output_of("; a comment\n\n   \nprintln:ok"), "ok\n");
    }

    #[test]
    fn arg_count_diagnostic_then_continues() {
        let (result, out, _) = run("move:1\nprintln:on");
        result.unwrap();
        assert_eq!(
            out,
            "Error on line 1: move command requires exactly 2 arguments\non\n"
        );
    }
}
