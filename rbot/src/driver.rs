//! The injected input/display capability.
//!
//! The engine never touches the OS directly; every pointer move, key event,
//! pixel sample, and sleep goes through a [`Driver`].  The real backend
//! ([`SystemDriver`]) lives behind the `system` Cargo feature; the always
//! available [`DryRunDriver`] records what would have happened and is the
//! test seam for the engine.
//!
//! [`SystemDriver`]: crate::system::SystemDriver

use crate::color::Rgb;
use crate::keymap::{Button, Key};

// ── Driver trait ──────────────────────────────────────────────────────────────

/// OS input and display access, as the engine needs it.
///
/// Every call is synchronous and assumed complete on return.  Failures are
/// fatal to the run (the engine has no retry policy), which is why the
/// fallible methods return plain `String` diagnostics.
pub trait Driver {
    /// Move the pointer to absolute screen coordinates.
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), String>;
    /// Press a keyboard key (and hold it).
    fn key_press(&mut self, key: Key) -> Result<(), String>;
    /// Release a keyboard key.
    fn key_release(&mut self, key: Key) -> Result<(), String>;
    /// Press a mouse button (and hold it).
    fn button_press(&mut self, button: Button) -> Result<(), String>;
    /// Release a mouse button.
    fn button_release(&mut self, button: Button) -> Result<(), String>;
    /// Current pointer position in absolute screen coordinates.
    fn pointer_position(&mut self) -> Result<(i32, i32), String>;
    /// Sample the screen pixel at absolute coordinates.
    fn sample_pixel(&mut self, x: i32, y: i32) -> Result<Rgb, String>;
    /// Block for `ms` milliseconds.  Used for `wait` and key-event pacing.
    fn sleep(&mut self, ms: u64);
}

// ── DryRunDriver ──────────────────────────────────────────────────────────────

/// One recorded driver call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverEvent {
    MoveTo(i32, i32),
    KeyPress(Key),
    KeyRelease(Key),
    ButtonPress(Button),
    ButtonRelease(Button),
    SamplePixel(i32, i32),
    Sleep(u64),
}

/// A driver that performs no OS input and no real sleeps.
///
/// Every call is appended to [`events`]; sleeps are summed into [`slept_ms`]
/// instead of blocking.  The pointer position tracks `move_to` calls
/// (starting at the origin), and `sample_pixel` answers with a fixed,
/// configurable color.  With `echo` set, each call is also traced to stderr
/// (the `-n` CLI mode).
///
/// [`events`]: Self::events
/// [`slept_ms`]: Self::slept_ms
#[derive(Debug, Default)]
pub struct DryRunDriver {
    pub events: Vec<DriverEvent>,
    pub slept_ms: u64,
    pos: (i32, i32),
    color: Rgb,
    echo: bool,
}

impl DryRunDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trace each call to stderr as it is recorded.
    pub fn echoing() -> Self {
        Self { echo: true, ..Self::default() }
    }

    /// Fix the color every `sample_pixel` call reports.
    pub fn with_color(color: Rgb) -> Self {
        Self { color, ..Self::default() }
    }

    fn record(&mut self, event: DriverEvent) {
        if self.echo {
            eprintln!("rbot: {event:?}");
        }
        self.events.push(event);
    }
}

impl Driver for DryRunDriver {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), String> {
        self.pos = (x, y);
        self.record(DriverEvent::MoveTo(x, y));
        Ok(())
    }

    fn key_press(&mut self, key: Key) -> Result<(), String> {
        self.record(DriverEvent::KeyPress(key));
        Ok(())
    }

    fn key_release(&mut self, key: Key) -> Result<(), String> {
        self.record(DriverEvent::KeyRelease(key));
        Ok(())
    }

    fn button_press(&mut self, button: Button) -> Result<(), String> {
        self.record(DriverEvent::ButtonPress(button));
        Ok(())
    }

    fn button_release(&mut self, button: Button) -> Result<(), String> {
        self.record(DriverEvent::ButtonRelease(button));
        Ok(())
    }

    fn pointer_position(&mut self) -> Result<(i32, i32), String> {
        Ok(self.pos)
    }

    fn sample_pixel(&mut self, x: i32, y: i32) -> Result<Rgb, String> {
        self.record(DriverEvent::SamplePixel(x, y));
        Ok(self.color)
    }

    fn sleep(&mut self, ms: u64) {
        self.slept_ms += ms;
        self.record(DriverEvent::Sleep(ms));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
