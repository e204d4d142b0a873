//! Real OS input/display backend (requires the `system` Cargo feature).
//!
//! Pointer and key events go through `enigo`; pixel sampling captures the
//! monitor under the requested coordinates with `xcap` and reads one pixel
//! out of the image.

use std::thread;
use std::time::Duration;

use enigo::{
    Button as EnigoButton, Coordinate, Direction, Enigo, Key as EnigoKey, Keyboard, Mouse,
    Settings,
};

use crate::color::Rgb;
use crate::driver::Driver;
use crate::keymap::{Button, Key};

/// Driver backed by the host OS.
pub struct SystemDriver {
    enigo: Enigo,
}

impl SystemDriver {
    pub fn new() -> Result<Self, String> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| format!("cannot initialize input backend: {e}"))?;
        Ok(Self { enigo })
    }
}

/// Translate a script key to the backend's key type.
///
/// The numpad distinction is lost on this backend: `enigo` has no portable
/// numpad variants, so numpad tokens fall back to their printable characters.
/// A handful of lock/system keys have no portable representation at all and
/// fail the call.
fn backend_key(key: Key) -> Result<EnigoKey, String> {
    Ok(match key {
        Key::Shift       => EnigoKey::Shift,
        Key::Control     => EnigoKey::Control,
        Key::Alt         => EnigoKey::Alt,
        Key::Space       => EnigoKey::Space,
        Key::Enter       => EnigoKey::Return,
        Key::Backspace   => EnigoKey::Backspace,
        Key::Tab         => EnigoKey::Tab,
        Key::Escape      => EnigoKey::Escape,
        Key::Delete      => EnigoKey::Delete,
        Key::Home        => EnigoKey::Home,
        Key::End         => EnigoKey::End,
        Key::PageUp      => EnigoKey::PageUp,
        Key::PageDown    => EnigoKey::PageDown,
        Key::Up          => EnigoKey::UpArrow,
        Key::Down        => EnigoKey::DownArrow,
        Key::Left        => EnigoKey::LeftArrow,
        Key::Right       => EnigoKey::RightArrow,
        Key::CapsLock    => EnigoKey::CapsLock,
        Key::Meta        => EnigoKey::Meta,
        Key::F(1)        => EnigoKey::F1,
        Key::F(2)        => EnigoKey::F2,
        Key::F(3)        => EnigoKey::F3,
        Key::F(4)        => EnigoKey::F4,
        Key::F(5)        => EnigoKey::F5,
        Key::F(6)        => EnigoKey::F6,
        Key::F(7)        => EnigoKey::F7,
        Key::F(8)        => EnigoKey::F8,
        Key::F(9)        => EnigoKey::F9,
        Key::F(10)       => EnigoKey::F10,
        Key::F(11)       => EnigoKey::F11,
        Key::F(12)       => EnigoKey::F12,
        Key::F(_)        => EnigoKey::F12,
        Key::Numpad(d)   => EnigoKey::Unicode((b'0' + d.min(9)) as char),
        Key::NumpadAdd   => EnigoKey::Unicode('+'),
        Key::NumpadSub   => EnigoKey::Unicode('-'),
        Key::NumpadMul   => EnigoKey::Unicode('*'),
        Key::NumpadDiv   => EnigoKey::Unicode('/'),
        Key::NumpadDecimal => EnigoKey::Unicode('.'),
        Key::NumpadEnter => EnigoKey::Return,
        Key::Char(c)     => EnigoKey::Unicode(c),
        Key::Insert | Key::NumLock | Key::ScrollLock | Key::Pause | Key::PrintScreen => {
            return Err(format!("key not supported by this backend: {key:?}"));
        }
    })
}

fn backend_button(button: Button) -> EnigoButton {
    match button {
        Button::Left => EnigoButton::Left,
        Button::Right => EnigoButton::Right,
    }
}

impl Driver for SystemDriver {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), String> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| format!("pointer move failed: {e}"))
    }

    fn key_press(&mut self, key: Key) -> Result<(), String> {
        self.enigo
            .key(backend_key(key)?, Direction::Press)
            .map_err(|e| format!("key press failed: {e}"))
    }

    fn key_release(&mut self, key: Key) -> Result<(), String> {
        self.enigo
            .key(backend_key(key)?, Direction::Release)
            .map_err(|e| format!("key release failed: {e}"))
    }

    fn button_press(&mut self, button: Button) -> Result<(), String> {
        self.enigo
            .button(backend_button(button), Direction::Press)
            .map_err(|e| format!("button press failed: {e}"))
    }

    fn button_release(&mut self, button: Button) -> Result<(), String> {
        self.enigo
            .button(backend_button(button), Direction::Release)
            .map_err(|e| format!("button release failed: {e}"))
    }

    fn pointer_position(&mut self) -> Result<(i32, i32), String> {
        self.enigo
            .location()
            .map_err(|e| format!("pointer query failed: {e}"))
    }

    fn sample_pixel(&mut self, x: i32, y: i32) -> Result<Rgb, String> {
        let monitors =
            xcap::Monitor::all().map_err(|e| format!("monitor enumeration failed: {e}"))?;
        for monitor in monitors {
            let (mx, my) = (monitor.x(), monitor.y());
            let (w, h) = (monitor.width() as i32, monitor.height() as i32);
            if x >= mx && x < mx + w && y >= my && y < my + h {
                let image = monitor
                    .capture_image()
                    .map_err(|e| format!("screen capture failed: {e}"))?;
                let pixel = image.get_pixel((x - mx) as u32, (y - my) as u32);
                return Ok(Rgb::new(pixel[0], pixel[1], pixel[2]));
            }
        }
        Err(format!("no monitor contains ({x}, {y})"))
    }

    fn sleep(&mut self, ms: u64) {
        thread::sleep(Duration::from_millis(ms));
    }
}
