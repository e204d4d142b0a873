//! Key lookup table: symbolic script tokens → input codes.
//!
//! Script arguments name keys and mouse buttons with case-sensitive tokens
//! (`lshift`, `f5`, `lmouse`, `a`…`z`, `numpad0`…).  The table resolves each
//! token to a [`KeyInput`], which tells the dispatcher whether the token
//! routes to the driver's keyboard calls or its mouse-button calls.

use std::collections::HashMap;

// ── Input codes ───────────────────────────────────────────────────────────────

/// A keyboard key, as the driver understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Shift,
    Control,
    Alt,
    Space,
    Enter,
    Backspace,
    Tab,
    Escape,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    /// Function key `F1`–`F12`.
    F(u8),
    NumLock,
    CapsLock,
    ScrollLock,
    Pause,
    PrintScreen,
    /// The OS/windows key.
    Meta,
    /// Numpad digit `0`–`9`.
    Numpad(u8),
    NumpadAdd,
    NumpadSub,
    NumpadMul,
    NumpadDiv,
    NumpadDecimal,
    NumpadEnter,
    /// A printable character key (letters, digits, symbols).
    Char(char),
}

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
}

/// What a script token resolves to: a keyboard key or a mouse button.
///
/// The distinction matters for dispatch — buttons go through the driver's
/// `button_press`/`button_release`, keys through `key_press`/`key_release`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Key(Key),
    Button(Button),
}

// ── Keymap ────────────────────────────────────────────────────────────────────

/// Token → input-code lookup table.
#[derive(Debug)]
pub struct Keymap {
    map: HashMap<String, KeyInput>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Keymap {
    /// An empty table (no tokens resolve).  Useful for tests and for callers
    /// that build their own bindings.
    pub fn empty() -> Self {
        Self { map: HashMap::new() }
    }

    /// The standard token table.
    pub fn with_defaults() -> Self {
        let mut map = HashMap::new();

        let named: &[(&str, Key)] = &[
            ("lshift", Key::Shift),
            ("rshift", Key::Shift),
            ("lctrl", Key::Control),
            ("rctrl", Key::Control),
            ("lalt", Key::Alt),
            ("ralt", Key::Alt),
            ("space", Key::Space),
            ("enter", Key::Enter),
            ("backspace", Key::Backspace),
            ("tab", Key::Tab),
            ("esc", Key::Escape),
            ("delete", Key::Delete),
            ("insert", Key::Insert),
            ("home", Key::Home),
            ("end", Key::End),
            ("pageup", Key::PageUp),
            ("pagedown", Key::PageDown),
            ("up", Key::Up),
            ("down", Key::Down),
            ("left", Key::Left),
            ("right", Key::Right),
            ("numlock", Key::NumLock),
            ("capslock", Key::CapsLock),
            ("scrolllock", Key::ScrollLock),
            ("pause", Key::Pause),
            ("printscreen", Key::PrintScreen),
            ("windows", Key::Meta),
            ("numpadadd", Key::NumpadAdd),
            ("numpadsub", Key::NumpadSub),
            ("numpadmul", Key::NumpadMul),
            ("numpaddiv", Key::NumpadDiv),
            ("numpaddecimal", Key::NumpadDecimal),
            ("numpadenter", Key::NumpadEnter),
            ("semicolon", Key::Char(';')),
            ("equals", Key::Char('=')),
            ("comma", Key::Char(',')),
            ("minus", Key::Char('-')),
            ("period", Key::Char('.')),
            ("slash", Key::Char('/')),
            ("backslash", Key::Char('\\')),
            ("openbracket", Key::Char('[')),
            ("closebracket", Key::Char(']')),
            ("quote", Key::Char('\'')),
        ];
        for &(token, key) in named {
            map.insert(token.to_owned(), KeyInput::Key(key));
        }

        for n in 1..=12u8 {
            map.insert(format!("f{n}"), KeyInput::Key(Key::F(n)));
        }
        for c in 'a'..='z' {
            map.insert(c.to_string(), KeyInput::Key(Key::Char(c)));
        }
        for d in 0..=9u8 {
            map.insert(d.to_string(), KeyInput::Key(Key::Char((b'0' + d) as char)));
            map.insert(format!("numpad{d}"), KeyInput::Key(Key::Numpad(d)));
        }

        map.insert("lmouse".to_owned(), KeyInput::Button(Button::Left));
        map.insert("rmouse".to_owned(), KeyInput::Button(Button::Right));

        Self { map }
    }

    /// Resolve a token.  Case-sensitive; `None` if the token is unknown.
    pub fn lookup(&self, token: &str) -> Option<KeyInput> {
        self.map.get(token).copied()
    }

    /// Returns `true` if the token resolves.
    pub fn contains(&self, token: &str) -> bool {
        self.map.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
