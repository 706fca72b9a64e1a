//! # Keypress Decoding
//!
//! Narrows crossterm's event stream down to the keys the menu reacts to.
//! The [`KeyPressReader`] trait is the seam that lets tests drive the picker
//! and the prompts with a scripted key sequence instead of a terminal.

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::collections::VecDeque;

/// A terminal keypress decoded to what the menu understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    Up,
    Down,
    Left,
    Right,
    Enter { alt: bool },
    Tab,
    Esc,
    Backspace,
    Char(char),
    CtrlC,
    /// The terminal was resized; re-render with the fresh size.
    Resize,
    /// Anything the menu has no reaction to.
    Noop,
}

/// Blocking source of keypresses.
pub trait KeyPressReader {
    /// Block until the next keypress arrives.
    fn read_key_press(&mut self) -> Result<KeyPress>;
}

/// Reads from the crossterm event stream.
pub struct CrosstermKeyPressReader;

impl KeyPressReader for CrosstermKeyPressReader {
    fn read_key_press(&mut self) -> Result<KeyPress> {
        let event = event::read().context("Failed to read terminal event")?;
        Ok(decode(&event))
    }
}

fn decode(event: &Event) -> KeyPress {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
            KeyCode::Up => KeyPress::Up,
            KeyCode::Down => KeyPress::Down,
            KeyCode::Left => KeyPress::Left,
            KeyCode::Right => KeyPress::Right,
            KeyCode::Enter => KeyPress::Enter {
                alt: key.modifiers.contains(KeyModifiers::ALT),
            },
            KeyCode::Tab => KeyPress::Tab,
            KeyCode::Esc => KeyPress::Esc,
            KeyCode::Backspace => KeyPress::Backspace,
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if c.eq_ignore_ascii_case(&'c') {
                    KeyPress::CtrlC
                } else {
                    KeyPress::Noop
                }
            }
            KeyCode::Char(c) => KeyPress::Char(c),
            _ => KeyPress::Noop,
        },
        Event::Resize(_, _) => KeyPress::Resize,
        _ => KeyPress::Noop,
    }
}

/// Replays a fixed key sequence. Errors once the script runs dry so a test
/// that forgets its terminating key fails instead of hanging.
pub struct ScriptedKeyPressReader {
    keys: VecDeque<KeyPress>,
}

impl ScriptedKeyPressReader {
    pub fn new(keys: impl IntoIterator<Item = KeyPress>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }
}

impl KeyPressReader for ScriptedKeyPressReader {
    fn read_key_press(&mut self) -> Result<KeyPress> {
        self.keys
            .pop_front()
            .context("Scripted key sequence exhausted")
    }
}
