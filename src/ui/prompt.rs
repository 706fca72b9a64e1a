//! Tiny line-oriented prompts for the spots where a grid menu is too much:
//! free-text input, yes/no confirmation, and "press Enter to continue".
//! Each one runs raw inline, echoes what it must, and leaves the line
//! terminated so following output starts clean.

use anyhow::Result;
use crossterm::{queue, style::Print};
use std::io::{self, Write};

use super::keys::{CrosstermKeyPressReader, KeyPress, KeyPressReader};
use super::style::TextStyle;
use super::term::TerminalGuard;

fn question(message: &str) -> String {
    TextStyle {
        bold: true,
        ..TextStyle::default()
    }
    .apply(&format!("? {message} "))
}

/// Read one line of input. Resolves to `None` when the user backs out with
/// Esc or Ctrl-C instead of submitting.
pub fn input_line(message: &str) -> Result<Option<String>> {
    let _guard = TerminalGuard::inline()?;
    input_line_with(&mut io::stdout(), &mut CrosstermKeyPressReader, message)
}

pub fn input_line_with<W: Write>(
    writer: &mut W,
    reader: &mut dyn KeyPressReader,
    message: &str,
) -> Result<Option<String>> {
    queue!(writer, Print(question(message)))?;
    writer.flush()?;
    let mut buffer = String::new();
    loop {
        match reader.read_key_press()? {
            KeyPress::Char(c) => {
                buffer.push(c);
                queue!(writer, Print(c))?;
                writer.flush()?;
            }
            KeyPress::Backspace => {
                if buffer.pop().is_some() {
                    queue!(writer, Print("\u{8} \u{8}"))?;
                    writer.flush()?;
                }
            }
            KeyPress::Enter { .. } => {
                queue!(writer, Print("\r\n"))?;
                writer.flush()?;
                return Ok(Some(buffer));
            }
            KeyPress::Esc | KeyPress::CtrlC => {
                queue!(writer, Print("\r\n"))?;
                writer.flush()?;
                return Ok(None);
            }
            _ => (),
        }
    }
}

/// Ask a yes/no question; Enter takes the default, Esc and Ctrl-C mean no.
pub fn confirm(message: &str, default_yes: bool) -> Result<bool> {
    let _guard = TerminalGuard::inline()?;
    confirm_with(
        &mut io::stdout(),
        &mut CrosstermKeyPressReader,
        message,
        default_yes,
    )
}

pub fn confirm_with<W: Write>(
    writer: &mut W,
    reader: &mut dyn KeyPressReader,
    message: &str,
    default_yes: bool,
) -> Result<bool> {
    let hint = if default_yes { "(Y/n)" } else { "(y/N)" };
    queue!(writer, Print(question(message)), Print(hint), Print(" "))?;
    writer.flush()?;
    loop {
        let answer = match reader.read_key_press()? {
            KeyPress::Char(c) if c.eq_ignore_ascii_case(&'y') => Some(true),
            KeyPress::Char(c) if c.eq_ignore_ascii_case(&'n') => Some(false),
            KeyPress::Enter { .. } => Some(default_yes),
            KeyPress::Esc | KeyPress::CtrlC => Some(false),
            _ => None,
        };
        if let Some(yes) = answer {
            queue!(writer, Print(if yes { "y" } else { "n" }), Print("\r\n"))?;
            writer.flush()?;
            return Ok(yes);
        }
    }
}

/// Hold the screen until the user acknowledges.
pub fn pause() -> Result<()> {
    let _guard = TerminalGuard::inline()?;
    pause_with(&mut io::stdout(), &mut CrosstermKeyPressReader)
}

pub fn pause_with<W: Write>(writer: &mut W, reader: &mut dyn KeyPressReader) -> Result<()> {
    let notice = TextStyle {
        bold: true,
        ..TextStyle::default()
    }
    .apply("Press Enter to continue...");
    queue!(writer, Print(notice))?;
    writer.flush()?;
    loop {
        match reader.read_key_press()? {
            KeyPress::Enter { .. } | KeyPress::Esc | KeyPress::CtrlC => {
                queue!(writer, Print("\r\n"))?;
                writer.flush()?;
                return Ok(());
            }
            _ => (),
        }
    }
}
