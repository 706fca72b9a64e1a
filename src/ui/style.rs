//! # Text Styling
//!
//! ANSI styling for the string-based renderer. Styles are applied to text
//! that has already been aligned to its final width, so escape sequences
//! never count toward a cell's printable width.
//!
//! ## Fills
//!
//! A [`Fill`] is what "background" means for a run of text:
//!
//! | Fill | Sequence | Use |
//! |------|----------|-----|
//! | `Color(c)` | background color | colored panels |
//! | `Reverse` | reverse video | the focused cell and open sub-lists |
//! | `Plain` | full reset | the selected row inside a reverse-video box |
//!
//! `Plain` exists because the selected sub-action row is highlighted by
//! *cancelling* the enclosing reverse video rather than by adding a color.

use crossterm::style::{Attribute, Color, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::Command;

/// Render a crossterm command as its ANSI escape sequence.
pub(crate) fn ansi(command: impl Command) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = command.write_ansi(&mut out);
    out
}

/// The full SGR reset sequence.
pub fn reset() -> String {
    ansi(SetAttribute(Attribute::Reset))
}

/// Background treatment for a run of text or a whole box row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// An ANSI background color.
    Color(Color),
    /// Reverse video (SGR 7).
    Reverse,
    /// A full reset, knocking out any enclosing fill.
    Plain,
}

impl Fill {
    /// The escape sequence that starts this fill.
    pub fn sequence(&self) -> String {
        match self {
            Fill::Color(color) => ansi(SetBackgroundColor(*color)),
            Fill::Reverse => ansi(SetAttribute(Attribute::Reverse)),
            Fill::Plain => ansi(SetAttribute(Attribute::Reset)),
        }
    }
}

/// Styling for one run of already-aligned text.
///
/// `end` is the terminator written after each styled wrap. Inside a bordered
/// box it defaults to the box background so that the border glyph following
/// the run keeps the box's fill; when absent, wraps terminate with a full
/// reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub foreground: Option<Color>,
    pub background: Option<Fill>,
    pub bold: bool,
    pub italic: bool,
    pub end: Option<Fill>,
}

impl TextStyle {
    /// Wrap `text` in this style's escape sequences, innermost to outermost:
    /// foreground, background, bold, italic. Plain styles return the text
    /// unchanged.
    pub fn apply(&self, text: &str) -> String {
        let end = match self.end {
            Some(fill) => fill.sequence(),
            None => reset(),
        };
        let mut result = text.to_string();
        if let Some(color) = self.foreground {
            result = format!("{}{result}{end}", ansi(SetForegroundColor(color)));
        }
        if let Some(fill) = self.background {
            result = format!("{}{result}{end}", fill.sequence());
        }
        if self.bold {
            result = format!("{}{result}{end}", ansi(SetAttribute(Attribute::Bold)));
        }
        if self.italic {
            result = format!("{}{result}{end}", ansi(SetAttribute(Attribute::Italic)));
        }
        result
    }
}
