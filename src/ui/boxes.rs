//! # Box Renderer
//!
//! Assembles bordered and borderless boxes as plain strings, one `Vec`
//! element per terminal row. Every box renders to exactly `height` rows of
//! `width` printable characters; callers lay boxes out by concatenating rows
//! side by side.
//!
//! ## Border styles
//!
//! | Style | Corners | Edges |
//! |---------|---------------|-------|
//! | Single | `┌ ┐ └ ┘` | `─ │` |
//! | Double | `╔ ╗ ╚ ╝` | `═ ║` |
//! | Rounded | `╭ ╮ ╰ ╯` | `─ │` |
//!
//! A box background wraps each full row in the fill's sequence plus a reset,
//! so borders and padding render filled as well.

use super::cell::{render_cell, Line};
use super::style::{reset, Fill};

/// Border treatment for a box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Border {
    #[default]
    Single,
    Double,
    Rounded,
    None,
}

struct BorderGlyphs {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

const SINGLE: BorderGlyphs = BorderGlyphs {
    top_left: '┌',
    top_right: '┐',
    bottom_left: '└',
    bottom_right: '┘',
    horizontal: '─',
    vertical: '│',
};

const DOUBLE: BorderGlyphs = BorderGlyphs {
    top_left: '╔',
    top_right: '╗',
    bottom_left: '╚',
    bottom_right: '╝',
    horizontal: '═',
    vertical: '║',
};

const ROUNDED: BorderGlyphs = BorderGlyphs {
    top_left: '╭',
    top_right: '╮',
    bottom_left: '╰',
    bottom_right: '╯',
    horizontal: '─',
    vertical: '│',
};

impl Border {
    fn glyphs(self) -> Option<&'static BorderGlyphs> {
        match self {
            Border::Single => Some(&SINGLE),
            Border::Double => Some(&DOUBLE),
            Border::Rounded => Some(&ROUNDED),
            Border::None => None,
        }
    }
}

/// Geometry and decoration for one box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxStyle {
    pub border: Border,
    pub background: Option<Fill>,
    /// Total width in printable characters, borders included.
    pub width: usize,
    /// Total height in rows, borders included.
    pub height: usize,
    /// Horizontal padding inside the width; only borderless boxes use it.
    pub padding: usize,
    /// Horizontal padding between border and content.
    pub inner_padding: usize,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            border: Border::Single,
            background: None,
            width: 20,
            height: 5,
            padding: 1,
            inner_padding: 1,
        }
    }
}

/// Render a box to exactly `style.height` rows.
///
/// Missing lines render blank; lines beyond the content height are dropped.
pub fn render_box(style: &BoxStyle, lines: &[Line]) -> Vec<String> {
    match style.border.glyphs() {
        Some(glyphs) => render_bordered(style, glyphs, lines),
        None => render_borderless(style, lines),
    }
}

fn wrap_row(background: Option<Fill>, row: String) -> String {
    match background {
        Some(fill) => format!("{}{row}{}", fill.sequence(), reset()),
        None => row,
    }
}

fn render_borderless(style: &BoxStyle, lines: &[Line]) -> Vec<String> {
    let content_width = style.width.saturating_sub(style.padding * 2);
    let pad = " ".repeat(style.padding);
    let blank = Line::default();
    (0..style.height)
        .map(|row| {
            let line = lines.get(row).unwrap_or(&blank);
            let cell = render_cell(&line.content, content_width, line.align, &line.style);
            wrap_row(style.background, format!("{pad}{cell}{pad}"))
        })
        .collect()
}

fn render_bordered(style: &BoxStyle, glyphs: &BorderGlyphs, lines: &[Line]) -> Vec<String> {
    let content_width = style.width.saturating_sub(2 + style.inner_padding * 2);
    let content_height = style.height.saturating_sub(2);
    let inner_pad = " ".repeat(style.inner_padding);
    let horizontal = glyphs
        .horizontal
        .to_string()
        .repeat(style.width.saturating_sub(2));

    let mut rows = Vec::with_capacity(style.height);
    rows.push(wrap_row(
        style.background,
        format!("{}{horizontal}{}", glyphs.top_left, glyphs.top_right),
    ));

    let blank = Line::default();
    for index in 0..content_height {
        let line = lines.get(index).unwrap_or(&blank);
        // The terminator restores the box fill so the closing border glyph
        // keeps it; lines with their own `end` keep that instead.
        let mut line_style = line.style;
        line_style.end = line_style.end.or(style.background);
        let cell = render_cell(&line.content, content_width, line.align, &line_style);
        rows.push(wrap_row(
            style.background,
            format!(
                "{vertical}{inner_pad}{cell}{inner_pad}{vertical}",
                vertical = glyphs.vertical
            ),
        ));
    }

    rows.push(wrap_row(
        style.background,
        format!("{}{horizontal}{}", glyphs.bottom_left, glyphs.bottom_right),
    ));
    // Heights of two or less leave no room for content rows.
    rows.truncate(style.height);
    rows
}
