//! Inline single-choice prompt. Unlike the fullscreen grid menu, this one
//! paints a small scrolling list right where the cursor sits, resolves to
//! the chosen index, and erases itself; the scrollback above it survives.

use anyhow::Result;
use crossterm::{
    cursor::{MoveToColumn, MoveToNextLine, MoveToPreviousLine},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

use super::cell::{render_cell, Align};
use super::keys::{CrosstermKeyPressReader, KeyPress, KeyPressReader};
use super::style::{Fill, TextStyle};
use super::term;

/// Rows shown at once; longer lists scroll behind this window.
const VISIBLE_ROWS: usize = 8;

/// A header line plus the rows to pick from.
pub struct SelectPrompt {
    header: String,
    items: Vec<String>,
}

impl SelectPrompt {
    pub fn new(header: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            header: header.into(),
            items,
        }
    }

    /// Prompt on the real terminal. Resolves to the picked index, or `None`
    /// when the list is empty or the user backs out.
    pub fn run(&self) -> Result<Option<usize>> {
        if self.items.is_empty() {
            return Ok(None);
        }
        let _guard = term::TerminalGuard::inline()?;
        let (width, _) = term::size();
        self.run_with(
            &mut io::stdout(),
            &mut CrosstermKeyPressReader,
            width as usize,
        )
    }

    /// The prompt loop against explicit collaborators.
    pub fn run_with<W: Write>(
        &self,
        writer: &mut W,
        reader: &mut dyn KeyPressReader,
        width: usize,
    ) -> Result<Option<usize>> {
        if self.items.is_empty() {
            return Ok(None);
        }
        let visible = self.items.len().min(VISIBLE_ROWS);
        let block = visible + 1;
        // Claim the lines the prompt will occupy, then climb back to the top
        // of the block; every repaint starts from there.
        for _ in 0..block {
            queue!(writer, Print("\r\n"))?;
        }
        queue!(writer, MoveToPreviousLine(block as u16))?;
        let mut selected = 0;
        loop {
            self.draw(writer, selected, visible, width)?;
            match reader.read_key_press()? {
                KeyPress::Up => selected = selected.saturating_sub(1),
                KeyPress::Down => selected = (selected + 1).min(self.items.len() - 1),
                KeyPress::Enter { .. } => {
                    clear_block(writer)?;
                    return Ok(Some(selected));
                }
                KeyPress::Esc | KeyPress::CtrlC => {
                    clear_block(writer)?;
                    return Ok(None);
                }
                _ => (),
            }
        }
    }

    fn draw<W: Write>(
        &self,
        writer: &mut W,
        selected: usize,
        visible: usize,
        width: usize,
    ) -> Result<()> {
        let scroll = (selected + 1).saturating_sub(visible);
        let longest = self
            .items
            .iter()
            .map(|item| item.chars().count())
            .max()
            .unwrap_or(0);
        let row_width = (longest + 4).min(width);
        let header = TextStyle {
            bold: true,
            ..TextStyle::default()
        };
        queue!(
            writer,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(header.apply(&self.header)),
            MoveToNextLine(1),
        )?;
        for (index, item) in self.items.iter().enumerate().skip(scroll).take(visible) {
            let style = if index == selected {
                TextStyle {
                    background: Some(Fill::Reverse),
                    ..TextStyle::default()
                }
            } else {
                TextStyle::default()
            };
            let row = render_cell(&format!(" {item}"), row_width, Align::Left, &style);
            queue!(
                writer,
                MoveToColumn(0),
                Clear(ClearType::CurrentLine),
                Print(row),
                MoveToNextLine(1),
            )?;
        }
        queue!(writer, MoveToPreviousLine((visible + 1) as u16))?;
        writer.flush()?;
        Ok(())
    }
}

/// Erase the prompt block; the cursor sits on its first line after a draw.
fn clear_block<W: Write>(writer: &mut W) -> Result<()> {
    queue!(writer, MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
    writer.flush()?;
    Ok(())
}
