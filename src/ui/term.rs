//! # Terminal Session
//!
//! Raw-mode lifetime management, terminal size with a sane fallback, and the
//! frame writer. Frames are always written whole: home the cursor, clear,
//! print every line. Nothing here diffs frames.

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, MoveToNextLine, Show};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{self, Write};

/// Fallback when the terminal size cannot be queried.
pub const DEFAULT_SIZE: (u16, u16) = (80, 24);

/// The audible bell.
pub const BELL: &str = "\x07";

/// Current terminal size as `(width, height)`, falling back to
/// [`DEFAULT_SIZE`] when the query fails (pipes, bare CI shells).
pub fn size() -> (u16, u16) {
    terminal::size().unwrap_or(DEFAULT_SIZE)
}

/// RAII guard for raw mode and, for full-screen runs, the alternate screen.
/// Dropping restores the terminal on every exit path, panics included.
pub struct TerminalGuard {
    alternate: bool,
}

impl TerminalGuard {
    /// Raw mode, alternate screen, hidden cursor; for the grid menu.
    pub fn fullscreen() -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)
            .context("Failed to enter alternate screen")?;
        Ok(Self { alternate: true })
    }

    /// Raw mode only; for inline prompts on the normal screen.
    pub fn inline() -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        Ok(Self { alternate: false })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.alternate {
            let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
    }
}

/// Replace the screen contents with `frame`, one queued write per line,
/// flushed once.
pub fn draw_frame<W: Write>(writer: &mut W, frame: &str) -> Result<()> {
    queue!(writer, MoveTo(0, 0), Clear(ClearType::All)).context("Failed to queue frame clear")?;
    for line in frame.lines() {
        queue!(writer, Print(line), MoveToNextLine(1)).context("Failed to queue frame line")?;
    }
    writer.flush().context("Failed to flush frame")?;
    Ok(())
}

/// Ring the bell without touching the frame.
pub fn bell<W: Write>(writer: &mut W) -> Result<()> {
    queue!(writer, Print(BELL)).context("Failed to queue bell")?;
    writer.flush().context("Failed to flush bell")?;
    Ok(())
}
