//! # Action Picker
//!
//! The interactive grid menu. Actions render as fixed-size bordered cells in
//! a grid sized from the terminal width; one run resolves to exactly one
//! action value (or to nothing on cancel).
//!
//! ```text
//! ┌──────────────┐┌──────────────┐┌──────────────┐
//! │              ││              ││              │
//! │  Stage all   ││    Commit    ││   Push to    │
//! │   changes    ││   changes    ││    remote    │
//! │      A       ││      C       ││      P       │
//! │              ││              ││              │
//! │             *││              ││              │
//! └──────────────┘└──────────────┘└──────────────┘
//!
//! Use arrow keys to navigate and Enter or the action key to select.
//! ```
//!
//! ## Two levels
//!
//! Arrow keys move the cursor (the focused cell renders in reverse video);
//! Enter resolves the focused action; a shortcut key resolves its action
//! from anywhere. Alt-Enter or Tab opens the focused action's sub-list
//! inside the cell as a scrollable window; Esc or Backspace backs out.
//!
//! ## Shape
//!
//! Keypresses fold through a pure reducer, [`handle_key`], which returns an
//! [`Outcome`]; the run loop performs the matching effect (repaint, bell,
//! return). Frame composition is a pure function of the state and the
//! freshly queried terminal size, so every piece is testable without a
//! terminal.

use anyhow::Result;
use std::io::{self, Write};

use super::boxes::{render_box, BoxStyle};
use super::cell::{Align, Line};
use super::grid::{assign_keys, validate_actions, Action, Grid, KeyMode};
use super::keys::{KeyPress, KeyPressReader};
use super::style::{Fill, TextStyle};
use super::term;

/// Width of one action cell, in characters.
pub const CELL_WIDTH: usize = 16;
/// Height of one action cell, in rows.
pub const CELL_HEIGHT: usize = 8;

/// Rows visible in an open sub-list: the cell's content height.
const SUB_WINDOW: usize = CELL_HEIGHT - 2;

const HELP_TOP_LEVEL: &str = "Use arrow keys to navigate and Enter or the action key to select.";
const HELP_SUB_ACTION: &str = "Use arrow keys to select sub action or backspace to exit";

/// Where the picker currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Browsing the grid.
    #[default]
    TopLevel,
    /// Inside the focused action's sub-list.
    SubAction { index: usize, scroll: usize },
}

/// Cursor position plus mode; the whole state of one picker run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickerState {
    pub row: usize,
    pub column: usize,
    pub mode: Mode,
}

/// What one keypress resulted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing visible changed.
    Continue,
    /// State or terminal size changed; repaint.
    Redraw,
    /// Invalid input; ring the bell, state untouched.
    Alert,
    /// The run is over with a selection.
    Resolve(String),
    /// The run is over without one.
    Cancelled,
}

/// Fold one keypress into the state. Pure: no terminal I/O happens here.
pub fn handle_key(state: &mut PickerState, grid: &Grid<'_>, key: KeyPress) -> Outcome {
    match state.mode {
        Mode::TopLevel => handle_top_level(state, grid, key),
        Mode::SubAction { index, .. } => handle_sub_action(state, grid, key, index),
    }
}

fn handle_top_level(state: &mut PickerState, grid: &Grid<'_>, key: KeyPress) -> Outcome {
    match key {
        KeyPress::Up => move_cursor(state, grid, state.row.saturating_sub(1), state.column),
        KeyPress::Down => {
            let target = (state.row + 1).min(grid.rows().saturating_sub(1));
            move_cursor(state, grid, target, state.column)
        }
        KeyPress::Left => move_cursor(state, grid, state.row, state.column.saturating_sub(1)),
        KeyPress::Right => {
            let last = grid.row_len(state.row).saturating_sub(1);
            move_cursor(state, grid, state.row, (state.column + 1).min(last))
        }
        KeyPress::Enter { alt: false } => match grid.get(state.row, state.column) {
            Some(action) => Outcome::Resolve(action.value.clone()),
            None => Outcome::Alert,
        },
        KeyPress::Enter { alt: true } | KeyPress::Tab => match grid.get(state.row, state.column) {
            Some(action) if action.has_sub_actions() => {
                state.mode = Mode::SubAction { index: 0, scroll: 0 };
                Outcome::Redraw
            }
            _ => Outcome::Alert,
        },
        KeyPress::Char(pressed) => {
            match grid.actions().iter().find(|a| a.matches_key(pressed)) {
                Some(action) => Outcome::Resolve(action.value.clone()),
                None => Outcome::Alert,
            }
        }
        KeyPress::Esc | KeyPress::CtrlC => Outcome::Cancelled,
        KeyPress::Backspace => Outcome::Alert,
        KeyPress::Resize => Outcome::Redraw,
        KeyPress::Noop => Outcome::Continue,
    }
}

fn handle_sub_action(
    state: &mut PickerState,
    grid: &Grid<'_>,
    key: KeyPress,
    index: usize,
) -> Outcome {
    let Some(action) = grid.get(state.row, state.column) else {
        // The cursor no longer points at a cell (the terminal shrank);
        // fall back to the grid.
        state.mode = Mode::TopLevel;
        return Outcome::Redraw;
    };
    let subs = &action.sub_actions;
    match key {
        KeyPress::Up => move_sub_cursor(state, index.saturating_sub(1)),
        KeyPress::Down => {
            let target = (index + 1).min(subs.len().saturating_sub(1));
            move_sub_cursor(state, target)
        }
        KeyPress::Enter { alt: false } => match subs.get(index) {
            Some(sub) => Outcome::Resolve(sub.value.clone()),
            None => Outcome::Alert,
        },
        KeyPress::Esc | KeyPress::Backspace => {
            state.mode = Mode::TopLevel;
            Outcome::Redraw
        }
        KeyPress::Char(pressed) => match subs.iter().find(|s| s.matches_key(pressed)) {
            Some(sub) => Outcome::Resolve(sub.value.clone()),
            None => Outcome::Alert,
        },
        KeyPress::CtrlC => Outcome::Cancelled,
        KeyPress::Resize => Outcome::Redraw,
        KeyPress::Noop => Outcome::Continue,
        // Alt-Enter, Tab, and sideways arrows mean nothing one level down.
        _ => Outcome::Alert,
    }
}

/// Move onto `(row, column)` if that cell exists; the cursor never wraps
/// and never lands past the ragged edge.
fn move_cursor(state: &mut PickerState, grid: &Grid<'_>, row: usize, column: usize) -> Outcome {
    if (row, column) == (state.row, state.column) {
        return Outcome::Continue;
    }
    if grid.get(row, column).is_none() {
        return Outcome::Continue;
    }
    state.row = row;
    state.column = column;
    Outcome::Redraw
}

fn move_sub_cursor(state: &mut PickerState, index: usize) -> Outcome {
    // The window rides the selection: recomputed from scratch after every
    // transition, never past the end of the list.
    let next = Mode::SubAction {
        index,
        scroll: (index + 1).saturating_sub(SUB_WINDOW),
    };
    if state.mode == next {
        return Outcome::Continue;
    }
    state.mode = next;
    Outcome::Redraw
}

/// Pull a stale cursor back onto an occupied cell. A reflow at a new
/// terminal width can leave the cursor past the last row, or past the end
/// of a now-shorter row.
fn clamp_cursor(state: &mut PickerState, grid: &Grid<'_>) {
    state.row = state.row.min(grid.rows().saturating_sub(1));
    state.column = state.column.min(grid.row_len(state.row).saturating_sub(1));
}

/// Build the full frame: header, grid rows cell by cell, help line.
fn compose_frame(header: &[String], grid: &Grid<'_>, state: &PickerState) -> String {
    let mut lines: Vec<String> = header.to_vec();
    for row in 0..grid.rows() {
        let boxes: Vec<Vec<String>> = (0..grid.columns())
            .map(|column| cell_box(grid, state, row, column))
            .collect();
        for part in 0..CELL_HEIGHT {
            let mut rendered = String::new();
            for cell in &boxes {
                if let Some(segment) = cell.get(part) {
                    rendered.push_str(segment);
                }
            }
            lines.push(rendered);
        }
    }
    lines.push(String::new());
    lines.push(match state.mode {
        Mode::TopLevel => HELP_TOP_LEVEL.to_string(),
        Mode::SubAction { .. } => HELP_SUB_ACTION.to_string(),
    });
    lines.join("\n")
}

fn cell_box(grid: &Grid<'_>, state: &PickerState, row: usize, column: usize) -> Vec<String> {
    let Some(action) = grid.get(row, column) else {
        // Trailing cell in a ragged last row.
        return render_box(
            &BoxStyle {
                width: CELL_WIDTH,
                height: CELL_HEIGHT,
                ..BoxStyle::default()
            },
            &[],
        );
    };
    let focused = (row, column) == (state.row, state.column);
    if focused {
        if let Mode::SubAction { index, scroll } = state.mode {
            if action.has_sub_actions() {
                return sub_list_box(action, index, scroll);
            }
        }
    }
    action_box(action, focused)
}

fn action_box(action: &Action, focused: bool) -> Vec<String> {
    let content_width = CELL_WIDTH - 4;
    let mut lines: Vec<Line> = wrap_words(&action.name, content_width)
        .into_iter()
        .map(|fragment| Line::new(fragment, Align::Center))
        .collect();
    if let Some(key) = action.key {
        // The shortcut sits on the fourth line when the name leaves room.
        while lines.len() < 3 {
            lines.push(Line::new("", Align::Center));
        }
        lines.push(Line::styled(
            key.to_ascii_uppercase().to_string(),
            Align::Center,
            TextStyle {
                bold: true,
                ..TextStyle::default()
            },
        ));
    }
    if action.has_sub_actions() {
        // The marker sits on the last content row.
        while lines.len() < CELL_HEIGHT - 3 {
            lines.push(Line::new("", Align::Center));
        }
        lines.push(Line::new("*", Align::Right));
    }
    render_box(
        &BoxStyle {
            background: focused.then_some(Fill::Reverse),
            width: CELL_WIDTH,
            height: CELL_HEIGHT,
            ..BoxStyle::default()
        },
        &lines,
    )
}

fn sub_list_box(action: &Action, index: usize, scroll: usize) -> Vec<String> {
    let lines: Vec<Line> = action
        .sub_actions
        .iter()
        .enumerate()
        .skip(scroll)
        .take(SUB_WINDOW)
        .map(|(position, sub)| {
            let content = match sub.key {
                Some(key) => format!(" [{}] {}", key.to_ascii_uppercase(), sub.name),
                None => format!(" {}", sub.name),
            };
            // Selection is marked by cancelling the box's reverse video.
            let fill = if position == index {
                Fill::Plain
            } else {
                Fill::Reverse
            };
            Line::styled(
                content,
                Align::Left,
                TextStyle {
                    background: Some(fill),
                    ..TextStyle::default()
                },
            )
        })
        .collect();
    render_box(
        &BoxStyle {
            background: Some(Fill::Reverse),
            width: CELL_WIDTH,
            height: CELL_HEIGHT,
            inner_padding: 0,
            ..BoxStyle::default()
        },
        &lines,
    )
}

/// Greedy word wrap at the cell's content width; a single overlong word
/// stays on its own line and the cell renderer truncates it.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut fragments: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            fragments.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        fragments.push(current);
    }
    fragments
}

/// The grid menu. The writer, size query, and keypress source are injected,
/// so a whole run is drivable from tests with an in-memory sink, a fixed
/// size, and a scripted key sequence.
pub struct ActionPicker<W: Write> {
    actions: Vec<Action>,
    header: Vec<String>,
    state: PickerState,
    size: fn() -> (u16, u16),
    writer: W,
}

impl ActionPicker<io::Stdout> {
    /// Picker on stdout with the real terminal size.
    pub fn new(actions: Vec<Action>, key_mode: KeyMode) -> Result<Self> {
        Self::with_io(actions, key_mode, io::stdout(), term::size)
    }
}

impl<W: Write> ActionPicker<W> {
    /// Picker with explicit collaborators. Shortcut keys are assigned per
    /// `key_mode` and the resulting set is validated before any terminal
    /// state changes.
    pub fn with_io(
        mut actions: Vec<Action>,
        key_mode: KeyMode,
        writer: W,
        size: fn() -> (u16, u16),
    ) -> Result<Self> {
        assign_keys(&mut actions, key_mode);
        validate_actions(&actions)?;
        Ok(Self {
            actions,
            header: Vec::new(),
            state: PickerState::default(),
            size,
            writer,
        })
    }

    /// Lines rendered verbatim above the grid (the status summary).
    pub fn with_header(mut self, header: Vec<String>) -> Self {
        self.header = header;
        self
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Run until one action resolves or the user cancels. The caller wraps
    /// this in a [`term::TerminalGuard`]; the loop itself only reads keys
    /// and writes frames.
    pub fn run(&mut self, reader: &mut dyn KeyPressReader) -> Result<Option<String>> {
        self.draw()?;
        loop {
            let key = reader.read_key_press()?;
            let (width, _) = (self.size)();
            let grid = Grid::new(&self.actions, CELL_WIDTH, width as usize);
            clamp_cursor(&mut self.state, &grid);
            match handle_key(&mut self.state, &grid, key) {
                Outcome::Continue => {}
                Outcome::Redraw => self.draw()?,
                Outcome::Alert => term::bell(&mut self.writer)?,
                Outcome::Resolve(value) => return Ok(Some(value)),
                Outcome::Cancelled => return Ok(None),
            }
        }
    }

    fn draw(&mut self) -> Result<()> {
        let (width, _) = (self.size)();
        let grid = Grid::new(&self.actions, CELL_WIDTH, width as usize);
        clamp_cursor(&mut self.state, &grid);
        let frame = compose_frame(&self.header, &grid, &self.state);
        term::draw_frame(&mut self.writer, &frame)
    }
}
