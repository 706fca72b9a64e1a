//! # Actions and Grid Layout
//!
//! The menu's data model: an [`Action`] is one selectable entry (name,
//! optional shortcut key, resolution value, optional one-level sub-actions),
//! and a [`Grid`] is a row-major view of the action list sized from the
//! terminal width.
//!
//! ## Layout
//!
//! ```text
//! columns = max(1, terminal_width / cell_width)
//! rows    = ceil(action_count / columns)
//! grid[r][c] == actions[r * columns + c]
//! ```
//!
//! Only the last row may fall short; a terminal narrower than one cell
//! degrades to a single column and is never an error.

use anyhow::{bail, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One selectable menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub name: String,
    /// Shortcut key, matched case-insensitively.
    pub key: Option<char>,
    /// The string the picker resolves with when this entry is chosen.
    pub value: String,
    /// One level of nested entries; empty for plain actions.
    pub sub_actions: Vec<Action>,
}

impl Action {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: None,
            value: value.into(),
            sub_actions: Vec::new(),
        }
    }

    pub fn key(mut self, key: char) -> Self {
        self.key = Some(key);
        self
    }

    pub fn sub_actions(mut self, sub_actions: Vec<Action>) -> Self {
        self.sub_actions = sub_actions;
        self
    }

    pub fn has_sub_actions(&self) -> bool {
        !self.sub_actions.is_empty()
    }

    pub(crate) fn matches_key(&self, pressed: char) -> bool {
        self.key.is_some_and(|key| key.eq_ignore_ascii_case(&pressed))
    }
}

/// Automatic shortcut assignment applied before layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMode {
    /// Keep only the keys actions already carry.
    #[default]
    None,
    /// `1`..`9` then `0` for the first ten actions.
    Number,
    /// `a`..`z` for the first twenty-six actions.
    Letter,
}

/// Assign shortcut keys in input order. Keys inside the automatic range are
/// overwritten; actions beyond it keep whatever they already carry.
pub fn assign_keys(actions: &mut [Action], mode: KeyMode) {
    match mode {
        KeyMode::None => {}
        KeyMode::Number => {
            for (index, action) in actions.iter_mut().take(10).enumerate() {
                action.key = char::from_digit(((index + 1) % 10) as u32, 10);
            }
        }
        KeyMode::Letter => {
            for (index, action) in actions.iter_mut().take(26).enumerate() {
                action.key = char::from_u32('a' as u32 + index as u32);
            }
        }
    }
}

/// Reject malformed action sets before any terminal state changes.
///
/// Values and shortcut keys must be unique within a scope (the top level, or
/// one action's sub-list); a top-level action sharing its value with one of
/// its own sub-actions is deliberate and allowed.
pub fn validate_actions(actions: &[Action]) -> Result<()> {
    if actions.is_empty() {
        bail!("Action set cannot be empty");
    }
    check_scope(actions, "the top level")?;
    for action in actions {
        if action.has_sub_actions() {
            check_scope(
                &action.sub_actions,
                &format!("sub-actions of '{}'", action.name),
            )?;
            for sub in &action.sub_actions {
                if sub.has_sub_actions() {
                    bail!(
                        "Nested sub-actions are not supported (under '{}')",
                        action.name
                    );
                }
            }
        }
    }
    Ok(())
}

fn check_scope(actions: &[Action], scope: &str) -> Result<()> {
    for (position, action) in actions.iter().enumerate() {
        if action.value.is_empty() {
            bail!("Action '{}' has an empty value", action.name);
        }
        for earlier in &actions[..position] {
            if action.value == earlier.value {
                bail!("Duplicate action value '{}' at {scope}", action.value);
            }
            if let (Some(a), Some(b)) = (action.key, earlier.key) {
                if a.eq_ignore_ascii_case(&b) {
                    bail!("Duplicate shortcut key '{a}' at {scope}");
                }
            }
        }
    }
    Ok(())
}

/// Row-major grid view over an action slice.
#[derive(Debug)]
pub struct Grid<'a> {
    actions: &'a [Action],
    columns: usize,
    rows: usize,
}

impl<'a> Grid<'a> {
    /// Columns from the terminal width (at least one), rows from the count.
    pub fn new(actions: &'a [Action], cell_width: usize, terminal_width: usize) -> Self {
        let columns = (terminal_width / cell_width.max(1)).max(1);
        let rows = actions.len().div_ceil(columns);
        Self {
            actions,
            columns,
            rows,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Every action in input order.
    pub fn actions(&self) -> &'a [Action] {
        self.actions
    }

    /// The action at a coordinate, or `None` past the ragged edge.
    pub fn get(&self, row: usize, column: usize) -> Option<&'a Action> {
        if column >= self.columns {
            return None;
        }
        self.actions.get(row * self.columns + column)
    }

    /// Occupied cells in `row`; only the last row may fall short.
    pub fn row_len(&self, row: usize) -> usize {
        if row + 1 < self.rows {
            self.columns
        } else if row + 1 == self.rows {
            self.actions.len() - (self.rows - 1) * self.columns
        } else {
            0
        }
    }
}
