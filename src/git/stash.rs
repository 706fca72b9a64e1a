//! Stash list parsing and the `stash@{N}` references the apply, pop, and
//! drop commands take.

use anyhow::{Context, Result};
use regex::Regex;

/// One entry from `git stash list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StashEntry {
    pub index: usize,
    pub description: String,
}

impl StashEntry {
    /// The revision argument the stash commands accept.
    pub fn reference(&self) -> String {
        format!("stash@{{{}}}", self.index)
    }

    /// Display form for the stash picker.
    pub fn label(&self) -> String {
        format!("[{}] {}", self.index, self.description)
    }
}

/// Parse `git stash list` output, one `stash@{N}: description` per line.
pub fn parse_stash_list(output: &str) -> Result<Vec<StashEntry>> {
    let pattern =
        Regex::new(r"^stash@\{(\d+)\}:\s*(.*)$").context("Invalid stash list pattern")?;
    let entries = output
        .lines()
        .filter_map(|line| {
            let captures = pattern.captures(line)?;
            let index = captures.get(1)?.as_str().parse::<usize>().ok()?;
            let description = captures.get(2)?.as_str().to_string();
            Some(StashEntry { index, description })
        })
        .collect();
    Ok(entries)
}
