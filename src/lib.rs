//! gitdeck - A keyboard-driven grid menu TUI for everyday git tasks
//!
//! This library provides the two halves of the application: a terminal UI
//! built around a grid action picker, and a git client that runs the
//! underlying commands and parses their output.

pub mod git;
pub mod ui;
