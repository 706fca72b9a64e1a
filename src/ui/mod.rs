//! # UI Module
//!
//! This module provides the terminal user interface components for gitdeck.
//!
//! ## Components
//!
//! - [`ActionPicker`] - The fullscreen grid menu; one run resolves one action
//! - [`SelectPrompt`] - Inline scrolling list for picking a file or stash
//! - [`mod@prompt`] - Line input, yes/no confirmation, and pause prompts
//! - [`mod@boxes`] / [`mod@cell`] - The string renderers everything draws with
//!
//! ## Layout
//!
//! The menu is a grid of fixed-size cells, as many columns as the terminal
//! width allows:
//!
//! ```text
//! gitdeck                          <- status header
//! Current branch: main
//!
//! ┌────────────┐┌────────────┐┌────────────┐
//! │  Stage all ││   Commit   ││  Push to   │
//! │   changes  ││   changes  ││   remote   │
//! │      A     ││      C     ││      P     │
//! │           *││            ││            │
//! └────────────┘└────────────┘└────────────┘
//!
//! Use arrow keys to navigate and Enter or the action key to select.
//! ```
//!
//! ## Features
//!
//! - Arrow-key navigation with a reverse-video focus cell
//! - One-key shortcuts, fixed or auto-assigned (`1`-`9`,`0` / `a`-`z`)
//! - Per-action sub-lists opened with Alt-Enter or Tab, scrolled in place
//! - Frames composed as plain strings, so rendering is testable without a
//!   terminal

pub mod boxes;
pub mod cell;
pub mod config;
pub mod grid;
pub mod keys;
pub mod picker;
pub mod prompt;
pub mod select;
pub mod style;
pub mod term;
pub mod theme;

pub use config::Config;
pub use grid::{Action, Grid, KeyMode};
pub use keys::{KeyPress, KeyPressReader};
pub use picker::{ActionPicker, Outcome};
pub use select::SelectPrompt;
pub use style::{Fill, TextStyle};
pub use term::TerminalGuard;
pub use theme::Theme;
