//! Frame rendering tests
//!
//! These look at what a picker run actually writes to the terminal: row
//! counts, borders, reverse-video focus, the sub-list window, and the help
//! line. The writer is an in-memory sink, so every assertion is on the raw
//! ANSI stream.

use gitdeck::ui::keys::{KeyPress, ScriptedKeyPressReader};
use gitdeck::ui::{Action, ActionPicker, KeyMode};

/// Helper to build a small menu shaped like the real one.
fn create_test_menu() -> Vec<Action> {
    vec![
        Action::new("Stage all changes", "stage_all")
            .key('a')
            .sub_actions(vec![
                Action::new("Stage all", "stage_all"),
                Action::new("Unstage all", "unstage_all"),
                Action::new("Stage file", "stage_file"),
                Action::new("Unstage file", "unstage_file"),
            ]),
        Action::new("Commit changes", "commit").key('c'),
        Action::new("Push to remote", "push").key('p'),
        Action::new("Pull from remote", "pull").key('l'),
        Action::new("Exit", "exit").key('x'),
    ]
}

/// Helper to run a scripted session and return the written ANSI stream.
fn rendered(size: fn() -> (u16, u16), keys: impl IntoIterator<Item = KeyPress>) -> String {
    let mut picker =
        ActionPicker::with_io(create_test_menu(), KeyMode::None, Vec::new(), size).unwrap();
    let mut reader = ScriptedKeyPressReader::new(keys);
    picker.run(&mut reader).unwrap();
    String::from_utf8(picker.writer().clone()).unwrap()
}

/// 80 columns fit all five test actions in one row.
fn wide() -> (u16, u16) {
    (80, 24)
}

/// 10 columns force a single-column layout.
fn narrow() -> (u16, u16) {
    (10, 24)
}

#[tokio::test]
async fn test_wide_frame_advances_one_row_per_line() {
    let written = rendered(wide, [KeyPress::Esc]);
    // One grid row of eight, a blank line, and the help line.
    assert_eq!(written.matches("\x1b[1E").count(), 10);
}

#[tokio::test]
async fn test_narrow_frame_stacks_every_action() {
    let written = rendered(narrow, [KeyPress::Esc]);
    // Five grid rows of eight, a blank line, and the help line.
    assert_eq!(written.matches("\x1b[1E").count(), 42);
}

#[tokio::test]
async fn test_header_adds_rows_to_the_frame() {
    let mut picker = ActionPicker::with_io(create_test_menu(), KeyMode::None, Vec::new(), wide)
        .unwrap()
        .with_header(vec!["gitdeck".to_string(), "Changes:".to_string()]);
    let mut reader = ScriptedKeyPressReader::new([KeyPress::Esc]);
    picker.run(&mut reader).unwrap();
    let written = String::from_utf8(picker.writer().clone()).unwrap();
    assert_eq!(written.matches("\x1b[1E").count(), 12);
    assert!(written.contains("gitdeck"));
}

#[tokio::test]
async fn test_one_top_border_per_cell() {
    let written = rendered(wide, [KeyPress::Esc]);
    assert_eq!(written.matches('┌').count(), 5);
    assert_eq!(written.matches('┘').count(), 5);
}

#[tokio::test]
async fn test_focused_cell_renders_reverse_video() {
    let written = rendered(wide, [KeyPress::Esc]);
    assert!(written.contains("\x1b[7m"));
}

#[tokio::test]
async fn test_shortcut_key_renders_bold_and_centered() {
    let written = rendered(wide, [KeyPress::Esc]);
    // The commit cell is not focused, so its bold run ends in a plain reset.
    assert!(written.contains("\x1b[1m     C      \x1b[0m"));
}

#[tokio::test]
async fn test_sub_action_marker_sits_against_the_right_border() {
    let written = rendered(wide, [KeyPress::Esc]);
    assert!(written.contains("* │"));
}

#[tokio::test]
async fn test_help_line_at_top_level() {
    let written = rendered(wide, [KeyPress::Esc]);
    assert!(written.contains("Use arrow keys to navigate and Enter or the action key to select."));
}

#[tokio::test]
async fn test_help_line_inside_a_sub_list() {
    // Esc inside a sub-list only backs out, so cancel with Ctrl+C.
    let written = rendered(wide, [KeyPress::Tab, KeyPress::CtrlC]);
    assert!(written.contains("Use arrow keys to select sub action or backspace to exit"));
}

#[tokio::test]
async fn test_sub_list_window_renders_inside_the_cell() {
    let written = rendered(wide, [KeyPress::Tab, KeyPress::CtrlC]);
    assert!(written.contains("Unstage all"));
    assert!(written.contains("Stage file"));
}

#[tokio::test]
async fn test_sub_rows_stay_hidden_at_top_level() {
    let written = rendered(wide, [KeyPress::Esc]);
    assert!(!written.contains("Unstage all"));
}

#[tokio::test]
async fn test_selected_sub_row_knocks_out_the_reverse_fill() {
    let written = rendered(wide, [KeyPress::Tab, KeyPress::CtrlC]);
    // Selected row: a full reset run terminated by restoring reverse video.
    assert!(written.contains("\x1b[0m Stage all    \x1b[7m"));
    // Unselected rows keep the reverse fill on both sides.
    assert!(written.contains("\x1b[7m Unstage all  \x1b[7m"));
}

#[tokio::test]
async fn test_moving_the_sub_cursor_moves_the_knockout() {
    let written = rendered(
        wide,
        [KeyPress::Tab, KeyPress::Down, KeyPress::CtrlC],
    );
    assert!(written.contains("\x1b[0m Unstage all  \x1b[7m"));
}

#[tokio::test]
async fn test_cell_names_wrap_inside_the_cell() {
    let written = rendered(wide, [KeyPress::Esc]);
    // "Stage all changes" is wider than a cell and wraps after "Stage all".
    assert!(written.contains("changes"));
    assert!(!written.contains("Stage all changes"));
}
