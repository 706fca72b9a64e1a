//! Grid menu end-to-end tests
//!
//! Each test drives a complete picker run with a scripted key sequence, an
//! in-memory writer, and a fixed terminal size, then checks what resolved
//! and what was written to the terminal.

use gitdeck::ui::keys::{KeyPress, KeyPressReader, ScriptedKeyPressReader};
use gitdeck::ui::picker::PickerState;
use gitdeck::ui::{Action, ActionPicker, KeyMode};
use std::sync::atomic::{AtomicU16, Ordering};

/// Helper to build a small menu shaped like the real one: a parent with
/// sub-actions first, a few plain actions, Exit last.
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

/// Helper to run one scripted picker session; returns what resolved and
/// everything written to the terminal.
fn run_picker(
    actions: Vec<Action>,
    key_mode: KeyMode,
    size: fn() -> (u16, u16),
    keys: impl IntoIterator<Item = KeyPress>,
) -> (Option<String>, String) {
    let mut picker = ActionPicker::with_io(actions, key_mode, Vec::new(), size).unwrap();
    let mut reader = ScriptedKeyPressReader::new(keys);
    let selection = picker.run(&mut reader).unwrap();
    let written = String::from_utf8(picker.writer().clone()).unwrap();
    (selection, written)
}

/// 80 columns: all five test actions fit in one row.
fn wide() -> (u16, u16) {
    (80, 24)
}

/// 40 columns: two cells per row.
fn two_columns() -> (u16, u16) {
    (40, 24)
}

/// 10 columns: narrower than one cell, which still yields one column.
fn narrow() -> (u16, u16) {
    (10, 24)
}

#[tokio::test]
async fn test_enter_resolves_first_action() {
    let (selection, _) = run_picker(
        create_test_menu(),
        KeyMode::None,
        wide,
        [KeyPress::Enter { alt: false }],
    );
    assert_eq!(selection.as_deref(), Some("stage_all"));
}

#[tokio::test]
async fn test_arrow_navigation_then_enter() {
    // Two columns: row 0 is stage/commit, row 1 is push/pull, row 2 is exit.
    let (selection, _) = run_picker(
        create_test_menu(),
        KeyMode::None,
        two_columns,
        [
            KeyPress::Down,
            KeyPress::Right,
            KeyPress::Enter { alt: false },
        ],
    );
    assert_eq!(selection.as_deref(), Some("pull"));
}

#[tokio::test]
async fn test_shortcut_key_resolves_from_anywhere() {
    let (selection, _) = run_picker(
        create_test_menu(),
        KeyMode::None,
        wide,
        [KeyPress::Char('p')],
    );
    assert_eq!(selection.as_deref(), Some("push"));
}

#[tokio::test]
async fn test_alt_enter_opens_sub_list_and_enter_picks() {
    let (selection, _) = run_picker(
        create_test_menu(),
        KeyMode::None,
        wide,
        [
            KeyPress::Enter { alt: true },
            KeyPress::Down,
            KeyPress::Enter { alt: false },
        ],
    );
    assert_eq!(selection.as_deref(), Some("unstage_all"));
}

#[tokio::test]
async fn test_tab_aliases_alt_enter() {
    let (selection, _) = run_picker(
        create_test_menu(),
        KeyMode::None,
        wide,
        [
            KeyPress::Tab,
            KeyPress::Down,
            KeyPress::Down,
            KeyPress::Enter { alt: false },
        ],
    );
    assert_eq!(selection.as_deref(), Some("stage_file"));
}

#[tokio::test]
async fn test_backspace_leaves_sub_list_without_resolving() {
    // Back out of the sub-list, then Enter runs the parent action itself.
    let (selection, _) = run_picker(
        create_test_menu(),
        KeyMode::None,
        wide,
        [
            KeyPress::Tab,
            KeyPress::Down,
            KeyPress::Backspace,
            KeyPress::Enter { alt: false },
        ],
    );
    assert_eq!(selection.as_deref(), Some("stage_all"));
}

#[tokio::test]
async fn test_escape_cancels_the_menu() {
    let (selection, _) = run_picker(create_test_menu(), KeyMode::None, wide, [KeyPress::Esc]);
    assert_eq!(selection, None);
}

#[tokio::test]
async fn test_ctrl_c_cancels_the_menu() {
    let (selection, _) = run_picker(create_test_menu(), KeyMode::None, wide, [KeyPress::CtrlC]);
    assert_eq!(selection, None);
}

#[tokio::test]
async fn test_unassigned_key_rings_bell_once() {
    let (selection, written) = run_picker(
        create_test_menu(),
        KeyMode::None,
        wide,
        [KeyPress::Char('z'), KeyPress::Esc],
    );
    assert_eq!(selection, None);
    assert_eq!(written.matches('\u{0007}').count(), 1);
}

#[tokio::test]
async fn test_invalid_key_leaves_cursor_alone() {
    let mut picker =
        ActionPicker::with_io(create_test_menu(), KeyMode::None, Vec::new(), wide).unwrap();
    let mut reader = ScriptedKeyPressReader::new([KeyPress::Char('z'), KeyPress::Esc]);
    picker.run(&mut reader).unwrap();
    assert_eq!(picker.state(), PickerState::default());
}

#[tokio::test]
async fn test_alt_enter_without_sub_actions_rings_bell() {
    // Commit has no sub-actions; opening its sub-list is an invalid input.
    let (selection, written) = run_picker(
        create_test_menu(),
        KeyMode::None,
        two_columns,
        [
            KeyPress::Right,
            KeyPress::Enter { alt: true },
            KeyPress::Esc,
        ],
    );
    assert_eq!(selection, None);
    assert_eq!(written.matches('\u{0007}').count(), 1);
}

#[tokio::test]
async fn test_number_mode_overrides_curated_keys() {
    let (selection, _) = run_picker(
        create_test_menu(),
        KeyMode::Number,
        wide,
        [KeyPress::Char('2')],
    );
    assert_eq!(selection.as_deref(), Some("commit"));
}

#[tokio::test]
async fn test_letter_mode_assigns_alphabet_in_order() {
    let (selection, _) = run_picker(
        create_test_menu(),
        KeyMode::Letter,
        wide,
        [KeyPress::Char('e')],
    );
    assert_eq!(selection.as_deref(), Some("exit"));
}

#[tokio::test]
async fn test_single_column_on_narrow_terminal() {
    let (selection, _) = run_picker(
        create_test_menu(),
        KeyMode::None,
        narrow,
        [KeyPress::Down, KeyPress::Enter { alt: false }],
    );
    assert_eq!(selection.as_deref(), Some("commit"));
}

#[tokio::test]
async fn test_resize_redraws_the_frame() {
    let (selection, written) = run_picker(
        create_test_menu(),
        KeyMode::None,
        wide,
        [KeyPress::Resize, KeyPress::Esc],
    );
    assert_eq!(selection, None);
    // One clear for the opening frame, one for the redraw.
    assert_eq!(written.matches("\x1b[2J").count(), 2);
}

#[tokio::test]
async fn test_header_lines_render_above_the_grid() {
    let mut picker =
        ActionPicker::with_io(create_test_menu(), KeyMode::None, Vec::new(), wide)
            .unwrap()
            .with_header(vec![
                "gitdeck".to_string(),
                "Current branch: main".to_string(),
            ]);
    let mut reader = ScriptedKeyPressReader::new([KeyPress::Esc]);
    picker.run(&mut reader).unwrap();
    let written = String::from_utf8(picker.writer().clone()).unwrap();
    assert!(written.contains("gitdeck"));
    assert!(written.contains("Current branch: main"));
}

#[tokio::test]
async fn test_duplicate_shortcut_keys_are_rejected_up_front() {
    let actions = vec![
        Action::new("Commit changes", "commit").key('c'),
        Action::new("Checkout", "checkout").key('C'),
    ];
    let result = ActionPicker::with_io(actions, KeyMode::None, Vec::new(), wide);
    assert!(result.is_err());
}

/// Width reported by [`reflowing`]; the resize test widens it mid-run.
static REFLOW_WIDTH: AtomicU16 = AtomicU16::new(40);

fn reflowing() -> (u16, u16) {
    (REFLOW_WIDTH.load(Ordering::SeqCst), 24)
}

/// Scripted reader that widens the reported terminal when it hands out the
/// resize key, the way a real resize event arrives with a new size.
struct ReflowingReader(ScriptedKeyPressReader);

impl KeyPressReader for ReflowingReader {
    fn read_key_press(&mut self) -> anyhow::Result<KeyPress> {
        let key = self.0.read_key_press()?;
        if key == KeyPress::Resize {
            REFLOW_WIDTH.store(80, Ordering::SeqCst);
        }
        Ok(key)
    }
}

#[tokio::test]
async fn test_resize_reflow_keeps_the_cursor_on_a_real_cell() {
    // Two columns to start, with exit alone on row 2. The resize reflows
    // the grid to a single row of five, so row 2 no longer exists; the
    // cursor must land back on a real cell and the arrows must keep working.
    REFLOW_WIDTH.store(40, Ordering::SeqCst);
    let mut picker =
        ActionPicker::with_io(create_test_menu(), KeyMode::None, Vec::new(), reflowing).unwrap();
    let mut reader = ReflowingReader(ScriptedKeyPressReader::new([
        KeyPress::Down,
        KeyPress::Down,
        KeyPress::Resize,
        KeyPress::Right,
        KeyPress::Enter { alt: false },
    ]));
    let selection = picker.run(&mut reader).unwrap();
    assert_eq!(selection.as_deref(), Some("commit"));
    let written = String::from_utf8(picker.writer().clone()).unwrap();
    assert!(!written.contains('\u{0007}'));
}
