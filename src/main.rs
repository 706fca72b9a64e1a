//! # gitdeck CLI Entry Point
//!
//! This is the main entry point for the gitdeck application.
//!
//! ## Overview
//!
//! gitdeck is a keyboard-driven terminal menu for everyday git tasks. It
//! shows the repository status above a grid of actions; picking an action
//! runs the matching git commands, shows their output, and returns to the
//! menu.
//!
//! ## Usage
//!
//! ```bash
//! # Use current directory
//! gitdeck
//!
//! # Use a repository somewhere else
//! gitdeck --path /path/to/repo
//!
//! # Auto-assign letter shortcuts instead of the curated ones
//! gitdeck --keys letter
//!
//! # Pick a color theme for status output
//! gitdeck --theme ocean
//!
//! # Debug mode - print repository and settings information and exit
//! gitdeck --debug
//! ```
//!
//! ## Architecture
//!
//! The application follows a simple loop:
//!
//! 1. **Status**: Read `git status` and build the header
//! 2. **Menu**: Run the fullscreen grid picker until one action resolves
//! 3. **Dispatch**: Leave the alternate screen and run the action's git
//!    commands, prompting inline where input is needed
//! 4. **Pause**: Wait for Enter so the output can be read, then loop
//!
//! ## Key Bindings
//!
//! ### Grid menu
//! - Arrow keys - Move the focus cell
//! - `Enter` - Run the focused action
//! - Action key (shown in the cell) - Run that action from anywhere
//! - `Alt+Enter` / `Tab` - Open the focused action's sub-list
//! - `Esc` / `Ctrl+C` - Leave the menu
//!
//! ### Sub-list
//! - `Up` / `Down` - Move the selection
//! - `Enter` - Run the selected sub-action
//! - `Backspace` / `Esc` - Back out to the grid

use gitdeck::git::{Branch, ChangedFile, GitClient, RepoStatus};
use gitdeck::ui::keys::CrosstermKeyPressReader;
use gitdeck::ui::{
    prompt, Action, ActionPicker, Config, KeyMode, SelectPrompt, TerminalGuard, TextStyle, Theme,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    cursor::Show,
    execute,
    style::Color,
    terminal::{disable_raw_mode, LeaveAlternateScreen},
};
use std::io;
use std::panic;
use std::path::PathBuf;

/// gitdeck - A keyboard-driven grid menu TUI for everyday git tasks
#[derive(Parser, Debug)]
#[command(name = "gitdeck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A keyboard-driven grid menu for everyday git tasks", long_about = None)]
struct Args {
    /// Path to a directory inside the repository to operate on
    #[arg(short, long, value_name = "DIR")]
    path: Option<PathBuf>,

    /// Automatic shortcut keys for the menu (overrides the config file)
    #[arg(short, long, value_enum, value_name = "MODE")]
    keys: Option<KeyMode>,

    /// Color theme for status output (overrides the config file)
    #[arg(short, long, value_name = "NAME")]
    theme: Option<String>,

    /// Print repository and settings information and exit
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Try to restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);

        // Call the original panic hook
        original_hook(panic_info);
    }));

    // Run the application and ensure cleanup happens
    let result = run_application(args).await;

    // Restore panic hook
    let _ = panic::take_hook();

    result
}

async fn run_application(args: Args) -> Result<()> {
    // Resolve the repository directory
    let current_dir = if let Some(path) = args.path {
        path.canonicalize()
            .with_context(|| format!("Failed to access directory: {}", path.display()))?
    } else {
        std::env::current_dir().context("Failed to get current working directory")?
    };
    let client = GitClient::open(&current_dir)?;

    // Settings: command line overrides the config file
    let config = Config::load();
    let requested = args.theme.as_deref().unwrap_or(&config.theme);
    let theme = match Theme::by_name(requested) {
        Some(theme) => theme,
        None => {
            let known: Vec<&str> = Theme::all().iter().map(|t| t.name).collect();
            eprintln!(
                "Warning: unknown theme '{requested}' (available: {}), using {}",
                known.join(", "),
                Theme::default_theme().name
            );
            Theme::default_theme()
        }
    };
    let key_mode = args.keys.unwrap_or(config.keys);

    // Debug mode: print repository and settings information and exit
    if args.debug {
        return print_debug_summary(&client, theme, key_mode);
    }

    menu_loop(&client, theme, key_mode)
}

/// One iteration per menu round: status, fullscreen picker, dispatch, pause.
fn menu_loop(client: &GitClient, theme: &Theme, key_mode: KeyMode) -> Result<()> {
    loop {
        let status = client.status()?;
        let mut picker = ActionPicker::new(main_menu_actions(), key_mode)?
            .with_header(status_header(&status, theme));
        let selection = {
            let _guard = TerminalGuard::fullscreen()?;
            picker.run(&mut CrosstermKeyPressReader)?
        };
        let Some(action) = selection else {
            break;
        };
        if action == "exit" {
            println!("Goodbye!");
            break;
        }
        if let Err(error) = dispatch(client, theme, &action) {
            println!("{}", colored(&format!("Error: {error:#}"), theme.error));
        }
        prompt::pause()?;
    }
    Ok(())
}

/// The main menu. Parents sharing a value with their first sub-action run
/// that sub-action directly on Enter; Alt-Enter opens the rest.
fn main_menu_actions() -> Vec<Action> {
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
        Action::new("Switch branch", "switch_branch").key('s'),
        Action::new("Show commit log", "show_log").key('o'),
        Action::new("Manage remotes", "manage_remotes").key('r'),
        Action::new("Create branch", "create_branch").key('b'),
        Action::new("Delete branch", "delete_branch").key('d'),
        Action::new("Show graph", "graph").key('g'),
        Action::new("Manage stashes", "stash").key('t'),
        Action::new("Undo changes", "undo_changes")
            .key('u')
            .sub_actions(vec![
                Action::new("Undo all", "undo_changes"),
                Action::new("Undo file", "undo_file"),
                Action::new("Undo staged file", "undo_staged_file"),
            ]),
        Action::new("Exit", "exit").key('x'),
    ]
}

/// Lines shown above the grid: application title, branch, pending changes.
fn status_header(status: &RepoStatus, theme: &Theme) -> Vec<String> {
    let title = TextStyle {
        foreground: Some(theme.accent),
        bold: true,
        ..TextStyle::default()
    }
    .apply("gitdeck");
    let mut lines = vec![title];

    let branch = status.branch.as_deref().unwrap_or("(detached)");
    let mut branch_line = format!("{} {branch}", colored("Current branch:", theme.success));
    if let Some(upstream) = &status.upstream {
        branch_line.push_str(&colored(&format!(" [{upstream}]"), theme.dim));
    }
    lines.push(branch_line);

    if status.is_clean() {
        lines.push(colored("Working tree clean", theme.dim));
    } else {
        lines.push(colored("Changes:", theme.warning));
        for file in status.changed_files() {
            lines.push(format!(" - {}", file.label()));
        }
    }
    lines.push(String::new());
    lines
}

/// Run the git work behind one resolved menu action.
fn dispatch(client: &GitClient, theme: &Theme, action: &str) -> Result<()> {
    match action {
        "stage_all" => {
            client.stage_all()?;
            println!("{}", colored("All changes staged.", theme.success));
        }
        "unstage_all" => {
            client.unstage_all()?;
            println!("{}", colored("All changes unstaged.", theme.success));
        }
        "stage_file" => stage_single_file(client, theme)?,
        "unstage_file" => unstage_single_file(client, theme)?,
        "commit" => commit_changes(client, theme)?,
        "push" => push_to_remote(client, theme)?,
        "pull" => pull_from_remote(client, theme)?,
        "switch_branch" => switch_branch(client, theme)?,
        "show_log" => show_commit_log(client, theme)?,
        "manage_remotes" => manage_remotes(client, theme)?,
        "create_branch" => create_branch(client, theme)?,
        "delete_branch" => delete_branch(client, theme)?,
        "graph" => println!("{}", client.graph()?),
        "stash" => manage_stashes(client, theme)?,
        "undo_changes" => undo_all_changes(client, theme)?,
        "undo_file" => undo_single_file(client, theme)?,
        "undo_staged_file" => undo_staged_file(client, theme)?,
        other => bail!("Unknown action: {other}"),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Action flows
// ---------------------------------------------------------------------------

/// Inline list over changed files; resolves to the picked path. Backing out
/// of the list, or having nothing to pick from, resolves to `None`.
fn select_file(theme: &Theme, files: &[&ChangedFile], message: &str) -> Result<Option<String>> {
    if files.is_empty() {
        println!(
            "{}",
            colored("No files available for this action.", theme.warning)
        );
        return Ok(None);
    }
    let labels = files.iter().map(|file| file.label()).collect();
    match SelectPrompt::new(message, labels).run()? {
        Some(index) => Ok(files.get(index).map(|file| file.path.clone())),
        None => Ok(None),
    }
}

fn stage_single_file(client: &GitClient, theme: &Theme) -> Result<()> {
    let status = client.status()?;
    if let Some(path) = select_file(theme, &status.unstaged_files(), "Select a file to stage:")? {
        client.stage_file(&path)?;
        println!("{}", colored(&format!("Staged: {path}"), theme.success));
    }
    Ok(())
}

fn unstage_single_file(client: &GitClient, theme: &Theme) -> Result<()> {
    let status = client.status()?;
    if let Some(path) = select_file(theme, &status.staged_files(), "Select a file to unstage:")? {
        client.unstage_file(&path)?;
        println!("{}", colored(&format!("Unstaged: {path}"), theme.success));
    }
    Ok(())
}

fn commit_changes(client: &GitClient, theme: &Theme) -> Result<()> {
    let Some(message) = prompt::input_line("Enter commit message:")? else {
        return Ok(());
    };
    let message = message.trim();
    if message.is_empty() {
        println!(
            "{}",
            colored("Commit message cannot be empty.", theme.warning)
        );
        return Ok(());
    }
    let transcript = client.commit(message)?;
    print_transcript(&transcript);
    println!("{}", colored("Changes committed.", theme.success));
    Ok(())
}

fn push_to_remote(client: &GitClient, theme: &Theme) -> Result<()> {
    let status = client.status()?;
    if status.upstream.is_none() {
        let publish = prompt::confirm(
            "The current branch has no upstream branch. Would you like to publish it?",
            true,
        )?;
        if publish {
            match &status.branch {
                Some(branch) => {
                    let transcript = client.push_set_upstream(branch)?;
                    print_transcript(&transcript);
                    println!(
                        "{}",
                        colored(&format!("Branch {branch} published"), theme.success)
                    );
                }
                None => println!("{}", colored("No current branch found.", theme.error)),
            }
        }
        return Ok(());
    }
    let transcript = client.push()?;
    print_transcript(&transcript);
    println!("{}", colored("Pushed to remote.", theme.success));
    Ok(())
}

fn pull_from_remote(client: &GitClient, theme: &Theme) -> Result<()> {
    let transcript = client.pull()?;
    print_transcript(&transcript);
    println!("{}", colored("Pulled from remote.", theme.success));
    Ok(())
}

fn switch_branch(client: &GitClient, theme: &Theme) -> Result<()> {
    let branches = client.local_branches()?;
    let others: Vec<&Branch> = branches.iter().filter(|b| !b.is_current).collect();
    if others.is_empty() {
        println!("{}", colored("No other branches found.", theme.warning));
        return Ok(());
    }
    let names: Vec<String> = others.iter().map(|b| b.name.clone()).collect();
    let Some(index) = SelectPrompt::new("Select a branch to switch to", names).run()? else {
        return Ok(());
    };
    let Some(branch) = others.get(index) else {
        return Ok(());
    };
    client.checkout(&branch.name)?;
    println!(
        "{}",
        colored(&format!("Switched to branch {}", branch.name), theme.success)
    );
    Ok(())
}

fn show_commit_log(client: &GitClient, theme: &Theme) -> Result<()> {
    let commits = client.log(10)?;
    println!("{}", bold("Recent Commits:"));
    for commit in &commits {
        println!(
            "{}",
            colored(&format!("commit {}", commit.hash), theme.accent)
        );
        println!("Author: {} <{}>", commit.author, commit.email);
        println!("Date:   {}", commit.local_date());
        println!("\n    {}\n", commit.subject);
    }
    Ok(())
}

fn manage_remotes(client: &GitClient, theme: &Theme) -> Result<()> {
    let remotes = client.remotes()?;
    println!("{}", bold("Git Remotes:"));
    for remote in &remotes {
        println!("{} -> {}", remote.name, remote.url);
    }
    if !prompt::confirm("Would you like to add a new remote?", false)? {
        return Ok(());
    }
    let Some(name) = prompt::input_line("Enter remote name:")? else {
        return Ok(());
    };
    let Some(url) = prompt::input_line("Enter remote URL:")? else {
        return Ok(());
    };
    client.add_remote(&name, &url)?;
    println!(
        "{}",
        colored(&format!("Remote {name} added."), theme.success)
    );
    Ok(())
}

fn create_branch(client: &GitClient, theme: &Theme) -> Result<()> {
    let Some(name) = prompt::input_line("Enter the new branch name:")? else {
        return Ok(());
    };
    let name = name.trim();
    if name.is_empty() {
        println!("{}", colored("Branch name cannot be empty.", theme.warning));
        return Ok(());
    }
    client.create_branch(name)?;
    println!(
        "{}",
        colored(&format!("Created branch {name}"), theme.success)
    );
    Ok(())
}

fn delete_branch(client: &GitClient, theme: &Theme) -> Result<()> {
    let branches = client.local_branches()?;
    let names: Vec<String> = branches.iter().map(|b| b.name.clone()).collect();
    let Some(index) = SelectPrompt::new("Select a branch to delete", names).run()? else {
        return Ok(());
    };
    let Some(branch) = branches.get(index) else {
        return Ok(());
    };
    let question = format!("Are you sure you want to delete branch {}?", branch.name);
    if !prompt::confirm(&question, false)? {
        return Ok(());
    }
    client.delete_branch(&branch.name)?;
    println!(
        "{}",
        colored(&format!("Branch {} deleted.", branch.name), theme.success)
    );
    Ok(())
}

fn manage_stashes(client: &GitClient, theme: &Theme) -> Result<()> {
    let choices = vec![
        "Save stash".to_string(),
        "Apply stash".to_string(),
        "Pop stash".to_string(),
        "Drop stash".to_string(),
    ];
    let Some(choice) = SelectPrompt::new("Stash actions", choices).run()? else {
        return Ok(());
    };
    if choice == 0 {
        let Some(message) = prompt::input_line("Enter stash message (empty for none):")? else {
            return Ok(());
        };
        let message = message.trim();
        let transcript = if message.is_empty() {
            client.stash_save(None)?
        } else {
            client.stash_save(Some(message))?
        };
        print_transcript(&transcript);
        println!("{}", colored("Changes stashed.", theme.success));
        return Ok(());
    }

    let entries = client.stash_list()?;
    if entries.is_empty() {
        println!("{}", colored("No stashes found.", theme.warning));
        return Ok(());
    }
    let labels: Vec<String> = entries.iter().map(|entry| entry.label()).collect();
    let Some(index) = SelectPrompt::new("Select a stash", labels).run()? else {
        return Ok(());
    };
    let Some(entry) = entries.get(index) else {
        return Ok(());
    };
    let (transcript, done) = match choice {
        1 => (client.stash_apply(entry)?, "Stash applied."),
        2 => (client.stash_pop(entry)?, "Stash popped."),
        _ => (client.stash_drop(entry)?, "Stash dropped."),
    };
    print_transcript(&transcript);
    println!("{}", colored(done, theme.success));
    Ok(())
}

fn undo_all_changes(client: &GitClient, theme: &Theme) -> Result<()> {
    if !prompt::confirm("Are you sure you want to undo all changes?", false)? {
        return Ok(());
    }
    // Destructive and unrecoverable, so ask twice.
    let really = prompt::confirm(
        "This permanently discards every uncommitted change. Continue?",
        false,
    )?;
    if really {
        client.discard_all()?;
        println!("{}", colored("All changes undone.", theme.success));
    }
    Ok(())
}

fn undo_single_file(client: &GitClient, theme: &Theme) -> Result<()> {
    let status = client.status()?;
    let files: Vec<&ChangedFile> = status.changed_files().iter().collect();
    let Some(path) = select_file(theme, &files, "Select a file to undo:")? else {
        return Ok(());
    };
    if prompt::confirm("Are you sure you want to restore this file?", false)? {
        client.restore_file(&path)?;
        println!("{}", colored(&format!("Undo: {path}"), theme.success));
    }
    Ok(())
}

fn undo_staged_file(client: &GitClient, theme: &Theme) -> Result<()> {
    let status = client.status()?;
    let files: Vec<&ChangedFile> = status.changed_files().iter().collect();
    let Some(path) = select_file(theme, &files, "Select a file to undo:")? else {
        return Ok(());
    };
    let confirmed = prompt::confirm(
        "Are you sure you want to undo all staged changes made to this file?",
        false,
    )?;
    if confirmed {
        client.restore_staged_file(&path)?;
        println!("{}", colored(&format!("Undo: {path}"), theme.success));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

/// Show git's own narration (push progress, merge summaries) when there is
/// any; conflicts surface here.
fn print_transcript(transcript: &str) {
    let trimmed = transcript.trim_end();
    if !trimmed.is_empty() {
        println!("{trimmed}");
    }
}

fn colored(text: &str, color: Color) -> String {
    TextStyle {
        foreground: Some(color),
        ..TextStyle::default()
    }
    .apply(text)
}

fn bold(text: &str) -> String {
    TextStyle {
        bold: true,
        ..TextStyle::default()
    }
    .apply(text)
}

fn print_debug_summary(client: &GitClient, theme: &Theme, key_mode: KeyMode) -> Result<()> {
    let status = client.status()?;
    // Repositories without a commit yet have no log; show nothing for them.
    let last = client.log(1).unwrap_or_default();
    println!("=== Repository ===");
    println!("  Path: {}", client.work_dir().display());
    println!(
        "  Branch: {}",
        status.branch.as_deref().unwrap_or("(detached)")
    );
    println!(
        "  Upstream: {}",
        status.upstream.as_deref().unwrap_or("(none)")
    );
    println!("  Changed files: {}", status.changed_files().len());
    if let Some(commit) = last.first() {
        println!("  Last commit: {}", commit.summary());
    }
    println!();
    println!("=== Settings ===");
    println!("  Theme: {}", theme.name);
    println!("  Key mode: {key_mode:?}");
    Ok(())
}
