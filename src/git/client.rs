//! # Git Client
//!
//! Runs the `git` executable against one repository and parses what it
//! prints. Every operation the menu dispatches lands here.
//!
//! ## Key Design Decisions
//!
//! ### Plain subprocesses
//!
//! Commands run through `std::process::Command` with captured output; the
//! application is single user, single repository, one command at a time, and
//! blocking on `git` keeps the flow trivial to follow.
//!
//! ### Two capture modes
//!
//! Queries ([`GitClient::status`], [`GitClient::log`]) keep stdout only.
//! Mutations whose progress users expect to see (`push`, `pull`, `checkout`)
//! merge stderr into the returned transcript, because git reports progress
//! there even on success.
//!
//! ### Failure reporting
//!
//! A non-zero exit becomes an error carrying git's own stderr, so the menu
//! can show `fatal: ...` lines exactly as git wrote them.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

use super::log::{parse_log, Commit, LOG_FORMAT};
use super::stash::{parse_stash_list, StashEntry};
use super::status::{parse_status, RepoStatus};

/// Whether a usable `git` executable is on `PATH`. Checked once.
pub fn git_available() -> bool {
    static AVAILABLE: OnceLock<bool> = OnceLock::new();
    *AVAILABLE.get_or_init(|| {
        Command::new("git")
            .arg("--version")
            .output()
            .is_ok_and(|output| output.status.success())
    })
}

/// One local branch from `git branch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
    pub is_current: bool,
}

/// One configured remote from `git remote -v`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub name: String,
    pub url: String,
}

/// Handle on one repository; all commands run in its top-level directory.
#[derive(Debug, Clone)]
pub struct GitClient {
    work_dir: PathBuf,
}

impl GitClient {
    /// Open the repository containing `dir`. Fails when the path is not a
    /// directory, git is missing, or the path is outside any repository.
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.exists() {
            bail!("Directory not found: {}", dir.display());
        }
        if !dir.is_dir() {
            bail!("Path is not a directory: {}", dir.display());
        }
        if !git_available() {
            bail!("git executable not found on PATH");
        }
        let candidate = Self {
            work_dir: dir.to_path_buf(),
        };
        let top_level = candidate.run(&["rev-parse", "--show-toplevel"])?;
        Ok(Self {
            work_dir: PathBuf::from(top_level.trim()),
        })
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Run git capturing stdout; non-zero exit becomes an error with stderr.
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .output()
            .with_context(|| format!("Failed to run git {}", args.join(" ")))?;
        if !output.status.success() {
            bail!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Like [`Self::run`], but a successful command returns stdout and
    /// stderr combined. Push, pull, and checkout narrate on stderr.
    fn run_merged(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .output()
            .with_context(|| format!("Failed to run git {}", args.join(" ")))?;
        if !output.status.success() {
            bail!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        let mut transcript = String::from_utf8_lossy(&output.stdout).into_owned();
        transcript.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(transcript)
    }

    // -- Status --

    pub fn status(&self) -> Result<RepoStatus> {
        let output = self.run(&["status", "--porcelain", "--branch"])?;
        Ok(parse_status(&output))
    }

    // -- Staging --

    pub fn stage_all(&self) -> Result<()> {
        self.run(&["add", "."]).map(|_| ())
    }

    pub fn stage_file(&self, path: &str) -> Result<()> {
        self.run(&["add", "--", path]).map(|_| ())
    }

    pub fn unstage_all(&self) -> Result<()> {
        self.run(&["reset"]).map(|_| ())
    }

    pub fn unstage_file(&self, path: &str) -> Result<()> {
        self.run(&["reset", "--", path]).map(|_| ())
    }

    // -- Committing and syncing --

    pub fn commit(&self, message: &str) -> Result<String> {
        self.run_merged(&["commit", "-m", message])
    }

    pub fn push(&self) -> Result<String> {
        self.run_merged(&["push"])
    }

    /// First push of a new branch; wires up origin tracking.
    pub fn push_set_upstream(&self, branch: &str) -> Result<String> {
        self.run_merged(&["push", "--set-upstream", "origin", branch])
    }

    pub fn pull(&self) -> Result<String> {
        self.run_merged(&["pull"])
    }

    // -- Branches --

    pub fn local_branches(&self) -> Result<Vec<Branch>> {
        let output = self.run(&["branch"])?;
        Ok(parse_branches(&output))
    }

    pub fn checkout(&self, name: &str) -> Result<String> {
        self.run_merged(&["checkout", name])
    }

    pub fn create_branch(&self, name: &str) -> Result<String> {
        self.run_merged(&["checkout", "-b", name])
    }

    /// Delete a fully merged branch. `-d` on purpose: deleting unmerged work
    /// should require leaving the menu for the real command line.
    pub fn delete_branch(&self, name: &str) -> Result<String> {
        self.run_merged(&["branch", "-d", name])
    }

    // -- History --

    pub fn log(&self, max: usize) -> Result<Vec<Commit>> {
        let format = format!("--format={LOG_FORMAT}");
        let count = max.to_string();
        let output = self.run(&["log", &format, "-n", &count])?;
        Ok(parse_log(&output))
    }

    pub fn graph(&self) -> Result<String> {
        self.run(&["log", "--graph", "--oneline", "--all"])
    }

    // -- Remotes --

    pub fn remotes(&self) -> Result<Vec<Remote>> {
        let output = self.run(&["remote", "-v"])?;
        Ok(parse_remotes(&output))
    }

    pub fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        self.run(&["remote", "add", name, url]).map(|_| ())
    }

    // -- Stashes --

    pub fn stash_list(&self) -> Result<Vec<StashEntry>> {
        let output = self.run(&["stash", "list"])?;
        parse_stash_list(&output)
    }

    pub fn stash_save(&self, message: Option<&str>) -> Result<String> {
        match message {
            Some(message) => self.run_merged(&["stash", "push", "-m", message]),
            None => self.run_merged(&["stash", "push"]),
        }
    }

    pub fn stash_apply(&self, entry: &StashEntry) -> Result<String> {
        self.run_merged(&["stash", "apply", &entry.reference()])
    }

    pub fn stash_pop(&self, entry: &StashEntry) -> Result<String> {
        self.run_merged(&["stash", "pop", &entry.reference()])
    }

    pub fn stash_drop(&self, entry: &StashEntry) -> Result<String> {
        self.run_merged(&["stash", "drop", &entry.reference()])
    }

    // -- Undo --

    /// Throw away every uncommitted change to tracked files.
    pub fn discard_all(&self) -> Result<String> {
        self.run_merged(&["reset", "--hard"])
    }

    pub fn restore_file(&self, path: &str) -> Result<()> {
        self.run(&["restore", "--", path]).map(|_| ())
    }

    /// Drop one file's changes from both the index and the worktree.
    pub fn restore_staged_file(&self, path: &str) -> Result<()> {
        self.run(&["restore", "--staged", "--worktree", "--", path])
            .map(|_| ())
    }
}

/// Decode `git branch` output. The current branch is marked `* `, branches
/// checked out in other worktrees `+ `; a detached HEAD line is dropped.
fn parse_branches(output: &str) -> Vec<Branch> {
    output
        .lines()
        .filter_map(|line| {
            let (is_current, name) = match line.strip_prefix("* ") {
                Some(rest) => (true, rest),
                None => (false, line.strip_prefix("+ ").unwrap_or(line).trim_start()),
            };
            if name.is_empty() || name.starts_with('(') {
                return None;
            }
            Some(Branch {
                name: name.to_string(),
                is_current,
            })
        })
        .collect()
}

/// Decode `git remote -v`, keeping one entry per remote (the fetch line).
fn parse_remotes(output: &str) -> Vec<Remote> {
    output
        .lines()
        .filter_map(|line| {
            let line = line.strip_suffix(" (fetch)")?;
            let (name, url) = line.split_once('\t')?;
            Some(Remote {
                name: name.to_string(),
                url: url.trim().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_branches_marks_the_current_one() {
        let output = "  dev\n* main\n  release/1.0\n";
        let branches = parse_branches(output);
        assert_eq!(branches.len(), 3);
        assert_eq!(branches[0], Branch { name: "dev".into(), is_current: false });
        assert_eq!(branches[1], Branch { name: "main".into(), is_current: true });
        assert!(!branches[2].is_current);
    }

    #[test]
    fn test_parse_branches_skips_detached_head_line() {
        let output = "* (HEAD detached at 1a2b3c4)\n  main\n";
        let branches = parse_branches(output);
        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0].name, "main");
    }

    #[test]
    fn test_parse_branches_keeps_other_worktree_branches() {
        let branches = parse_branches("+ linked\n* main\n");
        assert_eq!(branches[0], Branch { name: "linked".into(), is_current: false });
    }

    #[test]
    fn test_parse_remotes_dedupes_fetch_and_push_lines() {
        let output = "origin\thttps://example.com/repo.git (fetch)\n\
                      origin\thttps://example.com/repo.git (push)\n\
                      fork\tgit@example.com:me/repo.git (fetch)\n\
                      fork\tgit@example.com:me/repo.git (push)\n";
        let remotes = parse_remotes(output);
        assert_eq!(remotes.len(), 2);
        assert_eq!(remotes[0], Remote { name: "origin".into(), url: "https://example.com/repo.git".into() });
        assert_eq!(remotes[1].name, "fork");
    }

    #[test]
    fn test_parse_remotes_of_empty_output() {
        assert!(parse_remotes("").is_empty());
    }
}
