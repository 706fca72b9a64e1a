//! # Status Parsing
//!
//! Turns `git status --porcelain --branch` output into a [`RepoStatus`].
//!
//! ## Format
//!
//! Porcelain v1 with `--branch` prints one header line followed by one entry
//! per changed path:
//!
//! ```text
//! ## main...origin/main [ahead 1]
//! M  src/lib.rs
//!  M README.md
//! ?? notes.txt
//! R  old.rs -> new.rs
//! ```
//!
//! The two status columns are the index (staged) side and the worktree side.
//! Untracked entries show `??`; they count as unstaged, never as staged.

/// One changed path with its two porcelain status columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    pub path: String,
    /// Index (staged) column.
    pub index: char,
    /// Worktree column.
    pub worktree: char,
}

impl ChangedFile {
    /// Whether some of this file's changes sit in the index.
    pub fn is_staged(&self) -> bool {
        !matches!(self.index, ' ' | '?')
    }

    /// Whether some of this file's changes are not yet staged.
    pub fn is_unstaged(&self) -> bool {
        self.worktree != ' '
    }

    /// Display form: the path followed by its status columns.
    pub fn label(&self) -> String {
        format!("{} [{}{}]", self.path, self.index, self.worktree)
    }
}

/// Parsed repository status: branch, upstream, and changed files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoStatus {
    /// Current branch name; `None` on a detached HEAD.
    pub branch: Option<String>,
    /// Upstream the branch tracks, when it tracks one.
    pub upstream: Option<String>,
    pub files: Vec<ChangedFile>,
}

impl RepoStatus {
    pub fn is_clean(&self) -> bool {
        self.files.is_empty()
    }

    pub fn changed_files(&self) -> &[ChangedFile] {
        &self.files
    }

    /// Files with staged changes, for unstage pickers.
    pub fn staged_files(&self) -> Vec<&ChangedFile> {
        self.files.iter().filter(|f| f.is_staged()).collect()
    }

    /// Files with unstaged changes, for stage and discard pickers.
    pub fn unstaged_files(&self) -> Vec<&ChangedFile> {
        self.files.iter().filter(|f| f.is_unstaged()).collect()
    }
}

/// Parse `git status --porcelain --branch` output.
pub fn parse_status(output: &str) -> RepoStatus {
    let mut status = RepoStatus::default();
    for line in output.lines() {
        if let Some(header) = line.strip_prefix("## ") {
            let (branch, upstream) = parse_branch_header(header);
            status.branch = branch;
            status.upstream = upstream;
        } else if let Some(file) = parse_entry(line) {
            status.files.push(file);
        }
    }
    status
}

/// Decode the `## ` header into branch and upstream names.
fn parse_branch_header(header: &str) -> (Option<String>, Option<String>) {
    if let Some(branch) = header.strip_prefix("No commits yet on ") {
        return (Some(branch.to_string()), None);
    }
    if header.starts_with("HEAD (no branch)") {
        return (None, None);
    }
    if let Some((branch, rest)) = header.split_once("...") {
        let upstream = rest.split(" [").next().unwrap_or(rest);
        return (Some(branch.to_string()), Some(upstream.to_string()));
    }
    let branch = header.split(" [").next().unwrap_or(header);
    (Some(branch.to_string()), None)
}

/// Decode one `XY path` entry line; `None` for anything malformed.
fn parse_entry(line: &str) -> Option<ChangedFile> {
    let mut chars = line.chars();
    let index = chars.next()?;
    let worktree = chars.next()?;
    if chars.next()? != ' ' {
        return None;
    }
    // Status columns and separator are ASCII, so the path starts at byte 3;
    // the checked slice rejects lines where that is not a char boundary.
    let raw = line.get(3..)?;
    if raw.is_empty() {
        return None;
    }
    // Renames read `old -> new`; the new path is the one to act on.
    let target = raw.rsplit(" -> ").next().unwrap_or(raw);
    Some(ChangedFile {
        path: unquote(target),
        index,
        worktree,
    })
}

/// Strip the quoting git applies to paths with special characters.
fn unquote(path: &str) -> String {
    match path.strip_prefix('"').and_then(|p| p.strip_suffix('"')) {
        Some(inner) => inner.replace("\\\"", "\"").replace("\\\\", "\\"),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_branch_with_upstream_and_ahead_count() {
        let status = parse_status("## main...origin/main [ahead 1, behind 2]\n");
        assert_eq!(status.branch.as_deref(), Some("main"));
        assert_eq!(status.upstream.as_deref(), Some("origin/main"));
        assert!(status.is_clean());
    }

    #[test]
    fn test_parse_branch_without_upstream() {
        let status = parse_status("## feature/picker\n");
        assert_eq!(status.branch.as_deref(), Some("feature/picker"));
        assert_eq!(status.upstream, None);
    }

    #[test]
    fn test_parse_detached_head() {
        let status = parse_status("## HEAD (no branch)\n?? notes.txt\n");
        assert_eq!(status.branch, None);
        assert_eq!(status.upstream, None);
        assert_eq!(status.files.len(), 1);
    }

    #[test]
    fn test_parse_unborn_branch() {
        let status = parse_status("## No commits yet on main\n");
        assert_eq!(status.branch.as_deref(), Some("main"));
        assert_eq!(status.upstream, None);
    }

    #[test]
    fn test_parse_entries_keep_both_columns() {
        let output = "## main\nM  staged.rs\n M worktree.rs\nMM both.rs\n?? new.txt\n";
        let status = parse_status(output);
        assert_eq!(status.files.len(), 4);
        assert_eq!(status.files[0], ChangedFile { path: "staged.rs".into(), index: 'M', worktree: ' ' });
        assert_eq!(status.files[1], ChangedFile { path: "worktree.rs".into(), index: ' ', worktree: 'M' });
        assert_eq!(status.files[2], ChangedFile { path: "both.rs".into(), index: 'M', worktree: 'M' });
        assert_eq!(status.files[3], ChangedFile { path: "new.txt".into(), index: '?', worktree: '?' });
    }

    #[test]
    fn test_untracked_is_unstaged_but_not_staged() {
        let file = ChangedFile { path: "new.txt".into(), index: '?', worktree: '?' };
        assert!(!file.is_staged());
        assert!(file.is_unstaged());
    }

    #[test]
    fn test_staged_and_unstaged_filters() {
        let output = "## main\nA  added.rs\n M edited.rs\nMM both.rs\n?? new.txt\n";
        let status = parse_status(output);
        let staged: Vec<&str> = status.staged_files().iter().map(|f| f.path.as_str()).collect();
        assert_eq!(staged, vec!["added.rs", "both.rs"]);
        let unstaged: Vec<&str> = status.unstaged_files().iter().map(|f| f.path.as_str()).collect();
        assert_eq!(unstaged, vec!["edited.rs", "both.rs", "new.txt"]);
    }

    #[test]
    fn test_rename_entry_keeps_the_new_path() {
        let status = parse_status("## main\nR  old_name.rs -> new_name.rs\n");
        assert_eq!(status.files[0].path, "new_name.rs");
        assert_eq!(status.files[0].index, 'R');
    }

    #[test]
    fn test_quoted_path_is_unescaped() {
        let status = parse_status("## main\n?? \"with \\\"quotes\\\".txt\"\n");
        assert_eq!(status.files[0].path, "with \"quotes\".txt");
    }

    #[test]
    fn test_label_shows_path_and_columns() {
        let file = ChangedFile { path: "src/lib.rs".into(), index: 'M', worktree: ' ' };
        assert_eq!(file.label(), "src/lib.rs [M ]");
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let status = parse_status("## main\nxx\n\nM\néé x\n");
        assert!(status.files.is_empty());
    }
}
