//! # Git Module
//!
//! This module provides the repository operations behind the menu: running
//! the `git` executable and parsing its output into typed results.
//!
//! ## Operations
//!
//! | Menu area | Commands | Parser |
//! |-----------|----------|--------|
//! | Status header | `status --porcelain --branch` | [`status::parse_status`] |
//! | Stage / unstage | `add`, `reset` | - |
//! | Commit / sync | `commit`, `push`, `pull` | - |
//! | Branches | `branch`, `checkout` | [`client::GitClient::local_branches`] |
//! | History | `log`, `log --graph` | [`log::parse_log`] |
//! | Remotes | `remote -v`, `remote add` | [`client::GitClient::remotes`] |
//! | Stashes | `stash list/push/apply/pop/drop` | [`stash::parse_stash_list`] |
//! | Undo | `restore`, `reset --hard` | - |

pub mod client;
pub mod log;
pub mod stash;
pub mod status;

pub use client::{git_available, Branch, GitClient, Remote};
pub use log::Commit;
pub use stash::StashEntry;
pub use status::{ChangedFile, RepoStatus};
