//! Commit history parsing. Log lines are requested in a unit-separator
//! delimited format so subjects with any printable characters survive.

use chrono::{DateTime, Local, TimeZone, Utc};

/// `--format` argument matching [`parse_log`]: hash, author name, author
/// email, author timestamp, subject, separated by `\x1f`.
pub const LOG_FORMAT: &str = "%H%x1f%an%x1f%ae%x1f%at%x1f%s";

/// One commit from `git log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: String,
    pub author: String,
    pub email: String,
    pub date: DateTime<Utc>,
    pub subject: String,
}

impl Commit {
    /// The abbreviated hash shown in listings. Hashes too short to abbreviate
    /// (or not sliceable at byte seven) are shown whole.
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }

    /// Commit time in the local timezone, minute precision.
    pub fn local_date(&self) -> String {
        self.date
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    }

    /// One-line display form for history listings.
    pub fn summary(&self) -> String {
        format!(
            "{} {} {} ({})",
            self.short_hash(),
            self.local_date(),
            self.subject,
            self.author
        )
    }
}

/// Parse output produced with [`LOG_FORMAT`]; malformed lines are dropped.
pub fn parse_log(output: &str) -> Vec<Commit> {
    output.lines().filter_map(parse_commit_line).collect()
}

fn parse_commit_line(line: &str) -> Option<Commit> {
    let parts: Vec<&str> = line.split('\u{1f}').collect();
    let [hash, author, email, timestamp, subject] = parts[..] else {
        return None;
    };
    if hash.is_empty() {
        return None;
    }
    let seconds = timestamp.parse::<i64>().ok()?;
    let date = Utc.timestamp_opt(seconds, 0).single()?;
    Some(Commit {
        hash: hash.to_string(),
        author: author.to_string(),
        email: email.to_string(),
        date,
        subject: subject.to_string(),
    })
}
