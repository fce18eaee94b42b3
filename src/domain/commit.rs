use chrono::{DateTime, TimeZone, Utc};
use git2::Oid;

/// A single commit as seen by the changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: Oid,
    pub message: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub parent_count: usize,
}

impl Commit {
    /// Create a new commit record
    pub fn new(
        id: Oid,
        message: impl Into<String>,
        author: impl Into<String>,
        timestamp: DateTime<Utc>,
        parent_count: usize,
    ) -> Self {
        Commit {
            id,
            message: message.into(),
            author: author.into(),
            timestamp,
            parent_count,
        }
    }

    /// Full 40-character hex hash
    pub fn full_id(&self) -> String {
        self.id.to_string()
    }

    /// Abbreviated hash of at most `len` characters
    pub fn short_id(&self, len: usize) -> String {
        short_sha(self.id, len)
    }

    /// First line of the message, trimmed
    pub fn summary(&self) -> &str {
        self.message.trim().lines().next().unwrap_or_default().trim_end()
    }

    /// Merge commits have more than one parent
    pub fn is_merge(&self) -> bool {
        self.parent_count > 1
    }
}

/// Abbreviate an object id to `len` hex characters.
pub fn short_sha(id: Oid, len: usize) -> String {
    let mut hex = id.to_string();
    hex.truncate(len);
    hex
}

/// Convert git's seconds-since-epoch commit time into UTC.
///
/// Out-of-range values collapse to the epoch rather than failing the whole run.
pub fn utc_from_seconds(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
