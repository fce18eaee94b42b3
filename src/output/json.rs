use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::domain::{Commit, ReleaseGroup};
use crate::error::Result;
use crate::output::RenderOptions;

#[derive(Serialize)]
struct ReleaseEntry<'a> {
    tag: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_sha: Option<String>,
    date: String,
    commits: Vec<CommitEntry<'a>>,
}

#[derive(Serialize)]
struct CommitEntry<'a> {
    sha: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_sha: Option<String>,
    message: &'a str,
    author: &'a str,
    date: String,
}

/// RFC 3339 in UTC with an explicit `+00:00` offset
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, false)
}

fn commit_entry<'a>(commit: &'a Commit, options: &RenderOptions) -> CommitEntry<'a> {
    CommitEntry {
        sha: commit.short_id(options.short_sha_length),
        full_sha: options.include_full_sha.then(|| commit.full_id()),
        message: commit.message.trim(),
        author: &commit.author,
        date: format_date(&commit.timestamp),
    }
}

fn release_entry<'a>(group: &'a ReleaseGroup, options: &RenderOptions) -> ReleaseEntry<'a> {
    ReleaseEntry {
        tag: &group.label,
        full_sha: if options.include_full_sha {
            group.target.map(|oid| oid.to_string())
        } else {
            None
        },
        date: format_date(&group.date),
        commits: group
            .commits
            .iter()
            .map(|commit| commit_entry(commit, options))
            .collect(),
    }
}

/// Render release groups as a pretty-printed JSON array
pub fn render(groups: &[ReleaseGroup], options: &RenderOptions) -> Result<String> {
    let entries: Vec<ReleaseEntry<'_>> = groups
        .iter()
        .map(|group| release_entry(group, options))
        .collect();

    let indent = " ".repeat(options.json_indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    entries.serialize(&mut serializer)?;

    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
