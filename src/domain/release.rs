use chrono::{DateTime, Utc};
use git2::Oid;
use serde::{Deserialize, Serialize};

use crate::domain::commit::{short_sha, Commit};

pub const INITIAL_RELEASE_LABEL: &str = "Initial Release";
pub const UNRELEASED_LABEL: &str = "Unreleased";

/// Where a release group's boundary came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseKind {
    /// Commits introduced by a tag since its predecessor
    Tagged { name: String },
    /// Commits on head past the newest tag
    Unreleased,
    /// Entire history when no tags exist
    Initial,
}

/// How release labels are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelStyle {
    /// The tag name as-is; "Unreleased" for head
    #[default]
    TagName,
    /// `{branch}-{YYYYMMDD}-{shortsha}` built from the boundary commit
    BranchDateSha,
}

/// A labeled, dated group of commits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseGroup {
    pub kind: ReleaseKind,
    pub label: String,
    pub date: DateTime<Utc>,
    /// Boundary commit (tag target or head); none for the initial release
    pub target: Option<Oid>,
    pub commits: Vec<Commit>,
}

impl ReleaseGroup {
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// Renders release labels for one changelog run
#[derive(Debug, Clone)]
pub struct LabelFormatter {
    pub style: LabelStyle,
    /// Prefix for `BranchDateSha` labels; the tag name is used when absent
    pub branch: Option<String>,
    pub short_sha_length: usize,
}

impl LabelFormatter {
    pub fn new(style: LabelStyle, branch: Option<String>, short_sha_length: usize) -> Self {
        LabelFormatter {
            style,
            branch,
            short_sha_length,
        }
    }

    /// Label for a group bounded by `target` committed at `committed`.
    pub fn label(&self, kind: &ReleaseKind, target: Oid, committed: DateTime<Utc>) -> String {
        match (self.style, kind) {
            (_, ReleaseKind::Initial) => INITIAL_RELEASE_LABEL.to_string(),
            (LabelStyle::TagName, ReleaseKind::Tagged { name }) => name.clone(),
            (LabelStyle::TagName, ReleaseKind::Unreleased) => UNRELEASED_LABEL.to_string(),
            (LabelStyle::BranchDateSha, ReleaseKind::Tagged { name }) => {
                self.branch_date_sha(self.branch.as_deref().unwrap_or(name), target, committed)
            }
            (LabelStyle::BranchDateSha, ReleaseKind::Unreleased) => self.branch_date_sha(
                self.branch.as_deref().unwrap_or(UNRELEASED_LABEL),
                target,
                committed,
            ),
        }
    }

    fn branch_date_sha(&self, branch: &str, target: Oid, committed: DateTime<Utc>) -> String {
        format!(
            "{}-{}-{}",
            branch,
            committed.format("%Y%m%d"),
            short_sha(target, self.short_sha_length)
        )
    }
}
