use std::fmt;

/// Non-fatal conditions found while partitioning history into releases.
/// These are reported to the user but never stop the changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryWarning {
    /// Tags exist but none passed the filter
    NoMatchingTags { filter: String, total: usize },
    /// Two adjacent tags with no new non-merge commits between them
    EmptyRelease { tag: String, previous: String },
    /// Head sits exactly on the newest tag, nothing is unreleased
    HeadAtLatestTag {
        tag: String,
        current_commit_hash: String,
    },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoMatchingTags { filter, total } => {
                write!(
                    f,
                    "None of the {} tags match {}; using a single initial release",
                    total, filter
                )
            }
            BoundaryWarning::EmptyRelease { tag, previous } => {
                write!(
                    f,
                    "Tag '{}' adds no commits since '{}'; skipping it",
                    tag, previous
                )
            }
            BoundaryWarning::HeadAtLatestTag {
                tag,
                current_commit_hash,
            } => {
                let short_hash = if current_commit_hash.len() > 7 {
                    &current_commit_hash[..7]
                } else {
                    current_commit_hash.as_str()
                };
                write!(
                    f,
                    "No unreleased commits since tag '{}' (current: {})",
                    tag, short_hash
                )
            }
        }
    }
}
