//! Release partitioning
//!
//! Splits a repository's non-merge history into release groups bounded by
//! tags. Groups come out newest first and never overlap: each commit lands
//! in the group of the first tag (walking forward in time) that can reach it.

use chrono::{DateTime, Utc};
use git2::Oid;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::boundary::BoundaryWarning;
use crate::domain::{
    Commit, LabelFormatter, LabelStyle, ReleaseGroup, ReleaseKind, Tag, TagFilter,
};
use crate::error::{ChangelogError, Result};
use crate::git::RepositoryView;

/// Which timestamp a tagged or unreleased group is dated with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateSource {
    /// Commit time of the boundary commit (tag target or head)
    #[default]
    TagCommit,
    /// Time the changelog is generated
    Generated,
}

/// Knobs that shape the partition
#[derive(Debug, Clone)]
pub struct PartitionOptions {
    pub filter: TagFilter,
    pub label_style: LabelStyle,
    pub short_sha_length: usize,
    pub date_source: DateSource,
    pub include_unreleased: bool,
    pub include_oldest_tag_history: bool,
}

impl Default for PartitionOptions {
    fn default() -> Self {
        PartitionOptions {
            filter: TagFilter::default(),
            label_style: LabelStyle::TagName,
            short_sha_length: 7,
            date_source: DateSource::TagCommit,
            include_unreleased: true,
            include_oldest_tag_history: false,
        }
    }
}

/// Groups plus the non-fatal conditions met while building them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub groups: Vec<ReleaseGroup>,
    pub warnings: Vec<BoundaryWarning>,
}

impl Partition {
    /// Total number of commits across all groups
    pub fn commit_count(&self) -> usize {
        self.groups.iter().map(ReleaseGroup::len).sum()
    }
}

/// Partitions history into release groups
pub struct ReleasePartitioner {
    options: PartitionOptions,
    labels: LabelFormatter,
}

impl ReleasePartitioner {
    pub fn new(options: PartitionOptions) -> Self {
        let labels = LabelFormatter::new(
            options.label_style,
            options.filter.branch().map(str::to_string),
            options.short_sha_length,
        );
        ReleasePartitioner { options, labels }
    }

    /// Filtered tags, newest first by target commit time
    ///
    /// Tags on different commits that share a commit time are ordered by
    /// ancestry so a descendant always precedes the tags it contains. Name
    /// order only decides between tags on the same or unrelated commits.
    pub fn release_tags<R: RepositoryView + ?Sized>(
        &self,
        repo: &R,
        tags: Vec<Tag>,
    ) -> Result<Vec<Tag>> {
        let mut tags: Vec<Tag> = tags
            .into_iter()
            .filter(|tag| self.options.filter.matches(&tag.name))
            .collect();
        tags.sort_by(Tag::newest_first);

        let mut ordered = Vec::with_capacity(tags.len());
        let mut rest = tags.into_iter().peekable();
        while let Some(first) = rest.next() {
            let mut run = vec![first];
            while let Some(next) = rest.next_if(|t| t.timestamp == run[0].timestamp) {
                run.push(next);
            }
            if run.len() > 1 {
                run = order_by_ancestry(repo, run)?;
            }
            ordered.extend(run);
        }

        Ok(ordered)
    }

    /// Build the release groups for `repo`.
    ///
    /// `generated_at` dates the initial release (and every group under
    /// [DateSource::Generated]); passing it in keeps runs reproducible.
    pub fn partition<R: RepositoryView + ?Sized>(
        &self,
        repo: &R,
        generated_at: DateTime<Utc>,
    ) -> Result<Partition> {
        let all_tags = repo.tags()?;
        let total_tags = all_tags.len();
        let tags = self.release_tags(repo, all_tags)?;
        let head = repo.head_commit()?;
        let mut warnings = Vec::new();

        debug!(
            total = total_tags,
            selected = tags.len(),
            head = %head.id,
            "selected release tags"
        );

        let newest = match tags.first() {
            Some(newest) => newest,
            None => {
                if total_tags > 0 {
                    let warning = BoundaryWarning::NoMatchingTags {
                        filter: self.options.filter.describe(),
                        total: total_tags,
                    };
                    warn!("{}", warning);
                    warnings.push(warning);
                }

                let group = self.initial_release(repo, head.id, generated_at)?;
                return Ok(Partition {
                    groups: vec![group],
                    warnings,
                });
            }
        };

        let mut groups = Vec::with_capacity(tags.len() + 1);

        if self.options.include_unreleased {
            if head.id == newest.target {
                warnings.push(BoundaryWarning::HeadAtLatestTag {
                    tag: newest.name.clone(),
                    current_commit_hash: head.id.to_string(),
                });
            } else {
                let commits = repo.commits_between(Some(newest.target), head.id)?;
                if !commits.is_empty() {
                    let kind = ReleaseKind::Unreleased;
                    groups.push(ReleaseGroup {
                        label: self.labels.label(&kind, head.id, head.timestamp),
                        kind,
                        date: self.date_for(head.timestamp, generated_at),
                        target: Some(head.id),
                        commits,
                    });
                }
            }
        }

        for pair in tags.windows(2) {
            let (newer, older) = (&pair[0], &pair[1]);
            let commits = repo.commits_between(Some(older.target), newer.target)?;

            if commits.is_empty() {
                let warning = BoundaryWarning::EmptyRelease {
                    tag: newer.name.clone(),
                    previous: older.name.clone(),
                };
                debug!("{}", warning);
                warnings.push(warning);
                continue;
            }

            groups.push(self.tagged_release(newer, commits, generated_at));
        }

        // nothing precedes the oldest tag, so its ancestry is the initial release
        if self.options.include_oldest_tag_history {
            if let Some(oldest) = tags.last() {
                let commits = repo.commits_between(None, oldest.target)?;
                if !commits.is_empty() {
                    let kind = ReleaseKind::Initial;
                    groups.push(ReleaseGroup {
                        label: self.labels.label(&kind, oldest.target, oldest.timestamp),
                        kind,
                        date: self.date_for(oldest.timestamp, generated_at),
                        target: Some(oldest.target),
                        commits,
                    });
                }
            }
        }

        let partition = Partition { groups, warnings };
        info!(
            releases = partition.groups.len(),
            commits = partition.commit_count(),
            "partitioned history"
        );

        Ok(partition)
    }

    fn initial_release<R: RepositoryView + ?Sized>(
        &self,
        repo: &R,
        head: Oid,
        generated_at: DateTime<Utc>,
    ) -> Result<ReleaseGroup> {
        let roots = repo.root_commits()?;
        if roots.is_empty() {
            return Err(ChangelogError::repository(
                "Cannot determine the root commit of the history",
            ));
        }
        debug!(roots = roots.len(), "building initial release");

        let kind = ReleaseKind::Initial;
        Ok(ReleaseGroup {
            label: self.labels.label(&kind, head, generated_at),
            kind,
            date: generated_at,
            target: None,
            commits: repo.commits_between(None, head)?,
        })
    }

    fn tagged_release(
        &self,
        tag: &Tag,
        commits: Vec<Commit>,
        generated_at: DateTime<Utc>,
    ) -> ReleaseGroup {
        let kind = ReleaseKind::Tagged {
            name: tag.name.clone(),
        };
        ReleaseGroup {
            label: self.labels.label(&kind, tag.target, tag.timestamp),
            kind,
            date: self.date_for(tag.timestamp, generated_at),
            target: Some(tag.target),
            commits,
        }
    }

    fn date_for(&self, committed: DateTime<Utc>, generated_at: DateTime<Utc>) -> DateTime<Utc> {
        match self.options.date_source {
            DateSource::TagCommit => committed,
            DateSource::Generated => generated_at,
        }
    }
}

/// Reorder tags sharing a commit time so descendants come first.
///
/// `tags` arrive in name order; each round takes the first tag that no
/// other remaining tag descends from.
fn order_by_ancestry<R: RepositoryView + ?Sized>(repo: &R, tags: Vec<Tag>) -> Result<Vec<Tag>> {
    let mut remaining = tags;
    let mut ordered = Vec::with_capacity(remaining.len());

    while !remaining.is_empty() {
        let mut pick = 0;
        for (i, candidate) in remaining.iter().enumerate() {
            let mut contained = false;
            for other in &remaining {
                if descends_from(repo, other, candidate)? {
                    contained = true;
                    break;
                }
            }
            if !contained {
                pick = i;
                break;
            }
        }
        ordered.push(remaining.remove(pick));
    }

    Ok(ordered)
}

/// Whether `later` sits on a different commit that can reach `earlier`
fn descends_from<R: RepositoryView + ?Sized>(repo: &R, later: &Tag, earlier: &Tag) -> Result<bool> {
    if later.target == earlier.target {
        return Ok(false);
    }
    Ok(repo
        .commits_between(Some(later.target), earlier.target)?
        .is_empty())
}
