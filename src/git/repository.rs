use crate::domain::commit::utc_from_seconds;
use crate::domain::{Commit, Tag};
use crate::error::{ChangelogError, Result};
use git2::{Oid, Repository as Git2Repo, Sort};
use std::path::Path;
use tracing::{debug, trace, warn};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            ChangelogError::repository(format!(
                "Cannot open repository at '{}': {}",
                path.display(),
                e.message()
            ))
        })?;
        debug!(path = %repo.path().display(), "opened repository");

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn head_oid(&self) -> Result<Oid> {
        let head = self
            .repo
            .head()
            .map_err(|e| ChangelogError::repository(format!("Cannot resolve HEAD: {}", e.message())))?;
        let commit = head.peel_to_commit().map_err(|e| {
            ChangelogError::repository(format!("HEAD does not point at a commit: {}", e.message()))
        })?;

        Ok(commit.id())
    }

    fn to_commit(commit: &git2::Commit<'_>) -> Commit {
        Commit {
            id: commit.id(),
            message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
            author: commit.author().name().unwrap_or("unknown").to_string(),
            timestamp: utc_from_seconds(commit.time().seconds()),
            parent_count: commit.parent_count(),
        }
    }
}

impl super::RepositoryView for Git2Repository {
    fn tags(&self) -> Result<Vec<Tag>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::with_capacity(names.len());

        for (name, bytes) in names.iter().zip(names.iter_bytes()) {
            let Some(name) = name else {
                warn!(
                    tag = %String::from_utf8_lossy(bytes),
                    "skipping tag with a non UTF-8 name"
                );
                continue;
            };
            let reference = self
                .repo
                .find_reference(&format!("refs/tags/{}", name))
                .map_err(|e| {
                    ChangelogError::repository(format!("Cannot find tag '{}': {}", name, e.message()))
                })?;

            // Peel through annotated tags to the commit they mark
            let commit = reference.peel_to_commit().map_err(|e| {
                ChangelogError::repository(format!(
                    "Tag '{}' does not resolve to a commit: {}",
                    name,
                    e.message()
                ))
            })?;

            trace!(tag = name, target = %commit.id(), "resolved tag");
            tags.push(Tag::new(
                name,
                commit.id(),
                utc_from_seconds(commit.time().seconds()),
            ));
        }

        Ok(tags)
    }

    fn head_commit(&self) -> Result<Commit> {
        let oid = self.head_oid()?;
        let commit = self.repo.find_commit(oid)?;

        Ok(Self::to_commit(&commit))
    }

    fn root_commits(&self) -> Result<Vec<Oid>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(self.head_oid()?)?;

        let mut roots = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            if self.repo.find_commit(oid)?.parent_count() == 0 {
                roots.push(oid);
            }
        }

        Ok(roots)
    }

    fn commits_between(&self, ancestor: Option<Oid>, descendant: Oid) -> Result<Vec<Commit>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;

        revwalk.push(descendant).map_err(|e| {
            ChangelogError::repository(format!("Cannot walk from {}: {}", descendant, e.message()))
        })?;
        if let Some(ancestor) = ancestor {
            revwalk.hide(ancestor).map_err(|e| {
                ChangelogError::repository(format!("Cannot exclude {}: {}", ancestor, e.message()))
            })?;
        }

        let mut commits = Vec::new();

        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;

            if commit.parent_count() > 1 {
                continue;
            }

            commits.push(Self::to_commit(&commit));
        }

        debug!(
            ancestor = ?ancestor.map(|oid| oid.to_string()),
            descendant = %descendant,
            count = commits.len(),
            "walked commit range"
        );

        Ok(commits)
    }
}
