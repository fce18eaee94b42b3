use crate::domain::commit::utc_from_seconds;
use crate::domain::{Commit, Tag};
use crate::error::{ChangelogError, Result};
use crate::git::RepositoryView;
use git2::Oid;
use std::collections::{HashMap, HashSet};

struct MockCommit {
    commit: Commit,
    parents: Vec<Oid>,
}

/// In-memory commit graph for testing without an on-disk repository
///
/// Commits get sequential ids and a commit time equal to their creation
/// order unless an explicit time is given.
pub struct MockRepository {
    commits: HashMap<Oid, MockCommit>,
    tags: Vec<(String, Oid)>,
    head: Option<Oid>,
    next_id: u32,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: HashMap::new(),
            tags: Vec::new(),
            head: None,
            next_id: 0,
        }
    }

    /// Add a commit on top of `parents` and move head to it
    pub fn commit(&mut self, message: &str, parents: &[Oid]) -> Oid {
        let time = i64::from(self.next_id + 1) * 60;
        self.commit_at(message, parents, time)
    }

    /// Add a commit with an explicit commit time (seconds since epoch)
    pub fn commit_at(&mut self, message: &str, parents: &[Oid], seconds: i64) -> Oid {
        self.next_id += 1;
        // scrambled prefix so abbreviated ids differ, counter suffix keeps them unique
        let mut bytes = [0u8; 20];
        bytes[..4].copy_from_slice(&self.next_id.wrapping_mul(0x9E37_79B9).to_be_bytes());
        bytes[16..].copy_from_slice(&self.next_id.to_be_bytes());
        // from_bytes only fails on a wrong length
        let oid = Oid::from_bytes(&bytes).unwrap_or_else(|_| Oid::zero());

        let commit = Commit::new(
            oid,
            message,
            "Mock Author",
            utc_from_seconds(seconds),
            parents.len(),
        );
        self.commits.insert(
            oid,
            MockCommit {
                commit,
                parents: parents.to_vec(),
            },
        );
        self.head = Some(oid);
        oid
    }

    /// Add `count` linear commits on top of `parent`, returning the last one
    pub fn linear(&mut self, prefix: &str, parent: Option<Oid>, count: usize) -> Option<Oid> {
        let mut tip = parent;
        for i in 0..count {
            let parents: Vec<Oid> = tip.into_iter().collect();
            tip = Some(self.commit(&format!("{} {}", prefix, i + 1), &parents));
        }
        tip
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.push((name.into(), oid));
    }

    /// Point head at an OID
    pub fn set_head(&mut self, oid: Oid) {
        self.head = Some(oid);
    }

    fn lookup(&self, oid: Oid) -> Result<&MockCommit> {
        self.commits
            .get(&oid)
            .ok_or_else(|| ChangelogError::repository(format!("Unknown commit: {}", oid)))
    }

    fn reachable(&self, from: Oid) -> Result<HashSet<Oid>> {
        let mut seen = HashSet::new();
        let mut stack = vec![from];

        while let Some(oid) = stack.pop() {
            if seen.insert(oid) {
                stack.extend(self.lookup(oid)?.parents.iter().copied());
            }
        }

        Ok(seen)
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryView for MockRepository {
    fn tags(&self) -> Result<Vec<Tag>> {
        self.tags
            .iter()
            .map(|(name, oid)| {
                let commit = &self.lookup(*oid)?.commit;
                Ok(Tag::new(name.clone(), *oid, commit.timestamp))
            })
            .collect()
    }

    fn head_commit(&self) -> Result<Commit> {
        let head = self
            .head
            .ok_or_else(|| ChangelogError::repository("HEAD is unborn"))?;
        Ok(self.lookup(head)?.commit.clone())
    }

    fn root_commits(&self) -> Result<Vec<Oid>> {
        let head = self.head_commit()?.id;
        let mut roots: Vec<Oid> = self
            .reachable(head)?
            .into_iter()
            .filter(|oid| self.commits[oid].parents.is_empty())
            .collect();
        roots.sort();
        Ok(roots)
    }

    fn commits_between(&self, ancestor: Option<Oid>, descendant: Oid) -> Result<Vec<Commit>> {
        let mut included = self.reachable(descendant)?;
        if let Some(ancestor) = ancestor {
            for oid in self.reachable(ancestor)? {
                included.remove(&oid);
            }
        }

        let mut commits: Vec<Commit> = included
            .into_iter()
            .map(|oid| self.commits[&oid].commit.clone())
            .filter(|commit| !commit.is_merge())
            .collect();
        commits.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id)));

        Ok(commits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_linear_history() {
        let mut repo = MockRepository::new();
        let tip = repo.linear("commit", None, 3).unwrap();

        assert_eq!(repo.head_commit().unwrap().id, tip);
        let commits = repo.commits_between(None, tip).unwrap();
        let messages: Vec<_> = commits.iter().map(|c| c.message.as_str()).collect();
        assert_eq!(messages, vec!["commit 3", "commit 2", "commit 1"]);
    }

    #[test]
    fn test_mock_repository_range_excludes_ancestor_history() {
        let mut repo = MockRepository::new();
        let base = repo.linear("base", None, 2).unwrap();
        let tip = repo.linear("next", Some(base), 2).unwrap();

        let commits = repo.commits_between(Some(base), tip).unwrap();
        assert_eq!(commits.len(), 2);
        assert!(commits.iter().all(|c| c.message.starts_with("next")));
    }

    #[test]
    fn test_mock_repository_skips_merges() {
        let mut repo = MockRepository::new();
        let root = repo.commit("root", &[]);
        let left = repo.commit("left", &[root]);
        let right = repo.commit("right", &[root]);
        let merge = repo.commit("merge", &[left, right]);

        let commits = repo.commits_between(Some(root), merge).unwrap();
        let messages: Vec<_> = commits.iter().map(|c| c.message.as_str()).collect();
        assert_eq!(messages, vec!["right", "left"]);
    }

    #[test]
    fn test_mock_repository_roots() {
        let mut repo = MockRepository::new();
        let first = repo.commit("first root", &[]);
        let second = repo.commit("second root", &[]);
        let merge = repo.commit("join", &[first, second]);
        repo.set_head(merge);

        let mut expected = vec![first, second];
        expected.sort();
        assert_eq!(repo.root_commits().unwrap(), expected);
    }

    #[test]
    fn test_mock_repository_tags() {
        let mut repo = MockRepository::new();
        let oid = repo.commit_at("tagged", &[], 1_000);
        repo.add_tag("v1.0.0", oid);

        let tags = repo.tags().unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].target, oid);
        assert_eq!(tags[0].timestamp.timestamp(), 1_000);
    }

    #[test]
    fn test_mock_repository_unknown_tag_target() {
        let mut repo = MockRepository::new();
        repo.add_tag("dangling", Oid::from_bytes(&[9; 20]).unwrap());
        assert!(matches!(
            repo.tags(),
            Err(ChangelogError::RepositoryAccess(_))
        ));
    }

    #[test]
    fn test_mock_repository_default_is_unborn() {
        let repo = MockRepository::default();
        assert!(repo.head_commit().is_err());
        assert!(repo.tags().unwrap().is_empty());
    }
}
