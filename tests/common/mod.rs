// Shared helpers for tests that need a real on-disk repository
#![allow(dead_code)]

use git2::{Oid, Repository, Signature, Time};
use tempfile::TempDir;

/// Base commit time: 2024-01-01T00:00:00Z
pub const BASE_TIME: i64 = 1_704_067_200;

/// A throwaway git repository with a deterministic clock
pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
    clock: i64,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(dir.path()).expect("Could not init git repo");

        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        TestRepo {
            dir,
            repo,
            clock: BASE_TIME,
        }
    }

    fn signature(&mut self) -> Signature<'static> {
        self.clock += 3600;
        Signature::new("Test User", "test@example.com", &Time::new(self.clock, 0))
            .expect("Could not build signature")
    }

    fn write_commit(&mut self, update_ref: Option<&str>, message: &str, parents: &[Oid]) -> Oid {
        let sig = self.signature();
        let blob = self
            .repo
            .blob(format!("{}\n{}\n", message, self.clock).as_bytes())
            .expect("Could not write blob");
        let mut builder = self.repo.treebuilder(None).expect("Could not get treebuilder");
        builder
            .insert("CHANGES.txt", blob, 0o100644)
            .expect("Could not insert blob");
        let tree_id = builder.write().expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");

        let parents: Vec<_> = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid).expect("Could not find parent"))
            .collect();
        let parent_refs: Vec<_> = parents.iter().collect();

        self.repo
            .commit(update_ref, &sig, &sig, message, &tree, &parent_refs)
            .expect("Could not create commit")
    }

    /// Commit on top of HEAD (or as the root commit on an unborn branch)
    pub fn commit(&mut self, message: &str) -> Oid {
        let parents: Vec<Oid> = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.target())
            .into_iter()
            .collect();
        self.write_commit(Some("HEAD"), message, &parents)
    }

    /// Commit on top of `parent` without moving HEAD
    pub fn side_commit(&mut self, message: &str, parent: Oid) -> Oid {
        self.write_commit(None, message, &[parent])
    }

    /// Merge `other` into HEAD with a two-parent commit
    pub fn merge(&mut self, message: &str, other: Oid) -> Oid {
        let head = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.target())
            .expect("HEAD must point at a commit to merge");
        self.write_commit(Some("HEAD"), message, &[head, other])
    }

    pub fn tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).expect("Could not find object");
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Could not create tag");
    }

    pub fn annotated_tag(&mut self, name: &str, oid: Oid) {
        let sig = self.signature();
        let object = self.repo.find_object(oid, None).expect("Could not find object");
        self.repo
            .tag(name, &object, &sig, &format!("Release {}", name), false)
            .expect("Could not create annotated tag");
    }

    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }
}
