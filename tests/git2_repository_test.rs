mod common;

use chrono::Utc;
use common::TestRepo;
use git_changelog::domain::ReleaseKind;
use git_changelog::git::{Git2Repository, RepositoryView};
use git_changelog::{ChangelogError, PartitionOptions, ReleasePartitioner};

#[test]
fn test_tags_resolve_lightweight_and_annotated() {
    let mut test_repo = TestRepo::new();
    let first = test_repo.commit("Initial commit");
    test_repo.tag("v1.0.0", first);
    let second = test_repo.commit("feat: add new feature");
    test_repo.annotated_tag("v1.1.0", second);

    let repo = Git2Repository::open(test_repo.path()).unwrap();
    let mut tags = repo.tags().unwrap();
    tags.sort_by(|a, b| a.name.cmp(&b.name));

    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].name, "v1.0.0");
    assert_eq!(tags[0].target, first);
    assert_eq!(tags[1].name, "v1.1.0");
    assert_eq!(tags[1].target, second);

    // annotated tags are dated by the commit they mark, not the tag object
    let second_commit = test_repo.repo.find_commit(second).unwrap();
    assert_eq!(tags[1].timestamp.timestamp(), second_commit.time().seconds());
}

#[test]
fn test_head_and_roots() {
    let mut test_repo = TestRepo::new();
    let root = test_repo.commit("Initial commit");
    let tip = test_repo.commit("second");

    let repo = Git2Repository::open(test_repo.path()).unwrap();
    let head = repo.head_commit().unwrap();
    assert_eq!(head.id, tip);
    assert_eq!(head.author, "Test User");
    assert_eq!(head.parent_count, 1);
    assert_eq!(repo.root_commits().unwrap(), vec![root]);
}

#[test]
fn test_commits_between_skips_merges_newest_first() {
    let mut test_repo = TestRepo::new();
    let base = test_repo.commit("base");
    let main_work = test_repo.commit("main work");
    let side = test_repo.side_commit("side work", base);
    let merge = test_repo.merge("Merge branch 'side'", side);
    let tip = test_repo.commit("after merge");

    let repo = Git2Repository::open(test_repo.path()).unwrap();
    let commits = repo.commits_between(Some(base), tip).unwrap();

    let ids: Vec<_> = commits.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![tip, side, main_work]);
    assert!(!ids.contains(&merge));
}

#[test]
fn test_commits_between_without_ancestor_includes_root() {
    let mut test_repo = TestRepo::new();
    let root = test_repo.commit("root");
    let tip = test_repo.commit("tip");

    let repo = Git2Repository::open(test_repo.path()).unwrap();
    let ids: Vec<_> = repo
        .commits_between(None, tip)
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec![tip, root]);
}

#[test]
fn test_open_discovers_from_subdirectory() {
    let mut test_repo = TestRepo::new();
    test_repo.commit("root");
    let nested = test_repo.path().join("nested").join("dir");
    std::fs::create_dir_all(&nested).unwrap();

    assert!(Git2Repository::open(&nested).is_ok());
}

#[test]
fn test_open_non_repository_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = Git2Repository::open(dir.path()).err().unwrap();
    assert!(matches!(err, ChangelogError::RepositoryAccess(_)));
    assert!(err.to_string().contains("Cannot open repository"));
}

#[test]
fn test_partition_real_repository() {
    let mut test_repo = TestRepo::new();
    test_repo.commit("Initial commit");
    let v1 = test_repo.commit("feat: first release");
    test_repo.tag("master-v1", v1);

    let fix = test_repo.commit("fix: bug");
    let side = test_repo.side_commit("feat: side feature", fix);
    test_repo.merge("Merge branch 'feature'", side);
    let v2 = test_repo.commit("chore: prepare release");
    test_repo.annotated_tag("master-v2", v2);
    test_repo.tag("develop-v2", v2);

    test_repo.commit("feat: unreleased one");
    test_repo.commit("feat: unreleased two");

    let repo = Git2Repository::open(test_repo.path()).unwrap();
    let options = PartitionOptions {
        filter: git_changelog::domain::TagFilter::prefix("master"),
        ..PartitionOptions::default()
    };
    let partition = ReleasePartitioner::new(options)
        .partition(&repo, Utc::now())
        .unwrap();

    let labels: Vec<_> = partition.groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["Unreleased", "master-v2"]);
    assert_eq!(partition.groups[0].kind, ReleaseKind::Unreleased);
    assert_eq!(partition.groups[0].len(), 2);

    let summaries: Vec<_> = partition.groups[1]
        .commits
        .iter()
        .map(|c| c.summary().to_string())
        .collect();
    assert_eq!(
        summaries,
        vec!["chore: prepare release", "feat: side feature", "fix: bug"]
    );
}

#[test]
fn test_partition_untagged_real_repository() {
    let mut test_repo = TestRepo::new();
    test_repo.commit("Initial commit");
    test_repo.commit("second");
    test_repo.commit("third");

    let repo = Git2Repository::open(test_repo.path()).unwrap();
    let partition = ReleasePartitioner::new(PartitionOptions::default())
        .partition(&repo, Utc::now())
        .unwrap();

    assert_eq!(partition.groups.len(), 1);
    assert_eq!(partition.groups[0].label, "Initial Release");
    assert_eq!(partition.groups[0].len(), 3);
}

#[test]
fn test_tag_on_tree_is_repository_error() {
    let mut test_repo = TestRepo::new();
    let head = test_repo.commit("Initial commit");
    let tree = test_repo.repo.find_commit(head).unwrap().tree().unwrap();
    test_repo
        .repo
        .tag_lightweight("tree-tag", tree.as_object(), false)
        .unwrap();

    let repo = Git2Repository::open(test_repo.path()).unwrap();
    let err = repo.tags().unwrap_err();
    assert!(matches!(err, ChangelogError::RepositoryAccess(_)));
    assert!(err.to_string().contains("tree-tag"));
}

#[cfg(unix)]
#[test]
fn test_non_utf8_tag_name_is_skipped() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let mut test_repo = TestRepo::new();
    let head = test_repo.commit("Initial commit");
    test_repo.tag("v1", head);

    // write a loose ref whose name is not valid UTF-8
    let tags_dir = test_repo.path().join(".git").join("refs").join("tags");
    let bad_name = OsStr::from_bytes(b"bad-\xff-tag");
    std::fs::write(tags_dir.join(bad_name), format!("{}\n", head)).unwrap();

    let repo = Git2Repository::open(test_repo.path()).unwrap();
    let tags = repo.tags().unwrap();
    let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["v1"]);
}
