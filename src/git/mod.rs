//! Git history abstraction layer
//!
//! This module provides a trait-based view over the parts of a repository
//! the changelog needs, allowing for multiple implementations including real
//! Git repositories and synthetic commit graphs for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [RepositoryView] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory commit graph for testing
//!
//! # Usage
//!
//! Code should depend on the [RepositoryView] trait rather than concrete
//! implementations.
//!
//! ```rust
//! # use git_changelog::git::RepositoryView;
//! # fn example<R: RepositoryView>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let head = repo.head_commit()?;
//! let history = repo.commits_between(None, head.id)?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{Commit, Tag};
use crate::error::Result;
use git2::Oid;

/// Read-only view of a repository's tags and commit graph
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// unresolvable references and backend failures to
/// [crate::error::ChangelogError::RepositoryAccess].
pub trait RepositoryView {
    /// All tags, each resolved to the commit it marks
    ///
    /// Annotated tags are peeled to their target commit. Order is
    /// unspecified; callers sort.
    ///
    /// # Returns
    /// * `Ok(Vec<Tag>)` - Every tag in the repository
    /// * `Err` - If a tag cannot be resolved to a commit
    fn tags(&self) -> Result<Vec<Tag>>;

    /// The commit HEAD currently points at
    ///
    /// # Returns
    /// * `Ok(Commit)` - The head commit
    /// * `Err` - If HEAD is unborn or cannot be resolved
    fn head_commit(&self) -> Result<Commit>;

    /// Parentless commits reachable from HEAD
    ///
    /// # Returns
    /// * `Ok(Vec<Oid>)` - Root commit ids (empty for an empty history)
    /// * `Err` - If HEAD cannot be resolved
    fn root_commits(&self) -> Result<Vec<Oid>>;

    /// Non-merge commits reachable from `descendant` but not from `ancestor`
    ///
    /// Equivalent to `git log --no-merges ancestor..descendant`. With no
    /// ancestor the whole history of `descendant` is returned, root included.
    ///
    /// # Arguments
    /// * `ancestor` - Lower bound (exclusive), or `None` for the full history
    /// * `descendant` - Upper bound (inclusive)
    ///
    /// # Returns
    /// * `Ok(Vec<Commit>)` - Commits newest first
    /// * `Err` - If either id is unknown
    fn commits_between(&self, ancestor: Option<Oid>, descendant: Oid) -> Result<Vec<Commit>>;
}
