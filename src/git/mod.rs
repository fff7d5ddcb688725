//! Git operations abstraction layer
//!
//! The release engine reads tags and history and requests tag creation
//! through the [Repository] trait, so it can run against a real repository
//! or against in-memory data.
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory implementation for tests
//!
//! ```rust
//! # use git_autotag::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! if let Some(branch) = repo.find_branch("main")? {
//!     let history = repo.list_commits(&branch.tip_sha)?;
//!     println!("{} commits on main", history.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{BranchDescriptor, Commit, Tag};
use crate::error::Result;

/// Source of tags and history, and sink for new tags.
///
/// All methods return [crate::error::Result<T>]; implementations map their
/// underlying errors (like `git2::Error`) to [crate::error::AutotagError].
pub trait Repository {
    /// Name of the currently checked-out branch
    ///
    /// # Returns
    /// * `Ok(String)` - Branch name (e.g., "main")
    /// * `Err` - If HEAD is detached or there's a Git error
    fn current_branch(&self) -> Result<String>;

    /// Locate a branch and its tip commit
    ///
    /// # Arguments
    /// * `branch_name` - The name of the branch (e.g., "main", "develop")
    ///
    /// # Returns
    /// * `Ok(Some(BranchDescriptor))` - The branch and its tip sha
    /// * `Ok(None)` - If the branch doesn't exist
    /// * `Err` - If there's a Git error
    fn find_branch(&self, branch_name: &str) -> Result<Option<BranchDescriptor>>;

    /// All tags of the repository with the commit each one points to
    fn list_tags(&self) -> Result<Vec<Tag>>;

    /// History reachable from `tip_sha`, newest first, tip included
    ///
    /// # Arguments
    /// * `tip_sha` - Commit to start walking from
    ///
    /// # Returns
    /// * `Ok(Vec<Commit>)` - Commits ordered newest first
    /// * `Err` - If the commit doesn't exist or there's a Git error
    fn list_commits(&self, tip_sha: &str) -> Result<Vec<Commit>>;

    /// Check whether a tag with this exact name exists
    fn tag_exists(&self, tag_name: &str) -> Result<bool>;

    /// Create a lightweight tag pointing at a commit
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err` - If the tag already exists, the commit doesn't exist, or Git error occurs
    fn create_tag(&self, name: &str, commit_sha: &str) -> Result<()>;

    /// Push tags to a remote
    ///
    /// # Arguments
    /// * `remote` - Name of the remote (e.g., "origin")
    /// * `tag_names` - Slice of tag names to push
    fn push_tags(&self, remote: &str, tag_names: &[&str]) -> Result<()>;
}
