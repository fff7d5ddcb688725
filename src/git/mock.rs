use crate::domain::{BranchDescriptor, Commit, Tag};
use crate::error::{AutotagError, Result};
use crate::git::Repository;
use std::cell::RefCell;
use std::collections::HashMap;

/// Mock repository for testing without actual git operations.
///
/// History is a single linear chain; commits are added oldest first.
pub struct MockRepository {
    commits: Vec<Commit>,
    tags: Vec<Tag>,
    branch_heads: HashMap<String, String>,
    current_branch: Option<String>,
    created_tags: RefCell<Vec<Tag>>,
    pushed_tags: RefCell<Vec<(String, String)>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            tags: Vec::new(),
            branch_heads: HashMap::new(),
            current_branch: None,
            created_tags: RefCell::new(Vec::new()),
            pushed_tags: RefCell::new(Vec::new()),
        }
    }

    /// Append a commit on top of the history
    pub fn add_commit(&mut self, sha: impl Into<String>, message: impl Into<String>) {
        self.commits.push(Commit::new(sha, message));
    }

    /// Add a tag pointing to a commit
    pub fn add_tag(&mut self, name: impl Into<String>, commit_sha: impl Into<String>) {
        self.tags.push(Tag::new(name, commit_sha));
    }

    /// Set a branch head
    pub fn set_branch_head(&mut self, branch: impl Into<String>, commit_sha: impl Into<String>) {
        self.branch_heads.insert(branch.into(), commit_sha.into());
    }

    /// Set the checked-out branch
    pub fn checkout(&mut self, branch: impl Into<String>) {
        self.current_branch = Some(branch.into());
    }

    /// Tags created through [Repository::create_tag]
    pub fn created_tags(&self) -> Vec<Tag> {
        self.created_tags.borrow().clone()
    }

    /// `(remote, tag)` pairs pushed through [Repository::push_tags]
    pub fn pushed_tags(&self) -> Vec<(String, String)> {
        self.pushed_tags.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<String> {
        self.current_branch
            .clone()
            .ok_or_else(|| AutotagError::branch("HEAD is not on a branch"))
    }

    fn find_branch(&self, branch_name: &str) -> Result<Option<BranchDescriptor>> {
        Ok(self
            .branch_heads
            .get(branch_name)
            .map(|sha| BranchDescriptor::new(branch_name, sha.clone())))
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        let mut tags = self.tags.clone();
        tags.extend(self.created_tags.borrow().iter().cloned());
        Ok(tags)
    }

    fn list_commits(&self, tip_sha: &str) -> Result<Vec<Commit>> {
        let tip = self
            .commits
            .iter()
            .position(|commit| commit.sha == tip_sha)
            .ok_or_else(|| AutotagError::version(format!("Unknown commit: {}", tip_sha)))?;

        Ok(self.commits[..=tip].iter().rev().cloned().collect())
    }

    fn tag_exists(&self, tag_name: &str) -> Result<bool> {
        Ok(self.list_tags()?.iter().any(|tag| tag.name == tag_name))
    }

    fn create_tag(&self, name: &str, commit_sha: &str) -> Result<()> {
        if self.tag_exists(name)? {
            return Err(AutotagError::tag(format!(
                "Cannot create tag: '{}' already exists",
                name
            )));
        }

        self.created_tags
            .borrow_mut()
            .push(Tag::new(name, commit_sha));
        Ok(())
    }

    fn push_tags(&self, remote: &str, tag_names: &[&str]) -> Result<()> {
        let mut pushed = self.pushed_tags.borrow_mut();
        for tag in tag_names {
            pushed.push((remote.to_string(), tag.to_string()));
        }
        Ok(())
    }
}
