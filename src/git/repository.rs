use crate::domain::{BranchDescriptor, Commit, Tag};
use crate::error::{AutotagError, Result};
use git2::{BranchType, ErrorCode, Oid, Repository as Git2Repo, Sort};
use log::debug;
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn parse_oid(sha: &str) -> Result<Oid> {
        Oid::from_str(sha).map_err(|e| {
            AutotagError::version(format!("Invalid commit sha '{}': {}", sha, e.message()))
        })
    }

    fn branch_tip(&self, name: &str, branch_type: BranchType) -> Result<Option<Oid>> {
        match self.repo.find_branch(name, branch_type) {
            Ok(branch) => {
                let oid = branch.get().target().ok_or_else(|| {
                    AutotagError::branch(format!("Branch '{}' has no target", name))
                })?;
                Ok(Some(oid))
            }
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(AutotagError::branch(format!(
                "Cannot find branch '{}': {}",
                name, e
            ))),
        }
    }
}

impl super::Repository for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;

        if !head.is_branch() {
            return Err(AutotagError::branch("HEAD is not on a branch"));
        }

        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| AutotagError::branch("Branch name is not valid UTF-8"))
    }

    fn find_branch(&self, branch_name: &str) -> Result<Option<BranchDescriptor>> {
        // CI checkouts often only carry the remote-tracking branch
        let tip = match self.branch_tip(branch_name, BranchType::Local)? {
            Some(oid) => Some(oid),
            None => self.branch_tip(&format!("origin/{}", branch_name), BranchType::Remote)?,
        };

        Ok(tip.map(|oid| BranchDescriptor::new(branch_name, oid.to_string())))
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;

            match reference.peel_to_commit() {
                Ok(commit) => tags.push(Tag::new(name, commit.id().to_string())),
                Err(e) => debug!("Skipping tag '{}' that does not point at a commit: {}", name, e),
            }
        }

        Ok(tags)
    }

    fn list_commits(&self, tip_sha: &str) -> Result<Vec<Commit>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(Self::parse_oid(tip_sha)?)?;

        let mut commits = Vec::new();

        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            let message = commit.message().unwrap_or("").to_string();

            commits.push(Commit::new(oid.to_string(), message));
        }

        Ok(commits)
    }

    fn tag_exists(&self, tag_name: &str) -> Result<bool> {
        match self.repo.find_reference(&format!("refs/tags/{}", tag_name)) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound || e.code() == ErrorCode::InvalidSpec => {
                Ok(false)
            }
            Err(e) => Err(AutotagError::tag(format!(
                "Cannot find tag '{}': {}",
                tag_name, e
            ))),
        }
    }

    fn create_tag(&self, name: &str, commit_sha: &str) -> Result<()> {
        let object = self
            .repo
            .find_object(Self::parse_oid(commit_sha)?, None)
            .map_err(|e| AutotagError::tag(format!("Cannot find object: {}", e)))?;

        self.repo
            .tag_lightweight(name, &object, false)
            .map_err(|e| AutotagError::tag(format!("Cannot create tag: {}", e)))?;

        Ok(())
    }

    fn push_tags(&self, remote: &str, tag_names: &[&str]) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote)
            .map_err(|e| AutotagError::remote(format!("Cannot find remote: {}", e)))?;

        let refspecs: Vec<String> = tag_names
            .iter()
            .map(|tag| format!("refs/tags/{}:refs/tags/{}", tag, tag))
            .collect();

        let refspec_strs: Vec<&str> = refspecs.iter().map(|s| s.as_str()).collect();

        remote
            .push(&refspec_strs, None)
            .map_err(|e| AutotagError::remote(format!("Push failed: {}", e)))?;

        Ok(())
    }
}
