use crate::error::{AutotagError, Result};
use regex::Regex;

/// A branch and the commit at its tip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchDescriptor {
    pub name: String,
    pub tip_sha: String,
}

impl BranchDescriptor {
    /// Create a new branch descriptor
    pub fn new(name: impl Into<String>, tip_sha: impl Into<String>) -> Self {
        BranchDescriptor {
            name: name.into(),
            tip_sha: tip_sha.into(),
        }
    }

    /// Last `/` segment of the name (`feature/main` -> `main`).
    ///
    /// Release branch patterns and pre-release qualifiers both see this name.
    pub fn short_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// Branches eligible to produce non-prerelease versions.
///
/// Built from a comma-separated list of regular expressions. A branch is a
/// release branch when any pattern matches anywhere in its name.
#[derive(Debug, Clone, Default)]
pub struct ReleaseBranches {
    patterns: Vec<Regex>,
}

impl ReleaseBranches {
    /// Parse a comma-separated pattern list (e.g., "master,main,release/.*").
    ///
    /// Whitespace around each pattern is trimmed. An empty entry is an empty
    /// regex and matches every branch.
    pub fn parse(list: &str) -> Result<Self> {
        let patterns = list
            .split(',')
            .map(str::trim)
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    AutotagError::config(format!(
                        "Invalid release branch pattern '{}': {}",
                        pattern, e
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ReleaseBranches { patterns })
    }

    /// Check if a branch name is a release branch
    pub fn is_release_branch(&self, branch_name: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(branch_name))
    }
}
