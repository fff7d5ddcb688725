//! Pre-release versions for non-release branches
//!
//! A branch that is not a release branch never produces a plain release.
//! Instead the latest version is incremented into a pre-release qualified by
//! the branch name, e.g. `1.2.3` on `feature-x` becomes `1.2.4-feature-x.0`
//! and the next run on the same branch yields `1.2.4-feature-x.1`.
//! Identifier rules follow item 9 of https://semver.org/.

use crate::domain::version::bump_component;
use crate::domain::CleanVersion;
use crate::error::{AutotagError, Result};
use std::fmt;
use std::str::FromStr;

/// Pre-release identifier derived from a branch name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreReleaseQualifier(String);

impl PreReleaseQualifier {
    /// Derive a qualifier from a branch name.
    ///
    /// Only the last `/` segment is kept and every character outside
    /// `[0-9A-Za-z-]` becomes `-`, so `users/jo/fix_login` gives `fix-login`.
    pub fn from_branch(branch_name: &str) -> Result<Self> {
        let last_segment = branch_name.rsplit('/').next().unwrap_or(branch_name);
        let sanitized: String = last_segment
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else {
                    '-'
                }
            })
            .collect();

        sanitized.parse()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PreReleaseQualifier {
    type Err = AutotagError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(AutotagError::version("Empty pre-release identifier"));
        }

        if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(AutotagError::version(format!(
                "Invalid pre-release identifier: '{}'",
                s
            )));
        }

        if is_numeric(s) && s.len() > 1 && s.starts_with('0') {
            return Err(AutotagError::version(format!(
                "Numeric pre-release identifier must not have leading zeros: '{}'",
                s
            )));
        }

        Ok(PreReleaseQualifier(s.to_string()))
    }
}

impl fmt::Display for PreReleaseQualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_numeric(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit())
}

impl CleanVersion {
    /// Increment into the next pre-release qualified by `qualifier`.
    ///
    /// - a release version first gets its patch incremented: `1.2.3` -> `1.2.4-q.0`
    /// - a pre-release with the same qualifier gets its counter incremented:
    ///   `1.2.4-q.0` -> `1.2.4-q.1`
    /// - a pre-release with another qualifier restarts the counter:
    ///   `1.2.4-rc.3` -> `1.2.4-q.0`
    pub fn increment_prerelease(&self, qualifier: &PreReleaseQualifier) -> Result<Self> {
        let current = self.version();
        let mut next = current.clone();

        let mut identifiers: Vec<String> = if current.pre.is_empty() {
            next.patch = bump_component(current.patch, "patch")?;
            vec!["0".to_string()]
        } else {
            let mut identifiers: Vec<String> =
                current.pre.as_str().split('.').map(str::to_string).collect();

            match identifiers.iter().rposition(|id| is_numeric(id)) {
                Some(index) => {
                    let counter = identifiers[index].parse::<u64>().map_err(|_| {
                        AutotagError::version(format!(
                            "Pre-release counter out of range: '{}'",
                            identifiers[index]
                        ))
                    })?;
                    let counter = counter.checked_add(1).ok_or_else(|| {
                        AutotagError::version(format!(
                            "Pre-release counter out of range: '{}'",
                            identifiers[index]
                        ))
                    })?;
                    identifiers[index] = counter.to_string();
                }
                None => identifiers.push("0".to_string()),
            }
            identifiers
        };

        let keeps_counter = identifiers[0] == qualifier.as_str()
            && identifiers.get(1).is_some_and(|id| is_numeric(id));
        if !keeps_counter {
            identifiers = vec![qualifier.to_string(), "0".to_string()];
        }

        next.pre = semver::Prerelease::new(&identifiers.join(".")).map_err(|e| {
            AutotagError::version(format!(
                "Invalid pre-release '{}': {}",
                identifiers.join("."),
                e
            ))
        })?;

        Ok(CleanVersion::new(next))
    }
}
