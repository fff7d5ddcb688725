use crate::domain::{BranchDescriptor, BumpLevel, CleanVersion, PreReleaseQualifier, ReleaseBranches, Tag};
use crate::error::{AutotagError, Result};
use log::info;

/// Compute the next version for a branch.
///
/// On a non-release branch the result is always a pre-release keyed by the
/// branch name, whatever the commits say. On a release branch the level found
/// in the commits wins; the requested default only applies when the commits
/// asked for nothing.
pub fn plan(
    latest: &CleanVersion,
    branch: &BranchDescriptor,
    is_release_branch: bool,
    msg_level: BumpLevel,
    default_level: BumpLevel,
) -> Result<CleanVersion> {
    if !is_release_branch {
        let qualifier = PreReleaseQualifier::from_branch(branch.short_name())?;
        let next = latest.increment_prerelease(&qualifier)?;
        info!("{} is not a release branch, pre-release {}", branch.short_name(), next);
        return Ok(next);
    }

    info!("{} is a release branch", branch.short_name());

    let level = if msg_level == BumpLevel::None {
        default_level
    } else {
        info!("commit messages force bump level to {}", msg_level);
        msg_level
    };

    if level == BumpLevel::None {
        return Err(AutotagError::config(
            "Default bump level must be patch, minor or major",
        ));
    }

    latest.increment(level)
}

/// Plans versions for the release branches of one repository
#[derive(Debug, Clone)]
pub struct VersionPlanner {
    release_branches: ReleaseBranches,
    default_level: BumpLevel,
}

impl VersionPlanner {
    /// Create a planner; `default_level` applies when commits ask for nothing
    pub fn new(release_branches: ReleaseBranches, default_level: BumpLevel) -> Result<Self> {
        if default_level == BumpLevel::None {
            return Err(AutotagError::config(
                "Default bump level must be patch, minor or major",
            ));
        }

        Ok(VersionPlanner {
            release_branches,
            default_level,
        })
    }

    /// Match the release patterns against the branch's short name
    pub fn is_release_branch(&self, branch: &BranchDescriptor) -> bool {
        self.release_branches.is_release_branch(branch.short_name())
    }

    /// True when the latest tag already points at the branch tip
    pub fn is_up_to_date(latest_tag: Option<&Tag>, branch: &BranchDescriptor) -> bool {
        latest_tag.is_some_and(|tag| tag.commit_sha == branch.tip_sha)
    }

    /// Next version of `branch` given the level resolved from its history
    pub fn plan(
        &self,
        latest: &CleanVersion,
        branch: &BranchDescriptor,
        msg_level: BumpLevel,
    ) -> Result<CleanVersion> {
        plan(
            latest,
            branch,
            self.is_release_branch(branch),
            msg_level,
            self.default_level,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(raw: &str) -> CleanVersion {
        CleanVersion::clean(raw).unwrap()
    }

    fn planner() -> VersionPlanner {
        VersionPlanner::new(ReleaseBranches::parse("master,main").unwrap(), BumpLevel::Minor)
            .unwrap()
    }

    #[test]
    fn test_release_branch_uses_message_level() {
        let main = BranchDescriptor::new("main", "abc");
        let next = planner().plan(&clean("v1.2.3"), &main, BumpLevel::Minor).unwrap();
        assert_eq!(next.to_string(), "1.3.0");
        assert_eq!(next.tag_name(true), "v1.3.0");
    }

    #[test]
    fn test_message_level_beats_default() {
        let main = BranchDescriptor::new("main", "abc");
        let next = planner().plan(&clean("1.2.3"), &main, BumpLevel::Patch).unwrap();
        assert_eq!(next.to_string(), "1.2.4");
    }

    #[test]
    fn test_default_level_when_messages_silent() {
        let main = BranchDescriptor::new("main", "abc");
        let next = planner().plan(&clean("1.2.3"), &main, BumpLevel::None).unwrap();
        assert_eq!(next.to_string(), "1.3.0");
    }

    #[test]
    fn test_non_release_branch_is_prerelease() {
        let branch = BranchDescriptor::new("feature-x", "abc");
        for level in [
            BumpLevel::None,
            BumpLevel::Patch,
            BumpLevel::Minor,
            BumpLevel::Major,
        ] {
            let next = planner().plan(&clean("v1.2.3"), &branch, level).unwrap();
            assert_eq!(next.to_string(), "1.2.4-feature-x.0");
        }
    }

    #[test]
    fn test_non_release_branch_continues_counter() {
        let branch = BranchDescriptor::new("feature-x", "abc");
        let next = plan(
            &clean("v1.2.4-feature-x.0"),
            &branch,
            false,
            BumpLevel::Major,
            BumpLevel::Minor,
        )
        .unwrap();
        assert_eq!(next.to_string(), "1.2.4-feature-x.1");
    }

    #[test]
    fn test_patterns_see_short_branch_name() {
        let planner =
            VersionPlanner::new(ReleaseBranches::parse("^main$").unwrap(), BumpLevel::Minor)
                .unwrap();
        let nested = BranchDescriptor::new("feature/main", "abc");
        assert!(planner.is_release_branch(&nested));

        let next = planner.plan(&clean("1.2.3"), &nested, BumpLevel::Patch).unwrap();
        assert_eq!(next.to_string(), "1.2.4");

        let other = BranchDescriptor::new("main/feature-x", "abc");
        let next = planner.plan(&clean("1.2.3"), &other, BumpLevel::Patch).unwrap();
        assert_eq!(next.to_string(), "1.2.4-feature-x.0");
    }

    #[test]
    fn test_baseline_major() {
        let main = BranchDescriptor::new("main", "abc");
        let next = plan(&CleanVersion::baseline(), &main, true, BumpLevel::Major, BumpLevel::Patch)
            .unwrap();
        assert_eq!(next.to_string(), "1.0.0");
    }

    #[test]
    fn test_default_none_rejected() {
        let releases = ReleaseBranches::parse("main").unwrap();
        assert!(VersionPlanner::new(releases, BumpLevel::None).is_err());

        let main = BranchDescriptor::new("main", "abc");
        assert!(plan(&clean("1.0.0"), &main, true, BumpLevel::None, BumpLevel::None).is_err());
    }

    #[test]
    fn test_up_to_date() {
        let branch = BranchDescriptor::new("main", "abc");
        let tag = Tag::new("v1.0.0", "abc");
        let older = Tag::new("v0.9.0", "def");
        assert!(VersionPlanner::is_up_to_date(Some(&tag), &branch));
        assert!(!VersionPlanner::is_up_to_date(Some(&older), &branch));
        assert!(!VersionPlanner::is_up_to_date(None, &branch));
    }
}
