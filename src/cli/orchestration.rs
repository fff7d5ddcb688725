//! Main release workflow
//!
//! Wires a [Repository] and an issue tracker to the analysis engine. The
//! binary only parses arguments, builds a [ReleaseRequest] and renders the
//! [ReleaseOutcome]; everything that decides a tag lives here so it can be
//! driven programmatically and from tests.

use log::{debug, info};

use crate::analyzer::{HistoryScanner, VersionPlanner};
use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::conventional::RuleTable;
use crate::domain::{BranchDescriptor, BumpLevel, CleanVersion, ReleaseBranches, TagIndex};
use crate::error::{AutotagError, Result};
use crate::git::Repository;
use crate::issues::IssueLabelLookup;

/// Everything the workflow needs to decide and create one tag
#[derive(Debug, Clone)]
pub struct ReleaseRequest {
    /// Branch to tag
    pub branch: String,

    /// The branch was requested explicitly rather than taken from the context
    pub branch_forced: bool,

    pub release_branches: ReleaseBranches,

    /// Level used on release branches when no commit asks for one
    pub default_level: BumpLevel,

    /// Prefix the new tag with `v`
    pub with_v: bool,

    /// Preview mode - compute outputs but don't create or push tags
    pub dry_run: bool,

    /// Use this tag name instead of computing one
    pub explicit_tag: Option<String>,

    /// Labels escalating a fixed issue to a minor change
    pub issue_labels: Vec<String>,

    pub rules: RuleTable,

    /// Remote to push the created tag to
    pub push_remote: Option<String>,
}

impl ReleaseRequest {
    /// Build a request for `branch` from configuration values
    pub fn from_config(config: &Config, branch: impl Into<String>, branch_forced: bool) -> Result<Self> {
        config.validate()?;

        Ok(ReleaseRequest {
            branch: branch.into(),
            branch_forced,
            release_branches: config.parsed_release_branches()?,
            default_level: config.bump,
            with_v: config.with_v,
            dry_run: false,
            explicit_tag: None,
            issue_labels: config.issue_labels.clone(),
            rules: config.rule_table(),
            push_remote: config.remote.clone(),
        })
    }
}

/// Result of a successful release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOutcome {
    /// Branch that was examined
    pub branch: String,

    /// Latest existing tag, or `0.0.0` when the repository has none
    pub tag: String,

    /// `tag` without its leading `v`
    pub version: String,

    /// Tag that was (or, in dry-run, would be) created
    pub new_tag: String,

    pub new_version: String,

    /// Level resolved from the branch history
    pub bump: BumpLevel,

    /// A tag ref was written
    pub created: bool,

    /// The created tag was pushed to a remote
    pub pushed: bool,

    /// Degraded conditions met during the run
    pub warnings: Vec<BoundaryWarning>,
}

/// Strip one leading `v` from a tag name
fn version_of(tag_name: &str) -> &str {
    tag_name.strip_prefix('v').unwrap_or(tag_name)
}

/// Main release workflow
///
/// 1. Locate the branch to tag
/// 2. Index the repository tags
/// 3. Use the explicit tag, or stop when nothing changed since the latest tag
/// 4. Resolve the bump level from the branch history
/// 5. Plan the next version
/// 6. Create and optionally push the tag
///
/// Fails before creating anything when the branch cannot be located or the
/// explicit tag already exists.
pub fn run_release<R, I>(repo: &R, issues: &I, request: &ReleaseRequest) -> Result<ReleaseOutcome>
where
    R: Repository + ?Sized,
    I: IssueLabelLookup + ?Sized,
{
    let branch = locate_branch(repo, request)?;
    info!("active branch name is {}", branch.short_name());

    let mut warnings = Vec::new();

    let index = TagIndex::new(repo.list_tags()?);
    for name in index.skipped() {
        let warning = BoundaryWarning::UnparsableTag { tag: name.clone() };
        debug!("{}", warning);
        warnings.push(warning);
    }

    let latest = index.latest(true);
    let latest_stable = index.latest_stable();

    let tag = latest
        .map(|entry| entry.tag.name.clone())
        .unwrap_or_else(|| CleanVersion::baseline().to_string());
    let version = version_of(&tag).to_string();

    if let Some(explicit) = &request.explicit_tag {
        if repo.tag_exists(explicit)? {
            return Err(AutotagError::tag(format!("tag already exists {}", explicit)));
        }

        let mut outcome = ReleaseOutcome {
            branch: branch.name.clone(),
            tag,
            version,
            new_tag: explicit.clone(),
            new_version: version_of(explicit).to_string(),
            bump: BumpLevel::None,
            created: false,
            pushed: false,
            warnings,
        };
        publish(repo, request, &branch, &mut outcome)?;
        return Ok(outcome);
    }

    if VersionPlanner::is_up_to_date(latest.map(|entry| &entry.tag), &branch) {
        let warning = BoundaryWarning::NoNewCommits {
            latest_tag: tag.clone(),
            current_commit_hash: branch.tip_sha.clone(),
        };
        info!("{}, avoid tagging", warning);
        warnings.push(warning);

        return Ok(ReleaseOutcome {
            branch: branch.name.clone(),
            new_tag: tag.clone(),
            new_version: version.clone(),
            tag,
            version,
            bump: BumpLevel::None,
            created: false,
            pushed: false,
            warnings,
        });
    }

    let current = latest
        .map(|entry| entry.version.clone())
        .unwrap_or_else(CleanVersion::baseline);
    let boundary_sha = latest_stable
        .map(|entry| entry.tag.commit_sha.as_str())
        .unwrap_or("");

    let commits = repo.list_commits(&branch.tip_sha)?;
    let scanner = HistoryScanner::new(request.rules.clone(), request.issue_labels.iter().cloned());
    let bump = scanner.resolve_bump(&commits, boundary_sha, issues);
    debug!("commit messages suggest {} upgrade", bump);

    let planner = VersionPlanner::new(request.release_branches.clone(), request.default_level)?;
    let next = planner.plan(&current, &branch, bump)?;
    info!("bump tag {}", next);

    let mut outcome = ReleaseOutcome {
        branch: branch.name.clone(),
        tag,
        version,
        new_tag: next.tag_name(request.with_v),
        new_version: next.to_string(),
        bump,
        created: false,
        pushed: false,
        warnings,
    };
    publish(repo, request, &branch, &mut outcome)?;
    Ok(outcome)
}

fn locate_branch<R>(repo: &R, request: &ReleaseRequest) -> Result<BranchDescriptor>
where
    R: Repository + ?Sized,
{
    match repo.find_branch(&request.branch)? {
        Some(branch) => Ok(branch),
        None if request.branch_forced => Err(AutotagError::branch("unknown branch provided")),
        None => Err(AutotagError::branch(format!(
            "failed to load branch {}",
            request.branch
        ))),
    }
}

/// Create the outcome's tag at the branch tip and push it if requested
fn publish<R>(
    repo: &R,
    request: &ReleaseRequest,
    branch: &BranchDescriptor,
    outcome: &mut ReleaseOutcome,
) -> Result<()>
where
    R: Repository + ?Sized,
{
    if request.dry_run {
        info!("dry run, don't perform tagging of {}", outcome.new_tag);
        return Ok(());
    }

    info!("really add tag {}", outcome.new_tag);
    repo.create_tag(&outcome.new_tag, &branch.tip_sha)?;
    outcome.created = true;

    if let Some(remote) = &request.push_remote {
        repo.push_tags(remote, &[outcome.new_tag.as_str()])?;
        info!("pushed {} to {}", outcome.new_tag, remote);
        outcome.pushed = true;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;
    use crate::issues::NoIssueTracker;

    fn request(branch: &str) -> ReleaseRequest {
        ReleaseRequest::from_config(&Config::default(), branch, false).unwrap()
    }

    #[test]
    fn test_version_of() {
        assert_eq!(version_of("v1.2.3"), "1.2.3");
        assert_eq!(version_of("1.2.3"), "1.2.3");
        assert_eq!(version_of("vv1"), "v1");
    }

    #[test]
    fn test_from_config_rejects_none_bump() {
        let config = Config {
            bump: BumpLevel::None,
            ..Config::default()
        };
        assert!(ReleaseRequest::from_config(&config, "main", false).is_err());
    }

    #[test]
    fn test_missing_branch_messages() {
        let repo = MockRepository::new();

        let err = run_release(&repo, &NoIssueTracker, &request("main")).unwrap_err();
        assert_eq!(err.to_string(), "Branch error: failed to load branch main");

        let mut forced = request("ghost");
        forced.branch_forced = true;
        let err = run_release(&repo, &NoIssueTracker, &forced).unwrap_err();
        assert_eq!(err.to_string(), "Branch error: unknown branch provided");
    }

    #[test]
    fn test_first_release_from_baseline() {
        let mut repo = MockRepository::new();
        repo.add_commit("a1", "feat: first feature");
        repo.set_branch_head("main", "a1");

        let outcome = run_release(&repo, &NoIssueTracker, &request("main")).unwrap();
        assert_eq!(outcome.tag, "0.0.0");
        assert_eq!(outcome.version, "0.0.0");
        assert_eq!(outcome.new_version, "0.1.0");
        assert_eq!(outcome.new_tag, "0.1.0");
        assert!(outcome.created);
        assert!(!outcome.pushed);
    }
}
