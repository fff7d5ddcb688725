use crate::boundary::BoundaryWarning;
use crate::conventional::{self, LegacyMarker, Matcher, RuleTable};
use crate::domain::{BumpLevel, Commit};
use crate::issues::{IssueLabelLookup, IssueLookup};
use log::{debug, info, warn};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static FIXES_ISSUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"fix(?:es)? #(\d+)(?-u:\b)").expect("issue-closing pattern is valid")
});

const WIP: Matcher = Matcher::LegacyHashTag(LegacyMarker::Wip);
const MAJOR: Matcher = Matcher::LegacyHashTag(LegacyMarker::Major);
const MINOR: Matcher = Matcher::LegacyHashTag(LegacyMarker::Minor);
const PATCH: Matcher = Matcher::LegacyHashTag(LegacyMarker::Patch);

/// Folds a branch history into a single bump level
pub struct HistoryScanner {
    rules: RuleTable,
    issue_labels: BTreeSet<String>,
}

impl HistoryScanner {
    /// Create a scanner over a merged rule table and the labels that
    /// escalate a fixed issue to a minor change
    pub fn new<L, S>(rules: RuleTable, issue_labels: L) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        HistoryScanner {
            rules,
            issue_labels: issue_labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolve the bump level of `commits` (newest first).
    ///
    /// Scanning stops before the commit whose sha equals `boundary_sha`; an
    /// empty boundary scans everything. The level only ever rises, and a
    /// major change ends the scan immediately.
    pub fn resolve_bump<I: IssueLabelLookup + ?Sized>(
        &self,
        commits: &[Commit],
        boundary_sha: &str,
        issues: &I,
    ) -> BumpLevel {
        let mut level = BumpLevel::None;

        for commit in commits {
            if !boundary_sha.is_empty() && commit.sha == boundary_sha {
                debug!("Reached boundary commit {}", commit.sha);
                break;
            }

            let message = commit.message.as_str();

            if WIP.matches(message) {
                debug!("Skipping work in progress: {}", commit.summary());
                continue;
            }

            if MAJOR.matches(message) {
                info!("Found #major tag: {}", commit.summary());
                return BumpLevel::Major;
            }

            if MINOR.matches(message) {
                info!("Found #minor tag: {}", commit.summary());
                level = level.max(BumpLevel::Minor);
                continue;
            }

            // a #patch under an existing minor falls through to the rule table
            if level < BumpLevel::Minor && PATCH.matches(message) {
                info!("Found #patch tag: {}", commit.summary());
                level = BumpLevel::Patch;
                continue;
            }

            if let Some(found) = conventional::classify(message, &self.rules) {
                info!("Found {} type commit: {}", found.key, commit.summary());
                if found.level == BumpLevel::Major {
                    return BumpLevel::Major;
                }
                level = level.max(found.level);
                continue;
            }

            if level < BumpLevel::Minor {
                if let Some(issue_number) = closed_issue(message) {
                    level = level.max(self.escalate(commit, issue_number, issues));
                }
            }
        }

        level
    }

    fn escalate<I: IssueLabelLookup + ?Sized>(
        &self,
        commit: &Commit,
        issue_number: u64,
        issues: &I,
    ) -> BumpLevel {
        info!("Checking issue {} labels", issue_number);

        match issues.lookup_labels(issue_number) {
            IssueLookup::Found(labels) => {
                if labels.iter().any(|label| self.issue_labels.contains(label)) {
                    info!("Found enhancement issue, upgrading to minor version");
                    BumpLevel::Minor
                } else {
                    BumpLevel::Patch
                }
            }
            IssueLookup::NotFound => {
                debug!(
                    "Issue #{} referenced by {} does not exist",
                    issue_number, commit.sha
                );
                BumpLevel::None
            }
            IssueLookup::LookupError(reason) => {
                warn!(
                    "{}",
                    BoundaryWarning::IssueLookupFailed {
                        issue_number,
                        reason,
                    }
                );
                BumpLevel::None
            }
        }
    }
}

/// Issue number closed by a `fix #N` / `fixes #N` reference, if positive
fn closed_issue(message: &str) -> Option<u64> {
    FIXES_ISSUE
        .captures(message)
        .and_then(|captures| captures.get(1))
        .and_then(|number| number.as_str().parse::<u64>().ok())
        .filter(|&number| number > 0)
}
