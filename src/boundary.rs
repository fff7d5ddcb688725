use std::fmt;

/// Non-fatal anomalies met while resolving a release.
/// The run continues with a conservative default; these are only reported.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The latest tag already points at the branch tip
    NoNewCommits {
        latest_tag: String,
        current_commit_hash: String,
    },
    /// Tag exists but cannot be parsed as a semantic version
    UnparsableTag { tag: String },
    /// Custom commit type rules could not be decoded; built-in rules apply
    MalformedRuleOverlay { reason: String },
    /// Labels of a referenced issue could not be fetched; no escalation
    IssueLookupFailed { issue_number: u64, reason: String },
    /// No issue tracker is configured; `fixes #N` references are ignored
    IssueTrackerUnavailable { reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits {
                latest_tag,
                current_commit_hash,
            } => {
                let short_hash = if current_commit_hash.len() > 7 {
                    &current_commit_hash[..7]
                } else {
                    current_commit_hash.as_str()
                };
                write!(
                    f,
                    "No new commits since tag '{}' (current: {})",
                    latest_tag, short_hash
                )
            }
            BoundaryWarning::UnparsableTag { tag } => {
                write!(f, "Ignoring tag '{}': not a semantic version", tag)
            }
            BoundaryWarning::MalformedRuleOverlay { reason } => {
                write!(
                    f,
                    "Failed to parse commit type config, using default rules: {}",
                    reason
                )
            }
            BoundaryWarning::IssueLookupFailed {
                issue_number,
                reason,
            } => {
                write!(
                    f,
                    "Could not load labels of issue #{}, skipping escalation: {}",
                    issue_number, reason
                )
            }
            BoundaryWarning::IssueTrackerUnavailable { reason } => {
                write!(f, "Issue label escalation disabled: {}", reason)
            }
        }
    }
}
