//! Issue tracker access for label-based bump escalation
//!
//! A commit that closes an issue (`fixes #12`) counts as a patch once the
//! issue is confirmed to exist, and as a minor change when the issue carries
//! one of the configured labels. Lookups go through [IssueLabelLookup] so the
//! history scanner never deals with transport failures directly.

pub mod github;

pub use github::GithubIssues;

use std::collections::{BTreeSet, HashMap};

/// Outcome of looking up the labels of one issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueLookup {
    /// The issue exists and carries these labels (possibly none)
    Found(BTreeSet<String>),
    /// The tracker has no such issue
    NotFound,
    /// The lookup could not be completed
    LookupError(String),
}

/// Capability to fetch the labels of an issue by number
pub trait IssueLabelLookup {
    fn lookup_labels(&self, issue_number: u64) -> IssueLookup;
}

/// Lookup used when no issue tracker is configured; every issue is unknown
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIssueTracker;

impl IssueLabelLookup for NoIssueTracker {
    fn lookup_labels(&self, _issue_number: u64) -> IssueLookup {
        IssueLookup::NotFound
    }
}

/// In-memory issue tracker
#[derive(Debug, Clone, Default)]
pub struct StaticIssueLabels {
    issues: HashMap<u64, BTreeSet<String>>,
    failing: BTreeSet<u64>,
}

impl StaticIssueLabels {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an issue with its labels
    pub fn with_issue<L, S>(mut self, issue_number: u64, labels: L) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.issues
            .insert(issue_number, labels.into_iter().map(Into::into).collect());
        self
    }

    /// Make lookups of an issue fail
    pub fn with_failure(mut self, issue_number: u64) -> Self {
        self.failing.insert(issue_number);
        self
    }
}

impl IssueLabelLookup for StaticIssueLabels {
    fn lookup_labels(&self, issue_number: u64) -> IssueLookup {
        if self.failing.contains(&issue_number) {
            return IssueLookup::LookupError(format!("lookup of issue #{} failed", issue_number));
        }

        match self.issues.get(&issue_number) {
            Some(labels) => IssueLookup::Found(labels.clone()),
            None => IssueLookup::NotFound,
        }
    }
}

impl<T: IssueLabelLookup + ?Sized> IssueLabelLookup for &T {
    fn lookup_labels(&self, issue_number: u64) -> IssueLookup {
        (**self).lookup_labels(issue_number)
    }
}

impl<T: IssueLabelLookup + ?Sized> IssueLabelLookup for Box<T> {
    fn lookup_labels(&self, issue_number: u64) -> IssueLookup {
        (**self).lookup_labels(issue_number)
    }
}
