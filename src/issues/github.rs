use super::{IssueLabelLookup, IssueLookup};
use crate::error::{AutotagError, Result};
use log::debug;
use tokio::runtime::Runtime;

/// Issue labels from the GitHub REST API.
///
/// The scan itself is synchronous, so requests are driven on a private
/// current-thread runtime.
pub struct GithubIssues {
    client: octocrab::Octocrab,
    owner: String,
    repo: String,
    runtime: Runtime,
}

impl GithubIssues {
    /// Create a client for `owner/repo` authenticated with a token
    pub fn new(token: impl Into<String>, repository: &str) -> Result<Self> {
        let (owner, repo) = split_repository(repository)?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let client = {
            let _guard = runtime.enter();
            octocrab::Octocrab::builder()
                .personal_token(token.into())
                .build()?
        };

        Ok(GithubIssues {
            client,
            owner,
            repo,
            runtime,
        })
    }

    /// The `owner/repo` this client reads issues from
    pub fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

fn split_repository(repository: &str) -> Result<(String, String)> {
    match repository.trim().split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(AutotagError::config(format!(
            "Invalid repository '{}' - expected owner/repo",
            repository
        ))),
    }
}

impl IssueLabelLookup for GithubIssues {
    fn lookup_labels(&self, issue_number: u64) -> IssueLookup {
        debug!(
            "Fetching issue #{} from {}/{}",
            issue_number, self.owner, self.repo
        );

        let result = self
            .runtime
            .block_on(self.client.issues(&self.owner, &self.repo).get(issue_number));

        match result {
            Ok(issue) => IssueLookup::Found(issue.labels.into_iter().map(|l| l.name).collect()),
            Err(octocrab::Error::GitHub { source, .. }) if source.message == "Not Found" => {
                IssueLookup::NotFound
            }
            Err(e) => IssueLookup::LookupError(e.to_string()),
        }
    }
}
