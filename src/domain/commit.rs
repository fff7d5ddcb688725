/// A commit on the scanned branch, as returned by the history source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub sha: String,
    pub message: String,
}

impl Commit {
    /// Create a new commit
    pub fn new(sha: impl Into<String>, message: impl Into<String>) -> Self {
        Commit {
            sha: sha.into(),
            message: message.into(),
        }
    }

    /// First line of the message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}
