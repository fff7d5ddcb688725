use thiserror::Error;

/// Unified error type for git-autotag operations
#[derive(Error, Debug)]
pub enum AutotagError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Branch error: {0}")]
    Branch(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("GitHub API error: {0}")]
    Github(#[from] octocrab::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-autotag
pub type Result<T> = std::result::Result<T, AutotagError>;

impl AutotagError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        AutotagError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        AutotagError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        AutotagError::Tag(msg.into())
    }

    /// Create a branch error with context
    pub fn branch(msg: impl Into<String>) -> Self {
        AutotagError::Branch(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        AutotagError::Remote(msg.into())
    }
}
