use thiserror::Error;

/// Unified error type for changelog generation
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Repository access failed: {0}")]
    RepositoryAccess(String),

    #[error("Output write failed: {0}")]
    OutputWrite(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results in git-changelog
pub type Result<T> = std::result::Result<T, ChangelogError>;

impl ChangelogError {
    /// Create a repository access error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        ChangelogError::RepositoryAccess(msg.into())
    }

    /// Create an output write error with context
    pub fn output(msg: impl Into<String>) -> Self {
        ChangelogError::OutputWrite(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangelogError::Config(msg.into())
    }
}

impl From<git2::Error> for ChangelogError {
    fn from(err: git2::Error) -> Self {
        ChangelogError::RepositoryAccess(err.message().to_string())
    }
}
