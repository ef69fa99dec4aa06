use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocsmithError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Client-side checks that stop a request before it is sent.
///
/// The `Display` text is what the user sees in the notification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please upload at least one file")]
    NoFiles,

    #[error("Please enter a project name")]
    MissingProjectName,

    #[error("Please select a file to analyze")]
    NoQualityFile,

    #[error("Please enter your GitHub token")]
    MissingToken,

    #[error("Please connect to GitHub first")]
    NotConnected,

    #[error("Please generate documentation first")]
    NothingGenerated,

    #[error("Please select a repository and branch")]
    NoRepoOrBranch,

    #[error("Please enter a PR title and commit message")]
    MissingPrFields,
}

pub type Result<T> = std::result::Result<T, DocsmithError>;
