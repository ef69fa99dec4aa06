//! Validated request payloads, built from the session before any network call.

use serde::{Deserialize, Serialize};

use crate::intake::UploadedFile;

/// Kind of documentation artifact to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    /// A full project README.
    #[default]
    Readme,
    /// Inline comments added to the uploaded source.
    InlineComments,
}

impl Purpose {
    /// Value sent in the `purpose` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Readme => "readme",
            Purpose::InlineComments => "inline_comments",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Purpose::Readme => "README",
            Purpose::InlineComments => "Inline comments",
        }
    }

    pub fn toggled(&self) -> Purpose {
        match self {
            Purpose::Readme => Purpose::InlineComments,
            Purpose::InlineComments => Purpose::Readme,
        }
    }

    /// File name used when the generated content is saved.
    pub fn download_name(&self) -> &'static str {
        match self {
            Purpose::Readme => "README.md",
            Purpose::InlineComments => "commented_code.txt",
        }
    }
}

/// Everything `generate-docs` needs.
#[derive(Debug, Clone)]
pub struct DocsRequest {
    pub files: Vec<UploadedFile>,
    pub purpose: Purpose,
    pub project_name: String,
    pub custom_instructions: String,
}

/// Everything `github/create-pr` needs, minus the bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestDraft {
    pub repo: String,
    pub branch: String,
    pub content: String,
    pub purpose: Purpose,
    pub title: String,
    pub description: String,
    pub commit_message: String,
}
