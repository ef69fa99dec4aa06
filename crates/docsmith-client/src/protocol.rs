//! Request and response types for the documentation backend.
//! Field names follow the backend's JSON exactly.

use serde::{Deserialize, Serialize};

use docsmith_core::request::{PullRequestDraft, Purpose};

// ── Documentation ───────────────────────────────────────────────

// Request is multipart: files[], purpose, project_name, custom_instructions.

#[derive(Debug, Deserialize)]
pub struct GenerateDocsResponse {
    pub content: String,
}

// ── Quality ─────────────────────────────────────────────────────

// Request is multipart with a single `file` part.
// Response is docsmith_core::quality::QualityReport.

// ── GitHub ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ConnectRequest<'a> {
    pub token: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ConnectResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

// Repos response is Vec<String>.

#[derive(Debug, Serialize)]
pub struct BranchesRequest<'a> {
    pub repo: &'a str,
}

// Branches response is Vec<String>.

#[derive(Debug, Serialize)]
pub struct CreatePrRequest<'a> {
    pub repo: &'a str,
    pub branch: &'a str,
    pub content: &'a str,
    pub purpose: Purpose,
    pub pr_title: &'a str,
    pub pr_description: &'a str,
    pub commit_message: &'a str,
}

impl<'a> From<&'a PullRequestDraft> for CreatePrRequest<'a> {
    fn from(draft: &'a PullRequestDraft) -> Self {
        Self {
            repo: &draft.repo,
            branch: &draft.branch,
            content: &draft.content,
            purpose: draft.purpose,
            pr_title: &draft.title,
            pr_description: &draft.description,
            commit_message: &draft.commit_message,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePrResponse {
    pub success: bool,
    #[serde(default)]
    pub pr_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
