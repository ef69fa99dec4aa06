//! HTTP client for the documentation backend.

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use docsmith_core::intake::UploadedFile;
use docsmith_core::quality::QualityReport;
use docsmith_core::request::{DocsRequest, PullRequestDraft};

use crate::protocol::*;

/// Client for the backend API. Every call fails on transport errors and
/// on any non-2xx status; callers do not distinguish between them.
pub struct DocsClient {
    client: Client,
    base_url: String,
}

impl DocsClient {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: String, timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|_| Client::new());
        Self::with_http_client(client, base_url)
    }

    pub fn with_http_client(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Upload files and get generated documentation back.
    #[instrument(skip(self, request), fields(files = request.files.len(), purpose = request.purpose.as_str()))]
    pub async fn generate_docs(&self, request: &DocsRequest) -> anyhow::Result<String> {
        let url = self.url("generate-docs");
        let mut form = Form::new();
        for file in &request.files {
            form = form.part("files", file_part(file));
        }
        let form = form
            .text("purpose", request.purpose.as_str())
            .text("project_name", request.project_name.clone())
            .text("custom_instructions", request.custom_instructions.clone());

        let resp = self.client.post(&url).multipart(form).send().await?;
        let body: GenerateDocsResponse = resp.error_for_status()?.json().await?;
        debug!("Generated {} bytes of documentation", body.content.len());
        Ok(body.content)
    }

    /// Submit one file for quality analysis.
    #[instrument(skip(self, file), fields(file = %file.name))]
    pub async fn analyze_quality(&self, file: &UploadedFile) -> anyhow::Result<QualityReport> {
        let url = self.url("analyze-quality");
        let form = Form::new().part("file", file_part(file));
        let resp = self.client.post(&url).multipart(form).send().await?;
        let report: QualityReport = resp.error_for_status()?.json().await?;
        debug!(issues = report.issues().len(), "Quality report received");
        Ok(report)
    }

    /// Exchange a token for a connected session.
    #[instrument(skip(self, token))]
    pub async fn github_connect(&self, token: &str) -> anyhow::Result<ConnectResponse> {
        let url = self.url("github/connect");
        let resp = self
            .client
            .post(&url)
            .json(&ConnectRequest { token })
            .send()
            .await?;
        let result: ConnectResponse = resp.error_for_status()?.json().await?;
        Ok(result)
    }

    #[instrument(skip(self, token))]
    pub async fn github_repos(&self, token: &str) -> anyhow::Result<Vec<String>> {
        let url = self.url("github/repos");
        let resp = self.client.get(&url).bearer_auth(token).send().await?;
        let repos: Vec<String> = resp.error_for_status()?.json().await?;
        debug!("Found {} repositories", repos.len());
        Ok(repos)
    }

    #[instrument(skip(self, token))]
    pub async fn github_branches(&self, token: &str, repo: &str) -> anyhow::Result<Vec<String>> {
        let url = self.url("github/branches");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&BranchesRequest { repo })
            .send()
            .await?;
        let branches: Vec<String> = resp.error_for_status()?.json().await?;
        debug!("Found {} branches", branches.len());
        Ok(branches)
    }

    #[instrument(skip(self, token, draft), fields(repo = %draft.repo, branch = %draft.branch))]
    pub async fn create_pull_request(
        &self,
        token: &str,
        draft: &PullRequestDraft,
    ) -> anyhow::Result<CreatePrResponse> {
        let url = self.url("github/create-pr");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&CreatePrRequest::from(draft))
            .send()
            .await?;
        let result: CreatePrResponse = resp.error_for_status()?.json().await?;
        Ok(result)
    }
}

fn file_part(file: &UploadedFile) -> Part {
    Part::bytes(file.bytes.clone()).file_name(file.name.clone())
}
