//! The session: one explicit state container for the whole client.
//!
//! All transitions are plain methods so they can be exercised without a
//! terminal. The TUI owns a single `Session` and hands `&mut` to handlers.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::ValidationError;
use crate::intake::{IntakeTarget, UploadedFile};
use crate::loading::LoadingTracker;
use crate::quality::QualityReport;
use crate::request::{DocsRequest, PullRequestDraft, Purpose};
use crate::visibility::Visibility;

/// The three top-level panels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Documentation,
    GitHub,
    Quality,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Documentation, Tab::GitHub, Tab::Quality]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Documentation => "1.Docs",
            Tab::GitHub => "2.GitHub",
            Tab::Quality => "3.Quality",
        }
    }

    pub fn next(&self) -> Option<Tab> {
        match self {
            Tab::Documentation => Some(Tab::GitHub),
            Tab::GitHub => Some(Tab::Quality),
            Tab::Quality => None,
        }
    }

    pub fn prev(&self) -> Option<Tab> {
        match self {
            Tab::Documentation => None,
            Tab::GitHub => Some(Tab::Documentation),
            Tab::Quality => Some(Tab::GitHub),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Documentation => 0,
            Tab::GitHub => 1,
            Tab::Quality => 2,
        }
    }
}

/// GitHub connection status. The token only exists while connected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Connection {
    #[default]
    Disconnected,
    Connected {
        token: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct GithubSession {
    pub connection: Connection,
    pub repos: Vec<String>,
    pub branches: Vec<String>,
    pub selected_repo: Option<String>,
    pub selected_branch: Option<String>,
}

/// Last successful documentation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDoc {
    pub content: String,
    /// Purpose in effect when the content was generated.
    pub purpose: Purpose,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub current_tab: Tab,
    pub github: GithubSession,
    pub uploaded_files: Vec<UploadedFile>,
    pub quality_file: Option<UploadedFile>,
    pub generated: Option<GeneratedDoc>,
    pub purpose: Purpose,
    pub quality_report: Option<QualityReport>,
    pub loading: LoadingTracker,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Tabs ────────────────────────────────────────────────

    pub fn select_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
    }

    // ── Purpose ─────────────────────────────────────────────

    pub fn set_purpose(&mut self, purpose: Purpose) {
        self.purpose = purpose;
    }

    pub fn toggle_purpose(&mut self) -> Purpose {
        self.purpose = self.purpose.toggled();
        self.purpose
    }

    // ── File intake ─────────────────────────────────────────

    /// Add files to a target list. Returns how many were actually taken.
    ///
    /// Documentation keeps the first file of each name. Quality keeps only
    /// the first file of the batch and replaces whatever was there.
    pub fn add_files(
        &mut self,
        files: impl IntoIterator<Item = UploadedFile>,
        target: IntakeTarget,
    ) -> usize {
        match target {
            IntakeTarget::Documentation => {
                let mut added = 0;
                for file in files {
                    if self.uploaded_files.iter().any(|f| f.name == file.name) {
                        debug!(name = %file.name, "Skipping duplicate upload");
                        continue;
                    }
                    self.uploaded_files.push(file);
                    added += 1;
                }
                added
            }
            IntakeTarget::Quality => match files.into_iter().next() {
                Some(first) => {
                    self.quality_file = Some(first);
                    1
                }
                None => 0,
            },
        }
    }

    pub fn remove_file(&mut self, index: usize) -> Option<UploadedFile> {
        if index < self.uploaded_files.len() {
            Some(self.uploaded_files.remove(index))
        } else {
            None
        }
    }

    pub fn remove_quality_file(&mut self) -> Option<UploadedFile> {
        self.quality_file.take()
    }

    // ── Documentation ───────────────────────────────────────

    /// Check preconditions and build the `generate-docs` payload.
    pub fn docs_request(
        &self,
        project_name: &str,
        custom_instructions: &str,
    ) -> Result<DocsRequest, ValidationError> {
        if self.uploaded_files.is_empty() {
            return Err(ValidationError::NoFiles);
        }
        if self.purpose == Purpose::Readme && project_name.trim().is_empty() {
            return Err(ValidationError::MissingProjectName);
        }
        Ok(DocsRequest {
            files: self.uploaded_files.clone(),
            purpose: self.purpose,
            project_name: project_name.trim().to_string(),
            custom_instructions: custom_instructions.to_string(),
        })
    }

    /// Store a successful generation result.
    pub fn apply_generated(&mut self, content: String, purpose: Purpose) -> &GeneratedDoc {
        self.generated.insert(GeneratedDoc {
            content,
            purpose,
            generated_at: Utc::now(),
        })
    }

    // ── Quality ─────────────────────────────────────────────

    pub fn quality_request(&self) -> Result<UploadedFile, ValidationError> {
        self.quality_file.clone().ok_or(ValidationError::NoQualityFile)
    }

    pub fn apply_quality_report(&mut self, report: QualityReport) {
        self.quality_report = Some(report);
    }

    // ── GitHub ──────────────────────────────────────────────

    pub fn is_connected(&self) -> bool {
        matches!(self.github.connection, Connection::Connected { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match &self.github.connection {
            Connection::Connected { token } => Some(token.as_str()),
            Connection::Disconnected => None,
        }
    }

    /// Check a token before sending it to the backend.
    pub fn connect_request(&self, token: &str) -> Result<String, ValidationError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ValidationError::MissingToken);
        }
        Ok(token.to_string())
    }

    pub fn apply_connected(&mut self, token: String) {
        self.github.connection = Connection::Connected { token };
    }

    /// Drop the token and everything fetched with it.
    pub fn disconnect(&mut self) {
        self.github = GithubSession::default();
    }

    pub fn apply_repos(&mut self, repos: Vec<String>) {
        self.github.repos = repos;
    }

    /// Record a repository choice immediately and reset the branch list.
    ///
    /// Returns the repo whose branches should be fetched, or `None` when the
    /// placeholder (or an empty name) was chosen.
    pub fn select_repo(&mut self, repo: Option<String>) -> Option<String> {
        let repo = repo.filter(|r| !r.is_empty());
        self.github.selected_repo = repo.clone();
        self.github.branches.clear();
        self.github.selected_branch = None;
        repo
    }

    /// Apply a branch list. Lists for a repo that is no longer selected are
    /// dropped; returns whether the list was applied.
    pub fn apply_branches(&mut self, repo: &str, branches: Vec<String>) -> bool {
        if self.github.selected_repo.as_deref() != Some(repo) {
            debug!(repo, "Discarding branch list for stale repository");
            return false;
        }
        self.github.branches = branches;
        true
    }

    pub fn select_branch(&mut self, branch: Option<String>) {
        if self.github.selected_repo.is_none() {
            self.github.selected_branch = None;
            return;
        }
        self.github.selected_branch = branch.filter(|b| !b.is_empty());
    }

    /// Check preconditions and build the `github/create-pr` payload.
    pub fn pull_request(
        &self,
        title: &str,
        description: &str,
        commit_message: &str,
    ) -> Result<PullRequestDraft, ValidationError> {
        if !self.is_connected() {
            return Err(ValidationError::NotConnected);
        }
        let generated = self
            .generated
            .as_ref()
            .ok_or(ValidationError::NothingGenerated)?;
        let (Some(repo), Some(branch)) = (
            self.github.selected_repo.clone(),
            self.github.selected_branch.clone(),
        ) else {
            return Err(ValidationError::NoRepoOrBranch);
        };
        if title.trim().is_empty() || commit_message.trim().is_empty() {
            return Err(ValidationError::MissingPrFields);
        }
        Ok(PullRequestDraft {
            repo,
            branch,
            content: generated.content.clone(),
            purpose: generated.purpose,
            title: title.trim().to_string(),
            description: description.to_string(),
            commit_message: commit_message.trim().to_string(),
        })
    }

    // ── Derived ─────────────────────────────────────────────

    pub fn visibility(&self) -> Visibility {
        Visibility::compute(self)
    }
}
