//! Action enum: the central message bus for the TUI.
//! All key presses, form submissions and async results flow through here.

use std::path::PathBuf;

use docsmith_core::intake::IntakeTarget;
use docsmith_core::loading::Ticket;
use docsmith_core::quality::QualityReport;
use docsmith_core::request::Purpose;
use docsmith_core::session::Tab;
use docsmith_core::Toast;

/// Every possible action that can occur in the application.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Navigation ──────────────────────────────────────────
    /// Switch to a specific tab.
    GoToTab(Tab),
    NextTab,
    PrevTab,
    /// Move focus to the next field or list inside the active panel.
    FocusNext,
    FocusPrev,

    // ── Global ──────────────────────────────────────────────
    Quit,
    ToggleHelp,
    /// Show a notification in the status bar.
    Notify(Toast),
    /// A tick event for animations and toast expiry.
    Tick,

    // ── Shortcuts (interpreted by the active panel) ─────────
    /// Focus the panel's first text field.
    StartEditing,
    /// Leave the focused text field, or close an overlay.
    Cancel,
    Generate,
    TogglePurpose,
    Download,
    Export,
    Analyze,
    RemoveSelected,
    Disconnect,

    // ── Session mutations ───────────────────────────────────
    /// Read paths from disk and add them to a file list.
    AddPaths {
        paths: Vec<PathBuf>,
        target: IntakeTarget,
    },
    RemoveFile(usize),
    RemoveQualityFile,
    GenerateDocs {
        project_name: String,
        custom_instructions: String,
    },
    ConnectGithub {
        token: String,
    },
    /// `None` is the placeholder entry.
    SelectRepo(Option<String>),
    SelectBranch(Option<String>),
    CreatePullRequest {
        title: String,
        description: String,
        commit_message: String,
    },

    // ── Async results ───────────────────────────────────────
    /// A backend call finished; releases its loading ticket.
    Completed {
        ticket: Ticket,
        outcome: Outcome,
    },

    // ── Text Input ───────────────────────────────────────────
    CharInput(char),
    BackspaceInput,
    /// Delete word (Ctrl+W).
    DeleteWord,
    /// Enter in a text field.
    NewlineInput,
    /// Submit the focused form (Ctrl+S in editing mode).
    SubmitForm,
    /// Bulk paste from bracketed paste mode; dropped files arrive this way.
    PasteBulk(String),

    // ── Scrolling / Selection ───────────────────────────────
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Confirm,
}

/// Result of one backend call.
#[derive(Debug, Clone)]
pub enum Outcome {
    DocsGenerated { content: String, purpose: Purpose },
    DocsFailed(String),
    QualityAnalyzed(Box<QualityReport>),
    QualityFailed(String),
    GithubConnected { token: String },
    /// Backend answered `success: false`.
    GithubRejected(Option<String>),
    GithubConnectFailed(String),
    /// Tagged with the token the list was fetched with.
    ReposLoaded { token: String, repos: Vec<String> },
    ReposFailed(String),
    BranchesLoaded { repo: String, branches: Vec<String> },
    BranchesFailed(String),
    PrCreated { url: Option<String> },
    PrRejected(Option<String>),
    PrFailed(String),
}

/// Whether the app is in a text-input mode where raw keys should
/// be forwarded to the active component instead of interpreted as
/// global shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal mode: keys are global shortcuts.
    Normal,
    /// Text input mode: keys go to the focused text field.
    Editing,
}
