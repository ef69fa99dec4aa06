//! Main application state and render loop.

use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Tabs;
use ratatui::Terminal;
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use docsmith_client::DocsClient;
use docsmith_core::download::{preview_stem, save_generated, save_preview};
use docsmith_core::intake::{IntakeTarget, UploadedFile};
use docsmith_core::render::{quality_report_html, render_generated};
use docsmith_core::{DocsmithConfig, Session, Tab, Toast, ValidationError};

use crate::action::{Action, InputMode, Outcome};
use crate::components::docs_panel::DocsPanel;
use crate::components::github_panel::GithubPanel;
use crate::components::help::HelpComponent;
use crate::components::loading::LoadingComponent;
use crate::components::quality_panel::QualityPanel;
use crate::components::status_bar::StatusBarComponent;
use crate::components::Component;
use crate::event::{self, EventHandler, InputModeFlag};
use crate::theme::Theme;

/// Main application state.
pub struct App {
    /// Everything the user has done so far. Only `handle_action` mutates it.
    session: Session,
    config: DocsmithConfig,
    /// HTTP client shared with spawned backend calls.
    client: Arc<DocsClient>,
    /// Whether the app should exit.
    should_quit: bool,
    /// Shared flag to tell the EventHandler which key-mapping to use.
    input_mode_flag: InputModeFlag,

    /// Paths from the command line, loaded once the loop starts.
    initial_files: Vec<PathBuf>,
    initial_quality_file: Option<PathBuf>,

    // Components
    docs: DocsPanel,
    github: GithubPanel,
    quality: QualityPanel,
    status_bar: StatusBarComponent,
    loading: LoadingComponent,
    help: HelpComponent,
}

impl App {
    pub fn new(config: DocsmithConfig) -> Self {
        let timeout = config.backend.timeout_seconds.map(Duration::from_secs);
        let client = DocsClient::new(config.backend.base_url.clone(), timeout);
        Self::with_client(config, Arc::new(client))
    }

    pub fn with_client(config: DocsmithConfig, client: Arc<DocsClient>) -> Self {
        Self {
            session: Session::new(),
            status_bar: StatusBarComponent::new(config.ui.toast_seconds),
            config,
            client,
            should_quit: false,
            input_mode_flag: event::new_input_mode_flag(),
            initial_files: Vec::new(),
            initial_quality_file: None,
            docs: DocsPanel::new(),
            github: GithubPanel::new(),
            quality: QualityPanel::new(),
            loading: LoadingComponent::new(),
            help: HelpComponent::new(),
        }
    }

    /// Pre-load documentation files from CLI args.
    pub fn set_initial_files(&mut self, files: Vec<PathBuf>) {
        self.initial_files = files;
    }

    /// Pre-select the quality file from CLI args.
    pub fn set_initial_quality_file(&mut self, file: Option<PathBuf>) {
        self.initial_quality_file = file;
    }

    /// Run the TUI application.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Set up terminal.
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal).await;

        // Restore terminal.
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        // Create the action channel.
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

        // Start the event handler with the shared input mode flag.
        let tick_rate = Duration::from_millis(self.config.ui.tick_ms.max(10));
        let event_handler =
            EventHandler::new(tx.clone(), tick_rate, self.input_mode_flag.clone());
        tokio::spawn(async move {
            event_handler.run().await;
        });

        info!(backend = %self.client.base_url(), "docsmith started");
        self.load_initial_files(&tx);
        self.sync_input_mode();

        // Main loop.
        loop {
            terminal.draw(|frame| {
                self.render(frame);
            })?;

            if let Some(action) = rx.recv().await {
                self.handle_action(&action, &tx);

                if self.should_quit {
                    break;
                }
            } else {
                break;
            }
        }

        Ok(())
    }

    fn load_initial_files(&mut self, tx: &mpsc::UnboundedSender<Action>) {
        let files = std::mem::take(&mut self.initial_files);
        if !files.is_empty() {
            self.handle_action(
                &Action::AddPaths {
                    paths: files,
                    target: IntakeTarget::Documentation,
                },
                tx,
            );
        }
        if let Some(file) = self.initial_quality_file.take() {
            self.handle_action(
                &Action::AddPaths {
                    paths: vec![file],
                    target: IntakeTarget::Quality,
                },
                tx,
            );
        }
    }

    /// Determine and set the correct input mode. Called after every action.
    fn sync_input_mode(&self) {
        event::set_input_mode(&self.input_mode_flag, self.current_input_mode());
    }

    /// What input mode should be active right now?
    fn current_input_mode(&self) -> InputMode {
        // Help takes every key while it is open.
        if self.help.visible {
            return InputMode::Normal;
        }
        if self.active_panel().wants_input() {
            InputMode::Editing
        } else {
            InputMode::Normal
        }
    }

    fn active_panel(&self) -> &dyn Component {
        match self.session.current_tab {
            Tab::Documentation => &self.docs,
            Tab::GitHub => &self.github,
            Tab::Quality => &self.quality,
        }
    }

    fn notify(&mut self, toast: Toast) {
        self.status_bar
            .handle_action(&Action::Notify(toast), &self.session);
    }

    fn reject(&mut self, err: ValidationError) {
        warn!(%err, "Request not sent");
        self.notify(Toast::error(err.to_string()));
    }

    /// Dispatch an action: global handling first, then the active panel,
    /// then overlays. Actions returned by the panel are dispatched in turn.
    fn handle_action(&mut self, action: &Action, tx: &mpsc::UnboundedSender<Action>) {
        // An open help overlay swallows keys; background events still flow.
        if self.help.visible
            && !matches!(
                action,
                Action::Tick | Action::Notify(_) | Action::Completed { .. } | Action::Quit
            )
        {
            self.help.handle_action(action, &self.session);
            self.sync_input_mode();
            return;
        }

        let tab = self.session.current_tab;
        match action {
            Action::Quit => {
                self.should_quit = true;
                return;
            }
            Action::GoToTab(target) => self.session.select_tab(*target),
            Action::NextTab => {
                if let Some(next) = tab.next() {
                    self.session.select_tab(next);
                }
            }
            Action::PrevTab => {
                if let Some(prev) = tab.prev() {
                    self.session.select_tab(prev);
                }
            }
            Action::TogglePurpose if tab == Tab::Documentation => {
                let purpose = self.session.toggle_purpose();
                self.notify(Toast::info(format!("Purpose: {}", purpose.label())));
            }
            Action::Download if tab == Tab::Documentation => self.download(),
            Action::Export => self.export(tab),
            Action::Analyze if tab == Tab::Quality => self.analyze(tx),
            Action::Disconnect if tab == Tab::GitHub && self.session.is_connected() => {
                self.session.disconnect();
                info!("Disconnected from GitHub");
                self.notify(Toast::info("Disconnected from GitHub"));
            }

            // ── Session mutations requested by panels ────────────
            Action::AddPaths { paths, target } => self.add_paths(paths, *target),
            Action::RemoveFile(index) => {
                if let Some(file) = self.session.remove_file(*index) {
                    self.notify(Toast::info(format!("Removed {}", file.name)));
                }
            }
            Action::RemoveQualityFile => {
                if let Some(file) = self.session.remove_quality_file() {
                    self.notify(Toast::info(format!("Removed {}", file.name)));
                }
            }
            Action::GenerateDocs {
                project_name,
                custom_instructions,
            } => self.generate_docs(project_name, custom_instructions, tx),
            Action::ConnectGithub { token } => self.connect_github(token, tx),
            Action::SelectRepo(repo) => {
                if let Some(repo) = self.session.select_repo(repo.clone()) {
                    self.list_branches(repo, tx);
                }
            }
            Action::SelectBranch(branch) => self.session.select_branch(branch.clone()),
            Action::CreatePullRequest {
                title,
                description,
                commit_message,
            } => self.create_pull_request(title, description, commit_message, tx),

            // ── Async results ────────────────────────────────────
            Action::Completed { ticket, outcome } => {
                self.session.loading.finish(*ticket);
                self.apply_outcome(outcome.clone(), tx);
            }
            _ => {}
        }

        // Forward to the active panel.
        let session = &self.session;
        let result = match session.current_tab {
            Tab::Documentation => self.docs.handle_action(action, session),
            Tab::GitHub => self.github.handle_action(action, session),
            Tab::Quality => self.quality.handle_action(action, session),
        };

        // Always forward to overlays and status bar.
        self.help.handle_action(action, &self.session);
        self.loading.handle_action(action, &self.session);
        self.status_bar.handle_action(action, &self.session);

        self.sync_input_mode();

        // Handle chained actions from panels.
        if let Some(chained) = result {
            self.handle_action(&chained, tx);
        }
    }

    fn add_paths(&mut self, paths: &[PathBuf], target: IntakeTarget) {
        // The quality tab analyzes one file: the first one dropped.
        let paths = match target {
            IntakeTarget::Documentation => paths,
            IntakeTarget::Quality => &paths[..paths.len().min(1)],
        };
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            match UploadedFile::from_path(path) {
                Ok(file) => files.push(file),
                Err(e) => {
                    warn!(path = %path.display(), "Could not read file: {}", e);
                    self.notify(Toast::error(format!(
                        "Could not read {}: {}",
                        path.display(),
                        e
                    )));
                }
            }
        }
        if files.is_empty() {
            return;
        }

        let added = self.session.add_files(files, target);
        match target {
            IntakeTarget::Documentation if added == 0 => {
                self.notify(Toast::info("Already in the list"));
            }
            IntakeTarget::Documentation => {
                self.notify(Toast::success(format!("Added {} file(s)", added)));
            }
            IntakeTarget::Quality => {
                if let Some(file) = &self.session.quality_file {
                    let message = format!("Selected {} for analysis", file.name);
                    self.notify(Toast::success(message));
                }
            }
        }
    }

    fn download(&mut self) {
        let Some(doc) = &self.session.generated else {
            self.reject(ValidationError::NothingGenerated);
            return;
        };
        match save_generated(&self.config.download_dir(), doc) {
            Ok(path) => self.notify(Toast::success(format!("Saved {}", path.display()))),
            Err(e) => {
                error!("Download failed: {}", e);
                self.notify(Toast::error(format!("Failed to save file: {}", e)));
            }
        }
    }

    /// Write an HTML preview of whatever the current tab shows.
    fn export(&mut self, tab: Tab) {
        let dir = self.config.download_dir();
        let saved = match tab {
            Tab::Documentation => {
                let Some(doc) = &self.session.generated else {
                    self.reject(ValidationError::NothingGenerated);
                    return;
                };
                let html = render_generated(&doc.content, doc.purpose);
                save_preview(&dir, preview_stem(doc), &html)
            }
            Tab::Quality => {
                let Some(report) = &self.session.quality_report else {
                    self.notify(Toast::error("Please analyze a file first"));
                    return;
                };
                save_preview(&dir, "quality_report", &quality_report_html(report))
            }
            Tab::GitHub => return,
        };
        match saved {
            Ok(path) => self.notify(Toast::success(format!("Exported {}", path.display()))),
            Err(e) => {
                error!("Export failed: {}", e);
                self.notify(Toast::error(format!("Failed to export preview: {}", e)));
            }
        }
    }

    // ── Async task spawners ─────────────────────────────────────

    /// Run one backend call on its own task, holding a loading ticket until
    /// its outcome comes back as `Action::Completed`.
    fn spawn_op<F, Fut>(&mut self, label: &str, tx: &mpsc::UnboundedSender<Action>, op: F)
    where
        F: FnOnce(Arc<DocsClient>) -> Fut,
        Fut: Future<Output = Outcome> + Send + 'static,
    {
        let ticket = self.session.loading.begin(label);
        let call = op(self.client.clone());
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = call.await;
            let _ = tx.send(Action::Completed { ticket, outcome });
        });
    }

    fn generate_docs(
        &mut self,
        project_name: &str,
        custom_instructions: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) {
        let request = match self.session.docs_request(project_name, custom_instructions) {
            Ok(request) => request,
            Err(err) => return self.reject(err),
        };
        info!(
            files = request.files.len(),
            purpose = request.purpose.as_str(),
            "Generating documentation"
        );
        self.spawn_op("Generating documentation", tx, move |client| async move {
            match client.generate_docs(&request).await {
                Ok(content) => Outcome::DocsGenerated {
                    content,
                    purpose: request.purpose,
                },
                Err(e) => Outcome::DocsFailed(format!("{:#}", e)),
            }
        });
    }

    fn analyze(&mut self, tx: &mpsc::UnboundedSender<Action>) {
        let file = match self.session.quality_request() {
            Ok(file) => file,
            Err(err) => return self.reject(err),
        };
        self.spawn_op("Analyzing code quality", tx, move |client| async move {
            match client.analyze_quality(&file).await {
                Ok(report) => Outcome::QualityAnalyzed(Box::new(report)),
                Err(e) => Outcome::QualityFailed(format!("{:#}", e)),
            }
        });
    }

    fn connect_github(&mut self, token: &str, tx: &mpsc::UnboundedSender<Action>) {
        let token = match self.session.connect_request(token) {
            Ok(token) => token,
            Err(err) => return self.reject(err),
        };
        self.spawn_op("Connecting to GitHub", tx, move |client| async move {
            match client.github_connect(&token).await {
                Ok(resp) if resp.success => Outcome::GithubConnected { token },
                Ok(resp) => Outcome::GithubRejected(resp.error),
                Err(e) => Outcome::GithubConnectFailed(format!("{:#}", e)),
            }
        });
    }

    fn list_repositories(&mut self, tx: &mpsc::UnboundedSender<Action>) {
        let Some(token) = self.session.token().map(str::to_string) else {
            return self.reject(ValidationError::NotConnected);
        };
        self.spawn_op("Loading repositories", tx, move |client| async move {
            match client.github_repos(&token).await {
                Ok(repos) => Outcome::ReposLoaded { token, repos },
                Err(e) => Outcome::ReposFailed(format!("{:#}", e)),
            }
        });
    }

    fn list_branches(&mut self, repo: String, tx: &mpsc::UnboundedSender<Action>) {
        let Some(token) = self.session.token().map(str::to_string) else {
            return self.reject(ValidationError::NotConnected);
        };
        self.spawn_op("Loading branches", tx, move |client| async move {
            match client.github_branches(&token, &repo).await {
                Ok(branches) => Outcome::BranchesLoaded { repo, branches },
                Err(e) => Outcome::BranchesFailed(format!("{:#}", e)),
            }
        });
    }

    fn create_pull_request(
        &mut self,
        title: &str,
        description: &str,
        commit_message: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) {
        let draft = match self.session.pull_request(title, description, commit_message) {
            Ok(draft) => draft,
            Err(err) => return self.reject(err),
        };
        let Some(token) = self.session.token().map(str::to_string) else {
            return self.reject(ValidationError::NotConnected);
        };
        info!(repo = %draft.repo, branch = %draft.branch, "Creating pull request");
        self.spawn_op("Creating pull request", tx, move |client| async move {
            match client.create_pull_request(&token, &draft).await {
                Ok(resp) if resp.success => Outcome::PrCreated { url: resp.pr_url },
                Ok(resp) => Outcome::PrRejected(resp.error),
                Err(e) => Outcome::PrFailed(format!("{:#}", e)),
            }
        });
    }

    /// Fold a finished backend call into the session and tell the user.
    fn apply_outcome(&mut self, outcome: Outcome, tx: &mpsc::UnboundedSender<Action>) {
        match outcome {
            Outcome::DocsGenerated { content, purpose } => {
                info!(bytes = content.len(), "Documentation generated");
                self.session.apply_generated(content, purpose);
                self.notify(Toast::success("Documentation generated"));
            }
            Outcome::DocsFailed(detail) => {
                error!("Documentation generation failed: {}", detail);
                self.notify(Toast::error("Failed to generate documentation"));
            }
            Outcome::QualityAnalyzed(report) => {
                info!(issues = report.issues().len(), "Quality analysis finished");
                self.session.apply_quality_report(*report);
                self.notify(Toast::success("Code quality analysis complete"));
            }
            Outcome::QualityFailed(detail) => {
                error!("Quality analysis failed: {}", detail);
                self.notify(Toast::error("Failed to analyze code quality"));
            }
            Outcome::GithubConnected { token } => {
                info!("Connected to GitHub");
                self.session.apply_connected(token);
                self.notify(Toast::success("Connected to GitHub"));
                self.list_repositories(tx);
            }
            Outcome::GithubRejected(message) => {
                warn!(?message, "GitHub rejected the token");
                self.notify(Toast::error(
                    message.unwrap_or_else(|| "Failed to connect to GitHub".to_string()),
                ));
            }
            Outcome::GithubConnectFailed(detail) => {
                error!("GitHub connect failed: {}", detail);
                self.notify(Toast::error("Failed to connect to GitHub"));
            }
            Outcome::ReposLoaded { token, repos } => {
                // Lists from a session that has since ended are dropped.
                if self.session.token() == Some(token.as_str()) {
                    info!(count = repos.len(), "Repositories loaded");
                    self.session.apply_repos(repos);
                } else {
                    debug!(count = repos.len(), "Dropping repositories from a previous connection");
                }
            }
            Outcome::ReposFailed(detail) => {
                error!("Listing repositories failed: {}", detail);
                self.notify(Toast::error("Failed to load repositories"));
            }
            Outcome::BranchesLoaded { repo, branches } => {
                self.session.apply_branches(&repo, branches);
            }
            Outcome::BranchesFailed(detail) => {
                error!("Listing branches failed: {}", detail);
                self.notify(Toast::error("Failed to load branches"));
            }
            Outcome::PrCreated { url } => {
                let message = match url {
                    Some(url) => format!("Pull request created: {}", url),
                    None => "Pull request created".to_string(),
                };
                info!("{}", message);
                self.notify(Toast::success(message));
            }
            Outcome::PrRejected(message) => {
                warn!(?message, "Backend refused the pull request");
                self.notify(Toast::error(
                    message.unwrap_or_else(|| "Failed to create pull request".to_string()),
                ));
            }
            Outcome::PrFailed(detail) => {
                error!("Pull request creation failed: {}", detail);
                self.notify(Toast::error("Failed to create pull request"));
            }
        }
    }

    /// Render the full UI.
    fn render(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(2), // Tab bar
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        self.render_tabs(frame, chunks[0]);

        self.active_panel().render(frame, chunks[1], &self.session);

        self.status_bar.render(frame, chunks[2], &self.session);

        // Overlays (rendered on top)
        self.loading.render(frame, area, &self.session);
        self.help.render(frame, area, &self.session);
    }

    /// Render the tab bar.
    fn render_tabs(&self, frame: &mut ratatui::Frame, area: Rect) {
        let current = self.session.current_tab;
        let titles: Vec<Line> = Tab::all()
            .iter()
            .map(|tab| {
                let style = if *tab == current {
                    Theme::tab_active()
                } else {
                    Theme::tab_inactive()
                };
                Line::from(Span::styled(tab.label(), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .select(current.index())
            .divider(Span::styled(" | ", Theme::dim()))
            .highlight_style(Theme::tab_active());

        frame.render_widget(tabs, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsmith_core::{Purpose, ToastKind};

    fn test_app() -> App {
        let http = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        // Nothing listens on the discard port, so every call fails fast.
        let client = DocsClient::with_http_client(http, "http://127.0.0.1:9/api".into());
        App::with_client(DocsmithConfig::default(), Arc::new(client))
    }

    fn toast(app: &App) -> Option<(ToastKind, String)> {
        app.status_bar
            .toast
            .as_ref()
            .map(|t| (t.kind, t.message.clone()))
    }

    fn add_doc_file(app: &mut App, name: &str) {
        app.session.add_files(
            vec![UploadedFile::new(name, format!("/src/{name}"), b"x".to_vec())],
            IntakeTarget::Documentation,
        );
    }

    #[test]
    fn readme_without_project_name_is_rejected_locally() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = test_app();
        add_doc_file(&mut app, "main.py");

        app.handle_action(
            &Action::GenerateDocs {
                project_name: "  ".into(),
                custom_instructions: String::new(),
            },
            &tx,
        );

        assert!(!app.session.loading.is_active());
        assert_eq!(
            toast(&app),
            Some((ToastKind::Error, "Please enter a project name".to_string()))
        );
    }

    #[test]
    fn generate_without_files_is_rejected_locally() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = test_app();
        app.handle_action(&Action::Generate, &tx);

        assert!(!app.session.loading.is_active());
        assert_eq!(
            toast(&app).map(|(_, m)| m),
            Some("Please upload at least one file".to_string())
        );
    }

    #[test]
    fn generated_content_is_stored_and_ticket_released() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = test_app();
        let ticket = app.session.loading.begin("Generating documentation");

        app.handle_action(
            &Action::Completed {
                ticket,
                outcome: Outcome::DocsGenerated {
                    content: "# Title".into(),
                    purpose: Purpose::Readme,
                },
            },
            &tx,
        );

        assert!(!app.session.loading.is_active());
        assert_eq!(
            app.session.generated.as_ref().map(|d| d.content.as_str()),
            Some("# Title")
        );
        assert!(app.session.visibility().can_download);
    }

    #[test]
    fn failed_generation_keeps_previous_content() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = test_app();
        app.session.apply_generated("old".into(), Purpose::Readme);
        let ticket = app.session.loading.begin("Generating documentation");

        app.handle_action(
            &Action::Completed {
                ticket,
                outcome: Outcome::DocsFailed("500".into()),
            },
            &tx,
        );

        assert_eq!(
            app.session.generated.as_ref().map(|d| d.content.as_str()),
            Some("old")
        );
        assert_eq!(
            toast(&app),
            Some((ToastKind::Error, "Failed to generate documentation".to_string()))
        );
    }

    #[test]
    fn loading_stays_on_until_every_call_finishes() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = test_app();
        let first = app.session.loading.begin("Generating documentation");
        let second = app.session.loading.begin("Analyzing code quality");

        app.handle_action(
            &Action::Completed {
                ticket: second,
                outcome: Outcome::QualityFailed("timeout".into()),
            },
            &tx,
        );
        assert!(app.session.visibility().show_loading);

        app.handle_action(
            &Action::Completed {
                ticket: first,
                outcome: Outcome::DocsFailed("timeout".into()),
            },
            &tx,
        );
        assert!(!app.session.visibility().show_loading);
    }

    #[test]
    fn pr_success_toast_contains_url() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = test_app();
        let ticket = app.session.loading.begin("Creating pull request");

        app.handle_action(
            &Action::Completed {
                ticket,
                outcome: Outcome::PrCreated {
                    url: Some("https://x/1".into()),
                },
            },
            &tx,
        );

        let (kind, message) = toast(&app).unwrap();
        assert_eq!(kind, ToastKind::Success);
        assert!(message.contains("https://x/1"));
    }

    #[test]
    fn rejected_token_shows_backend_message() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = test_app();
        let ticket = app.session.loading.begin("Connecting to GitHub");

        app.handle_action(
            &Action::Completed {
                ticket,
                outcome: Outcome::GithubRejected(Some("Bad credentials".into())),
            },
            &tx,
        );

        assert!(!app.session.is_connected());
        assert_eq!(toast(&app).map(|(_, m)| m), Some("Bad credentials".into()));
    }

    #[test]
    fn disconnect_only_applies_on_github_tab() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = test_app();
        app.session.apply_connected("ghp_abc".into());
        app.session.apply_generated("# Demo".into(), Purpose::Readme);

        app.handle_action(&Action::Disconnect, &tx);
        assert!(app.session.is_connected());

        app.handle_action(&Action::GoToTab(Tab::GitHub), &tx);
        assert!(app.session.visibility().show_pr_form);
        app.handle_action(&Action::Disconnect, &tx);

        assert!(!app.session.is_connected());
        assert!(app.session.token().is_none());
        assert!(!app.session.visibility().show_pr_form);
        assert!(app.session.visibility().show_token_form);
    }

    #[test]
    fn stale_branch_list_is_dropped() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = test_app();
        app.session.apply_connected("ghp_abc".into());
        app.session.select_repo(Some("acme/web".into()));
        let ticket = app.session.loading.begin("Loading branches");

        app.handle_action(
            &Action::Completed {
                ticket,
                outcome: Outcome::BranchesLoaded {
                    repo: "acme/api".into(),
                    branches: vec!["main".into()],
                },
            },
            &tx,
        );

        assert!(app.session.github.branches.is_empty());
    }

    #[test]
    fn purpose_toggles_only_on_docs_tab() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = test_app();
        app.handle_action(&Action::TogglePurpose, &tx);
        assert_eq!(app.session.purpose, Purpose::InlineComments);

        app.handle_action(&Action::GoToTab(Tab::Quality), &tx);
        app.handle_action(&Action::TogglePurpose, &tx);
        assert_eq!(app.session.purpose, Purpose::InlineComments);
    }

    #[test]
    fn dropped_quality_files_keep_only_the_first() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = ["a.py", "b.py", "c.py"]
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                std::fs::write(&path, "print(1)\n").unwrap();
                path
            })
            .collect();
        let mut app = test_app();

        app.handle_action(
            &Action::AddPaths {
                paths,
                target: IntakeTarget::Quality,
            },
            &tx,
        );

        assert_eq!(
            app.session.quality_file.as_ref().map(|f| f.name.as_str()),
            Some("a.py")
        );
        assert!(app.session.visibility().can_analyze);
    }

    #[test]
    fn unreadable_first_quality_file_keeps_previous_selection() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let dir = tempfile::tempdir().unwrap();
        let second = dir.path().join("second.py");
        std::fs::write(&second, "print(2)\n").unwrap();
        let mut app = test_app();
        app.session.add_files(
            vec![UploadedFile::new("old.py", "/src/old.py", b"x".to_vec())],
            IntakeTarget::Quality,
        );

        app.handle_action(
            &Action::AddPaths {
                paths: vec![dir.path().join("first_missing.py"), second],
                target: IntakeTarget::Quality,
            },
            &tx,
        );

        assert_eq!(
            app.session.quality_file.as_ref().map(|f| f.name.as_str()),
            Some("old.py")
        );
        let (kind, message) = toast(&app).unwrap();
        assert_eq!(kind, ToastKind::Error);
        assert!(message.contains("first_missing.py"));
    }

    #[test]
    fn duplicate_drop_reports_nothing_added() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.py");
        std::fs::write(&path, "print(1)\n").unwrap();
        let mut app = test_app();
        let add = Action::AddPaths {
            paths: vec![path],
            target: IntakeTarget::Documentation,
        };

        app.handle_action(&add, &tx);
        assert_eq!(toast(&app).map(|(k, _)| k), Some(ToastKind::Success));

        app.handle_action(&add, &tx);
        assert_eq!(app.session.uploaded_files.len(), 1);
        assert_eq!(
            toast(&app),
            Some((ToastKind::Info, "Already in the list".to_string()))
        );
    }

    #[test]
    fn repos_from_an_earlier_connection_are_dropped() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = test_app();
        app.session.apply_connected("ghp_old".into());
        app.session.disconnect();
        app.session.apply_connected("ghp_new".into());
        let ticket = app.session.loading.begin("Loading repositories");

        app.handle_action(
            &Action::Completed {
                ticket,
                outcome: Outcome::ReposLoaded {
                    token: "ghp_old".into(),
                    repos: vec!["acme/private".into()],
                },
            },
            &tx,
        );
        assert!(app.session.github.repos.is_empty());

        let ticket = app.session.loading.begin("Loading repositories");
        app.handle_action(
            &Action::Completed {
                ticket,
                outcome: Outcome::ReposLoaded {
                    token: "ghp_new".into(),
                    repos: vec!["acme/web".into()],
                },
            },
            &tx,
        );
        assert_eq!(app.session.github.repos, vec!["acme/web".to_string()]);
    }

    #[test]
    fn download_writes_file_named_by_purpose() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let dir = tempfile::tempdir().unwrap();
        let mut config = DocsmithConfig::default();
        config.output.download_dir = Some(dir.path().to_path_buf());
        let mut app = App::with_client(config, test_app().client);
        app.session
            .apply_generated("# commented".into(), Purpose::InlineComments);

        app.handle_action(&Action::Download, &tx);

        let saved = std::fs::read_to_string(dir.path().join("commented_code.txt")).unwrap();
        assert_eq!(saved, "# commented");
    }

    #[tokio::test]
    async fn unreachable_backend_reports_generic_failure() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = test_app();
        add_doc_file(&mut app, "main.py");
        app.session.set_purpose(Purpose::InlineComments);

        app.handle_action(
            &Action::GenerateDocs {
                project_name: String::new(),
                custom_instructions: String::new(),
            },
            &tx,
        );
        assert!(app.session.loading.is_active());

        let completed = rx.recv().await.unwrap();
        assert!(matches!(
            completed,
            Action::Completed {
                outcome: Outcome::DocsFailed(_),
                ..
            }
        ));
        app.handle_action(&completed, &tx);

        assert!(!app.session.loading.is_active());
        assert!(app.session.generated.is_none());
        assert_eq!(
            toast(&app).map(|(_, m)| m),
            Some("Failed to generate documentation".to_string())
        );
    }

    #[tokio::test]
    async fn accepted_token_connects_and_lists_repositories() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = test_app();
        let ticket = app.session.loading.begin("Connecting to GitHub");

        app.handle_action(
            &Action::Completed {
                ticket,
                outcome: Outcome::GithubConnected {
                    token: "ghp_abc".into(),
                },
            },
            &tx,
        );

        assert_eq!(app.session.token(), Some("ghp_abc"));
        assert_eq!(app.session.loading.current_label(), Some("Loading repositories"));
    }
}
