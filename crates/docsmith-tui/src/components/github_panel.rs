//! GitHub tab: connect with a token, pick a repository and branch, and open
//! a pull request with the generated documentation.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use docsmith_core::{Session, Visibility};

use crate::action::Action;
use crate::components::text_input::TextInput;
use crate::components::{step_cursor, Component};
use crate::theme::Theme;

/// First entry of the repository list; selecting it selects nothing.
pub const REPO_PLACEHOLDER: &str = "— choose a repository —";
/// First entry of the branch list.
pub const BRANCH_PLACEHOLDER: &str = "— choose a branch —";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GithubFocus {
    Token,
    Repos,
    Branches,
    Title,
    Description,
    CommitMessage,
}

const PR_FORM_ORDER: [GithubFocus; 5] = [
    GithubFocus::Repos,
    GithubFocus::Branches,
    GithubFocus::Title,
    GithubFocus::Description,
    GithubFocus::CommitMessage,
];

impl GithubFocus {
    fn is_text(self) -> bool {
        !matches!(self, GithubFocus::Repos | GithubFocus::Branches)
    }
}

pub struct GithubPanel {
    pub focus: GithubFocus,
    editing: bool,
    pub token: TextInput,
    pub title: TextInput,
    pub description: TextInput,
    pub commit_message: TextInput,
    /// Row in the repository list; 0 is the placeholder.
    repo_cursor: usize,
    branch_cursor: usize,
}

impl GithubPanel {
    pub fn new() -> Self {
        Self {
            focus: GithubFocus::Token,
            editing: false,
            token: TextInput::masked(),
            title: TextInput::single_line(),
            description: TextInput::multi_line(),
            commit_message: TextInput::single_line(),
            repo_cursor: 0,
            branch_cursor: 0,
        }
    }

    /// Keep focus on a widget that is actually on screen.
    fn sync_focus(&mut self, visibility: &Visibility) {
        if visibility.show_token_form {
            self.focus = GithubFocus::Token;
        } else if self.focus == GithubFocus::Token {
            self.token.clear();
            self.focus = GithubFocus::Repos;
            self.editing = false;
        }
        if !visibility.show_token_form && !visibility.show_pr_form {
            self.editing = false;
        }
    }

    fn move_focus(&mut self, forward: bool, visibility: &Visibility) {
        if !visibility.show_pr_form {
            return;
        }
        let len = PR_FORM_ORDER.len();
        let pos = PR_FORM_ORDER
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        let next = if forward {
            (pos + 1) % len
        } else {
            (pos + len - 1) % len
        };
        self.focus = PR_FORM_ORDER[next];
        self.editing = self.editing && self.focus.is_text();
    }

    fn focused_text(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            GithubFocus::Token => Some(&mut self.token),
            GithubFocus::Title => Some(&mut self.title),
            GithubFocus::Description => Some(&mut self.description),
            GithubFocus::CommitMessage => Some(&mut self.commit_message),
            GithubFocus::Repos | GithubFocus::Branches => None,
        }
    }

    fn submit(&mut self) -> Action {
        self.editing = false;
        if self.focus == GithubFocus::Token {
            Action::ConnectGithub {
                token: self.token.value().to_string(),
            }
        } else {
            Action::CreatePullRequest {
                title: self.title.value().to_string(),
                description: self.description.value().to_string(),
                commit_message: self.commit_message.value().to_string(),
            }
        }
    }

    /// Choice under the cursor, `None` for the placeholder row.
    fn choice(entries: &[String], cursor: usize) -> Option<String> {
        cursor.checked_sub(1).and_then(|i| entries.get(i)).cloned()
    }

    fn handle_editing(&mut self, action: &Action, visibility: &Visibility) -> Option<Action> {
        match action {
            Action::Cancel => {
                self.editing = false;
                None
            }
            Action::FocusNext => {
                self.move_focus(true, visibility);
                None
            }
            Action::FocusPrev => {
                self.move_focus(false, visibility);
                None
            }
            Action::SubmitForm => Some(self.submit()),
            Action::NewlineInput if self.focus == GithubFocus::Token => Some(self.submit()),
            Action::NewlineInput if self.focus == GithubFocus::Title => {
                self.focus = GithubFocus::Description;
                None
            }
            Action::ScrollUp => {
                if let Some(field) = self.focused_text() {
                    field.cursor_up();
                }
                None
            }
            Action::ScrollDown => {
                if let Some(field) = self.focused_text() {
                    field.cursor_down();
                }
                None
            }
            edit => {
                if let Some(field) = self.focused_text() {
                    field.handle_edit(edit);
                }
                None
            }
        }
    }

    fn handle_normal(
        &mut self,
        action: &Action,
        session: &Session,
        visibility: &Visibility,
    ) -> Option<Action> {
        let github = &session.github;
        let repo_rows = github.repos.len() + 1;
        let branch_rows = github.branches.len() + 1;
        self.repo_cursor = self.repo_cursor.min(repo_rows - 1);
        self.branch_cursor = self.branch_cursor.min(branch_rows - 1);

        match action {
            Action::FocusNext => {
                self.move_focus(true, visibility);
                None
            }
            Action::FocusPrev => {
                self.move_focus(false, visibility);
                None
            }
            Action::StartEditing => {
                if visibility.show_token_form || visibility.show_pr_form {
                    if !self.focus.is_text() {
                        self.focus = GithubFocus::Title;
                    }
                    self.editing = true;
                }
                None
            }
            Action::ScrollUp | Action::ScrollDown => {
                let down = matches!(action, Action::ScrollDown);
                match self.focus {
                    GithubFocus::Repos => {
                        self.repo_cursor = step_cursor(self.repo_cursor, repo_rows, down)
                    }
                    GithubFocus::Branches => {
                        self.branch_cursor = step_cursor(self.branch_cursor, branch_rows, down)
                    }
                    _ => {}
                }
                None
            }
            Action::Confirm => match self.focus {
                GithubFocus::Repos => {
                    self.branch_cursor = 0;
                    Some(Action::SelectRepo(Self::choice(
                        &github.repos,
                        self.repo_cursor,
                    )))
                }
                GithubFocus::Branches => Some(Action::SelectBranch(Self::choice(
                    &github.branches,
                    self.branch_cursor,
                ))),
                _ => {
                    self.editing = visibility.show_token_form || visibility.show_pr_form;
                    None
                }
            },
            _ => None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_choice_list(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        placeholder: &str,
        entries: &[String],
        selected: Option<&str>,
        cursor: usize,
        focused: bool,
    ) {
        let block = Block::default()
            .title(title.to_string())
            .title_style(if focused { Theme::key_hint() } else { Theme::muted() })
            .borders(Borders::ALL)
            .border_style(if focused {
                Theme::focused_border()
            } else {
                Theme::border()
            });

        let rows = std::iter::once(placeholder).chain(entries.iter().map(String::as_str));
        let items: Vec<ListItem> = rows
            .enumerate()
            .map(|(i, name)| {
                let chosen = i > 0 && selected == Some(name);
                let style = if chosen {
                    Theme::selected()
                } else if i == 0 {
                    Theme::dim()
                } else {
                    Theme::normal()
                };
                let marker = if chosen { "● " } else { "  " };
                let item = ListItem::new(Line::from(Span::styled(
                    format!("{}{}", marker, name),
                    style,
                )));
                if focused && i == cursor {
                    item.style(Theme::selection())
                } else {
                    item
                }
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }

    fn render_token_form(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

        let intro = Paragraph::new(Span::styled(
            "Connect a GitHub personal access token to open pull requests.",
            Theme::muted(),
        ))
        .wrap(Wrap { trim: true });
        frame.render_widget(intro, rows[0]);

        self.token.render(
            frame,
            rows[1],
            self.editing,
            " GitHub token ",
            "press e to enter a token",
        );
        let hints: &[(&str, &str)] = if self.editing {
            &[("Enter", "connect"), ("Esc", "done")]
        } else {
            &[("e", "edit token")]
        };
        frame.render_widget(Paragraph::new(hint_line(hints)), rows[2]);
    }

    fn render_pr_form(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

        frame.render_widget(Paragraph::new(connected_line(session)), rows[0]);

        let lists =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[1]);
        let github = &session.github;
        self.render_choice_list(
            frame,
            lists[0],
            " Repository ",
            REPO_PLACEHOLDER,
            &github.repos,
            github.selected_repo.as_deref(),
            self.repo_cursor,
            self.focus == GithubFocus::Repos,
        );
        self.render_choice_list(
            frame,
            lists[1],
            " Branch ",
            BRANCH_PLACEHOLDER,
            &github.branches,
            github.selected_branch.as_deref(),
            self.branch_cursor,
            self.focus == GithubFocus::Branches,
        );

        let editing_on = |focus: GithubFocus| self.editing && self.focus == focus;
        self.title.render(
            frame,
            rows[2],
            editing_on(GithubFocus::Title),
            " PR title ",
            "required",
        );
        self.description.render(
            frame,
            rows[3],
            editing_on(GithubFocus::Description),
            " PR description ",
            "optional",
        );
        self.commit_message.render(
            frame,
            rows[4],
            editing_on(GithubFocus::CommitMessage),
            " Commit message ",
            "required",
        );

        let hints: &[(&str, &str)] = if self.editing {
            &[("Esc", "done"), ("Tab", "next"), ("Ctrl+S", "create PR")]
        } else {
            &[
                ("Tab", "focus"),
                ("Enter", "choose / edit"),
                ("e", "edit"),
                ("D", "disconnect"),
            ]
        };
        frame.render_widget(Paragraph::new(hint_line(hints)), rows[5]);
    }
}

impl Default for GithubPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for GithubPanel {
    fn handle_action(&mut self, action: &Action, session: &Session) -> Option<Action> {
        let visibility = session.visibility();
        self.sync_focus(&visibility);
        if self.wants_input() {
            self.handle_editing(action, &visibility)
        } else {
            self.handle_normal(action, session, &visibility)
        }
    }

    fn wants_input(&self) -> bool {
        self.editing && self.focus.is_text()
    }

    fn render(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let visibility = session.visibility();
        let block = Block::default()
            .title(" GitHub ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if visibility.show_token_form {
            self.render_token_form(frame, inner);
        } else if visibility.show_pr_form {
            self.render_pr_form(frame, inner, session);
        } else {
            let lines = vec![
                connected_line(session),
                Line::from(""),
                Line::from(Span::styled(
                    "Generate documentation on the Docs tab to open a pull request.",
                    Theme::muted(),
                )),
            ];
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
        }
    }
}

fn connected_line(session: &Session) -> Line<'static> {
    Line::from(vec![
        Span::styled("● ", Theme::toast(docsmith_core::ToastKind::Success)),
        Span::styled(
            format!("Connected ({} repositories)", session.github.repos.len()),
            Theme::normal(),
        ),
        Span::styled("   D", Theme::key_hint()),
        Span::styled(" disconnect", Theme::dim()),
    ])
}

fn hint_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, desc) in hints {
        spans.push(Span::styled(key.to_string(), Theme::key_hint()));
        spans.push(Span::styled(format!(" {}  ", desc), Theme::dim()));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsmith_core::Purpose;

    fn ready_session() -> Session {
        let mut session = Session::new();
        session.apply_connected("ghp_abc".into());
        session.apply_repos(vec!["acme/api".into(), "acme/web".into()]);
        session.apply_generated("# Demo".into(), Purpose::Readme);
        session
    }

    #[test]
    fn enter_in_token_field_connects() {
        let session = Session::new();
        let mut panel = GithubPanel::new();
        panel.handle_action(&Action::StartEditing, &session);
        for c in "ghp_x".chars() {
            panel.handle_action(&Action::CharInput(c), &session);
        }
        assert!(matches!(
            panel.handle_action(&Action::NewlineInput, &session),
            Some(Action::ConnectGithub { ref token }) if token == "ghp_x"
        ));
    }

    #[test]
    fn placeholder_row_selects_nothing() {
        let session = ready_session();
        let mut panel = GithubPanel::new();
        panel.handle_action(&Action::Tick, &session);
        assert_eq!(panel.focus, GithubFocus::Repos);

        assert!(matches!(
            panel.handle_action(&Action::Confirm, &session),
            Some(Action::SelectRepo(None))
        ));
        panel.handle_action(&Action::ScrollDown, &session);
        panel.handle_action(&Action::ScrollDown, &session);
        assert!(matches!(
            panel.handle_action(&Action::Confirm, &session),
            Some(Action::SelectRepo(Some(ref repo))) if repo == "acme/web"
        ));
    }

    #[test]
    fn connecting_clears_the_token_field() {
        let mut session = Session::new();
        let mut panel = GithubPanel::new();
        panel.token.set_value("ghp_secret");
        session.apply_connected("ghp_secret".into());
        panel.handle_action(&Action::Tick, &session);
        assert!(panel.token.is_empty());
    }

    #[test]
    fn submit_builds_pull_request_action() {
        let session = ready_session();
        let mut panel = GithubPanel::new();
        panel.title.set_value("Add README");
        panel.commit_message.set_value("docs: add README");
        panel.handle_action(&Action::StartEditing, &session);

        match panel.handle_action(&Action::SubmitForm, &session) {
            Some(Action::CreatePullRequest {
                title,
                description,
                commit_message,
            }) => {
                assert_eq!(title, "Add README");
                assert!(description.is_empty());
                assert_eq!(commit_message, "docs: add README");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
