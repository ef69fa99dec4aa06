//! Documentation tab: upload files, describe the project, generate and
//! preview the result.
//!
//! - File list: `d` removes the highlighted file
//! - Path field: type or drop paths, Tab accepts a suggestion, Enter adds
//! - Project name and instructions feed the generate request
//! - Output pane previews the last generated document

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use docsmith_core::intake::{parse_dropped_paths, IntakeTarget};
use docsmith_core::request::Purpose;
use docsmith_core::Session;

use crate::action::Action;
use crate::components::markdown::generated_lines;
use crate::components::path_input::PathInput;
use crate::components::text_input::TextInput;
use crate::components::{step_cursor, Component};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocsFocus {
    Files,
    Path,
    ProjectName,
    Instructions,
    Output,
}

impl DocsFocus {
    const ORDER: [DocsFocus; 5] = [
        DocsFocus::Files,
        DocsFocus::Path,
        DocsFocus::ProjectName,
        DocsFocus::Instructions,
        DocsFocus::Output,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    fn is_text(self) -> bool {
        matches!(
            self,
            DocsFocus::Path | DocsFocus::ProjectName | DocsFocus::Instructions
        )
    }
}

pub struct DocsPanel {
    pub focus: DocsFocus,
    /// Whether the focused text field is capturing keys.
    editing: bool,
    pub path: PathInput,
    pub project_name: TextInput,
    pub instructions: TextInput,
    /// Highlighted row in the file list.
    file_cursor: usize,
    output_scroll: u16,
}

impl DocsPanel {
    pub fn new() -> Self {
        Self {
            focus: DocsFocus::Path,
            editing: false,
            path: PathInput::new(),
            project_name: TextInput::single_line(),
            instructions: TextInput::multi_line(),
            file_cursor: 0,
            output_scroll: 0,
        }
    }

    fn generate(&self) -> Action {
        Action::GenerateDocs {
            project_name: self.project_name.value().to_string(),
            custom_instructions: self.instructions.value().to_string(),
        }
    }

    fn add_typed_paths(&mut self) -> Option<Action> {
        let paths = self.path.take_paths();
        if paths.is_empty() {
            return None;
        }
        Some(Action::AddPaths {
            paths,
            target: IntakeTarget::Documentation,
        })
    }

    fn move_focus(&mut self, forward: bool) {
        self.path.dismiss();
        self.focus = if forward {
            self.focus.next()
        } else {
            self.focus.prev()
        };
        self.editing = self.editing && self.focus.is_text();
    }

    fn focused_text(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            DocsFocus::Path => Some(&mut self.path.input),
            DocsFocus::ProjectName => Some(&mut self.project_name),
            DocsFocus::Instructions => Some(&mut self.instructions),
            DocsFocus::Files | DocsFocus::Output => None,
        }
    }

    fn handle_editing(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::Cancel => {
                if self.path.has_suggestions() && self.focus == DocsFocus::Path {
                    self.path.dismiss();
                } else {
                    self.editing = false;
                }
                None
            }
            Action::FocusNext if self.focus == DocsFocus::Path && self.path.has_suggestions() => {
                if self.path.accept_suggestion() {
                    self.add_typed_paths()
                } else {
                    None
                }
            }
            Action::FocusNext => {
                self.move_focus(true);
                None
            }
            Action::FocusPrev => {
                self.move_focus(false);
                None
            }
            Action::ScrollDown if self.focus == DocsFocus::Path => {
                self.path.highlight_next();
                None
            }
            Action::ScrollUp if self.focus == DocsFocus::Path => {
                self.path.highlight_prev();
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
            Action::NewlineInput if self.focus == DocsFocus::Path => {
                if self.path.has_highlight() && !self.path.accept_suggestion() {
                    return None;
                }
                self.add_typed_paths()
            }
            Action::SubmitForm if self.focus == DocsFocus::Path => self.add_typed_paths(),
            Action::NewlineInput if self.focus == DocsFocus::ProjectName => {
                self.focus = DocsFocus::Instructions;
                None
            }
            Action::SubmitForm => {
                self.editing = false;
                Some(self.generate())
            }
            edit => {
                let focus = self.focus;
                if let Some(field) = self.focused_text() {
                    field.handle_edit(edit);
                }
                if focus == DocsFocus::Path {
                    self.path.refresh_suggestions();
                }
                None
            }
        }
    }

    fn handle_normal(&mut self, action: &Action, session: &Session) -> Option<Action> {
        let file_count = session.uploaded_files.len();
        self.file_cursor = self.file_cursor.min(file_count.saturating_sub(1));

        match action {
            Action::FocusNext => {
                self.move_focus(true);
                None
            }
            Action::FocusPrev => {
                self.move_focus(false);
                None
            }
            Action::StartEditing => {
                if !self.focus.is_text() {
                    self.focus = DocsFocus::Path;
                }
                self.editing = true;
                None
            }
            Action::Confirm if self.focus.is_text() => {
                self.editing = true;
                None
            }
            Action::ScrollUp | Action::ScrollDown => {
                let down = matches!(action, Action::ScrollDown);
                match self.focus {
                    DocsFocus::Files => {
                        self.file_cursor = step_cursor(self.file_cursor, file_count, down)
                    }
                    DocsFocus::Output => self.scroll_output(down, 1),
                    _ => {}
                }
                None
            }
            Action::PageUp => {
                self.scroll_output(false, 10);
                None
            }
            Action::PageDown => {
                self.scroll_output(true, 10);
                None
            }
            Action::RemoveSelected if self.focus == DocsFocus::Files && file_count > 0 => {
                Some(Action::RemoveFile(self.file_cursor))
            }
            Action::Generate => Some(self.generate()),
            Action::PasteBulk(text) => {
                let paths = parse_dropped_paths(text);
                if paths.is_empty() {
                    return None;
                }
                Some(Action::AddPaths {
                    paths,
                    target: IntakeTarget::Documentation,
                })
            }
            _ => None,
        }
    }

    fn scroll_output(&mut self, down: bool, by: u16) {
        self.output_scroll = if down {
            self.output_scroll.saturating_add(by)
        } else {
            self.output_scroll.saturating_sub(by)
        };
    }

    fn render_files(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let focused = self.focus == DocsFocus::Files;
        let block = Block::default()
            .title(format!(" Files ({}) ", session.uploaded_files.len()))
            .title_style(if focused { Theme::key_hint() } else { Theme::muted() })
            .borders(Borders::ALL)
            .border_style(if focused {
                Theme::focused_border()
            } else {
                Theme::border()
            });

        if session.uploaded_files.is_empty() {
            let empty = Paragraph::new(Span::styled(
                "No files yet. Add paths below or drop files onto the terminal.",
                Theme::dim(),
            ))
            .wrap(Wrap { trim: true })
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = session
            .uploaded_files
            .iter()
            .enumerate()
            .map(|(i, file)| {
                let line = Line::from(vec![
                    Span::styled(format!(" {} ", file.name), Theme::normal()),
                    Span::styled(format!("({})", file.size_label()), Theme::dim()),
                ]);
                let item = ListItem::new(line);
                if focused && i == self.file_cursor {
                    item.style(Theme::selection())
                } else {
                    item
                }
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }

    fn render_output(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let focused = self.focus == DocsFocus::Output;
        let title = match &session.generated {
            Some(doc) => format!(
                " Output: {} ({}) ",
                doc.purpose.download_name(),
                doc.generated_at.format("%H:%M:%S")
            ),
            None => " Output ".to_string(),
        };
        let block = Block::default()
            .title(title)
            .title_style(if focused { Theme::key_hint() } else { Theme::muted() })
            .borders(Borders::ALL)
            .border_style(if focused {
                Theme::focused_border()
            } else {
                Theme::border()
            });

        let paragraph = match &session.generated {
            Some(doc) => Paragraph::new(generated_lines(&doc.content, doc.purpose))
                .wrap(Wrap { trim: false })
                .scroll((self.output_scroll, 0)),
            None => Paragraph::new(Span::styled(
                "Generated documentation will appear here. Press g to generate.",
                Theme::dim(),
            ))
            .wrap(Wrap { trim: true }),
        };

        frame.render_widget(paragraph.block(block), area);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let purpose_span = |purpose: Purpose| {
            if purpose == session.purpose {
                Span::styled(format!("[{}]", purpose.label()), Theme::selected())
            } else {
                Span::styled(format!(" {} ", purpose.label()), Theme::dim())
            }
        };

        let mut spans = vec![
            Span::styled(" Purpose ", Theme::muted()),
            purpose_span(Purpose::Readme),
            Span::raw(" "),
            purpose_span(Purpose::InlineComments),
            Span::styled("   ", Theme::dim()),
        ];

        let hints: &[(&str, &str)] = if self.editing {
            &[("Esc", "done"), ("Tab", "next"), ("Ctrl+S", "submit")]
        } else {
            &[
                ("e", "edit"),
                ("p", "purpose"),
                ("g", "generate"),
                ("s", "save"),
                ("x", "export"),
            ]
        };
        for (key, desc) in hints {
            spans.push(Span::styled(*key, Theme::key_hint()));
            spans.push(Span::styled(format!(" {}  ", desc), Theme::dim()));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Default for DocsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for DocsPanel {
    fn handle_action(&mut self, action: &Action, session: &Session) -> Option<Action> {
        if self.wants_input() {
            self.handle_editing(action)
        } else {
            self.handle_normal(action, session)
        }
    }

    fn wants_input(&self) -> bool {
        self.editing && self.focus.is_text()
    }

    fn render(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let columns =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(area);

        let name_height = if session.purpose == Purpose::Readme { 3 } else { 0 };
        let left = Layout::vertical([
            Constraint::Min(5),                            // File list
            Constraint::Length(3),                         // Path input
            Constraint::Length(self.path.suggestion_height()), // Suggestions
            Constraint::Length(name_height),               // Project name
            Constraint::Length(6),                         // Instructions
            Constraint::Length(1),                         // Purpose and hints
        ])
        .split(columns[0]);

        self.render_files(frame, left[0], session);

        let editing_on = |focus: DocsFocus| self.editing && self.focus == focus;
        self.path
            .render(frame, left[1], editing_on(DocsFocus::Path), " Add files ");
        if self.focus == DocsFocus::Path {
            self.path.render_suggestions(frame, left[2]);
        }
        if name_height > 0 {
            self.project_name.render(
                frame,
                left[3],
                editing_on(DocsFocus::ProjectName),
                " Project name ",
                "required for README",
            );
        }
        self.instructions.render(
            frame,
            left[4],
            editing_on(DocsFocus::Instructions),
            " Custom instructions ",
            "optional",
        );
        self.render_hints(frame, left[5], session);

        self.render_output(frame, columns[1], session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use docsmith_core::UploadedFile;

    fn type_text(panel: &mut DocsPanel, session: &Session, text: &str) {
        for c in text.chars() {
            panel.handle_action(&Action::CharInput(c), session);
        }
    }

    #[test]
    fn generate_carries_form_values() {
        let session = Session::new();
        let mut panel = DocsPanel::new();
        panel.focus = DocsFocus::ProjectName;
        panel.handle_action(&Action::StartEditing, &session);
        type_text(&mut panel, &session, "Demo");
        panel.handle_action(&Action::Cancel, &session);

        match panel.handle_action(&Action::Generate, &session) {
            Some(Action::GenerateDocs {
                project_name,
                custom_instructions,
            }) => {
                assert_eq!(project_name, "Demo");
                assert!(custom_instructions.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn letters_are_typed_while_editing() {
        let session = Session::new();
        let mut panel = DocsPanel::new();
        panel.focus = DocsFocus::ProjectName;
        panel.handle_action(&Action::StartEditing, &session);
        assert!(panel.wants_input());
        assert!(panel.handle_action(&Action::CharInput('g'), &session).is_none());
        assert_eq!(panel.project_name.value(), "g");
    }

    #[test]
    fn enter_on_path_field_adds_files() {
        let session = Session::new();
        let mut panel = DocsPanel::new();
        panel.handle_action(&Action::StartEditing, &session);
        panel.path.input.set_value("/nonexistent/dir/main.py");

        match panel.handle_action(&Action::SubmitForm, &session) {
            Some(Action::AddPaths { paths, target }) => {
                assert_eq!(paths, vec![PathBuf::from("/nonexistent/dir/main.py")]);
                assert_eq!(target, IntakeTarget::Documentation);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(panel.path.input.is_empty());
    }

    #[test]
    fn paste_in_normal_mode_is_a_drop() {
        let session = Session::new();
        let mut panel = DocsPanel::new();
        let action = panel.handle_action(&Action::PasteBulk("'/tmp/a b.rs'".into()), &session);
        assert!(matches!(
            action,
            Some(Action::AddPaths { ref paths, .. }) if paths == &vec![PathBuf::from("/tmp/a b.rs")]
        ));
    }

    #[test]
    fn remove_selected_targets_highlighted_file() {
        let mut session = Session::new();
        session.add_files(
            vec![
                UploadedFile::new("a.py", "/a.py", vec![]),
                UploadedFile::new("b.py", "/b.py", vec![]),
            ],
            IntakeTarget::Documentation,
        );
        let mut panel = DocsPanel::new();
        panel.focus = DocsFocus::Files;
        panel.handle_action(&Action::ScrollDown, &session);

        assert!(matches!(
            panel.handle_action(&Action::RemoveSelected, &session),
            Some(Action::RemoveFile(1))
        ));
    }

    #[test]
    fn focus_wraps_around() {
        let session = Session::new();
        let mut panel = DocsPanel::new();
        panel.focus = DocsFocus::Output;
        panel.handle_action(&Action::FocusNext, &session);
        assert_eq!(panel.focus, DocsFocus::Files);
    }
}
