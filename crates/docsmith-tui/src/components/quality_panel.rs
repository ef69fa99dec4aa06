//! Quality tab: pick one source file, analyze it, and browse the report.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use docsmith_core::intake::{parse_dropped_paths, IntakeTarget};
use docsmith_core::{QualityReport, Session};

use crate::action::Action;
use crate::components::path_input::PathInput;
use crate::components::Component;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityFocus {
    Path,
    Report,
}

pub struct QualityPanel {
    pub focus: QualityFocus,
    editing: bool,
    pub path: PathInput,
    report_scroll: u16,
}

impl QualityPanel {
    pub fn new() -> Self {
        Self {
            focus: QualityFocus::Path,
            editing: false,
            path: PathInput::new(),
            report_scroll: 0,
        }
    }

    fn choose_typed_path(&mut self) -> Option<Action> {
        let paths = self.path.take_paths();
        self.editing = false;
        if paths.is_empty() {
            return None;
        }
        Some(Action::AddPaths {
            paths,
            target: IntakeTarget::Quality,
        })
    }

    fn toggle_focus(&mut self) {
        self.path.dismiss();
        self.editing = false;
        self.focus = match self.focus {
            QualityFocus::Path => QualityFocus::Report,
            QualityFocus::Report => QualityFocus::Path,
        };
    }

    fn handle_editing(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::Cancel => {
                if self.path.has_suggestions() {
                    self.path.dismiss();
                } else {
                    self.editing = false;
                }
                None
            }
            Action::FocusNext if self.path.has_suggestions() => {
                if self.path.accept_suggestion() {
                    self.choose_typed_path()
                } else {
                    None
                }
            }
            Action::FocusNext | Action::FocusPrev => {
                self.toggle_focus();
                None
            }
            Action::ScrollDown => {
                self.path.highlight_next();
                None
            }
            Action::ScrollUp => {
                self.path.highlight_prev();
                None
            }
            Action::NewlineInput => {
                if self.path.has_highlight() && !self.path.accept_suggestion() {
                    return None;
                }
                self.choose_typed_path()
            }
            Action::SubmitForm => self.choose_typed_path(),
            edit => {
                self.path.input.handle_edit(edit);
                self.path.refresh_suggestions();
                None
            }
        }
    }

    fn handle_normal(&mut self, action: &Action, session: &Session) -> Option<Action> {
        match action {
            Action::FocusNext | Action::FocusPrev => {
                self.toggle_focus();
                None
            }
            Action::StartEditing => {
                self.focus = QualityFocus::Path;
                self.editing = true;
                None
            }
            Action::Confirm if self.focus == QualityFocus::Path => {
                self.editing = true;
                None
            }
            Action::ScrollUp => {
                self.report_scroll = self.report_scroll.saturating_sub(1);
                None
            }
            Action::ScrollDown => {
                self.report_scroll = self.report_scroll.saturating_add(1);
                None
            }
            Action::PageUp => {
                self.report_scroll = self.report_scroll.saturating_sub(10);
                None
            }
            Action::PageDown => {
                self.report_scroll = self.report_scroll.saturating_add(10);
                None
            }
            Action::RemoveSelected if session.quality_file.is_some() => {
                Some(Action::RemoveQualityFile)
            }
            Action::PasteBulk(text) => {
                let paths = parse_dropped_paths(text);
                if paths.is_empty() {
                    return None;
                }
                Some(Action::AddPaths {
                    paths,
                    target: IntakeTarget::Quality,
                })
            }
            _ => None,
        }
    }

    fn render_selected_file(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let line = match &session.quality_file {
            Some(file) => Line::from(vec![
                Span::styled(" Selected: ", Theme::muted()),
                Span::styled(file.name.clone(), Theme::selected()),
                Span::styled(format!(" ({})", file.size_label()), Theme::dim()),
                Span::styled("   a", Theme::key_hint()),
                Span::styled(" analyze  ", Theme::dim()),
                Span::styled("d", Theme::key_hint()),
                Span::styled(" remove", Theme::dim()),
            ]),
            None => Line::from(Span::styled(
                " No file selected. Type a path above or drop a file.",
                Theme::dim(),
            )),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_report(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let focused = self.focus == QualityFocus::Report;
        let block = Block::default()
            .title(" Report ")
            .title_style(if focused { Theme::key_hint() } else { Theme::muted() })
            .borders(Borders::ALL)
            .border_style(if focused {
                Theme::focused_border()
            } else {
                Theme::border()
            });

        let paragraph = match &session.quality_report {
            Some(report) => Paragraph::new(quality_lines(report))
                .wrap(Wrap { trim: false })
                .scroll((self.report_scroll, 0)),
            None => Paragraph::new(Span::styled(
                "Analysis results will appear here.",
                Theme::dim(),
            )),
        };
        frame.render_widget(paragraph.block(block), area);
    }
}

impl Default for QualityPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for QualityPanel {
    fn handle_action(&mut self, action: &Action, session: &Session) -> Option<Action> {
        if self.wants_input() {
            self.handle_editing(action)
        } else {
            self.handle_normal(action, session)
        }
    }

    fn wants_input(&self) -> bool {
        self.editing && self.focus == QualityFocus::Path
    }

    fn render(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let rows = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(self.path.suggestion_height()),
            Constraint::Length(1),
            Constraint::Min(5),
        ])
        .split(area);

        self.path
            .render(frame, rows[0], self.wants_input(), " File to analyze ");
        self.path.render_suggestions(frame, rows[1]);
        self.render_selected_file(frame, rows[2], session);
        self.render_report(frame, rows[3], session);
    }
}

/// Summary, metric cards, issues and suggestions as terminal lines.
pub fn quality_lines(report: &QualityReport) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(summary) = report.summary() {
        lines.push(Line::from(Span::styled(summary.to_string(), Theme::normal())));
        lines.push(Line::from(""));
    }

    let cards = report.metric_cards();
    if !cards.is_empty() {
        lines.push(Line::from(Span::styled("Metrics", Theme::header())));
        for card in cards {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<28}", card.label), Theme::muted()),
                Span::styled(card.value, Theme::selected()),
            ]));
        }
        lines.push(Line::from(""));
    }

    let issues = report.issues();
    lines.push(Line::from(Span::styled(
        format!("Issues ({})", issues.len()),
        Theme::header(),
    )));
    if issues.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No issues found. Great job!",
            Theme::toast(docsmith_core::ToastKind::Success),
        )));
    }
    for issue in issues {
        let mut header = vec![
            Span::styled(
                format!("  {:<8}", issue.severity_label()),
                Theme::severity(issue.severity_class()),
            ),
            Span::styled(format!(" Line {} ", issue.line_label()), Theme::muted()),
            Span::styled(format!("[{}]", issue.kind_label()), Theme::dim()),
        ];
        if let Some(rule) = issue.rule.as_deref().filter(|r| !r.is_empty()) {
            header.push(Span::styled(format!(" {}", rule), Theme::code()));
        }
        lines.push(Line::from(header));
        lines.push(Line::from(Span::styled(
            format!("    {}", issue.message_text()),
            Theme::normal(),
        )));
    }

    let suggestions = report.suggestions();
    if !suggestions.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Suggestions", Theme::header())));
        for suggestion in suggestions {
            lines.push(Line::from(Span::styled(
                format!("  • {}", suggestion),
                Theme::normal(),
            )));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn empty_report_shows_empty_state() {
        let lines = text(&quality_lines(&QualityReport::default()));
        assert!(lines.iter().any(|l| l.contains("No issues found. Great job!")));
        assert!(!lines.iter().any(|l| l.contains("Suggestions")));
    }

    #[test]
    fn issues_use_fallbacks() {
        let report: QualityReport =
            serde_json::from_str(r#"{"issues": [{"severity": "warning"}]}"#).unwrap();
        let lines = text(&quality_lines(&report));
        assert!(lines.iter().any(|l| l.contains("WARNING") && l.contains("Line N/A")));
        assert!(lines.iter().any(|l| l.contains("[General]")));
        assert!(lines.iter().any(|l| l.contains("No description available")));
    }

    #[test]
    fn paste_replaces_quality_file() {
        let session = Session::new();
        let mut panel = QualityPanel::new();
        let action = panel.handle_action(&Action::PasteBulk("/tmp/a.py /tmp/b.py".into()), &session);
        assert!(matches!(
            action,
            Some(Action::AddPaths { target: IntakeTarget::Quality, ref paths }) if paths.len() == 2
        ));
    }

    #[test]
    fn remove_needs_a_selected_file() {
        let session = Session::new();
        let mut panel = QualityPanel::new();
        assert!(panel
            .handle_action(&Action::RemoveSelected, &session)
            .is_none());
    }
}
