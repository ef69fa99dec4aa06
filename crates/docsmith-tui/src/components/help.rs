//! Help overlay: keybinding reference.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use docsmith_core::Session;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct HelpComponent {
    pub visible: bool,
}

impl HelpComponent {
    pub fn new() -> Self {
        Self { visible: false }
    }

    fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
        let vertical = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .split(area);
        let horizontal = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .split(vertical[0]);
        horizontal[0]
    }
}

impl Default for HelpComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HelpComponent {
    fn handle_action(&mut self, action: &Action, _session: &Session) -> Option<Action> {
        match action {
            Action::ToggleHelp => self.visible = !self.visible,
            Action::Tick | Action::Notify(_) | Action::Completed { .. } => {}
            // Any key closes help.
            _ if self.visible => self.visible = false,
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect, _session: &Session) {
        if !self.visible {
            return;
        }

        let dialog = Self::centered_rect(area, 60, 26);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Help: keybindings ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::focused_border());

        let help_text = vec![
            Line::from(""),
            key_line("q / Ctrl+C", "Quit"),
            key_line("?", "Toggle this help"),
            key_line("1 / 2 / 3", "Docs, GitHub, Quality tab"),
            key_line("Left / Right", "Previous / next tab"),
            key_line("Tab / Shift+Tab", "Next / previous field"),
            key_line("Up / Down / j / k", "Move or scroll"),
            key_line("Enter", "Choose / edit field"),
            key_line("e", "Edit the focused field"),
            key_line("Esc", "Stop editing"),
            key_line("Ctrl+S", "Submit while editing"),
            key_line("paste / drop", "Add files to the current tab"),
            Line::from(""),
            Line::from(Span::styled("── Docs ──", Theme::header())),
            key_line("p", "Toggle README / inline comments"),
            key_line("g", "Generate documentation"),
            key_line("s", "Save generated file"),
            key_line("x", "Export HTML preview"),
            key_line("d", "Remove highlighted file"),
            Line::from(Span::styled("── GitHub ──", Theme::header())),
            key_line("D", "Disconnect"),
            Line::from(Span::styled("── Quality ──", Theme::header())),
            key_line("a", "Analyze selected file"),
            key_line("x", "Export report as HTML"),
        ];

        frame.render_widget(Paragraph::new(help_text).block(block), dialog);
    }
}

fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<22}", key), Theme::selected()),
        Span::styled(desc, Theme::normal()),
    ])
}
