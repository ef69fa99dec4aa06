//! Loading overlay shown while any backend call is in flight.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use docsmith_core::Session;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct LoadingComponent {
    frame_index: usize,
}

impl LoadingComponent {
    pub fn new() -> Self {
        Self { frame_index: 0 }
    }

    fn status_text(session: &Session) -> String {
        let label = session.loading.current_label().unwrap_or("Working");
        match session.loading.count() {
            0 | 1 => format!("{}...", label),
            n => format!("{}... (+{} more)", label, n - 1),
        }
    }
}

impl Default for LoadingComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for LoadingComponent {
    fn handle_action(&mut self, action: &Action, session: &Session) -> Option<Action> {
        if matches!(action, Action::Tick) && session.loading.is_active() {
            self.frame_index = (self.frame_index + 1) % SPINNER.len();
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect, session: &Session) {
        if !session.visibility().show_loading {
            return;
        }

        let text = Self::status_text(session);
        let width = (text.chars().count() as u16 + 8).min(area.width);
        let vertical = Layout::vertical([Constraint::Length(3)])
            .flex(Flex::Center)
            .split(area);
        let horizontal = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .split(vertical[0]);
        let dialog = horizontal[0];

        frame.render_widget(Clear, dialog);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::focused_border());
        let line = Line::from(vec![
            Span::styled(format!(" {} ", SPINNER[self.frame_index]), Theme::key_hint()),
            Span::styled(text, Theme::normal()),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), dialog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_counts_overlapping_calls() {
        let mut session = Session::new();
        session.loading.begin("Generating documentation");
        assert_eq!(
            LoadingComponent::status_text(&session),
            "Generating documentation..."
        );
        session.loading.begin("Loading branches");
        assert_eq!(
            LoadingComponent::status_text(&session),
            "Loading branches... (+1 more)"
        );
    }
}
