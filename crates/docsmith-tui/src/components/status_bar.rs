//! Status bar at the bottom of the TUI: active tab, the latest toast, and
//! key hints.

use chrono::{DateTime, Utc};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use docsmith_core::{Session, Toast};

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct StatusBarComponent {
    /// Notification currently on screen.
    pub toast: Option<Toast>,
    /// How long a toast stays visible.
    toast_seconds: u64,
}

impl StatusBarComponent {
    pub fn new(toast_seconds: u64) -> Self {
        Self {
            toast: None,
            toast_seconds,
        }
    }

    /// Drop the toast once it has been visible long enough.
    pub fn expire(&mut self, now: DateTime<Utc>) {
        if self
            .toast
            .as_ref()
            .is_some_and(|t| t.is_expired(now, self.toast_seconds))
        {
            self.toast = None;
        }
    }
}

impl Component for StatusBarComponent {
    fn handle_action(&mut self, action: &Action, _session: &Session) -> Option<Action> {
        match action {
            Action::Notify(toast) => self.toast = Some(toast.clone()),
            Action::Tick => self.expire(Utc::now()),
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let width = area.width as usize;

        let hints = "q·?·1-3·Tab·e";
        let hints_len = hints.len() + 1;

        let badge = session.current_tab.label();
        let badge_len = badge.len() + 2;

        let (message, style) = match &self.toast {
            Some(toast) => (toast.message.as_str(), Theme::toast(toast.kind)),
            None => ("", Theme::dim()),
        };

        let msg_budget = width
            .saturating_sub(badge_len)
            .saturating_sub(hints_len)
            .saturating_sub(4);

        let msg: String = if message.chars().count() > msg_budget {
            if msg_budget > 3 {
                let kept: String = message.chars().take(msg_budget - 3).collect();
                format!("{}...", kept)
            } else {
                String::new()
            }
        } else {
            message.to_string()
        };

        let used = badge_len + 2 + msg.chars().count();
        let pad = width.saturating_sub(used + hints_len);

        let line = Line::from(vec![
            Span::styled(format!(" {} ", badge), Theme::muted()),
            Span::styled("  ", Theme::dim()),
            Span::styled(msg, style),
            Span::raw(" ".repeat(pad)),
            Span::styled(hints, Theme::key_hint()),
            Span::raw(" "),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn toast_clears_after_ttl() {
        let session = Session::new();
        let mut bar = StatusBarComponent::new(3);
        let toast = Toast::success("Saved README.md");
        let shown_at = toast.created_at;
        bar.handle_action(&Action::Notify(toast), &session);

        bar.expire(shown_at + Duration::seconds(2));
        assert!(bar.toast.is_some());
        bar.expire(shown_at + Duration::seconds(3));
        assert!(bar.toast.is_none());
    }

    #[test]
    fn newer_toast_replaces_older() {
        let session = Session::new();
        let mut bar = StatusBarComponent::new(3);
        bar.handle_action(&Action::Notify(Toast::info("first")), &session);
        bar.handle_action(&Action::Notify(Toast::error("second")), &session);
        assert_eq!(bar.toast.as_ref().map(|t| t.message.as_str()), Some("second"));
    }
}
