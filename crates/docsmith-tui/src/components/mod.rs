//! Component trait and all TUI components.
//!
//! Panels read the session and answer with actions; only the App mutates it.

pub mod docs_panel;
pub mod github_panel;
pub mod help;
pub mod loading;
pub mod markdown;
pub mod path_input;
pub mod quality_panel;
pub mod status_bar;
pub mod text_input;

use ratatui::layout::Rect;
use ratatui::Frame;

use docsmith_core::Session;

use crate::action::Action;

/// Trait implemented by all TUI components.
pub trait Component {
    /// Handle an action and optionally return a new action to dispatch.
    fn handle_action(&mut self, action: &Action, session: &Session) -> Option<Action> {
        let _ = (action, session);
        None
    }

    /// Whether a text field currently owns the keyboard.
    fn wants_input(&self) -> bool {
        false
    }

    /// Render the component into the given area.
    fn render(&self, frame: &mut Frame, area: Rect, session: &Session);
}

/// Move a list cursor one step, clamped to `len`.
pub(crate) fn step_cursor(cursor: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        0
    } else if down {
        (cursor + 1).min(len - 1)
    } else {
        cursor.saturating_sub(1)
    }
}
