//! Path field with filesystem autocomplete, used to pick files to upload.

use std::path::{Path, PathBuf};

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use docsmith_core::intake::{expand_home, parse_dropped_paths};

use crate::components::text_input::TextInput;
use crate::theme::Theme;

/// Maximum number of path suggestions to display.
pub const MAX_SUGGESTIONS: usize = 6;

/// A single path suggestion entry.
#[derive(Debug, Clone)]
struct PathSuggestion {
    full_path: String,
    name: String,
    is_dir: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PathInput {
    pub input: TextInput,
    suggestions: Vec<PathSuggestion>,
    /// Which suggestion is highlighted.
    suggestion_index: Option<usize>,
    /// The input value suggestions were last computed for.
    suggestions_for: String,
}

impl PathInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_suggestions(&self) -> bool {
        !self.suggestions.is_empty()
    }

    pub fn has_highlight(&self) -> bool {
        self.suggestion_index.is_some()
    }

    pub fn suggestion_height(&self) -> u16 {
        if self.has_suggestions() {
            self.suggestions.len().min(MAX_SUGGESTIONS) as u16 + 1
        } else {
            0
        }
    }

    pub fn dismiss(&mut self) {
        self.suggestions.clear();
        self.suggestion_index = None;
    }

    /// Paths typed or pasted into the field, ready for intake.
    pub fn take_paths(&mut self) -> Vec<PathBuf> {
        let paths = parse_dropped_paths(self.input.value());
        self.input.clear();
        self.suggestions_for.clear();
        self.dismiss();
        paths
    }

    pub fn highlight_next(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        let max = self.suggestions.len();
        self.suggestion_index = Some(match self.suggestion_index {
            None => 0,
            Some(i) => (i + 1).min(max - 1),
        });
    }

    pub fn highlight_prev(&mut self) {
        self.suggestion_index = match self.suggestion_index {
            None | Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }

    /// Refresh filesystem suggestions based on the current input.
    pub fn refresh_suggestions(&mut self) {
        if self.input.value() == self.suggestions_for {
            return;
        }
        self.suggestions_for = self.input.value().to_string();
        self.dismiss();

        let input = self.input.value();
        if input.is_empty() {
            return;
        }

        let expanded = expand_home(input).to_string_lossy().to_string();
        let path = Path::new(&expanded);

        // Trailing slash lists the directory; otherwise filter the parent by prefix.
        let (search_dir, prefix): (PathBuf, String) =
            if expanded.ends_with('/') || expanded.ends_with(std::path::MAIN_SEPARATOR) {
                (path.to_path_buf(), String::new())
            } else {
                let parent = path.parent().unwrap_or(Path::new("/"));
                let parent = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
                let file_prefix = path
                    .file_name()
                    .map(|f| f.to_string_lossy().to_string())
                    .unwrap_or_default();
                (parent.to_path_buf(), file_prefix)
            };

        let entries = match std::fs::read_dir(&search_dir) {
            Ok(entries) => entries,
            Err(_) => return,
        };

        let prefix_lower = prefix.to_lowercase();

        let mut results: Vec<PathSuggestion> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();

                // Skip hidden files unless the user is explicitly typing a dot.
                if name.starts_with('.') && !prefix.starts_with('.') {
                    return None;
                }
                if !prefix.is_empty() && !name.to_lowercase().starts_with(&prefix_lower) {
                    return None;
                }

                let full_path = entry.path();
                let is_dir = full_path.is_dir();
                Some(PathSuggestion {
                    full_path: full_path.to_string_lossy().to_string(),
                    name,
                    is_dir,
                })
            })
            .collect();

        // Directories first, then alphabetically.
        results.sort_by(|a, b| {
            b.is_dir
                .cmp(&a.is_dir)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        results.truncate(MAX_SUGGESTIONS);

        self.suggestions = results;
    }

    /// Accept the highlighted suggestion (or the first one).
    /// Returns true when the accepted entry is a file.
    pub fn accept_suggestion(&mut self) -> bool {
        let idx = self.suggestion_index.unwrap_or(0);
        let Some(suggestion) = self.suggestions.get(idx).cloned() else {
            return false;
        };
        let mut new_path = suggestion.full_path;
        if suggestion.is_dir && !new_path.ends_with('/') {
            new_path.push('/');
        }
        self.input.set_value(new_path);
        self.suggestions_for.clear();
        self.dismiss();
        self.refresh_suggestions();
        !suggestion.is_dir
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool, title: &str) {
        self.input
            .render(frame, area, focused, title, "type a path, or drop files here");
    }

    pub fn render_suggestions(&self, frame: &mut Frame, area: Rect) {
        if !self.has_suggestions() {
            return;
        }
        let block = Block::default()
            .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
            .border_style(Theme::border());

        let items: Vec<ListItem> = self
            .suggestions
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let icon = if s.is_dir { "/" } else { " " };
                let style = if self.suggestion_index == Some(i) {
                    Style::default()
                        .fg(Theme::bg())
                        .bg(Theme::accent())
                        .add_modifier(Modifier::BOLD)
                } else if s.is_dir {
                    Style::default().fg(Theme::accent())
                } else {
                    Theme::normal()
                };
                ListItem::new(Line::from(Span::styled(
                    format!(" {}{} ", s.name, icon),
                    style,
                )))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_list_matching_entries_dirs_first() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("setup.py"), "").unwrap();
        std::fs::write(dir.path().join("README.md"), "").unwrap();

        let mut field = PathInput::new();
        field
            .input
            .set_value(format!("{}/s", dir.path().display()));
        field.refresh_suggestions();

        let names: Vec<_> = field.suggestions.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["src", "setup.py"]);
    }

    #[test]
    fn accepting_a_file_reports_it() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("main.rs"), "").unwrap();

        let mut field = PathInput::new();
        field.input.set_value(format!("{}/ma", dir.path().display()));
        field.refresh_suggestions();

        assert!(field.accept_suggestion());
        assert!(field.input.value().ends_with("main.rs"));
    }

    #[test]
    fn take_paths_clears_the_field() {
        let mut field = PathInput::new();
        field.input.set_value("/tmp/a.rs '/tmp/b c.rs'");
        let paths = field.take_paths();
        assert_eq!(paths, vec![PathBuf::from("/tmp/a.rs"), PathBuf::from("/tmp/b c.rs")]);
        assert!(field.input.is_empty());
    }
}
