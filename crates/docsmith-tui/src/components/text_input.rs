//! Editable text field shared by every panel.
//!
//! Single-line fields ignore newlines; multi-line fields wrap and keep the
//! cursor line in view. Masked fields render bullets in place of characters.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::action::Action;
use crate::theme::Theme;

#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    /// Cursor position (byte offset) within `value`.
    cursor: usize,
    multiline: bool,
    masked: bool,
}

impl TextInput {
    pub fn single_line() -> Self {
        Self::default()
    }

    pub fn multi_line() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Clamp cursor to valid range.
    fn clamp_cursor(&mut self) {
        if self.cursor > self.value.len() {
            self.cursor = self.value.len();
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' && !self.multiline {
            return;
        }
        self.clamp_cursor();
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        self.clamp_cursor();
        if self.cursor > 0 {
            let prev = self.value[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.value.remove(prev);
            self.cursor = prev;
        }
    }

    /// Delete the word before the cursor (Ctrl+W).
    pub fn delete_word(&mut self) {
        self.clamp_cursor();
        if self.cursor > 0 {
            let bytes = self.value.as_bytes();
            let mut end = self.cursor;
            while end > 0 && bytes.get(end - 1) == Some(&b' ') {
                end -= 1;
            }
            let mut start = end;
            while start > 0 && !matches!(bytes.get(start - 1), Some(b' ') | Some(b'\n')) {
                start -= 1;
            }
            self.value.drain(start..self.cursor);
            self.cursor = start;
        }
    }

    /// Insert pasted text. Single-line fields keep only the first line.
    pub fn insert_str(&mut self, s: &str) {
        self.clamp_cursor();
        let text = if self.multiline {
            s
        } else {
            s.lines().next().unwrap_or("")
        };
        self.value.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    /// Line number and column of the cursor.
    fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.value[..self.cursor.min(self.value.len())];
        let line = before.matches('\n').count();
        let col = before
            .rfind('\n')
            .map(|p| self.cursor - p - 1)
            .unwrap_or(self.cursor);
        (line, col)
    }

    /// Move up one line. Returns false when already on the first line.
    pub fn cursor_up(&mut self) -> bool {
        let (line, col) = self.cursor_line_col();
        if !self.multiline || line == 0 {
            return false;
        }
        let lines: Vec<&str> = self.value.split('\n').collect();
        let prev_line = lines[line - 1];
        let prev_line_start: usize = lines[..line - 1].iter().map(|l| l.len() + 1).sum();
        self.cursor = prev_line_start + col.min(prev_line.len());
        self.snap_to_char_boundary();
        true
    }

    /// Move down one line. Returns false when already on the last line.
    pub fn cursor_down(&mut self) -> bool {
        let (line, col) = self.cursor_line_col();
        let lines: Vec<&str> = self.value.split('\n').collect();
        if !self.multiline || line + 1 >= lines.len() {
            return false;
        }
        let next_line = lines[line + 1];
        let next_line_start: usize = lines[..line + 1].iter().map(|l| l.len() + 1).sum();
        self.cursor = next_line_start + col.min(next_line.len());
        self.snap_to_char_boundary();
        true
    }

    fn snap_to_char_boundary(&mut self) {
        while self.cursor > 0 && !self.value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    /// Apply a plain editing action. Returns whether it was consumed.
    pub fn handle_edit(&mut self, action: &Action) -> bool {
        match action {
            Action::CharInput(c) => self.insert_char(*c),
            Action::BackspaceInput => self.backspace(),
            Action::DeleteWord => self.delete_word(),
            Action::PasteBulk(text) => self.insert_str(text),
            Action::NewlineInput if self.multiline => self.insert_char('\n'),
            _ => return false,
        }
        true
    }

    fn display_text(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    /// Cursor offset within `display_text`.
    fn display_cursor(&self) -> usize {
        if self.masked {
            self.value[..self.cursor.min(self.value.len())].chars().count() * '•'.len_utf8()
        } else {
            self.cursor.min(self.value.len())
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        focused: bool,
        title: &str,
        placeholder: &str,
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

        if self.value.is_empty() && !focused {
            let display = Paragraph::new(Span::styled(placeholder.to_string(), Theme::dim()))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(display, area);
            return;
        }

        let inner = block.inner(area);
        let text = self.display_text();

        if !focused {
            let display = Paragraph::new(text)
                .style(Theme::normal())
                .wrap(Wrap { trim: false })
                .block(block);
            frame.render_widget(display, area);
            return;
        }

        let width = if inner.width > 0 { inner.width as usize } else { 80 };
        let height = inner.height.max(1) as usize;
        let (visual, cursor_row) = visual_lines(&text, self.display_cursor(), width);

        let scroll = cursor_row.saturating_sub(height - 1);
        let lines: Vec<Line> = visual
            .into_iter()
            .enumerate()
            .skip(scroll)
            .take(height)
            .map(|(row, (segment, cursor_col))| match cursor_col {
                Some(col) if row == cursor_row => cursor_line(segment, col),
                _ => Line::from(Span::styled(segment, Theme::normal())),
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Split text into wrapped visual lines, tracking which one holds the cursor.
fn visual_lines(text: &str, cursor: usize, width: usize) -> (Vec<(String, Option<usize>)>, usize) {
    let mut out = Vec::new();
    let mut cursor_row = 0;
    let mut offset = 0usize;

    for logical in text.split('\n') {
        let segments = wrap_line(logical, width);
        let count = segments.len();
        let mut seg_offset = offset;
        for (i, segment) in segments.into_iter().enumerate() {
            let seg_end = seg_offset + segment.len();
            let is_last = i + 1 == count;
            let holds_cursor =
                cursor >= seg_offset && (cursor < seg_end || (is_last && cursor == seg_end));
            let cursor_col = if holds_cursor {
                cursor_row = out.len();
                Some(cursor - seg_offset)
            } else {
                None
            };
            seg_offset = seg_end;
            out.push((segment, cursor_col));
        }
        offset += logical.len() + 1;
    }

    (out, cursor_row)
}

fn cursor_line(text: String, col: usize) -> Line<'static> {
    let col = col.min(text.len());
    let (before, after) = text.split_at(col);
    let cursor_char = after.chars().next().unwrap_or(' ');
    let rest = after.get(cursor_char.len_utf8()..).unwrap_or("");
    Line::from(vec![
        Span::styled(before.to_string(), Theme::normal()),
        Span::styled(
            cursor_char.to_string(),
            Style::default().fg(Theme::bg()).bg(Theme::accent()),
        ),
        Span::styled(rest.to_string(), Theme::normal()),
    ])
}

/// Word-wrap a single logical line to fit within `max_width` columns.
/// Tries to break at word boundaries; falls back to hard breaks if a word is
/// longer than the width.
fn wrap_line(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || text.len() <= max_width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        if remaining.len() <= max_width {
            lines.push(remaining.to_string());
            break;
        }

        let limit = floor_char_boundary(remaining, max_width);
        let chunk = &remaining[..limit];
        let break_pos = match chunk.rfind(' ') {
            Some(pos) if pos > max_width / 3 => pos + 1,
            _ => limit,
        };
        let break_pos = if break_pos == 0 {
            remaining
                .char_indices()
                .nth(1)
                .map(|(i, _)| i)
                .unwrap_or(remaining.len())
        } else {
            break_pos
        };

        let (line, rest) = remaining.split_at(break_pos);
        lines.push(line.to_string());
        remaining = rest;
    }

    lines
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    index = index.min(s.len());
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_ignores_newlines_and_keeps_first_pasted_line() {
        let mut input = TextInput::single_line();
        input.insert_char('a');
        input.insert_char('\n');
        input.insert_str("bc\nignored");
        assert_eq!(input.value(), "abc");
        assert!(!input.handle_edit(&Action::NewlineInput));
    }

    #[test]
    fn backspace_handles_multibyte() {
        let mut input = TextInput::single_line();
        input.set_value("héé");
        input.backspace();
        assert_eq!(input.value(), "hé");
    }

    #[test]
    fn delete_word_stops_at_space() {
        let mut input = TextInput::single_line();
        input.set_value("docs: add readme  ");
        input.delete_word();
        assert_eq!(input.value(), "docs: add ");
    }

    #[test]
    fn multi_line_cursor_moves_between_lines() {
        let mut input = TextInput::multi_line();
        input.set_value("first\nsecond line");
        assert!(input.cursor_up());
        input.insert_char('!');
        assert_eq!(input.value(), "first!\nsecond line");
        assert!(!input.cursor_up());
        assert!(input.cursor_down());
    }

    #[test]
    fn wrap_prefers_word_boundaries() {
        let lines = wrap_line("alpha beta gamma delta", 11);
        assert_eq!(lines, vec!["alpha beta ", "gamma delta"]);
    }

    #[test]
    fn visual_lines_place_cursor_at_end() {
        let (lines, row) = visual_lines("ab\ncd", 5, 10);
        assert_eq!(lines.len(), 2);
        assert_eq!(row, 1);
        assert_eq!(lines[1].1, Some(2));
    }
}
