//! Terminal rendering of generated documentation.
//!
//! README output is parsed as Markdown and styled per block; commented code
//! is shown verbatim. Raw HTML in the Markdown is shown as literal text.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use docsmith_core::request::Purpose;

use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockStyle {
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
    ListItem,
    Quote,
    Code,
    CodeHeader,
}

impl BlockStyle {
    fn style(self) -> Style {
        match self {
            BlockStyle::Heading1 => Theme::title().add_modifier(Modifier::UNDERLINED),
            BlockStyle::Heading2 => Theme::title(),
            BlockStyle::Heading3 => Theme::header(),
            BlockStyle::Paragraph => Theme::normal(),
            BlockStyle::ListItem => Theme::normal(),
            BlockStyle::Quote => Theme::muted().add_modifier(Modifier::ITALIC),
            BlockStyle::Code => Theme::code(),
            BlockStyle::CodeHeader => Theme::key_hint(),
        }
    }
}

/// Styled lines for generated content, by purpose.
pub fn generated_lines(content: &str, purpose: Purpose) -> Vec<Line<'static>> {
    match purpose {
        Purpose::Readme => markdown_lines(content),
        Purpose::InlineComments => code_lines(content),
    }
}

/// Code shown as-is, one styled line per source line.
pub fn code_lines(code: &str) -> Vec<Line<'static>> {
    code.lines()
        .map(|line| Line::from(Span::styled(line.to_string(), Theme::code())))
        .collect()
}

pub fn markdown_lines(markdown: &str) -> Vec<Line<'static>> {
    parse_blocks(markdown)
        .into_iter()
        .map(|(content, style)| Line::from(Span::styled(content, style.style())))
        .collect()
}

fn parse_blocks(markdown: &str) -> Vec<(String, BlockStyle)> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let mut lines: Vec<(String, BlockStyle)> = Vec::new();
    let mut current = String::new();
    let mut in_code_block = false;
    let mut in_quote = false;
    let mut list_depth: usize = 0;

    let flush = |lines: &mut Vec<(String, BlockStyle)>, current: &mut String, style| {
        if !current.is_empty() {
            lines.push((std::mem::take(current), style));
        }
    };

    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Start(tag) => {
                if !in_code_block {
                    flush(&mut lines, &mut current, BlockStyle::Paragraph);
                }
                match tag {
                    Tag::Heading(..) => {
                        if !lines.is_empty() {
                            lines.push((String::new(), BlockStyle::Paragraph));
                        }
                    }
                    Tag::CodeBlock(kind) => {
                        in_code_block = true;
                        let header = match kind {
                            CodeBlockKind::Fenced(lang) if !lang.is_empty() => {
                                format!("┌─ [{}]", lang.to_uppercase())
                            }
                            _ => "┌────".to_string(),
                        };
                        lines.push((header, BlockStyle::CodeHeader));
                    }
                    Tag::List(_) => list_depth += 1,
                    Tag::BlockQuote => in_quote = true,
                    _ => {}
                }
            }
            Event::End(tag) => match tag {
                Tag::Heading(level, _, _) => {
                    let (prefix, style) = match level {
                        HeadingLevel::H1 => ("══ ", BlockStyle::Heading1),
                        HeadingLevel::H2 => ("── ", BlockStyle::Heading2),
                        _ => ("─ ", BlockStyle::Heading3),
                    };
                    lines.push((format!("{}{}", prefix, current), style));
                    current.clear();
                }
                Tag::Paragraph => {
                    let style = if in_quote {
                        BlockStyle::Quote
                    } else if list_depth > 0 {
                        BlockStyle::ListItem
                    } else {
                        BlockStyle::Paragraph
                    };
                    if in_quote && !current.is_empty() {
                        current.insert_str(0, "│ ");
                    }
                    flush(&mut lines, &mut current, style);
                    if list_depth == 0 {
                        lines.push((String::new(), BlockStyle::Paragraph));
                    }
                }
                Tag::CodeBlock(_) => {
                    in_code_block = false;
                    lines.push(("└────".to_string(), BlockStyle::CodeHeader));
                }
                Tag::List(_) => {
                    list_depth = list_depth.saturating_sub(1);
                    if list_depth == 0 {
                        lines.push((String::new(), BlockStyle::Paragraph));
                    }
                }
                Tag::Item => {
                    if !current.is_empty() {
                        let indent = "  ".repeat(list_depth.saturating_sub(1));
                        lines.push((format!("{}• {}", indent, current), BlockStyle::ListItem));
                        current.clear();
                    }
                }
                Tag::BlockQuote => in_quote = false,
                Tag::TableRow | Tag::TableHead => {
                    flush(&mut lines, &mut current, BlockStyle::Paragraph);
                }
                Tag::TableCell => current.push_str(" │ "),
                _ => {}
            },
            Event::Text(text) => {
                if in_code_block {
                    for line in text.lines() {
                        lines.push((format!("│ {}", line), BlockStyle::Code));
                    }
                } else {
                    current.push_str(&text);
                }
            }
            Event::Code(code) => {
                current.push('`');
                current.push_str(&code);
                current.push('`');
            }
            // Markup is displayed, never interpreted.
            Event::Html(html) => {
                for (i, line) in html.lines().enumerate() {
                    if i > 0 {
                        flush(&mut lines, &mut current, BlockStyle::Paragraph);
                    }
                    current.push_str(line);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if !in_code_block {
                    current.push(' ');
                }
            }
            Event::Rule => lines.push(("─".repeat(24), BlockStyle::Paragraph)),
            Event::TaskListMarker(done) => current.push_str(if done { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }

    flush(&mut lines, &mut current, BlockStyle::Paragraph);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(markdown: &str) -> Vec<String> {
        parse_blocks(markdown).into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn heading_is_styled_and_prefixed() {
        let blocks = parse_blocks("# Demo\n\nHello");
        assert_eq!(blocks[0], ("══ Demo".to_string(), BlockStyle::Heading1));
        assert!(blocks.iter().any(|(t, s)| t == "Hello" && *s == BlockStyle::Paragraph));
    }

    #[test]
    fn list_items_get_bullets() {
        let lines = texts("- one\n- two\n");
        assert!(lines.contains(&"• one".to_string()));
        assert!(lines.contains(&"• two".to_string()));
    }

    #[test]
    fn fenced_code_keeps_language_badge() {
        let blocks = parse_blocks("```rust\nfn main() {}\n```\n");
        assert_eq!(blocks[0].0, "┌─ [RUST]");
        assert_eq!(blocks[1], ("│ fn main() {}".to_string(), BlockStyle::Code));
    }

    #[test]
    fn raw_html_is_shown_literally() {
        let lines = texts("<script>alert(1)</script>\n");
        assert!(lines.iter().any(|l| l.contains("<script>alert(1)</script>")));
    }

    #[test]
    fn commented_code_is_not_parsed() {
        let lines = generated_lines("# not a heading\nx = 1", Purpose::InlineComments);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].content, "# not a heading");
    }
}
