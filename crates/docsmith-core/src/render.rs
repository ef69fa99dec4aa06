//! HTML rendering of generated documentation and quality reports.
//!
//! Markdown goes through `pulldown-cmark` rather than ad hoc substitution, so
//! nesting and unterminated fences are handled by a real parser. Raw HTML in
//! the source is escaped instead of passed through.

use pulldown_cmark::escape::escape_html;
use pulldown_cmark::{html, Event, Options, Parser};

use crate::quality::QualityReport;
use crate::request::Purpose;

/// Render generated content for its purpose.
pub fn render_generated(content: &str, purpose: Purpose) -> String {
    match purpose {
        Purpose::Readme => markdown_to_html(content),
        Purpose::InlineComments => code_to_html(content),
    }
}

/// Markdown to an HTML fragment. Best effort: CommonMark plus strikethrough
/// and tables; embedded HTML is shown as text.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Escaped source inside a preformatted block.
pub fn code_to_html(code: &str) -> String {
    let mut out = String::with_capacity(code.len() + 24);
    out.push_str("<pre><code>");
    push_escaped(&mut out, code);
    out.push_str("</code></pre>\n");
    out
}

/// Quality report as an HTML fragment: summary, metrics, issues, suggestions.
pub fn quality_report_html(report: &QualityReport) -> String {
    let mut out = String::new();

    if let Some(summary) = report.summary() {
        out.push_str("<p class=\"quality-summary\">");
        push_escaped(&mut out, summary);
        out.push_str("</p>\n");
    }

    let cards = report.metric_cards();
    if !cards.is_empty() {
        out.push_str("<div class=\"metrics-grid\">\n");
        for card in &cards {
            out.push_str("<div class=\"metric-card\"><div class=\"metric-value\">");
            push_escaped(&mut out, &card.value);
            out.push_str("</div><div class=\"metric-label\">");
            push_escaped(&mut out, &card.label);
            out.push_str("</div></div>\n");
        }
        out.push_str("</div>\n");
    }

    let issues = report.issues();
    if issues.is_empty() {
        out.push_str("<div class=\"no-issues\">No issues found. Great job!</div>\n");
    } else {
        out.push_str("<ul class=\"issues\">\n");
        for issue in issues {
            out.push_str("<li class=\"issue ");
            out.push_str(issue.severity_class().css_class());
            out.push_str("\"><span class=\"issue-severity\">");
            push_escaped(&mut out, &issue.severity_label());
            out.push_str("</span> <span class=\"issue-line\">Line ");
            push_escaped(&mut out, &issue.line_label());
            out.push_str("</span> <span class=\"issue-type\">");
            push_escaped(&mut out, issue.kind_label());
            out.push_str("</span><p class=\"issue-message\">");
            push_escaped(&mut out, issue.message_text());
            out.push_str("</p>");
            if let Some(rule) = issue.rule.as_deref().filter(|r| !r.is_empty()) {
                out.push_str("<code class=\"issue-rule\">");
                push_escaped(&mut out, rule);
                out.push_str("</code>");
            }
            out.push_str("</li>\n");
        }
        out.push_str("</ul>\n");
    }

    let suggestions = report.suggestions();
    if !suggestions.is_empty() {
        out.push_str("<ul class=\"suggestions\">\n");
        for suggestion in suggestions {
            out.push_str("<li>");
            push_escaped(&mut out, suggestion);
            out.push_str("</li>\n");
        }
        out.push_str("</ul>\n");
    }

    out
}

fn push_escaped(out: &mut String, text: &str) {
    // Writing into a String cannot fail.
    let _ = escape_html(&mut *out, text);
}
