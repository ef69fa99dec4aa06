//! Color scheme and styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

use docsmith_core::quality::SeverityClass;
use docsmith_core::ToastKind;

/// The color palette for docsmith's TUI.
pub struct Theme;

impl Theme {
    // ── Base colors ─────────────────────────────────────────
    pub fn bg() -> Color {
        Color::Reset
    }

    pub fn fg() -> Color {
        Color::Rgb(200, 200, 200)
    }

    pub fn fg_dim() -> Color {
        Color::Rgb(100, 100, 100)
    }

    pub fn fg_muted() -> Color {
        Color::Rgb(140, 140, 140)
    }

    // ── Accent colors ───────────────────────────────────────
    pub fn accent() -> Color {
        Color::Rgb(110, 170, 255)
    }

    pub fn accent_secondary() -> Color {
        Color::Rgb(180, 130, 240)
    }

    pub fn success() -> Color {
        Color::Rgb(80, 200, 120)
    }

    pub fn warning() -> Color {
        Color::Rgb(230, 180, 80)
    }

    pub fn error() -> Color {
        Color::Rgb(240, 80, 80)
    }

    // ── Structural colors ───────────────────────────────────
    pub fn border_color() -> Color {
        Color::Rgb(60, 60, 60)
    }

    pub fn selection_bg() -> Color {
        Color::Rgb(40, 40, 60)
    }

    pub fn code_bg() -> Color {
        Color::Rgb(30, 30, 38)
    }

    // ── Composite styles ────────────────────────────────────

    pub fn title() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::fg()).add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::fg())
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::fg_dim())
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::fg_muted())
    }

    pub fn border() -> Style {
        Style::default().fg(Self::border_color())
    }

    pub fn focused_border() -> Style {
        Style::default().fg(Self::accent())
    }

    pub fn key_hint() -> Style {
        Style::default().fg(Self::accent())
    }

    pub fn selection() -> Style {
        Style::default().bg(Self::selection_bg())
    }

    pub fn code() -> Style {
        Style::default().fg(Self::accent_secondary()).bg(Self::code_bg())
    }

    pub fn tab_active() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn tab_inactive() -> Style {
        Style::default().fg(Self::fg_dim())
    }

    pub fn toast(kind: ToastKind) -> Style {
        let color = match kind {
            ToastKind::Info => Self::accent(),
            ToastKind::Success => Self::success(),
            ToastKind::Error => Self::error(),
        };
        Style::default().fg(color)
    }

    pub fn severity(class: SeverityClass) -> Style {
        let color = match class {
            SeverityClass::Error => Self::error(),
            SeverityClass::Warning => Self::warning(),
            SeverityClass::Info => Self::accent(),
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}
