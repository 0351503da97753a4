//! Semantic style builders.

use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Padding};

use super::palette::{self, Palette};
use bugbuddy_app::state::NoticeLevel;

// --- Text styles ---
pub fn text_primary(p: &Palette) -> Style {
    Style::default().fg(p.text_primary)
}

pub fn text_secondary(p: &Palette) -> Style {
    Style::default().fg(p.text_secondary)
}

pub fn text_muted(p: &Palette) -> Style {
    Style::default().fg(p.text_muted)
}

pub fn heading(p: &Palette) -> Style {
    Style::default()
        .fg(p.text_primary)
        .add_modifier(Modifier::BOLD)
}

// --- Accent styles ---
pub fn accent(p: &Palette) -> Style {
    Style::default().fg(p.accent)
}

pub fn accent_bold(p: &Palette) -> Style {
    Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
}

/// Key hint, e.g. the `Enter` in "Enter to analyze"
pub fn keybinding(p: &Palette) -> Style {
    Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
}

// --- Buttons ---
pub fn button(p: &Palette, focused: bool, enabled: bool) -> Style {
    if !enabled {
        Style::default().fg(p.text_muted).bg(p.surface)
    } else if focused {
        Style::default()
            .fg(p.on_accent)
            .bg(p.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(p.accent).bg(p.surface)
    }
}

// --- Selection ---
pub fn selected_row(p: &Palette) -> Style {
    Style::default()
        .fg(p.text_primary)
        .bg(p.surface)
        .add_modifier(Modifier::BOLD)
}

// --- Notices ---
pub fn notice(level: NoticeLevel) -> Style {
    let color = match level {
        NoticeLevel::Info => palette::STATUS_BLUE,
        NoticeLevel::Warning => palette::STATUS_YELLOW,
        NoticeLevel::Error => palette::STATUS_RED,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn success() -> Style {
    Style::default()
        .fg(palette::STATUS_GREEN)
        .add_modifier(Modifier::BOLD)
}

// --- Block builders ---

/// Rounded card with the accent border when focused
pub fn card(p: &Palette, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused {
            p.border_active
        } else {
            p.border
        }))
        .style(Style::default().bg(p.card).fg(p.text_primary))
        .padding(Padding::horizontal(1))
}

/// Card with a title in the heading style
pub fn titled_card(p: &Palette, title: &str, focused: bool) -> Block<'static> {
    let title_style = if focused {
        accent_bold(p)
    } else {
        heading(p)
    };
    card(p, focused).title(Span::styled(format!(" {} ", title), title_style))
}
