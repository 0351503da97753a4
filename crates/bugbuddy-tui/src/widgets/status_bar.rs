//! Status bar widget
//!
//! Shows the current notice if there is one, otherwise key hints for the
//! page and focus.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use bugbuddy_app::state::{AppState, InputFocus, ProfileField};
use bugbuddy_core::Page;

use crate::theme::{styles, Palette};

pub struct StatusBar<'a> {
    state: &'a AppState,
    palette: &'a Palette,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState, palette: &'a Palette) -> Self {
        Self { state, palette }
    }

    /// (key, description) pairs for the current context
    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        let state = self.state;
        let app = state.app();

        let mut hints = match app.current_page {
            Page::Landing => vec![("Enter", "start debugging"), ("h", "history")],
            Page::Input => match state.input.focus {
                InputFocus::ErrorText if !state.input.suggestions().is_empty() => {
                    vec![("↑↓", "suggestions"), ("Enter", "accept"), ("Esc", "hide")]
                }
                InputFocus::ErrorText => vec![("Tab", "next field"), ("Ctrl+R", "analyze")],
                InputFocus::ImagePath => vec![
                    ("Enter", "attach"),
                    ("Ctrl+X", "remove"),
                    ("Ctrl+R", "analyze"),
                ],
                InputFocus::AnalyzeButton => vec![("Enter", "analyze"), ("Tab", "next field")],
            },
            Page::Results if app.current_analysis.is_none() => vec![("Enter", "go to input")],
            Page::Results => vec![("←→", "tabs"), ("c", "copy fix"), ("b", "back")],
            Page::History if state.history.search_active => {
                vec![("Enter", "done"), ("Ctrl+U", "clear")]
            }
            Page::History => vec![
                ("/", "search"),
                ("s", "sort"),
                ("f", "filter"),
                ("Enter", "view"),
            ],
            Page::Profile => match state.profile.focus {
                ProfileField::Accent => vec![("←→", "accent"), ("Ctrl+S", "save")],
                ProfileField::AvatarPath => vec![("Enter", "attach"), ("Ctrl+S", "save")],
                ProfileField::ApiKey => vec![("Ctrl+R", "show key"), ("Ctrl+S", "save")],
                _ => vec![("Tab", "next field"), ("Ctrl+S", "save")],
            },
        };

        if state.is_editing_text() {
            hints.push(("Ctrl+C", "quit"));
        } else {
            hints.push(("t", "theme"));
            hints.push(("q", "quit"));
        }
        hints
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.palette;

        let line = match &self.state.notice {
            Some(notice) => Line::from(Span::styled(
                format!(" {}", notice.message),
                styles::notice(notice.level),
            )),
            None => {
                let mut spans = vec![Span::raw(" ")];
                for (key, desc) in self.hints() {
                    spans.push(Span::styled(key, styles::keybinding(p)));
                    spans.push(Span::styled(format!(" {}  ", desc), styles::text_muted(p)));
                }
                Line::from(spans)
            }
        };

        Paragraph::new(line).render(area, buf);
    }
}
