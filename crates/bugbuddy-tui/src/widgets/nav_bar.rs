//! Navigation bar
//!
//! Brand, the five page tabs with their shortcut digits, the analyzing
//! indicator and the theme toggle.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use bugbuddy_app::state::AppState;
use bugbuddy_core::{Page, Theme};

use super::spinner;
use crate::theme::{styles, Palette};

pub struct NavBar<'a> {
    state: &'a AppState,
    palette: &'a Palette,
}

impl<'a> NavBar<'a> {
    pub fn new(state: &'a AppState, palette: &'a Palette) -> Self {
        Self { state, palette }
    }

    fn tabs(&self) -> Line<'static> {
        let p = self.palette;
        let current = self.state.app().current_page;
        let mut spans = vec![Span::styled("🐞 BugBuddy ", styles::accent_bold(p))];

        for (i, page) in Page::ALL.iter().enumerate() {
            let style = if *page == current {
                styles::button(p, true, true)
            } else {
                styles::text_secondary(p)
            };
            spans.push(Span::styled(format!(" {}", i + 1), styles::text_muted(p)));
            spans.push(Span::styled(format!(" {} ", page.label()), style));
        }
        Line::from(spans)
    }

    fn indicators(&self) -> Line<'static> {
        let p = self.palette;
        let app = self.state.app();
        let mut spans = Vec::new();

        if app.is_analyzing {
            spans.push(Span::styled(
                format!("{} Analyzing…  ", spinner(self.state.frame)),
                styles::accent(p),
            ));
        }

        let theme = match app.theme {
            Theme::Dark => "☾ Dark",
            Theme::Light => "☀ Light",
        };
        spans.push(Span::styled(theme, styles::text_secondary(p)));
        spans.push(Span::styled(" (t)", styles::text_muted(p)));
        Line::from(spans)
    }
}

impl Widget for NavBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::card(self.palette, false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(28)]).areas(inner);

        Paragraph::new(self.tabs()).render(left, buf);
        Paragraph::new(self.indicators())
            .right_aligned()
            .render(right, buf);
    }
}
