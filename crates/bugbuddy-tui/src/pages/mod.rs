//! Page views, one module per page

pub mod history;
pub mod input;
pub mod landing;
pub mod profile;
pub mod results;

use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use bugbuddy_app::state::AppState;
use bugbuddy_core::Page;

use crate::theme::{styles, Palette};

/// Rows taken by [`render_header`]
pub const HEADER_HEIGHT: u16 = 3;

/// Draw the view for the current page into `area`
pub fn render_page(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    match state.app().current_page {
        Page::Landing => landing::render(frame, area, state, palette),
        Page::Input => input::render(frame, area, state, palette),
        Page::Results => results::render(frame, area, state, palette),
        Page::History => history::render(frame, area, state, palette),
        Page::Profile => profile::render(frame, area, state, palette),
    }
}

/// Centered page title with a one-line subtitle
fn render_header(frame: &mut Frame, area: Rect, title: &str, subtitle: &str, p: &Palette) {
    let lines = vec![
        Line::from(Span::styled(title.to_string(), styles::heading(p))),
        Line::from(Span::styled(subtitle.to_string(), styles::text_secondary(p))),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        area,
    );
}
