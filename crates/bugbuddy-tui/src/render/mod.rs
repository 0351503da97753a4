//! Main render/view function (View in TEA pattern)

#[cfg(test)]
mod tests;

use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use bugbuddy_app::state::AppState;

use crate::decoration::Decorations;
use crate::layout;
use crate::pages;
use crate::theme::Palette;
use crate::widgets::{NavBar, StatusBar};

/// Render the complete UI
///
/// Exactly one page view is drawn per frame. Decorations go over the page
/// and under the navigation and status bars.
pub fn view(frame: &mut Frame, state: &AppState, decorations: &Decorations) {
    let area = frame.area();
    let app = state.app();
    let palette = Palette::new(app.theme, &app.user.accent_color);

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        area,
    );

    let areas = layout::create(area);
    pages::render_page(frame, layout::page_area(area), state, &palette);
    decorations.render(frame.buffer_mut());

    frame.render_widget(NavBar::new(state, &palette), areas.nav);
    frame.render_widget(StatusBar::new(state, &palette), areas.status);
}
