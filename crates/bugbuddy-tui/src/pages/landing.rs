//! Landing page: hero, call to action and feature cards

use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use bugbuddy_app::state::AppState;

use crate::theme::{styles, Palette};

const TAGLINE: &str = "Transform cryptic error messages into clear explanations with \
AI-powered debugging assistance. Paste your error, attach a screenshot, and get instant \
solutions.";

const FEATURES: [(&str, &str, &str); 3] = [
    (
        "⚡",
        "AI-Powered Analysis",
        "Get instant explanations and fixes for any error message.",
    ),
    (
        "🔒",
        "Secure & Private",
        "Your code snippets are processed securely and never stored.",
    ),
    (
        "⏱",
        "Save Time",
        "Debug faster with comprehensive reasoning and suggestions.",
    ),
];

/// Height of the hero row (text and mascot)
const HERO_HEIGHT: u16 = 12;

/// Width reserved for the mascot on the right of the hero
pub const MASCOT_WIDTH: u16 = 30;

struct LandingAreas {
    hero_text: Rect,
    mascot: Rect,
    features: Rect,
}

fn areas(area: Rect) -> LandingAreas {
    let [_, hero, _, features] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(HERO_HEIGHT),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    let [hero_text, mascot] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(MASCOT_WIDTH)]).areas(hero);

    LandingAreas {
        hero_text,
        mascot,
        features,
    }
}

/// Slot the mascot decoration is mounted into
pub fn mascot_area(content: Rect) -> Rect {
    areas(content).mascot
}

pub fn render(frame: &mut Frame, area: Rect, _state: &AppState, p: &Palette) {
    let areas = areas(area);

    let hero = vec![
        Line::from(vec![
            Span::styled("Debug ", styles::heading(p)),
            Span::styled("Smarter", styles::accent_bold(p)),
            Span::styled(", Not Harder", styles::heading(p)),
        ]),
        Line::default(),
        Line::from(Span::styled(TAGLINE, styles::text_secondary(p))),
        Line::default(),
        Line::from(vec![
            Span::styled("  Start Debugging →  ", styles::button(p, true, true)),
            Span::raw("  "),
            Span::styled("Enter", styles::keybinding(p)),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(hero).wrap(Wrap { trim: true }),
        areas.hero_text.inner(Margin::new(2, 1)),
    );

    let cards = Layout::horizontal([Constraint::Ratio(1, 3); 3])
        .spacing(1)
        .split(areas.features);

    for ((icon, title, description), card_area) in FEATURES.iter().zip(cards.iter()) {
        let block = styles::titled_card(p, &format!("{} {}", icon, title), false);
        let body = Paragraph::new(Span::styled(*description, styles::text_secondary(p)))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(body, *card_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_state, TestTerminal};

    #[test]
    fn test_landing_shows_cta_and_features() {
        let state = create_test_state();
        let palette = Palette::default();
        let mut term = TestTerminal::new();
        term.draw_with(|frame| render(frame, frame.area(), &state, &palette));

        assert!(term.buffer_contains("Smarter"));
        assert!(term.buffer_contains("Start Debugging"));
        assert!(term.buffer_contains("AI-Powered Analysis"));
        assert!(term.buffer_contains("Secure & Private"));
        assert!(term.buffer_contains("Save Time"));
    }

    #[test]
    fn test_mascot_area_is_right_of_hero() {
        let content = Rect::new(0, 3, 100, 28);
        let mascot = mascot_area(content);
        assert_eq!(mascot.width, MASCOT_WIDTH);
        assert_eq!(mascot.height, HERO_HEIGHT);
        assert_eq!(mascot.x + mascot.width, 100);
    }
}
