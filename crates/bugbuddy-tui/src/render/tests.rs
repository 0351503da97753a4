//! Full-screen rendering tests for `view`

use super::*;
use crate::test_utils::{
    create_test_state, state_on, test_record, with_analysis, TestTerminal, TEST_HEIGHT, TEST_WIDTH,
};
use bugbuddy_app::state::NoticeLevel;
use bugbuddy_app::store::Action;
use bugbuddy_core::{Page, Theme};
use ratatui::layout::Rect;
use ratatui::style::Color;

const SCREEN: Rect = Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT);

fn draw(state: &AppState) -> TestTerminal {
    let decorations = Decorations::new(0, state.app().theme);
    draw_decorated(state, &decorations)
}

fn draw_decorated(state: &AppState, decorations: &Decorations) -> TestTerminal {
    let mut term = TestTerminal::new();
    term.draw_with(|frame| view(frame, state, decorations));
    term
}

#[test]
fn test_landing_frame() {
    let state = create_test_state();
    let term = draw(&state);

    assert!(term.buffer_contains("BugBuddy"));
    assert!(term.buffer_contains("Start Debugging"));
    assert!(term.buffer_contains("start debugging"));
}

#[test]
fn test_exactly_one_page_drawn() {
    for page in Page::ALL {
        let state = state_on(page);
        let term = draw(&state);

        let markers = [
            (Page::Landing, "Smarter"),
            (Page::Input, "What's Bugging You?"),
            (Page::Results, "No analysis available"),
            (Page::History, "Analysis History"),
            (Page::Profile, "Profile & Settings"),
        ];
        for (other, marker) in markers {
            assert_eq!(
                term.buffer_contains(marker),
                other == page,
                "{} on the {} page",
                marker,
                page
            );
        }
    }
}

#[test]
fn test_results_after_analysis() {
    let mut state = state_on(Page::Results);
    with_analysis(&mut state, test_record("TypeError: boom", 92));
    let term = draw(&state);

    assert!(term.buffer_contains("Bug Analysis Results"));
    assert!(term.buffer_contains("92% · High confidence"));
    assert!(!term.buffer_contains("No analysis available"));
}

#[test]
fn test_theme_sets_background() {
    let mut state = create_test_state();
    let dark = draw(&state);
    let dark_bg = dark.buffer()[(0, TEST_HEIGHT - 1)].bg;

    state.dispatch(Action::ToggleTheme);
    let light = draw(&state);
    let light_bg = light.buffer()[(0, TEST_HEIGHT - 1)].bg;

    assert_eq!(dark_bg, Palette::new(Theme::Dark, &Default::default()).background);
    assert_ne!(dark_bg, light_bg);
}

#[test]
fn test_accent_follows_profile() {
    let state = create_test_state();
    let palette = Palette::new(state.app().theme, &state.app().user.accent_color);
    assert_eq!(palette.accent, Color::Rgb(0x4F, 0x46, 0xE5));
}

#[test]
fn test_notice_in_status_bar() {
    let mut state = create_test_state();
    state.notify("Unsupported file: notes.txt", NoticeLevel::Error);
    let term = draw(&state);

    assert!(term.line_contains(TEST_HEIGHT - 1, "Unsupported file: notes.txt"));
}

#[test]
fn test_mascot_drawn_on_landing() {
    let mut state = create_test_state();
    state.settings.ui.mascot = true;
    let mut decorations = Decorations::with_seed(0, Theme::Dark, 1);
    decorations.sync(&state, SCREEN);

    let term = draw_decorated(&state, &decorations);
    assert!(term.buffer_contains("▄██████▄"));

    state.dispatch(Action::SetPage(Page::Input));
    decorations.sync(&state, SCREEN);
    let term = draw_decorated(&state, &decorations);
    assert!(!term.buffer_contains("▄██████▄"));
}

#[test]
fn test_decorations_do_not_hide_page() {
    let mut state = state_on(Page::History);
    state.settings.ui.particles = true;
    let mut decorations = Decorations::with_seed(200, Theme::Dark, 3);
    decorations.sync(&state, SCREEN);

    let term = draw_decorated(&state, &decorations);
    assert!(term.buffer_contains("No analyses yet"));
    assert!(term.buffer_contains("Total Analyses"));
}
