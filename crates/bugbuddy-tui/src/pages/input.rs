//! Input page: error text, suggestions, screenshot and the analyze trigger

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use bugbuddy_app::state::{AppState, InputFocus, EMPTY_REQUEST_HINT};

use super::{render_header, HEADER_HEIGHT};
use crate::theme::{styles, Palette};
use crate::widgets::{spinner, TextInput};

const ERROR_PLACEHOLDER: &str = "Paste your error message or stack trace here...";
const IMAGE_PLACEHOLDER: &str = "Type or drop an image path, Enter to attach";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, p: &Palette) {
    let input = &state.input;
    let suggestions = input.suggestions();
    let suggestions_height = if suggestions.is_empty() {
        0
    } else {
        suggestions.len() as u16 + 2
    };

    let [header, error_area, suggestions_area, image_area, preview_area, button_area, hint_area] =
        Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(5),
            Constraint::Length(suggestions_height),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .areas(area);

    render_header(
        frame,
        header,
        "What's Bugging You?",
        "Paste your error message or attach a screenshot for AI-powered analysis",
        p,
    );

    frame.render_widget(
        TextInput::new("Error Message", &input.error_text, p)
            .placeholder(ERROR_PLACEHOLDER)
            .focused(input.focus == InputFocus::ErrorText),
        error_area,
    );

    if !suggestions.is_empty() {
        render_suggestions(frame, suggestions_area, &suggestions, input.suggestion_index, p);
    }

    frame.render_widget(
        TextInput::new("Screenshot (Optional)", &input.image_path, p)
            .placeholder(IMAGE_PLACEHOLDER)
            .focused(input.focus == InputFocus::ImagePath),
        image_area,
    );

    let preview = if input.loading_image {
        Line::from(Span::styled(
            format!(" {} Loading image…", spinner(state.frame)),
            styles::text_muted(p),
        ))
    } else if let Some(screenshot) = &input.screenshot {
        Line::from(vec![
            Span::styled(" 📎 ", styles::accent(p)),
            Span::styled(screenshot.preview_label(), styles::text_primary(p)),
            Span::styled("  Ctrl+X", styles::keybinding(p)),
            Span::styled(" remove", styles::text_muted(p)),
        ])
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(preview), preview_area);

    render_trigger(frame, button_area, hint_area, state, p);
}

fn render_suggestions(
    frame: &mut Frame,
    area: Rect,
    suggestions: &[&'static str],
    selected: Option<usize>,
    p: &Palette,
) {
    let items: Vec<ListItem> = suggestions
        .iter()
        .map(|s| ListItem::new(Span::styled(*s, styles::text_secondary(p))))
        .collect();

    let list = List::new(items)
        .block(styles::titled_card(p, "Suggestions", false))
        .highlight_style(styles::selected_row(p))
        .highlight_symbol("› ");

    let mut list_state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_trigger(
    frame: &mut Frame,
    button_area: Rect,
    hint_area: Rect,
    state: &AppState,
    p: &Palette,
) {
    let input = &state.input;

    let button = if state.app().is_analyzing {
        Line::from(Span::styled(
            format!("  {} Analyzing Bug...  ", spinner(state.frame)),
            styles::button(p, false, true),
        ))
    } else {
        let enabled = input.can_analyze();
        Line::from(vec![
            Span::styled(
                "  Analyze Bug  ",
                styles::button(p, input.focus == InputFocus::AnalyzeButton, enabled),
            ),
            Span::styled("  Ctrl+R", styles::keybinding(p)),
        ])
    };
    frame.render_widget(Paragraph::new(button).centered(), button_area);

    let hint = if let Some(reason) = &state.analysis_error {
        Line::from(Span::styled(
            format!("Analysis failed: {}", reason),
            styles::notice(bugbuddy_app::state::NoticeLevel::Error),
        ))
    } else if !input.can_analyze() && !state.app().is_analyzing {
        Line::from(Span::styled(EMPTY_REQUEST_HINT, styles::text_muted(p)))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(hint).centered(), hint_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{state_on, test_screenshot, TestTerminal};
    use bugbuddy_app::store::Action;
    use bugbuddy_core::Page;

    fn draw(state: &AppState) -> TestTerminal {
        let palette = Palette::default();
        let mut term = TestTerminal::new();
        term.draw_with(|frame| render(frame, frame.area(), state, &palette));
        term
    }

    #[test]
    fn test_empty_form_shows_disabled_hint() {
        let state = state_on(Page::Input);
        let term = draw(&state);

        assert!(term.buffer_contains("What's Bugging You?"));
        assert!(term.buffer_contains("Analyze Bug"));
        assert!(term.buffer_contains(EMPTY_REQUEST_HINT));
    }

    #[test]
    fn test_hint_hidden_once_text_entered() {
        let mut state = state_on(Page::Input);
        state.input.error_text = "TypeError: x is undefined".to_string();
        let term = draw(&state);

        assert!(term.buffer_contains("TypeError: x is undefined"));
        assert!(!term.buffer_contains(EMPTY_REQUEST_HINT));
    }

    #[test]
    fn test_suggestions_listed() {
        let mut state = state_on(Page::Input);
        state.input.error_text = "Type".to_string();
        state.input.show_suggestions = true;
        state.input.suggestion_index = Some(0);
        let term = draw(&state);

        assert!(term.buffer_contains("Suggestions"));
        assert!(term.buffer_contains("› TypeError"));
    }

    #[test]
    fn test_screenshot_preview() {
        let mut state = state_on(Page::Input);
        state.input.screenshot = Some(test_screenshot());
        let term = draw(&state);

        assert!(term.buffer_contains("crash.png · PNG · 1280×720 · 250 KB"));
        assert!(!term.buffer_contains(EMPTY_REQUEST_HINT));
    }

    #[test]
    fn test_analyzing_spinner() {
        let mut state = state_on(Page::Input);
        state.input.error_text = "boom".to_string();
        state.dispatch(Action::SetAnalyzing(true));
        let term = draw(&state);

        assert!(term.buffer_contains("Analyzing Bug..."));
    }

    #[test]
    fn test_failure_reason_shown() {
        let mut state = state_on(Page::Input);
        state.input.error_text = "boom".to_string();
        state.analysis_error = Some("backend unavailable".to_string());
        let term = draw(&state);

        assert!(term.buffer_contains("Analysis failed: backend unavailable"));
    }
}
