//! Profile page: personal details, API key, appearance and save

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use bugbuddy_app::state::{AppState, ProfileField, ProfileForm};
use bugbuddy_core::{AccentColor, Theme};

use super::{render_header, HEADER_HEIGHT};
use crate::theme::{styles, Palette};
use crate::widgets::{spinner, TextInput};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, p: &Palette) {
    let form = &state.profile;

    let [header, body, save_area] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(12),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(
        frame,
        header,
        "Profile & Settings",
        "Customize your BugBuddy experience",
        p,
    );

    let [left, right] = Layout::horizontal([Constraint::Ratio(1, 2); 2])
        .spacing(2)
        .areas(body);

    render_personal(frame, left, state, p);
    render_preferences(frame, right, state, p);

    let saved = if form.show_saved() {
        Span::styled("  ✓ Saved!", styles::success())
    } else {
        Span::styled("  Ctrl+S", styles::keybinding(p))
    };
    let save = Line::from(vec![
        Span::styled(
            "  Save Changes  ",
            styles::button(p, form.focus == ProfileField::Save, true),
        ),
        saved,
    ]);
    frame.render_widget(Paragraph::new(save).centered(), save_area);
}

fn render_personal(frame: &mut Frame, area: Rect, state: &AppState, p: &Palette) {
    let form = &state.profile;
    let [name, email, avatar, avatar_preview] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        TextInput::new("Full Name", &form.name, p).focused(form.focus == ProfileField::Name),
        name,
    );
    frame.render_widget(
        TextInput::new("Email Address", &form.email, p)
            .focused(form.focus == ProfileField::Email),
        email,
    );
    frame.render_widget(
        TextInput::new("Avatar", &form.avatar_path, p)
            .placeholder("Image path, Enter to attach")
            .focused(form.focus == ProfileField::AvatarPath),
        avatar,
    );

    let preview = if form.loading_avatar {
        Line::from(Span::styled(
            format!(" {} Loading image…", spinner(state.frame)),
            styles::text_muted(p),
        ))
    } else if let Some(image) = &form.avatar {
        Line::from(vec![
            Span::styled(" 🖼 ", styles::accent(p)),
            Span::styled(image.preview_label(), styles::text_secondary(p)),
        ])
    } else {
        Line::from(Span::styled(" No avatar", styles::text_muted(p)))
    };
    frame.render_widget(Paragraph::new(preview), avatar_preview);
}

fn render_preferences(frame: &mut Frame, area: Rect, state: &AppState, p: &Palette) {
    let form = &state.profile;
    let [api_key, api_hint, accent, theme] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(area);

    frame.render_widget(
        TextInput::new("OpenAI API Key (Optional)", &form.api_key, p)
            .placeholder("sk-...")
            .masked(!form.show_api_key)
            .focused(form.focus == ProfileField::ApiKey),
        api_key,
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" Ctrl+R", styles::keybinding(p)),
            Span::styled(
                if form.show_api_key { " hide key" } else { " show key" },
                styles::text_muted(p),
            ),
        ])),
        api_hint,
    );

    let accent_focused = form.focus == ProfileField::Accent;
    frame.render_widget(
        Paragraph::new(accent_swatches(form, p))
            .block(styles::titled_card(p, "Primary Color", accent_focused)),
        accent,
    );

    let theme_focused = form.focus == ProfileField::Theme;
    let theme_label = match state.app().theme {
        Theme::Dark => "☾ Dark",
        Theme::Light => "☀ Light",
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(theme_label, styles::text_primary(p)),
            Span::styled("  Enter to toggle", styles::text_muted(p)),
        ]))
        .block(styles::titled_card(p, "Theme", theme_focused)),
        theme,
    );
}

fn accent_swatches(form: &ProfileForm, p: &Palette) -> Line<'static> {
    let selected = form.accent.preset_index();
    let mut spans = Vec::new();

    for (i, preset) in AccentColor::PRESETS.iter().enumerate() {
        let color = preset
            .parse::<AccentColor>()
            .map(|c| {
                let (r, g, b) = c.rgb();
                Color::Rgb(r, g, b)
            })
            .unwrap_or(p.accent);
        let marker = if selected == Some(i) { "[██]" } else { " ██ " };
        spans.push(Span::styled(marker, Style::default().fg(color)));
    }

    spans.push(Span::styled(
        format!(" {}", form.accent.as_str()),
        styles::text_secondary(p),
    ));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{state_on, test_screenshot, TestTerminal};
    use bugbuddy_core::Page;
    use std::time::Instant;

    fn draw(state: &AppState) -> TestTerminal {
        let palette = Palette::default();
        let mut term = TestTerminal::new();
        term.draw_with(|frame| render(frame, frame.area(), state, &palette));
        term
    }

    #[test]
    fn test_profile_fields() {
        let state = state_on(Page::Profile);
        let term = draw(&state);

        assert!(term.buffer_contains("Profile & Settings"));
        assert!(term.buffer_contains("Full Name"));
        assert!(term.buffer_contains("Email Address"));
        assert!(term.buffer_contains("OpenAI API Key"));
        assert!(term.buffer_contains("Primary Color"));
        assert!(term.buffer_contains("#4F46E5"));
        assert!(term.buffer_contains("Save Changes"));
    }

    #[test]
    fn test_api_key_masked_until_revealed() {
        let mut state = state_on(Page::Profile);
        state.profile.api_key = "sk-test".to_string();

        let term = draw(&state);
        assert!(!term.buffer_contains("sk-test"));
        assert!(term.buffer_contains("•••••••"));

        state.profile.show_api_key = true;
        let term = draw(&state);
        assert!(term.buffer_contains("sk-test"));
    }

    #[test]
    fn test_saved_confirmation_and_avatar() {
        let mut state = state_on(Page::Profile);
        state.profile.saved_at = Some(Instant::now());
        state.profile.avatar = Some(test_screenshot());
        let term = draw(&state);

        assert!(term.buffer_contains("Saved!"));
        assert!(term.buffer_contains("crash.png"));
    }

    #[test]
    fn test_selected_swatch_marked() {
        let form = ProfileForm::default();
        let line = accent_swatches(&form, &Palette::default());
        assert_eq!(line.spans[0].content, "[██]");
        assert_eq!(line.spans[1].content, " ██ ");
    }
}
