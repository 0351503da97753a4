//! Results page
//!
//! Without a current analysis this draws the fallback view; it never
//! redirects.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs, Wrap};
use ratatui::Frame;

use bugbuddy_app::state::{AppState, ResultTab};
use bugbuddy_core::AnalysisRecord;

use super::{render_header, HEADER_HEIGHT};
use crate::layout::centered_rect;
use crate::theme::{styles, Palette};
use crate::widgets::ConfidenceMeter;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, p: &Palette) {
    match &state.app().current_analysis {
        Some(record) => render_record(frame, area, state, record, p),
        None => render_fallback(frame, area, p),
    }
}

fn render_fallback(frame: &mut Frame, area: Rect, p: &Palette) {
    let lines = vec![
        Line::from(Span::styled("No analysis available", styles::heading(p))),
        Line::default(),
        Line::from(vec![
            Span::styled("  Go to Input  ", styles::button(p, true, true)),
            Span::raw("  "),
            Span::styled("Enter", styles::keybinding(p)),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered_rect(area, area.width, 3),
    );
}

fn render_record(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    record: &AnalysisRecord,
    p: &Palette,
) {
    let has_screenshot = record.screenshot.is_some();
    let [header, meter_area, error_area, meta_area, tabs_area, body_area] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(3),
        Constraint::Length(5),
        Constraint::Length(if has_screenshot { 2 } else { 1 }),
        Constraint::Length(2),
        Constraint::Min(3),
    ])
    .areas(area);

    render_header(
        frame,
        header,
        "Bug Analysis Results",
        "Here's what we found",
        p,
    );

    let meter_block = styles::titled_card(p, "Confidence", false);
    let meter_inner = meter_block.inner(meter_area);
    frame.render_widget(meter_block, meter_area);
    frame.render_widget(ConfidenceMeter::new(record.confidence, p), meter_inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            record.error_message.clone(),
            styles::text_primary(p),
        ))
        .wrap(Wrap { trim: false })
        .block(styles::titled_card(p, "Original Error", false)),
        error_area,
    );

    let mut meta = Vec::new();
    if let Some(screenshot) = &record.screenshot {
        meta.push(Line::from(vec![
            Span::styled(" Screenshot: ", styles::text_muted(p)),
            Span::styled(screenshot.preview_label(), styles::text_secondary(p)),
        ]));
    }
    meta.push(Line::from(vec![
        Span::styled(" Analyzed: ", styles::text_muted(p)),
        Span::styled(record.formatted_timestamp(), styles::text_secondary(p)),
    ]));
    frame.render_widget(Paragraph::new(meta), meta_area);

    let selected = ResultTab::ALL
        .iter()
        .position(|t| *t == state.results.tab)
        .unwrap_or(0);
    let tabs = Tabs::new(ResultTab::ALL.iter().map(|t| t.label()))
        .select(selected)
        .style(styles::text_secondary(p))
        .highlight_style(styles::button(p, true, true))
        .divider("│");
    frame.render_widget(tabs, tabs_area);

    let body = match state.results.tab {
        ResultTab::Explanation => prose(&record.explanation, "Explanation", p),
        ResultTab::SuggestedFix => fix(state, record, p),
        ResultTab::Reasoning => prose(&record.reasoning, "Reasoning", p),
    };
    frame.render_widget(body, body_area);
}

fn prose<'a>(text: &str, title: &str, p: &Palette) -> Paragraph<'a> {
    Paragraph::new(Span::styled(text.to_string(), styles::text_primary(p)))
        .wrap(Wrap { trim: true })
        .block(styles::titled_card(p, title, true))
}

fn fix<'a>(state: &AppState, record: &AnalysisRecord, p: &Palette) -> Paragraph<'a> {
    let fix = &record.suggested_fix;

    let copy = if state.results.show_copied() {
        Span::styled("✓ Copied!", styles::success())
    } else {
        Span::styled("c Copy Fix", styles::keybinding(p))
    };
    let language = fix.language.as_deref().unwrap_or("text");

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("[{}]", language), styles::accent(p)),
            Span::raw("  "),
            copy,
        ]),
        Line::default(),
    ];

    let code_style = Style::default().fg(p.text_primary).bg(p.surface);
    lines.extend(
        fix.code
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), code_style))),
    );

    Paragraph::new(lines).block(styles::titled_card(p, "Suggested Fix", true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{state_on, test_record, with_analysis, TestTerminal};
    use bugbuddy_core::Page;
    use std::time::Instant;

    fn draw(state: &AppState) -> TestTerminal {
        let palette = Palette::default();
        let mut term = TestTerminal::new();
        term.draw_with(|frame| render(frame, frame.area(), state, &palette));
        term
    }

    #[test]
    fn test_fallback_without_analysis() {
        let state = state_on(Page::Results);
        let term = draw(&state);

        assert!(term.buffer_contains("No analysis available"));
        assert!(term.buffer_contains("Go to Input"));
    }

    #[test]
    fn test_record_details() {
        let mut state = state_on(Page::Results);
        let record = test_record("TypeError: Cannot read property 'name'", 92);
        with_analysis(&mut state, record.clone());
        let term = draw(&state);

        assert!(term.buffer_contains("Bug Analysis Results"));
        assert!(term.buffer_contains("92% · High confidence"));
        assert!(term.buffer_contains("TypeError: Cannot read property 'name'"));
        assert!(term.buffer_contains(&record.formatted_timestamp()));
        assert!(term.buffer_contains("Explanation"));
        assert!(term.buffer_contains("Reasoning"));
        assert!(term.buffer_contains("The value was undefined"));
    }

    #[test]
    fn test_fix_tab_with_language_and_copied() {
        let mut state = state_on(Page::Results);
        with_analysis(&mut state, test_record("boom", 70));
        state.results.tab = ResultTab::SuggestedFix;

        let term = draw(&state);
        assert!(term.buffer_contains("[javascript]"));
        assert!(term.buffer_contains("c Copy Fix"));
        assert!(term.buffer_contains("user?.name"));

        state.results.copied_at = Some(Instant::now());
        let term = draw(&state);
        assert!(term.buffer_contains("Copied!"));
    }
}
