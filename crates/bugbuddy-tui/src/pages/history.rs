//! History page: search, sort, filter, entry list and stats

use std::sync::Arc;

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use bugbuddy_app::history::{truncate_preview, ERROR_PREVIEW_CHARS, EXPLANATION_PREVIEW_CHARS};
use bugbuddy_app::state::AppState;
use bugbuddy_core::AnalysisRecord;

use super::{render_header, HEADER_HEIGHT};
use crate::layout::centered_rect;
use crate::theme::{styles, Palette};
use crate::widgets::TextInput;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, p: &Palette) {
    let [header, toolbar, list_area, stats_area] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(3),
    ])
    .areas(area);

    render_header(
        frame,
        header,
        "Analysis History",
        "Review and revisit your past bug analyses",
        p,
    );
    render_toolbar(frame, toolbar, state, p);

    let entries = state.history_view();
    if entries.is_empty() {
        render_empty(frame, list_area, state, p);
    } else {
        render_entries(frame, list_area, &entries, state.history.selected, p);
    }

    render_stats(frame, stats_area, state, p);
}

fn render_toolbar(frame: &mut Frame, area: Rect, state: &AppState, p: &Palette) {
    let query = &state.history.query;
    let [search_area, options_area] =
        Layout::horizontal([Constraint::Min(20), Constraint::Length(52)]).areas(area);

    frame.render_widget(
        TextInput::new("Search", &query.search, p)
            .placeholder("Press / to search errors")
            .focused(state.history.search_active),
        search_area,
    );

    let options = Line::from(vec![
        Span::styled("s", styles::keybinding(p)),
        Span::styled(" Sort: ", styles::text_muted(p)),
        Span::styled(query.sort.label(), styles::text_primary(p)),
        Span::raw("  "),
        Span::styled("f", styles::keybinding(p)),
        Span::styled(" Filter: ", styles::text_muted(p)),
        Span::styled(query.filter.label(), styles::text_primary(p)),
    ]);
    frame.render_widget(
        Paragraph::new(options).block(styles::card(p, false)),
        options_area,
    );
}

fn render_empty(frame: &mut Frame, area: Rect, state: &AppState, p: &Palette) {
    let lines = if state.app().history.is_empty() {
        vec![
            Line::from(Span::styled("No analyses yet", styles::heading(p))),
            Line::from(Span::styled(
                "Start analyzing bugs to see your history here",
                styles::text_secondary(p),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("  Start Analyzing  ", styles::button(p, true, true)),
                Span::raw("  "),
                Span::styled("Enter", styles::keybinding(p)),
            ]),
        ]
    } else {
        vec![
            Line::from(Span::styled("No matching analyses found", styles::heading(p))),
            Line::from(Span::styled(
                "Try adjusting your search or filters",
                styles::text_secondary(p),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("Esc", styles::keybinding(p)),
                Span::styled(" clear search and filter", styles::text_muted(p)),
            ]),
        ]
    };

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered_rect(area, area.width, 4),
    );
}

fn entry_item(record: &AnalysisRecord, p: &Palette) -> ListItem<'static> {
    let level = record.confidence_level();
    let confidence_style = Style::default().fg(p.confidence(level));

    ListItem::new(vec![
        Line::from(vec![
            Span::styled(record.formatted_date(), styles::text_muted(p)),
            Span::raw("  "),
            Span::styled(
                format!("{} {}", record.confidence, level.label()),
                confidence_style,
            ),
        ]),
        Line::from(Span::styled(
            truncate_preview(&record.error_message, ERROR_PREVIEW_CHARS),
            styles::text_primary(p),
        )),
        Line::from(Span::styled(
            truncate_preview(&record.explanation, EXPLANATION_PREVIEW_CHARS),
            styles::text_secondary(p),
        )),
        Line::default(),
    ])
}

fn render_entries(
    frame: &mut Frame,
    area: Rect,
    entries: &[Arc<AnalysisRecord>],
    selected: usize,
    p: &Palette,
) {
    let items: Vec<ListItem> = entries.iter().map(|r| entry_item(r, p)).collect();
    let list = List::new(items)
        .block(styles::card(p, false))
        .highlight_style(styles::selected_row(p))
        .highlight_symbol("▌ ");

    let mut list_state =
        ListState::default().with_selected(Some(selected.min(entries.len() - 1)));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_stats(frame: &mut Frame, area: Rect, state: &AppState, p: &Palette) {
    let stats = state.history_stats();
    let stat = |label: &'static str, value: String| {
        vec![
            Span::styled(value, styles::accent_bold(p)),
            Span::styled(format!(" {}    ", label), styles::text_muted(p)),
        ]
    };

    let mut spans = Vec::new();
    spans.extend(stat("Total Analyses", stats.total.to_string()));
    spans.extend(stat(
        "Average Confidence",
        format!("{}%", stats.average_confidence),
    ));
    spans.extend(stat("High Confidence", stats.high_confidence.to_string()));

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(styles::card(p, false)),
        area,
    );
}
