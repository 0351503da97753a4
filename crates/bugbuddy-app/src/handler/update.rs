//! Main update function - handles state transitions (TEA pattern)

use std::sync::Arc;
use std::time::Instant;

use bugbuddy_core::prelude::*;
use bugbuddy_core::{AnalysisRecord, Page};

use crate::attachment::normalize_pasted_path;
use crate::message::{Message, SelectionMove, TextEdit};
use crate::state::{
    AppState, AttachTarget, NoticeLevel, ProfileForm, ResultTab, TextField, EMPTY_REQUEST_HINT,
};
use crate::store::Action;

use super::{keys, paste, UpdateAction, UpdateResult};

/// Rows moved by PageUp/PageDown in the history list
const HISTORY_PAGE_STEP: usize = 5;

/// Process a message and update state
/// Returns an optional action for the event loop to perform
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => match keys::handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Paste(text) => paste::handle_paste(state, text),

        Message::PointerMoved { column, row } => {
            state.pointer = Some((column, row));
            UpdateResult::none()
        }

        Message::Tick => {
            state.on_tick(Instant::now());
            UpdateResult::none()
        }

        Message::Quit => {
            info!("Quit requested");
            state.phase = crate::state::AppPhase::Quitting;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Navigation & Theme
        // ─────────────────────────────────────────────────────────
        Message::GoToPage(page) => {
            navigate(state, page);
            UpdateResult::none()
        }

        Message::ToggleTheme => {
            state.dispatch(Action::ToggleTheme);
            debug!("Theme is now {}", state.app().theme);
            UpdateResult::none()
        }

        Message::FocusNext => {
            move_focus(state, true);
            UpdateResult::none()
        }

        Message::FocusPrevious => {
            move_focus(state, false);
            UpdateResult::none()
        }

        Message::Blur => {
            blur(state);
            UpdateResult::none()
        }

        Message::EditField { field, edit } => {
            edit_field(state, field, edit);
            UpdateResult::none()
        }

        Message::DismissNotice => {
            state.notice = None;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Input Page
        // ─────────────────────────────────────────────────────────
        Message::SuggestionNext => {
            let count = state.input.suggestions().len();
            if count > 0 {
                state.input.suggestion_index = Some(match state.input.suggestion_index {
                    Some(i) => (i + 1) % count,
                    None => 0,
                });
            }
            UpdateResult::none()
        }

        Message::SuggestionPrevious => {
            let count = state.input.suggestions().len();
            if count > 0 {
                state.input.suggestion_index = match state.input.suggestion_index {
                    Some(0) | None => Some(count - 1),
                    Some(i) => Some(i - 1),
                };
            }
            UpdateResult::none()
        }

        Message::AcceptSuggestion => {
            let suggestions = state.input.suggestions();
            if let Some(chosen) = state
                .input
                .suggestion_index
                .and_then(|i| suggestions.get(i).copied())
            {
                state.input.error_text = chosen.to_string();
            }
            state.input.show_suggestions = false;
            state.input.suggestion_index = None;
            UpdateResult::none()
        }

        Message::DismissSuggestions => {
            state.input.show_suggestions = false;
            state.input.suggestion_index = None;
            UpdateResult::none()
        }

        Message::AttachImage(target) => handle_attach_image(state, target),

        Message::ImageLoaded { target, attachment } => {
            match target {
                AttachTarget::Screenshot => {
                    state.input.loading_image = false;
                    state.input.image_path = attachment.path.display().to_string();
                    state.input.screenshot = Some(attachment);
                }
                AttachTarget::Avatar => {
                    state.profile.loading_avatar = false;
                    state.profile.avatar_path = attachment.path.display().to_string();
                    state.profile.avatar = Some(attachment);
                }
            }
            UpdateResult::none()
        }

        Message::ImageRejected {
            target,
            path,
            error,
        } => {
            match target {
                AttachTarget::Screenshot => state.input.loading_image = false,
                AttachTarget::Avatar => state.profile.loading_avatar = false,
            }
            warn!("Rejected attachment {}: {}", path.display(), error);
            state.notify(error, NoticeLevel::Warning);
            UpdateResult::none()
        }

        Message::RemoveImage(target) => {
            match target {
                AttachTarget::Screenshot => {
                    state.input.screenshot = None;
                    state.input.image_path.clear();
                }
                AttachTarget::Avatar => {
                    state.profile.avatar = None;
                    state.profile.avatar_path.clear();
                }
            }
            UpdateResult::none()
        }

        Message::StartAnalysis => handle_start_analysis(state),

        Message::SubmitAnalysis(request) => {
            if !state.dispatch(Action::SetAnalyzing(true)) {
                state.notify(Error::AlreadyInProgress.to_string(), NoticeLevel::Warning);
                return UpdateResult::none();
            }
            info!(
                "Analysis started ({} chars, screenshot: {})",
                request.error_text().len(),
                request.image().is_some()
            );
            state.analysis_error = None;
            UpdateResult::action(UpdateAction::RunAnalysis(request))
        }

        Message::AnalysisCompleted(record) => {
            handle_analysis_completed(state, record);
            UpdateResult::none()
        }

        Message::AnalysisFailed { error } => {
            error!("Analysis failed: {}", error);
            state.dispatch(Action::SetAnalyzing(false));
            state.notify(format!("Analysis failed: {}", error), NoticeLevel::Error);
            state.analysis_error = Some(error);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Results Page
        // ─────────────────────────────────────────────────────────
        Message::NextTab => {
            state.results.tab = state.results.tab.next();
            UpdateResult::none()
        }

        Message::PreviousTab => {
            state.results.tab = state.results.tab.previous();
            UpdateResult::none()
        }

        Message::CopyFix => match &state.app().current_analysis {
            Some(record) => UpdateResult::action(UpdateAction::CopyToClipboard {
                text: record.suggested_fix.code.clone(),
            }),
            None => UpdateResult::none(),
        },

        Message::ClipboardCopied => {
            state.results.copied_at = Some(Instant::now());
            UpdateResult::none()
        }

        Message::ClipboardFailed { error } => {
            // Only the confirmation is withheld
            warn!("Failed to copy fix: {}", error);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // History Page
        // ─────────────────────────────────────────────────────────
        Message::BeginHistorySearch => {
            state.history.search_active = true;
            UpdateResult::none()
        }

        Message::EndHistorySearch => {
            state.history.search_active = false;
            UpdateResult::none()
        }

        Message::HistorySelect(movement) => {
            move_history_selection(state, movement);
            UpdateResult::none()
        }

        Message::HistoryToggleSort => {
            state.history.query.sort = state.history.query.sort.toggled();
            state.history.selected = 0;
            UpdateResult::none()
        }

        Message::HistoryCycleFilter => {
            state.history.query.filter = state.history.query.filter.cycled();
            state.history.selected = 0;
            UpdateResult::none()
        }

        Message::ResetHistoryQuery => {
            state.history.query.search.clear();
            state.history.query.filter = Default::default();
            state.history.selected = 0;
            UpdateResult::none()
        }

        Message::ViewHistoryEntry => {
            let view = state.history_view();
            if let Some(record) = view.get(state.history.selected) {
                state.dispatch(Action::SetCurrentAnalysis(record.clone()));
                state.results = Default::default();
                navigate(state, Page::Results);
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Profile Page
        // ─────────────────────────────────────────────────────────
        Message::AccentNext => {
            state.profile.cycle_accent(true);
            UpdateResult::none()
        }

        Message::AccentPrevious => {
            state.profile.cycle_accent(false);
            UpdateResult::none()
        }

        Message::ToggleApiKeyVisibility => {
            state.profile.show_api_key = !state.profile.show_api_key;
            UpdateResult::none()
        }

        Message::SaveProfile => {
            let update = state.profile.to_update();
            if state.dispatch(Action::UpdateUser(update)) {
                info!("Profile saved");
                state.profile.saved_at = Some(Instant::now());
            }
            UpdateResult::none()
        }
    }
}

/// Switch pages, resetting per-page state that should not survive a visit
fn navigate(state: &mut AppState, page: Page) {
    let from = state.app().current_page;
    if !state.dispatch(Action::SetPage(page)) {
        return;
    }
    if from == page {
        return;
    }

    debug!("Page {} -> {}", from, page);
    state.history.search_active = false;
    if page == Page::Profile {
        // The form always starts from the stored profile
        state.profile = ProfileForm::from_profile(&state.app().user);
    }
}

fn move_focus(state: &mut AppState, forward: bool) {
    match state.app().current_page {
        Page::Input => {
            let focus = state.input.focus;
            state.input.focus = if forward {
                focus.next()
            } else {
                focus.previous()
            };
            state.input.suggestion_index = None;
        }
        Page::Profile => {
            let focus = state.profile.focus;
            state.profile.focus = if forward {
                focus.next()
            } else {
                focus.previous()
            };
        }
        _ => {}
    }
}

fn blur(state: &mut AppState) {
    match state.app().current_page {
        Page::Input => {
            state.input.focus = crate::state::InputFocus::AnalyzeButton;
            state.input.show_suggestions = false;
            state.input.suggestion_index = None;
        }
        Page::Profile => state.profile.focus = crate::state::ProfileField::Save,
        Page::History => state.history.search_active = false,
        _ => {}
    }
}

fn edit_field(state: &mut AppState, field: TextField, edit: TextEdit) {
    let text = state.text_field_mut(field);
    match edit {
        TextEdit::Insert(c) => text.push(c),
        TextEdit::InsertStr(s) => text.push_str(&s),
        TextEdit::Backspace => {
            text.pop();
        }
        TextEdit::Clear => text.clear(),
    }

    match field {
        TextField::ErrorText => {
            state.input.show_suggestions = true;
            state.input.suggestion_index = None;
        }
        TextField::HistorySearch => state.history.selected = 0,
        _ => {}
    }
}

fn handle_attach_image(state: &mut AppState, target: AttachTarget) -> UpdateResult {
    let raw = match target {
        AttachTarget::Screenshot => &state.input.image_path,
        AttachTarget::Avatar => &state.profile.avatar_path,
    };
    if raw.trim().is_empty() {
        state.notify("Enter the path of an image file first", NoticeLevel::Info);
        return UpdateResult::none();
    }

    let path = normalize_pasted_path(raw);
    match target {
        AttachTarget::Screenshot => state.input.loading_image = true,
        AttachTarget::Avatar => state.profile.loading_avatar = true,
    }
    UpdateResult::action(UpdateAction::LoadImage { target, path })
}

fn handle_start_analysis(state: &mut AppState) -> UpdateResult {
    if state.app().is_analyzing {
        // Trigger is disabled while in flight
        debug!("Analysis already in progress, ignoring trigger");
        return UpdateResult::none();
    }

    match state.input.request() {
        Ok(request) => UpdateResult::message(Message::SubmitAnalysis(request)),
        Err(e) => {
            debug!("Not starting analysis: {}", e);
            state.notify(EMPTY_REQUEST_HINT, NoticeLevel::Info);
            UpdateResult::none()
        }
    }
}

/// Store signaling after a successful analysis: current, history, in-flight
/// cleared, then the results page
fn handle_analysis_completed(state: &mut AppState, record: Arc<AnalysisRecord>) {
    info!(
        "Analysis {} completed with confidence {}",
        record.id, record.confidence
    );

    state.dispatch(Action::SetCurrentAnalysis(record.clone()));
    state.dispatch(Action::AddToHistory(record));
    state.dispatch(Action::SetAnalyzing(false));
    state.dispatch(Action::SetPage(Page::Results));

    state.results = Default::default();
    state.input = Default::default();
    state.history.search_active = false;
}

fn move_history_selection(state: &mut AppState, movement: SelectionMove) {
    let len = state.history_view().len();
    if len == 0 {
        state.history.selected = 0;
        return;
    }

    let last = len - 1;
    let current = state.history.selected.min(last);
    state.history.selected = match movement {
        SelectionMove::Next => (current + 1).min(last),
        SelectionMove::Previous => current.saturating_sub(1),
        SelectionMove::PageDown => (current + HISTORY_PAGE_STEP).min(last),
        SelectionMove::PageUp => current.saturating_sub(HISTORY_PAGE_STEP),
        SelectionMove::First => 0,
        SelectionMove::Last => last,
    };
}
