//! Key event handlers for each page

use bugbuddy_core::Page;

use crate::input_key::InputKey;
use crate::message::{Message, SelectionMove, TextEdit};
use crate::state::{AppState, AttachTarget, InputFocus, ProfileField, TextField};

/// Convert key events to messages based on the current page and focus
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    if let Some(msg) = handle_key_global(state, &key) {
        return Some(msg);
    }

    match state.app().current_page {
        Page::Landing => handle_key_landing(key),
        Page::Input => handle_key_input(state, key),
        Page::Results => handle_key_results(state, key),
        Page::History => handle_key_history(state, key),
        Page::Profile => handle_key_profile(state, key),
    }
}

/// Shortcuts available on every page.
///
/// Ctrl and function keys always apply; plain letters and digits only when
/// no text field is capturing input.
fn handle_key_global(state: &AppState, key: &InputKey) -> Option<Message> {
    match key {
        InputKey::CharCtrl('c' | 'q') => Some(Message::Quit),
        InputKey::CharCtrl('t') => Some(Message::ToggleTheme),
        InputKey::F(n @ 1..=5) => Some(Message::GoToPage(Page::ALL[usize::from(*n) - 1])),

        _ if state.is_editing_text() => None,

        InputKey::Char('q') => Some(Message::Quit),
        InputKey::Char('t') => Some(Message::ToggleTheme),
        InputKey::Char(c @ '1'..='5') => {
            let index = (*c as usize) - ('1' as usize);
            Some(Message::GoToPage(Page::ALL[index]))
        }
        InputKey::Char(']') => Some(Message::GoToPage(state.app().current_page.next())),
        InputKey::Char('[') => Some(Message::GoToPage(state.app().current_page.previous())),
        _ => None,
    }
}

/// Map text-editing keys onto the given field
fn handle_text_edit(field: TextField, key: &InputKey) -> Option<Message> {
    let edit = match key {
        InputKey::Char(c) => TextEdit::Insert(*c),
        InputKey::Backspace => TextEdit::Backspace,
        InputKey::CharCtrl('u') => TextEdit::Clear,
        _ => return None,
    };
    Some(Message::EditField { field, edit })
}

fn handle_key_landing(key: InputKey) -> Option<Message> {
    match key {
        // "Start Debugging"
        InputKey::Enter | InputKey::Char(' ' | 's') => Some(Message::GoToPage(Page::Input)),
        InputKey::Char('h') => Some(Message::GoToPage(Page::History)),
        _ => None,
    }
}

fn handle_key_input(state: &AppState, key: InputKey) -> Option<Message> {
    let input = &state.input;

    match key {
        InputKey::Tab => return Some(Message::FocusNext),
        InputKey::BackTab => return Some(Message::FocusPrevious),
        InputKey::CharCtrl('r') => return Some(Message::StartAnalysis),
        _ => {}
    }

    match input.focus {
        InputFocus::ErrorText => {
            let has_suggestions = !input.suggestions().is_empty();
            match key {
                InputKey::Esc if has_suggestions => Some(Message::DismissSuggestions),
                InputKey::Esc => Some(Message::Blur),
                InputKey::Down if has_suggestions => Some(Message::SuggestionNext),
                InputKey::Up if has_suggestions => Some(Message::SuggestionPrevious),
                InputKey::Enter if input.suggestion_index.is_some() => {
                    Some(Message::AcceptSuggestion)
                }
                InputKey::Enter => Some(Message::EditField {
                    field: TextField::ErrorText,
                    edit: TextEdit::Insert('\n'),
                }),
                other => handle_text_edit(TextField::ErrorText, &other),
            }
        }
        InputFocus::ImagePath => match key {
            InputKey::Esc => Some(Message::Blur),
            InputKey::Enter => Some(Message::AttachImage(AttachTarget::Screenshot)),
            InputKey::CharCtrl('x') | InputKey::Delete => {
                Some(Message::RemoveImage(AttachTarget::Screenshot))
            }
            other => handle_text_edit(TextField::ImagePath, &other),
        },
        InputFocus::AnalyzeButton => match key {
            InputKey::Enter | InputKey::Char(' ') => Some(Message::StartAnalysis),
            InputKey::Char('x') | InputKey::Delete => {
                Some(Message::RemoveImage(AttachTarget::Screenshot))
            }
            InputKey::Char('e') => Some(Message::FocusNext),
            InputKey::Esc => Some(Message::GoToPage(Page::Landing)),
            _ => None,
        },
    }
}

fn handle_key_results(state: &AppState, key: InputKey) -> Option<Message> {
    if state.app().current_analysis.is_none() {
        // Fallback view: the only affordance is "Go back to input"
        return match key {
            InputKey::Enter | InputKey::Esc | InputKey::Char('b') => {
                Some(Message::GoToPage(Page::Input))
            }
            _ => None,
        };
    }

    match key {
        InputKey::Tab | InputKey::Right | InputKey::Char('l') => Some(Message::NextTab),
        InputKey::BackTab | InputKey::Left | InputKey::Char('h') => Some(Message::PreviousTab),
        InputKey::Char('c' | 'y') => Some(Message::CopyFix),
        InputKey::Char('b') | InputKey::Esc => Some(Message::GoToPage(Page::Input)),
        _ => None,
    }
}

fn handle_key_history(state: &AppState, key: InputKey) -> Option<Message> {
    if state.history.search_active {
        return match key {
            InputKey::Esc | InputKey::Enter => Some(Message::EndHistorySearch),
            other => handle_text_edit(TextField::HistorySearch, &other),
        };
    }

    match key {
        InputKey::Char('/') => Some(Message::BeginHistorySearch),
        InputKey::Down | InputKey::Char('j') => Some(Message::HistorySelect(SelectionMove::Next)),
        InputKey::Up | InputKey::Char('k') => Some(Message::HistorySelect(SelectionMove::Previous)),
        InputKey::PageDown => Some(Message::HistorySelect(SelectionMove::PageDown)),
        InputKey::PageUp => Some(Message::HistorySelect(SelectionMove::PageUp)),
        InputKey::Home | InputKey::Char('g') => Some(Message::HistorySelect(SelectionMove::First)),
        InputKey::End | InputKey::Char('G') => Some(Message::HistorySelect(SelectionMove::Last)),
        InputKey::Char('s') => Some(Message::HistoryToggleSort),
        InputKey::Char('f') => Some(Message::HistoryCycleFilter),
        InputKey::Esc if state.history.query.is_narrowed() => Some(Message::ResetHistoryQuery),
        InputKey::Enter => {
            if state.app().history.is_empty() {
                // "Start Analyzing"
                Some(Message::GoToPage(Page::Input))
            } else {
                Some(Message::ViewHistoryEntry)
            }
        }
        _ => None,
    }
}

fn handle_key_profile(state: &AppState, key: InputKey) -> Option<Message> {
    let focus = state.profile.focus;

    match key {
        InputKey::Tab => return Some(Message::FocusNext),
        InputKey::BackTab => return Some(Message::FocusPrevious),
        InputKey::CharCtrl('s') => return Some(Message::SaveProfile),
        InputKey::CharCtrl('r') => return Some(Message::ToggleApiKeyVisibility),
        _ => {}
    }

    if let Some(field) = focus.text_field() {
        return match key {
            InputKey::Esc => Some(Message::Blur),
            InputKey::Enter if focus == ProfileField::AvatarPath => {
                Some(Message::AttachImage(AttachTarget::Avatar))
            }
            InputKey::CharCtrl('x') if focus == ProfileField::AvatarPath => {
                Some(Message::RemoveImage(AttachTarget::Avatar))
            }
            InputKey::Enter | InputKey::Down => Some(Message::FocusNext),
            InputKey::Up => Some(Message::FocusPrevious),
            other => handle_text_edit(field, &other),
        };
    }

    match (focus, key) {
        (ProfileField::Accent, InputKey::Right | InputKey::Char('l')) => Some(Message::AccentNext),
        (ProfileField::Accent, InputKey::Left | InputKey::Char('h')) => {
            Some(Message::AccentPrevious)
        }
        (ProfileField::Theme, InputKey::Enter | InputKey::Char(' ')) => Some(Message::ToggleTheme),
        (ProfileField::Save, InputKey::Enter | InputKey::Char(' ')) => Some(Message::SaveProfile),
        (_, InputKey::Down) => Some(Message::FocusNext),
        (_, InputKey::Up) => Some(Message::FocusPrevious),
        (_, InputKey::Char('v')) => Some(Message::ToggleApiKeyVisibility),
        (_, InputKey::Char('x')) => Some(Message::RemoveImage(AttachTarget::Avatar)),
        _ => None,
    }
}
