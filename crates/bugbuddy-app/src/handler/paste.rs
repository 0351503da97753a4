//! Bracketed paste routing
//!
//! Terminals deliver dropped files as pasted paths. On an attachment field
//! a pasted path is always loaded. Elsewhere only a path to an existing image
//! file is diverted to the attachment; anything else is inserted into the
//! focused text field.

use bugbuddy_core::Page;

use crate::attachment::is_dropped_image_file;
use crate::message::{Message, TextEdit};
use crate::state::{AppState, AttachTarget, InputFocus, ProfileField, TextField};

use super::UpdateResult;

pub fn handle_paste(state: &mut AppState, text: String) -> UpdateResult {
    if text.is_empty() {
        return UpdateResult::none();
    }

    match state.app().current_page {
        Page::Input => paste_on_input(state, text),
        Page::Profile => paste_on_profile(state, text),
        Page::History if state.history.search_active => {
            insert_into(TextField::HistorySearch, text)
        }
        _ => UpdateResult::none(),
    }
}

fn paste_on_input(state: &mut AppState, text: String) -> UpdateResult {
    let dropped_image = is_dropped_image_file(&text);

    match state.input.focus {
        InputFocus::ImagePath => attach_from_paste(state, AttachTarget::Screenshot, text),
        _ if dropped_image => attach_from_paste(state, AttachTarget::Screenshot, text),
        InputFocus::ErrorText => insert_into(TextField::ErrorText, text),
        InputFocus::AnalyzeButton => {
            state.input.focus = InputFocus::ErrorText;
            insert_into(TextField::ErrorText, text)
        }
    }
}

fn paste_on_profile(state: &mut AppState, text: String) -> UpdateResult {
    match state.profile.focus {
        ProfileField::AvatarPath => attach_from_paste(state, AttachTarget::Avatar, text),
        _ if is_dropped_image_file(&text) => attach_from_paste(state, AttachTarget::Avatar, text),
        focus => match focus.text_field() {
            Some(field) => insert_into(field, text),
            None => UpdateResult::none(),
        },
    }
}

/// Put the pasted path into the target's path field and load it
fn attach_from_paste(state: &mut AppState, target: AttachTarget, text: String) -> UpdateResult {
    let path = text.trim().to_string();
    match target {
        AttachTarget::Screenshot => state.input.image_path = path,
        AttachTarget::Avatar => state.profile.avatar_path = path,
    }
    UpdateResult::message(Message::AttachImage(target))
}

fn insert_into(field: TextField, text: String) -> UpdateResult {
    let text = if field.is_multiline() {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text.lines().next().unwrap_or_default().to_string()
    };

    UpdateResult::message(Message::EditField {
        field,
        edit: TextEdit::InsertStr(text),
    })
}
