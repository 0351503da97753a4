//! Application state (Model in TEA pattern)
//!
//! `AppState` wraps the [`Store`] (domain state) together with the
//! presentation state of each page: form contents, focus, selections and
//! timed confirmations. Only the store holds data that outlives a page.

use std::sync::Arc;
use std::time::{Duration, Instant};

use bugbuddy_core::prelude::*;
use bugbuddy_core::{AccentColor, AnalysisRecord, ImageAttachment, ProfileUpdate, UserProfile};

use crate::analysis::AnalysisRequest;
use crate::config::Settings;
use crate::history::{HistoryQuery, HistoryStats};
use crate::store::{Action, ApplicationState, Store};
use crate::suggestions::suggestions_for;

/// How long "Copied!" and "Saved!" stay visible
pub const CONFIRMATION_DURATION: Duration = Duration::from_secs(2);

/// How long a notice stays visible
pub const NOTICE_DURATION: Duration = Duration::from_secs(4);

/// Hint shown while the analyze trigger is disabled
pub const EMPTY_REQUEST_HINT: &str = "Please provide an error message or screenshot to continue";

/// Lifecycle of the running application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Every editable text field in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    ErrorText,
    ImagePath,
    HistorySearch,
    ProfileName,
    ProfileEmail,
    ProfileApiKey,
    ProfileAvatarPath,
}

impl TextField {
    /// Single-line fields drop newlines from pasted text
    pub fn is_multiline(&self) -> bool {
        matches!(self, TextField::ErrorText)
    }
}

/// Where a loaded image goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachTarget {
    Screenshot,
    Avatar,
}

// ─────────────────────────────────────────────────────────────────────────────
// Input Page
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFocus {
    #[default]
    ErrorText,
    ImagePath,
    AnalyzeButton,
}

impl InputFocus {
    pub fn next(self) -> Self {
        match self {
            InputFocus::ErrorText => InputFocus::ImagePath,
            InputFocus::ImagePath => InputFocus::AnalyzeButton,
            InputFocus::AnalyzeButton => InputFocus::ErrorText,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            InputFocus::ErrorText => InputFocus::AnalyzeButton,
            InputFocus::ImagePath => InputFocus::ErrorText,
            InputFocus::AnalyzeButton => InputFocus::ImagePath,
        }
    }

    pub fn text_field(&self) -> Option<TextField> {
        match self {
            InputFocus::ErrorText => Some(TextField::ErrorText),
            InputFocus::ImagePath => Some(TextField::ImagePath),
            InputFocus::AnalyzeButton => None,
        }
    }
}

/// Error text, screenshot and suggestion state of the input page
#[derive(Debug, Clone, Default)]
pub struct InputPageState {
    pub error_text: String,
    /// Path typed or pasted into the screenshot field
    pub image_path: String,
    pub screenshot: Option<ImageAttachment>,
    pub focus: InputFocus,
    pub show_suggestions: bool,
    /// Highlighted suggestion, if the user moved into the list
    pub suggestion_index: Option<usize>,
    pub loading_image: bool,
}

impl InputPageState {
    /// Suggestions currently on screen
    pub fn suggestions(&self) -> Vec<&'static str> {
        if self.show_suggestions {
            suggestions_for(&self.error_text)
        } else {
            Vec::new()
        }
    }

    /// The analyze trigger is enabled only for a non-blank text or an image
    pub fn can_analyze(&self) -> bool {
        !self.error_text.trim().is_empty() || self.screenshot.is_some()
    }

    pub fn request(&self) -> Result<AnalysisRequest> {
        AnalysisRequest::new(self.error_text.clone(), self.screenshot.clone())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Results Page
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultTab {
    #[default]
    Explanation,
    SuggestedFix,
    Reasoning,
}

impl ResultTab {
    pub const ALL: [ResultTab; 3] = [
        ResultTab::Explanation,
        ResultTab::SuggestedFix,
        ResultTab::Reasoning,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResultTab::Explanation => "Explanation",
            ResultTab::SuggestedFix => "Suggested Fix",
            ResultTab::Reasoning => "Reasoning",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ResultTab::Explanation => ResultTab::SuggestedFix,
            ResultTab::SuggestedFix => ResultTab::Reasoning,
            ResultTab::Reasoning => ResultTab::Explanation,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            ResultTab::Explanation => ResultTab::Reasoning,
            ResultTab::SuggestedFix => ResultTab::Explanation,
            ResultTab::Reasoning => ResultTab::SuggestedFix,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResultsPageState {
    pub tab: ResultTab,
    /// When the fix was last copied successfully
    pub copied_at: Option<Instant>,
}

impl ResultsPageState {
    pub fn show_copied(&self) -> bool {
        self.copied_at.is_some()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// History Page
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct HistoryPageState {
    pub query: HistoryQuery,
    /// Search box is capturing keystrokes
    pub search_active: bool,
    /// Index into the presented (filtered, sorted) list
    pub selected: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Profile Page
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileField {
    #[default]
    Name,
    Email,
    ApiKey,
    AvatarPath,
    Accent,
    Theme,
    Save,
}

impl ProfileField {
    pub const ALL: [ProfileField; 7] = [
        ProfileField::Name,
        ProfileField::Email,
        ProfileField::ApiKey,
        ProfileField::AvatarPath,
        ProfileField::Accent,
        ProfileField::Theme,
        ProfileField::Save,
    ];

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn text_field(&self) -> Option<TextField> {
        match self {
            ProfileField::Name => Some(TextField::ProfileName),
            ProfileField::Email => Some(TextField::ProfileEmail),
            ProfileField::ApiKey => Some(TextField::ProfileApiKey),
            ProfileField::AvatarPath => Some(TextField::ProfileAvatarPath),
            ProfileField::Accent | ProfileField::Theme | ProfileField::Save => None,
        }
    }
}

/// Unsaved edits of the profile page
///
/// Seeded from the stored profile whenever the page is opened; submitted as a
/// single `UpdateUser` on save.
#[derive(Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub api_key: String,
    pub show_api_key: bool,
    pub avatar_path: String,
    pub avatar: Option<ImageAttachment>,
    pub accent: AccentColor,
    pub focus: ProfileField,
    pub saved_at: Option<Instant>,
    pub loading_avatar: bool,
}

impl std::fmt::Debug for ProfileForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("api_key", &"<redacted>")
            .field("avatar", &self.avatar)
            .field("accent", &self.accent)
            .field("focus", &self.focus)
            .finish_non_exhaustive()
    }
}

impl ProfileForm {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            api_key: profile.api_key.clone().unwrap_or_default(),
            avatar_path: profile
                .avatar
                .as_ref()
                .map(|a| a.path.display().to_string())
                .unwrap_or_default(),
            avatar: profile.avatar.clone(),
            accent: profile.accent_color.clone(),
            ..Self::default()
        }
    }

    /// Step through the accent presets; a custom colour starts from the first
    pub fn cycle_accent(&mut self, forward: bool) {
        let len = AccentColor::PRESETS.len();
        let next = match (self.accent.preset_index(), forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, _) => 0,
        };
        if let Ok(accent) = AccentColor::PRESETS[next].parse() {
            self.accent = accent;
        }
    }

    /// The update submitted on save. The API key is stored trimmed; an
    /// empty one clears the stored key.
    pub fn to_update(&self) -> ProfileUpdate {
        let key = self.api_key.trim();
        let api_key = (!key.is_empty()).then(|| key.to_string());
        ProfileUpdate {
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            avatar: Some(self.avatar.clone()),
            api_key: Some(api_key),
            accent_color: Some(self.accent.clone()),
        }
    }

    pub fn show_saved(&self) -> bool {
        self.saved_at.is_some()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Notices
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Non-blocking, self-expiring message in the status bar
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub shown_at: Instant,
}

// ─────────────────────────────────────────────────────────────────────────────
// AppState
// ─────────────────────────────────────────────────────────────────────────────

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,

    /// Domain state; the only place pages, theme, history and profile live
    pub store: Store,

    pub settings: Settings,

    pub input: InputPageState,
    pub results: ResultsPageState,
    pub history: HistoryPageState,
    pub profile: ProfileForm,

    pub notice: Option<Notice>,

    /// Reason of the last failed analysis, cleared when a new one starts
    pub analysis_error: Option<String>,

    /// Last pointer position (column, row), if mouse capture is on
    pub pointer: Option<(u16, u16)>,

    /// Animation frame counter, advanced on every tick
    pub frame: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// Create a new AppState with settings
    pub fn with_settings(settings: Settings) -> Self {
        let store = Store::new(ApplicationState::with_profile(settings.initial_profile()));
        let profile = ProfileForm::from_profile(&store.state().user);
        let history = HistoryPageState {
            query: HistoryQuery::with_sort(settings.history.default_sort),
            ..HistoryPageState::default()
        };

        Self {
            phase: AppPhase::Running,
            store,
            settings,
            input: InputPageState::default(),
            results: ResultsPageState::default(),
            history,
            profile,
            notice: None,
            analysis_error: None,
            pointer: None,
            frame: 0,
        }
    }

    /// Domain state snapshot
    pub fn app(&self) -> &ApplicationState {
        self.store.state()
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    /// Apply a store action. A rejected action is logged and ignored.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let name = action.name();
        match self.store.dispatch(action) {
            Ok(()) => true,
            Err(e) => {
                warn!("Ignoring {}: {}", name, e);
                false
            }
        }
    }

    pub fn notify(&mut self, message: impl Into<String>, level: NoticeLevel) {
        self.notice = Some(Notice {
            message: message.into(),
            level,
            shown_at: Instant::now(),
        });
    }

    /// The text field currently capturing keystrokes, if any
    pub fn focused_text_field(&self) -> Option<TextField> {
        use bugbuddy_core::Page;
        match self.app().current_page {
            Page::Input => self.input.focus.text_field(),
            Page::History if self.history.search_active => Some(TextField::HistorySearch),
            Page::Profile => self.profile.focus.text_field(),
            _ => None,
        }
    }

    pub fn is_editing_text(&self) -> bool {
        self.focused_text_field().is_some()
    }

    pub fn text_field_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::ErrorText => &mut self.input.error_text,
            TextField::ImagePath => &mut self.input.image_path,
            TextField::HistorySearch => &mut self.history.query.search,
            TextField::ProfileName => &mut self.profile.name,
            TextField::ProfileEmail => &mut self.profile.email,
            TextField::ProfileApiKey => &mut self.profile.api_key,
            TextField::ProfileAvatarPath => &mut self.profile.avatar_path,
        }
    }

    /// History as presented: filtered and sorted by the page query
    pub fn history_view(&self) -> Vec<Arc<AnalysisRecord>> {
        self.history.query.apply(&self.app().history)
    }

    pub fn history_stats(&self) -> HistoryStats {
        HistoryStats::from_history(&self.app().history)
    }

    /// Advance the animation frame and expire timed confirmations
    pub fn on_tick(&mut self, now: Instant) {
        self.frame = self.frame.wrapping_add(1);

        let expired = |at: Option<Instant>, ttl: Duration| {
            at.is_some_and(|t| now.saturating_duration_since(t) >= ttl)
        };

        if expired(self.results.copied_at, CONFIRMATION_DURATION) {
            self.results.copied_at = None;
        }
        if expired(self.profile.saved_at, CONFIRMATION_DURATION) {
            self.profile.saved_at = None;
        }
        if expired(self.notice.as_ref().map(|n| n.shown_at), NOTICE_DURATION) {
            self.notice = None;
        }
    }
}
