//! Message types for the application (TEA pattern)

use std::path::PathBuf;
use std::sync::Arc;

use bugbuddy_core::{AnalysisRecord, ImageAttachment, Page};

use crate::analysis::AnalysisRequest;
use crate::input_key::InputKey;
use crate::state::{AttachTarget, TextField};

/// An edit applied to a text field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    InsertStr(String),
    Backspace,
    Clear,
}

/// All possible messages in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Bracketed paste (also how terminals deliver dropped files)
    Paste(String),

    /// Pointer moved to a terminal cell
    PointerMoved { column: u16, row: u16 },

    /// Tick event for periodic updates (animation frames, timed confirmations)
    Tick,

    /// Quit immediately (q, Ctrl+C, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Navigation & Theme
    // ─────────────────────────────────────────────────────────
    GoToPage(Page),
    ToggleTheme,

    /// Move focus to the next control on the current page
    FocusNext,
    /// Move focus to the previous control on the current page
    FocusPrevious,
    /// Leave the focused text field
    Blur,

    EditField { field: TextField, edit: TextEdit },

    /// Hide the transient notice
    DismissNotice,

    // ─────────────────────────────────────────────────────────
    // Input Page
    // ─────────────────────────────────────────────────────────
    SuggestionNext,
    SuggestionPrevious,
    /// Replace the error text with the highlighted suggestion
    AcceptSuggestion,
    DismissSuggestions,

    /// Load the image named by the target's path field
    AttachImage(AttachTarget),
    /// Image was read and measured
    ImageLoaded {
        target: AttachTarget,
        attachment: ImageAttachment,
    },
    /// Image could not be attached
    ImageRejected {
        target: AttachTarget,
        path: PathBuf,
        error: String,
    },
    RemoveImage(AttachTarget),

    /// Build a request from the input page and submit it
    StartAnalysis,
    /// Submit a validated request
    SubmitAnalysis(AnalysisRequest),
    AnalysisCompleted(Arc<AnalysisRecord>),
    AnalysisFailed { error: String },

    // ─────────────────────────────────────────────────────────
    // Results Page
    // ─────────────────────────────────────────────────────────
    NextTab,
    PreviousTab,
    CopyFix,
    ClipboardCopied,
    ClipboardFailed { error: String },

    // ─────────────────────────────────────────────────────────
    // History Page
    // ─────────────────────────────────────────────────────────
    BeginHistorySearch,
    EndHistorySearch,
    HistorySelect(SelectionMove),
    HistoryToggleSort,
    HistoryCycleFilter,
    /// Clear search and filter
    ResetHistoryQuery,
    /// Open the selected entry on the results page
    ViewHistoryEntry,

    // ─────────────────────────────────────────────────────────
    // Profile Page
    // ─────────────────────────────────────────────────────────
    AccentNext,
    AccentPrevious,
    ToggleApiKeyVisibility,
    SaveProfile,
}

/// Relative movement of a list selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMove {
    Next,
    Previous,
    PageDown,
    PageUp,
    First,
    Last,
}
