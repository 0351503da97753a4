//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`. The headless runner turns them into NDJSON.

use std::sync::Arc;

use bugbuddy_core::{AnalysisRecord, Page, Theme};

/// Domain events emitted by the Engine for external consumers.
///
/// Derived from before/after snapshots of the store, so subscribers see a
/// consistent view of state changes.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // Analysis Lifecycle
    // ─────────────────────────────────────────────────────────
    /// An analysis went in flight
    AnalysisStarted,

    /// An analysis finished and was added to history
    AnalysisCompleted { record: Arc<AnalysisRecord> },

    /// The in-flight analysis ended without a result
    AnalysisFailed { reason: String },

    // ─────────────────────────────────────────────────────────
    // Navigation & Theme
    // ─────────────────────────────────────────────────────────
    PageChanged { from: Page, to: Page },

    ThemeChanged { theme: Theme },

    // ─────────────────────────────────────────────────────────
    // Engine Lifecycle
    // ─────────────────────────────────────────────────────────
    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Returns a short string label for this event type (for logging/debugging).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::AnalysisStarted => "analysis_started",
            Self::AnalysisCompleted { .. } => "analysis_completed",
            Self::AnalysisFailed { .. } => "analysis_failed",
            Self::PageChanged { .. } => "page_changed",
            Self::ThemeChanged { .. } => "theme_changed",
            Self::Shutdown => "shutdown",
        }
    }
}
