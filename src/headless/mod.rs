//! Headless mode - one analysis, reported as JSON events
//!
//! Runs a single analysis through the same Engine the TUI uses and writes
//! the lifecycle to stdout as NDJSON (newline-delimited JSON), one event per
//! line. Each event has an "event" field naming its type.
//!
//! # Example Output
//!
//! ```json
//! {"event":"analysis_started","timestamp":1704700001000}
//! {"event":"analysis_completed","record":{"id":"…","confidence":85},"timestamp":1704700003000}
//! ```

pub mod runner;

pub use runner::run_headless;

use chrono::Utc;
use serde::Serialize;
use std::io::{self, Write};
use tracing::error;

use bugbuddy_app::EngineEvent;
use bugbuddy_core::AnalysisRecord;

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// The analysis went in flight
    AnalysisStarted { timestamp: i64 },

    /// The analysis finished and was added to history
    AnalysisCompleted {
        record: AnalysisRecord,
        timestamp: i64,
    },

    /// The in-flight analysis ended without a result
    AnalysisFailed { reason: String, timestamp: i64 },

    /// The request was rejected before anything went in flight
    Error { message: String, timestamp: i64 },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    /// Map an engine event; navigation and theme events have no headless form
    pub fn from_engine(event: &EngineEvent) -> Option<Self> {
        match event {
            EngineEvent::AnalysisStarted => Some(Self::AnalysisStarted {
                timestamp: Self::now(),
            }),
            EngineEvent::AnalysisCompleted { record } => Some(Self::AnalysisCompleted {
                record: AnalysisRecord::clone(record),
                timestamp: Self::now(),
            }),
            EngineEvent::AnalysisFailed { reason } => Some(Self::analysis_failed(reason.clone())),
            EngineEvent::PageChanged { .. }
            | EngineEvent::ThemeChanged { .. }
            | EngineEvent::Shutdown => None,
        }
    }

    pub fn analysis_failed(reason: String) -> Self {
        Self::AnalysisFailed {
            reason,
            timestamp: Self::now(),
        }
    }

    pub fn error(message: String) -> Self {
        Self::Error {
            message,
            timestamp: Self::now(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::AnalysisFailed { .. } | Self::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugbuddy_core::{Confidence, Page, SuggestedFix, Theme};
    use std::sync::Arc;

    fn record() -> Arc<AnalysisRecord> {
        Arc::new(AnalysisRecord::new(
            "TypeError: x is undefined",
            None,
            "The value was never assigned.",
            SuggestedFix::new("let x = 1;", Some("javascript")),
            "Declared but not initialised.",
            Confidence::new(85).expect("valid confidence"),
        ))
    }

    #[test]
    fn test_analysis_started_serialization() {
        let event = HeadlessEvent::from_engine(&EngineEvent::AnalysisStarted).unwrap();
        let json = serde_json::to_string(&event).expect("serialization failed");
        let value: serde_json::Value = serde_json::from_str(&json).expect("invalid JSON");

        assert_eq!(value["event"], "analysis_started");
        assert!(value["timestamp"].is_number());
    }

    #[test]
    fn test_analysis_completed_carries_record() {
        let record = record();
        let event = HeadlessEvent::from_engine(&EngineEvent::AnalysisCompleted {
            record: record.clone(),
        })
        .unwrap();
        let value = serde_json::to_value(&event).expect("serialization failed");

        assert_eq!(value["event"], "analysis_completed");
        assert_eq!(value["record"]["id"], record.id.as_str());
        assert_eq!(value["record"]["error_message"], "TypeError: x is undefined");
        assert_eq!(value["record"]["suggested_fix"]["language"], "javascript");
        assert!(!event.is_failure());
    }

    #[test]
    fn test_analysis_failed_serialization() {
        let event = HeadlessEvent::analysis_failed("backend unavailable".to_string());
        let value = serde_json::to_value(&event).expect("serialization failed");

        assert_eq!(value["event"], "analysis_failed");
        assert_eq!(value["reason"], "backend unavailable");
        assert!(event.is_failure());
    }

    #[test]
    fn test_error_serialization() {
        let event = HeadlessEvent::error("Unsupported file: notes.txt".to_string());
        let value = serde_json::to_value(&event).expect("serialization failed");

        assert_eq!(value["event"], "error");
        assert_eq!(value["message"], "Unsupported file: notes.txt");
        assert!(event.is_failure());
    }

    #[test]
    fn test_navigation_events_are_skipped() {
        let events = [
            EngineEvent::PageChanged {
                from: Page::Input,
                to: Page::Results,
            },
            EngineEvent::ThemeChanged { theme: Theme::Light },
            EngineEvent::Shutdown,
        ];
        for event in events {
            assert!(HeadlessEvent::from_engine(&event).is_none());
        }
    }
}
