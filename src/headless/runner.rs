//! Headless mode runner - a single analysis without the TUI

use std::path::Path;
use std::sync::Arc;

use tokio::sync::broadcast::error::TryRecvError;

use bugbuddy_app::attachment::load_image_attachment;
use bugbuddy_app::config::Settings;
use bugbuddy_app::{Analyzer, Engine, EngineEvent};
use bugbuddy_core::prelude::*;
use bugbuddy_core::{AnalysisRecord, ImageAttachment};

use super::HeadlessEvent;

/// Analyze `error_text` (and the optional screenshot) and print NDJSON events
pub async fn run_headless(
    settings: Settings,
    error_text: &str,
    image_path: Option<&Path>,
) -> Result<()> {
    info!("BugBuddy starting in HEADLESS mode");

    let image = match image_path.map(load_image_attachment).transpose() {
        Ok(image) => image,
        Err(e) => {
            HeadlessEvent::error(e.to_string()).emit();
            return Err(e);
        }
    };

    let mut engine = Engine::new(settings);
    let outcome = analyze(&mut engine, error_text, image, |event| event.emit()).await;

    engine.shutdown().await;

    let record = outcome?;
    info!("Headless analysis {} finished", record.id);
    Ok(())
}

/// Run one analysis, handing each event to `on_event` as it happens
///
/// A request rejected before going in flight produces a single `error`
/// event; engine failures are already reported as `analysis_failed`.
pub async fn analyze<A, F>(
    engine: &mut Engine<A>,
    error_text: &str,
    image: Option<ImageAttachment>,
    mut on_event: F,
) -> Result<Arc<AnalysisRecord>>
where
    A: Analyzer + Sync + 'static,
    F: FnMut(HeadlessEvent),
{
    let mut rx = engine.subscribe();
    let mut failure_reported = false;
    let mut forward = |event: &EngineEvent| {
        if let Some(event) = HeadlessEvent::from_engine(event) {
            failure_reported |= event.is_failure();
            on_event(event);
        }
    };

    let request = engine.request_analysis(error_text, image);
    tokio::pin!(request);

    let outcome = loop {
        tokio::select! {
            outcome = &mut request => break outcome,
            Ok(event) = rx.recv() => forward(&event),
        }
    };

    // Events from the final processing cycle
    loop {
        match rx.try_recv() {
            Ok(event) => forward(&event),
            Err(TryRecvError::Lagged(skipped)) => {
                warn!("Headless subscriber lagged, {} event(s) skipped", skipped);
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }

    if let Err(e) = &outcome {
        if !failure_reported {
            on_event(HeadlessEvent::error(e.to_string()));
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugbuddy_app::MockAnalyzer;
    use chrono::Utc;
    use std::time::Duration;

    fn engine(delay_ms: u64) -> Engine {
        Engine::with_analyzer(
            Settings::default(),
            MockAnalyzer::with_delay(Duration::from_millis(delay_ms)),
        )
    }

    async fn collect(
        engine: &mut Engine,
        error_text: &str,
    ) -> (Vec<HeadlessEvent>, Result<Arc<AnalysisRecord>>) {
        let mut events = Vec::new();
        let outcome = analyze(engine, error_text, None, |event| events.push(event)).await;
        (events, outcome)
    }

    #[tokio::test]
    async fn test_analyze_reports_start_and_completion() {
        let mut engine = engine(10);
        let (events, outcome) = collect(&mut engine, "TypeError: boom").await;

        let record = outcome.expect("analysis succeeds");
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], HeadlessEvent::AnalysisStarted { .. }));
        match &events[1] {
            HeadlessEvent::AnalysisCompleted { record: emitted, .. } => {
                assert_eq!(emitted.id, record.id);
                assert_eq!(emitted.error_message, "TypeError: boom");
            }
            other => panic!("expected completion, got {:?}", other),
        }
        assert_eq!(engine.state.app().history.len(), 1);
    }

    #[tokio::test]
    async fn test_started_event_is_stamped_before_the_delay() {
        let mut engine = engine(300);
        let requested_at = Utc::now().timestamp_millis();
        let (events, outcome) = collect(&mut engine, "TypeError: boom").await;
        outcome.expect("analysis succeeds");

        let HeadlessEvent::AnalysisStarted { timestamp: started } = events[0] else {
            panic!("expected start first, got {:?}", events[0]);
        };
        let HeadlessEvent::AnalysisCompleted {
            timestamp: completed,
            ..
        } = events[1]
        else {
            panic!("expected completion second, got {:?}", events[1]);
        };

        assert!(
            started - requested_at < 150,
            "started {}ms after the request",
            started - requested_at
        );
        assert!(completed - started >= 250);
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_request() {
        let mut engine = engine(10);
        let (events, outcome) = collect(&mut engine, "   ").await;

        assert!(matches!(outcome, Err(Error::EmptyRequest)));
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], HeadlessEvent::Error { .. }));
        assert!(engine.state.app().history.is_empty());
    }

    #[tokio::test]
    async fn test_run_headless_rejects_non_image() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("notes.txt");
        std::fs::write(&path, "not an image").unwrap();

        let result = run_headless(Settings::default(), "TypeError: boom", Some(&path)).await;
        assert!(matches!(result, Err(Error::UnsupportedFile { .. })));
    }
}
