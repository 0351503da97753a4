//! Engine - shared orchestration state for TUI and headless runners
//!
//! The Engine owns the TEA state, the message channel, the analyzer and the
//! background tasks. Both runners drive it the same way: feed messages in,
//! render or report from `state`, and call `shutdown` on the way out.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use bugbuddy_core::prelude::*;
use bugbuddy_core::{AnalysisRecord, ImageAttachment, Page, Theme};

use crate::actions::BackgroundTasks;
use crate::analysis::{AnalysisRequest, Analyzer, MockAnalyzer};
use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::process;
use crate::signals;
use crate::state::AppState;

/// Capacity of the unified message channel
const MESSAGE_CHANNEL_CAPACITY: usize = 256;

/// Capacity of the event broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone)]
struct StateSnapshot {
    page: Page,
    theme: Theme,
    is_analyzing: bool,
    history_len: usize,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        let app = state.app();
        Self {
            page: app.current_page,
            theme: app.theme,
            is_analyzing: app.is_analyzing,
            history_len: app.history.len(),
        }
    }
}

/// Orchestration engine for BugBuddy.
///
/// Encapsulates all shared state between TUI and headless runners:
/// - TEA state management
/// - Message channel
/// - Background task tracking
/// - The analyzer
/// - Event broadcasting for external consumers
pub struct Engine<A = MockAnalyzer> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, event pollers).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    /// The frontend event loop drains messages from here.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Produces analysis results
    analyzer: Arc<A>,

    /// Spawned analysis, image and clipboard work
    tasks: BackgroundTasks,

    /// Event broadcaster for external consumers.
    event_tx: broadcast::Sender<EngineEvent>,
}

impl Engine<MockAnalyzer> {
    /// Create an Engine backed by the mock analyzer, delayed per settings.
    pub fn new(settings: Settings) -> Self {
        let delay = Duration::from_millis(settings.analysis.delay_ms);
        Self::with_analyzer(settings, MockAnalyzer::with_delay(delay))
    }
}

impl<A> Engine<A>
where
    A: Analyzer + Sync + 'static,
{
    /// Create an Engine with a specific analyzer.
    pub fn with_analyzer(settings: Settings, analyzer: A) -> Self {
        let state = AppState::with_settings(settings);
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(MESSAGE_CHANNEL_CAPACITY);
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        info!(
            "Engine ready (theme: {}, analysis delay: {}ms)",
            state.app().theme,
            state.settings.analysis.delay_ms
        );

        Self {
            state,
            msg_tx,
            msg_rx,
            analyzer: Arc::new(analyzer),
            tasks: BackgroundTasks::new(),
            event_tx,
        }
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle and emit
    /// events for whatever changed.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        process::process_message(
            &mut self.state,
            msg,
            &self.msg_tx,
            &self.analyzer,
            &mut self.tasks,
        );

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Listen for SIGINT/SIGTERM and turn them into `Message::Quit`.
    pub fn start_signal_handler(&mut self) {
        let handle: JoinHandle<()> = signals::spawn_signal_handler(self.msg_sender());
        self.tasks.track(handle);
    }

    /// Run one analysis to completion, outside of any key handling.
    ///
    /// Goes through the same messages as the UI trigger, so the store ends
    /// up in the same state: the record is current, first in history, and
    /// the results page is shown.
    pub async fn request_analysis(
        &mut self,
        error_text: &str,
        image: Option<ImageAttachment>,
    ) -> Result<Arc<AnalysisRecord>> {
        let request = AnalysisRequest::new(error_text, image)?;
        if self.state.app().is_analyzing {
            return Err(Error::AlreadyInProgress);
        }

        self.process_message(Message::SubmitAnalysis(request));
        if !self.state.app().is_analyzing {
            return Err(Error::AlreadyInProgress);
        }

        while self.state.app().is_analyzing {
            let msg = self.msg_rx.recv().await.ok_or(Error::ChannelClosed)?;
            self.process_message(msg);
        }

        if let Some(reason) = &self.state.analysis_error {
            return Err(Error::analysis(reason.clone()));
        }
        self.state
            .app()
            .current_analysis
            .clone()
            .ok_or_else(|| Error::analysis("analysis ended without a result"))
    }

    /// Initiate shutdown: notify subscribers and stop background work.
    pub async fn shutdown(&mut self) {
        self.emit(EngineEvent::Shutdown);

        let active = self.tasks.active();
        if active > 0 {
            info!("Aborting {} background task(s)", active);
        }
        self.tasks.abort_all();
    }

    /// Emit EngineEvents based on state changes after processing.
    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if !pre.is_analyzing && post.is_analyzing {
            self.emit(EngineEvent::AnalysisStarted);
        }

        if post.history_len > pre.history_len {
            if let Some(record) = self.state.app().history.first() {
                self.emit(EngineEvent::AnalysisCompleted {
                    record: record.clone(),
                });
            }
        } else if pre.is_analyzing && !post.is_analyzing {
            let reason = self
                .state
                .analysis_error
                .clone()
                .unwrap_or_else(|| "analysis cancelled".to_string());
            self.emit(EngineEvent::AnalysisFailed { reason });
        }

        if pre.page != post.page {
            self.emit(EngineEvent::PageChanged {
                from: pre.page,
                to: post.page,
            });
        }

        if pre.theme != post.theme {
            self.emit(EngineEvent::ThemeChanged { theme: post.theme });
        }
    }

    /// Emit a single EngineEvent to all subscribers.
    ///
    /// send() returns Err only if there are no receivers; that is not an error.
    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }
}
