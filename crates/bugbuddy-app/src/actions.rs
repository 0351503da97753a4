//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every side effect runs off the update loop and reports back through the
//! message channel. Nothing here touches `AppState`.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use bugbuddy_core::prelude::*;

use crate::analysis::{AnalysisRequest, Analyzer};
use crate::attachment::load_image_attachment;
use crate::clipboard::copy_text;
use crate::handler::UpdateAction;
use crate::message::Message;
use crate::state::AttachTarget;

/// Handles of spawned background work, aborted on shutdown
#[derive(Debug, Default)]
pub struct BackgroundTasks {
    handles: Vec<JoinHandle<()>>,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep a handle, dropping those that already finished
    pub fn track(&mut self, handle: JoinHandle<()>) {
        self.handles.retain(|h| !h.is_finished());
        self.handles.push(handle);
    }

    /// Number of tasks still running
    pub fn active(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    pub fn abort_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

/// Execute an action by spawning a background task
pub fn handle_action<A>(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    analyzer: &Arc<A>,
    tasks: &mut BackgroundTasks,
) where
    A: Analyzer + Sync + 'static,
{
    let handle = match action {
        UpdateAction::RunAnalysis(request) => {
            spawn_analysis(Arc::clone(analyzer), request, msg_tx)
        }
        UpdateAction::LoadImage { target, path } => spawn_image_load(target, path, msg_tx),
        UpdateAction::CopyToClipboard { text } => spawn_clipboard_copy(text, msg_tx),
    };
    tasks.track(handle);
}

fn spawn_analysis<A>(
    analyzer: Arc<A>,
    request: AnalysisRequest,
    msg_tx: mpsc::Sender<Message>,
) -> JoinHandle<()>
where
    A: Analyzer + Sync + 'static,
{
    tokio::spawn(async move {
        let msg = match analyzer.analyze(&request).await {
            Ok(record) => Message::AnalysisCompleted(Arc::new(record)),
            Err(e) => {
                let error = match e {
                    Error::Analysis { message } => message,
                    other => other.to_string(),
                };
                Message::AnalysisFailed { error }
            }
        };
        send(&msg_tx, msg).await;
    })
}

fn spawn_image_load(
    target: AttachTarget,
    path: PathBuf,
    msg_tx: mpsc::Sender<Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let load_path = path.clone();
        let loaded = tokio::task::spawn_blocking(move || load_image_attachment(&load_path)).await;

        let msg = match loaded {
            Ok(Ok(attachment)) => Message::ImageLoaded { target, attachment },
            Ok(Err(e)) => Message::ImageRejected {
                target,
                path,
                error: e.to_string(),
            },
            Err(e) => Message::ImageRejected {
                target,
                path,
                error: format!("Image loader stopped: {}", e),
            },
        };
        send(&msg_tx, msg).await;
    })
}

fn spawn_clipboard_copy(text: String, msg_tx: mpsc::Sender<Message>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let copied = tokio::task::spawn_blocking(move || copy_text(&text)).await;

        let msg = match copied {
            Ok(Ok(())) => Message::ClipboardCopied,
            Ok(Err(e)) => Message::ClipboardFailed {
                error: e.to_string(),
            },
            Err(e) => Message::ClipboardFailed {
                error: e.to_string(),
            },
        };
        send(&msg_tx, msg).await;
    })
}

/// Report a result; a closed channel means the app is shutting down
async fn send(msg_tx: &mpsc::Sender<Message>, msg: Message) {
    if msg_tx.send(msg).await.is_err() {
        warn!("Dropping background result: {}", Error::ChannelClosed);
    }
}
