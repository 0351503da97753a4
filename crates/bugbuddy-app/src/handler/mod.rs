//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers per page
//! - `paste`: Bracketed paste routing (text and dropped files)

pub(crate) mod keys;
pub(crate) mod paste;
pub(crate) mod update;


use std::path::PathBuf;

use crate::analysis::AnalysisRequest;
use crate::message::Message;
use crate::state::AttachTarget;

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Run the analyzer in the background; reports `AnalysisCompleted` or
    /// `AnalysisFailed`
    RunAnalysis(AnalysisRequest),

    /// Read and measure an image file; reports `ImageLoaded` or
    /// `ImageRejected`
    LoadImage { target: AttachTarget, path: PathBuf },

    /// Write text to the system clipboard; reports `ClipboardCopied` or
    /// `ClipboardFailed`
    CopyToClipboard { text: String },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
