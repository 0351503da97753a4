//! Message processing
//!
//! Runs a message and its follow-ups through the TEA update function and
//! hands every resulting action to the background task layer.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::actions::{handle_action, BackgroundTasks};
use crate::analysis::Analyzer;
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message<A>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    analyzer: &Arc<A>,
    tasks: &mut BackgroundTasks,
) where
    A: Analyzer + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), analyzer, tasks);
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
