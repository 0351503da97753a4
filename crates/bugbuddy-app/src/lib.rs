//! bugbuddy-app - Application state and orchestration for BugBuddy
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the UI
//! state, the reducer-based store for domain state, the Engine shared by the
//! TUI and headless runners, configuration loading, and the analyzer seam.

pub mod actions;
pub mod analysis;
pub mod attachment;
pub mod clipboard;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod history;
pub mod input_key;
pub mod message;
pub mod process;
pub mod signals;
pub mod state;
pub mod store;
pub mod suggestions;

// Re-export primary types
pub use analysis::{AnalysisRequest, Analyzer, LocalAnalyzer, MockAnalyzer};
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use message::Message;
pub use state::AppState;
pub use store::{Action, ApplicationState, Store};
