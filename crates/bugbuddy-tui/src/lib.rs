//! bugbuddy-tui - Terminal UI for BugBuddy
//!
//! This crate provides the ratatui-based terminal interface. It drives an
//! Engine from bugbuddy-app and adds terminal rendering, event polling, page
//! views and the ambient decorations.

pub mod decoration;
pub mod event;
pub mod layout;
pub mod pages;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

pub use runner::run;
