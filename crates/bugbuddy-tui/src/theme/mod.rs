//! Theme system for the TUI.
//!
//! This module provides:
//! - `palette` - Per-theme colour sets with the user's accent applied
//! - `styles` - Semantic style builder functions

pub mod palette;
pub mod styles;

pub use palette::Palette;
