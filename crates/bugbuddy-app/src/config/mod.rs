//! Configuration file parsing for BugBuddy
//!
//! Supports:
//! - `<config_dir>/bugbuddy/config.toml` - Global settings
//! - `--config PATH` - An explicit settings file

pub mod settings;
pub mod types;

pub use settings::{default_config_path, load_settings, load_settings_from, CONFIG_FILENAME};
pub use types::*;
