//! Settings loading
//!
//! A missing file yields defaults. An unreadable or invalid file is logged
//! and also yields defaults; configuration problems never stop the app.

use std::path::{Path, PathBuf};

use bugbuddy_core::prelude::*;

use super::types::Settings;

/// Directory under the platform config dir
const CONFIG_DIR: &str = "bugbuddy";

pub const CONFIG_FILENAME: &str = "config.toml";

/// `<config_dir>/bugbuddy/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILENAME))
}

/// Load settings from `explicit` if given, otherwise from the default path
pub fn load_settings(explicit: Option<&Path>) -> Settings {
    match explicit.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => load_settings_from(&path),
        None => {
            debug!("No config directory on this platform, using defaults");
            Settings::default()
        }
    }
}

/// Load settings from a specific file
pub fn load_settings_from(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}
