//! Configuration types for BugBuddy
//!
//! Defines `Settings` and its sections. Every field has a default so a
//! partial (or empty) file is valid.

use serde::{Deserialize, Serialize};

use bugbuddy_core::{AccentColor, Theme, UserProfile};

use crate::analysis::DEFAULT_ANALYSIS_DELAY;
use crate::history::SortBy;

/// Application settings (config.toml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub analysis: AnalysisSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub profile: ProfileSettings,

    #[serde(default)]
    pub history: HistorySettings,
}

impl Settings {
    /// Profile the session starts with
    pub fn initial_profile(&self) -> UserProfile {
        let mut profile = UserProfile {
            theme: self.ui.theme,
            ..UserProfile::default()
        };
        if let Some(name) = &self.profile.name {
            profile.name = name.clone();
        }
        if let Some(email) = &self.profile.email {
            profile.email = email.clone();
        }
        if let Some(accent) = &self.profile.accent_color {
            profile.accent_color = accent.clone();
        }
        profile
    }
}

/// Analysis settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnalysisSettings {
    /// Simulated latency of the mock analyzer
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
        }
    }
}

fn default_delay_ms() -> u64 {
    DEFAULT_ANALYSIS_DELAY.as_millis() as u64
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Initial theme
    #[serde(default)]
    pub theme: Theme,

    /// Event poll timeout, which is also the animation frame interval
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Draw the ambient particle field
    #[serde(default = "default_true")]
    pub particles: bool,

    /// Draw the landing page mascot
    #[serde(default = "default_true")]
    pub mascot: bool,

    #[serde(default = "default_particle_count")]
    pub particle_count: usize,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            tick_rate_ms: default_tick_rate_ms(),
            particles: true,
            mascot: true,
            particle_count: default_particle_count(),
        }
    }
}

impl UiSettings {
    /// True when at least one decoration is enabled
    pub fn decorations_enabled(&self) -> bool {
        self.particles || self.mascot
    }

    /// Turn every decoration off
    pub fn disable_decorations(&mut self) {
        self.particles = false;
        self.mascot = false;
    }
}

fn default_tick_rate_ms() -> u64 {
    50
}

fn default_particle_count() -> usize {
    60
}

fn default_true() -> bool {
    true
}

/// Initial profile values. The API key is not configurable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProfileSettings {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub accent_color: Option<AccentColor>,
}

/// History page settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistorySettings {
    #[serde(default)]
    pub default_sort: SortBy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.analysis.delay_ms, 2000);
        assert_eq!(settings.ui.theme, Theme::Dark);
        assert_eq!(settings.ui.tick_rate_ms, 50);
        assert!(settings.ui.particles);
        assert!(settings.ui.mascot);
        assert_eq!(settings.ui.particle_count, 60);
        assert_eq!(settings.history.default_sort, SortBy::Date);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_initial_profile_applies_overrides() {
        let settings: Settings = toml::from_str(
            r##"
[ui]
theme = "light"

[profile]
name = "Ada"
accent_color = "#10B981"
"##,
        )
        .unwrap();

        let profile = settings.initial_profile();

        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.email, "dev@example.com");
        assert_eq!(profile.theme, Theme::Light);
        assert_eq!(profile.accent_color.as_str(), "#10B981");
        assert!(profile.api_key.is_none());
    }

    #[test]
    fn test_invalid_accent_is_rejected() {
        let result: std::result::Result<Settings, _> = toml::from_str(
            r#"
[profile]
accent_color = "indigo"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_disable_decorations() {
        let mut ui = UiSettings::default();
        assert!(ui.decorations_enabled());
        ui.disable_decorations();
        assert!(!ui.decorations_enabled());
    }
}
