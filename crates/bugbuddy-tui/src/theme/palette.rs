//! Colour palettes for the light and dark themes.
//!
//! Every colour the UI draws with comes from a [`Palette`], so switching the
//! theme or the accent only means building a new one.

use bugbuddy_core::{AccentColor, ConfidenceLevel, Theme};
use ratatui::style::Color;

// --- Status (shared by both themes) ---
pub const STATUS_GREEN: Color = Color::Rgb(16, 185, 129);
pub const STATUS_YELLOW: Color = Color::Rgb(245, 158, 11);
pub const STATUS_RED: Color = Color::Rgb(239, 68, 68);
pub const STATUS_BLUE: Color = Color::Rgb(59, 130, 246);

// --- Mascot ---
pub const MASCOT_BODY: Color = Color::Rgb(79, 70, 229);
pub const MASCOT_HEAD: Color = Color::Rgb(99, 102, 241);
pub const MASCOT_WING: Color = Color::Rgb(34, 211, 238);
pub const MASCOT_LEGS: Color = Color::Rgb(100, 116, 139);

/// Resolved colours for one theme and accent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub theme: Theme,

    // --- Background layers ---
    pub background: Color,
    pub card: Color,
    pub surface: Color,

    // --- Borders ---
    pub border: Color,
    pub border_active: Color,

    // --- Accent ---
    pub accent: Color,
    /// Text drawn on top of the accent colour
    pub on_accent: Color,

    // --- Text ---
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
}

impl Palette {
    pub fn new(theme: Theme, accent: &AccentColor) -> Self {
        let (r, g, b) = accent.rgb();
        let accent = Color::Rgb(r, g, b);

        match theme {
            Theme::Dark => Self {
                theme,
                background: Color::Rgb(17, 24, 39),
                card: Color::Rgb(31, 41, 55),
                surface: Color::Rgb(55, 65, 81),
                border: Color::Rgb(75, 85, 99),
                border_active: accent,
                accent,
                on_accent: Color::Rgb(255, 255, 255),
                text_primary: Color::Rgb(243, 244, 246),
                text_secondary: Color::Rgb(209, 213, 219),
                text_muted: Color::Rgb(156, 163, 175),
            },
            Theme::Light => Self {
                theme,
                background: Color::Rgb(249, 250, 251),
                card: Color::Rgb(255, 255, 255),
                surface: Color::Rgb(243, 244, 246),
                border: Color::Rgb(209, 213, 219),
                border_active: accent,
                accent,
                on_accent: Color::Rgb(255, 255, 255),
                text_primary: Color::Rgb(17, 24, 39),
                text_secondary: Color::Rgb(55, 65, 81),
                text_muted: Color::Rgb(107, 114, 128),
            },
        }
    }

    /// Colour for a confidence band: green, amber, red
    pub fn confidence(&self, level: ConfidenceLevel) -> Color {
        match level {
            ConfidenceLevel::High => STATUS_GREEN,
            ConfidenceLevel::Medium => STATUS_YELLOW,
            ConfidenceLevel::Low => STATUS_RED,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(Theme::default(), &AccentColor::default())
    }
}
