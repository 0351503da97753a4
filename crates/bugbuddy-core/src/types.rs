//! Core domain type definitions

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Page
// ─────────────────────────────────────────────────────────────────────────────

/// The page currently shown by the view router (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Landing,
    Input,
    Results,
    History,
    Profile,
}

impl Page {
    /// All pages in navigation order
    pub const ALL: [Page; 5] = [
        Page::Landing,
        Page::Input,
        Page::Results,
        Page::History,
        Page::Profile,
    ];

    /// Identifier used in configuration, CLI and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Landing => "landing",
            Page::Input => "input",
            Page::Results => "results",
            Page::History => "history",
            Page::Profile => "profile",
        }
    }

    /// Label shown in the navigation bar
    pub fn label(&self) -> &'static str {
        match self {
            Page::Landing => "Home",
            Page::Input => "Analyze",
            Page::Results => "Results",
            Page::History => "History",
            Page::Profile => "Profile",
        }
    }

    /// Position in [`Page::ALL`]
    pub fn index(&self) -> usize {
        Page::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    /// Next page in navigation order (wraps)
    pub fn next(&self) -> Page {
        Page::ALL[(self.index() + 1) % Page::ALL.len()]
    }

    /// Previous page in navigation order (wraps)
    pub fn previous(&self) -> Page {
        Page::ALL[(self.index() + Page::ALL.len() - 1) % Page::ALL.len()]
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Page::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::invalid_action(format!("unknown page '{}'", s)))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Theme
// ─────────────────────────────────────────────────────────────────────────────

/// Light or dark presentation theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(Error::invalid_action(format!("unknown theme '{}'", other))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Confidence
// ─────────────────────────────────────────────────────────────────────────────

/// Analysis confidence score, always within 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Confidence(u8);

impl Confidence {
    pub const MAX: u8 = 100;

    /// Create a confidence score, rejecting values outside 0..=100
    pub fn new(value: i64) -> Result<Self> {
        if (0..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(Error::InvalidConfidence { value })
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_value(self.0)
    }
}

impl TryFrom<i64> for Confidence {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Confidence::new(value)
    }
}

impl From<Confidence> for u8 {
    fn from(c: Confidence) -> u8 {
        c.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Confidence band used for colouring and filtering
///
/// The bands partition 0..=100: high is 80 and above, medium is 60 to 79,
/// low is everything below 60.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub const HIGH_THRESHOLD: u8 = 80;
    pub const MEDIUM_THRESHOLD: u8 = 60;

    pub fn from_value(value: u8) -> Self {
        if value >= Self::HIGH_THRESHOLD {
            ConfidenceLevel::High
        } else if value >= Self::MEDIUM_THRESHOLD {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::Low => "Low",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Analysis Record
// ─────────────────────────────────────────────────────────────────────────────

/// Suggested fix: a source snippet plus its language tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedFix {
    pub code: String,
    #[serde(default)]
    pub language: Option<String>,
}

impl SuggestedFix {
    pub fn new(code: impl Into<String>, language: Option<&str>) -> Self {
        Self {
            code: code.into(),
            language: language.map(str::to_string),
        }
    }
}

/// Displayable reference to a user-selected image
///
/// Only metadata is kept; the image bytes are read once to validate and
/// measure the file and then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    pub path: PathBuf,
    /// Detected format name, e.g. "PNG"
    pub format: String,
    pub width: u32,
    pub height: u32,
    pub byte_size: u64,
}

impl ImageAttachment {
    /// File name without the directory
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// One-line preview, e.g. `crash.png · PNG · 1280×720 · 245 KB`
    pub fn preview_label(&self) -> String {
        format!(
            "{} · {} · {}×{} · {}",
            self.file_name(),
            self.format,
            self.width,
            self.height,
            format_byte_size(self.byte_size)
        )
    }
}

fn format_byte_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{} KB", bytes / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// One completed analysis
///
/// Records are shared as `Arc<AnalysisRecord>` once created and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Unique opaque identifier (UUID v4)
    pub id: String,
    pub timestamp: DateTime<Local>,
    pub error_message: String,
    #[serde(default)]
    pub screenshot: Option<ImageAttachment>,
    pub explanation: String,
    pub suggested_fix: SuggestedFix,
    pub reasoning: String,
    pub confidence: Confidence,
}

impl AnalysisRecord {
    /// Create a record with a fresh id and the current timestamp
    pub fn new(
        error_message: impl Into<String>,
        screenshot: Option<ImageAttachment>,
        explanation: impl Into<String>,
        suggested_fix: SuggestedFix,
        reasoning: impl Into<String>,
        confidence: Confidence,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Local::now(),
            error_message: error_message.into(),
            screenshot,
            explanation: explanation.into(),
            suggested_fix,
            reasoning: reasoning.into(),
            confidence,
        }
    }

    /// Replace the timestamp (builder style, used before the record is shared)
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        self.confidence.level()
    }

    pub fn formatted_date(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }

    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User Profile
// ─────────────────────────────────────────────────────────────────────────────

/// Accent colour in `#RRGGBB` form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccentColor(String);

impl AccentColor {
    /// Preset accent colours offered on the profile page
    pub const PRESETS: [&'static str; 8] = [
        "#4F46E5", // Indigo
        "#7C3AED", // Purple
        "#EC4899", // Pink
        "#F59E0B", // Amber
        "#10B981", // Emerald
        "#3B82F6", // Blue
        "#EF4444", // Red
        "#8B5CF6", // Violet
    ];

    pub const DEFAULT: &'static str = "#4F46E5";

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue components
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = &self.0[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }

    /// Index of this colour in [`AccentColor::PRESETS`], if it is a preset
    pub fn preset_index(&self) -> Option<usize> {
        Self::PRESETS
            .iter()
            .position(|p| p.eq_ignore_ascii_case(&self.0))
    }
}

impl Default for AccentColor {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl FromStr for AccentColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let valid = s.len() == 7
            && s.starts_with('#')
            && s[1..].chars().all(|c| c.is_ascii_hexdigit());
        if valid {
            Ok(Self(s.to_ascii_uppercase()))
        } else {
            Err(Error::invalid_action(format!(
                "accent colour must look like #RRGGBB, got '{}'",
                s
            )))
        }
    }
}

impl TryFrom<String> for AccentColor {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<AccentColor> for String {
    fn from(c: AccentColor) -> String {
        c.0
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Editable presentation preferences
#[derive(Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<ImageAttachment>,
    /// Held in memory only; never persisted, logged or transmitted
    pub api_key: Option<String>,
    pub theme: Theme,
    pub accent_color: AccentColor,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: "1".to_string(),
            name: "Developer".to_string(),
            email: "dev@example.com".to_string(),
            avatar: None,
            api_key: None,
            theme: Theme::Dark,
            accent_color: AccentColor::default(),
        }
    }
}

impl fmt::Debug for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserProfile")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("avatar", &self.avatar)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("theme", &self.theme)
            .field("accent_color", &self.accent_color)
            .finish()
    }
}

/// Partial profile used by `UpdateUser`
///
/// `None` leaves a field untouched. For optional profile fields the inner
/// option decides between setting (`Some(Some(v))`) and clearing
/// (`Some(None)`). The theme is not part of an update: it only changes
/// through a theme toggle so the profile and the global theme stay in step.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<Option<ImageAttachment>>,
    pub api_key: Option<Option<String>>,
    pub accent_color: Option<AccentColor>,
}

impl ProfileUpdate {
    /// Shallow-merge the present fields into `profile`
    pub fn apply_to(&self, profile: &mut UserProfile) {
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(email) = &self.email {
            profile.email = email.clone();
        }
        if let Some(avatar) = &self.avatar {
            profile.avatar = avatar.clone();
        }
        if let Some(api_key) = &self.api_key {
            profile.api_key = api_key.clone();
        }
        if let Some(accent) = &self.accent_color {
            profile.accent_color = accent.clone();
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ProfileUpdate::default()
    }
}

impl fmt::Debug for ProfileUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileUpdate")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("avatar", &self.avatar)
            .field(
                "api_key",
                &self
                    .api_key
                    .as_ref()
                    .map(|k| k.as_ref().map(|_| "<redacted>")),
            )
            .field("accent_color", &self.accent_color)
            .finish()
    }
}
