//! History presentation: search, confidence filter, sort and summary stats
//!
//! Everything here produces new views of the history; stored history order
//! is never changed.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use bugbuddy_core::{AnalysisRecord, ConfidenceLevel};

/// Maximum error text length shown in a history entry
pub const ERROR_PREVIEW_CHARS: usize = 100;

/// Maximum explanation length shown in a history entry
pub const EXPLANATION_PREVIEW_CHARS: usize = 150;

/// History sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Newest first
    #[default]
    Date,
    /// Highest confidence first
    Confidence,
}

impl SortBy {
    pub fn toggled(self) -> Self {
        match self {
            SortBy::Date => SortBy::Confidence,
            SortBy::Confidence => SortBy::Date,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortBy::Date => "Date",
            SortBy::Confidence => "Confidence",
        }
    }
}

/// Confidence band filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfidenceFilter {
    #[default]
    All,
    High,
    Medium,
    Low,
}

impl ConfidenceFilter {
    /// Next filter in the All → High → Medium → Low cycle
    pub fn cycled(self) -> Self {
        match self {
            ConfidenceFilter::All => ConfidenceFilter::High,
            ConfidenceFilter::High => ConfidenceFilter::Medium,
            ConfidenceFilter::Medium => ConfidenceFilter::Low,
            ConfidenceFilter::Low => ConfidenceFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceFilter::All => "All",
            ConfidenceFilter::High => "High (80%+)",
            ConfidenceFilter::Medium => "Medium (60-79%)",
            ConfidenceFilter::Low => "Low (<60%)",
        }
    }

    pub fn matches(&self, record: &AnalysisRecord) -> bool {
        match self {
            ConfidenceFilter::All => true,
            ConfidenceFilter::High => record.confidence_level() == ConfidenceLevel::High,
            ConfidenceFilter::Medium => record.confidence_level() == ConfidenceLevel::Medium,
            ConfidenceFilter::Low => record.confidence_level() == ConfidenceLevel::Low,
        }
    }
}

/// Search, filter and sort settings of the history page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Case-insensitive substring matched against the error text
    pub search: String,
    pub sort: SortBy,
    pub filter: ConfidenceFilter,
}

impl HistoryQuery {
    pub fn with_sort(sort: SortBy) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    /// True when a search term or a filter narrows the view
    pub fn is_narrowed(&self) -> bool {
        !self.search.is_empty() || self.filter != ConfidenceFilter::All
    }

    /// Produce the presented list. `history` must be newest first.
    pub fn apply(&self, history: &[Arc<AnalysisRecord>]) -> Vec<Arc<AnalysisRecord>> {
        let needle = self.search.to_lowercase();

        let mut view: Vec<Arc<AnalysisRecord>> = history
            .iter()
            .filter(|r| needle.is_empty() || r.error_message.to_lowercase().contains(&needle))
            .filter(|r| self.filter.matches(r))
            .cloned()
            .collect();

        match self.sort {
            SortBy::Date => view.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
            SortBy::Confidence => view.sort_by(|a, b| b.confidence.cmp(&a.confidence)),
        }

        view
    }
}

/// Summary shown under the history list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryStats {
    pub total: usize,
    /// Mean confidence rounded to the nearest integer
    pub average_confidence: u8,
    pub high_confidence: usize,
}

impl HistoryStats {
    pub fn from_history(history: &[Arc<AnalysisRecord>]) -> Self {
        if history.is_empty() {
            return Self::default();
        }

        let total = history.len();
        let sum: u32 = history
            .iter()
            .map(|r| u32::from(r.confidence.value()))
            .sum();
        let average_confidence = (f64::from(sum) / total as f64).round() as u8;
        let high_confidence = history
            .iter()
            .filter(|r| r.confidence_level() == ConfidenceLevel::High)
            .count();

        Self {
            total,
            average_confidence,
            high_confidence,
        }
    }
}

/// Cut `text` to at most `max_chars` characters, appending "..." when cut
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
