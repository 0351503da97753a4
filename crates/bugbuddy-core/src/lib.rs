//! # bugbuddy-core - Core Domain Types
//!
//! Foundation crate for BugBuddy. Provides domain types, error handling and
//! logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, uuid, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Page`] - Closed set of navigable pages
//! - [`Theme`] - Light or dark presentation theme
//! - [`AnalysisRecord`] - One completed, immutable analysis
//! - [`Confidence`], [`ConfidenceLevel`] - Bounded score and its display band
//! - [`UserProfile`], [`ProfileUpdate`] - Preferences and their partial update
//! - [`ImageAttachment`] - Metadata of a user-selected image
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use bugbuddy_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all BugBuddy crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use error::{Error, Result, ResultExt};
pub use types::{
    AccentColor, AnalysisRecord, Confidence, ConfidenceLevel, ImageAttachment, Page,
    ProfileUpdate, SuggestedFix, Theme, UserProfile,
};
