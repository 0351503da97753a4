//! Analysis service trait and the built-in mock analyzer
//!
//! The [`Analyzer`] trait is the seam a real inference backend plugs into.
//! [`MockAnalyzer`] waits a fixed delay and returns a canned explanation of a
//! null-property access, echoing the request back into the record.

use std::time::Duration;

use bugbuddy_core::prelude::*;
use bugbuddy_core::{AnalysisRecord, Confidence, ImageAttachment, SuggestedFix};

/// Default simulated latency of the mock analyzer
pub const DEFAULT_ANALYSIS_DELAY: Duration = Duration::from_millis(2000);

/// A validated analysis request: error text, a screenshot, or both
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    error_text: String,
    image: Option<ImageAttachment>,
}

impl AnalysisRequest {
    /// Build a request. Fails with [`Error::EmptyRequest`] when the text is
    /// blank and no image is attached.
    pub fn new(error_text: impl Into<String>, image: Option<ImageAttachment>) -> Result<Self> {
        let error_text = error_text.into();
        if error_text.trim().is_empty() && image.is_none() {
            return Err(Error::EmptyRequest);
        }
        Ok(Self { error_text, image })
    }

    pub fn error_text(&self) -> &str {
        &self.error_text
    }

    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }
}

/// Produces an [`AnalysisRecord`] for a request.
///
/// `Analyzer` is the `Send` variant generated by `trait_variant` and is what
/// the engine requires. Implementing it also provides `LocalAnalyzer`.
#[trait_variant::make(Analyzer: Send)]
pub trait LocalAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisRecord>;
}

/// Stand-in analyzer: fixed delay, canned payload
#[derive(Debug, Clone)]
pub struct MockAnalyzer {
    delay: Duration,
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::with_delay(DEFAULT_ANALYSIS_DELAY)
    }
}

impl MockAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

const MOCK_EXPLANATION: &str = "This error typically occurs when trying to access a property of an \
undefined or null object. The JavaScript engine cannot find the specified property on the object \
reference.";

const MOCK_FIX: &str = r#"// Check if the object exists before accessing its properties
if (myObject && myObject.property) {
  console.log(myObject.property);
}

// Or use optional chaining (ES2020+)
console.log(myObject?.property);

// Alternative: provide a default value
const value = myObject?.property || 'default value';"#;

const MOCK_REASONING: &str = "The error occurs because the code attempts to read a property from \
an object that is either undefined or null. This commonly happens when:

1. An API call hasn't completed yet
2. A variable wasn't initialized properly
3. An object property doesn't exist
4. Asynchronous operations haven't finished

The suggested fixes prevent this by checking the object's existence before property access.";

const MOCK_CONFIDENCE: i64 = 92;
const MOCK_LANGUAGE: &str = "javascript";

impl Analyzer for MockAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisRecord> {
        debug!(
            "MockAnalyzer: analyzing {} chars of error text (screenshot: {}), delay {:?}",
            request.error_text().len(),
            request.image().is_some(),
            self.delay
        );

        tokio::time::sleep(self.delay).await;

        Ok(AnalysisRecord::new(
            request.error_text(),
            request.image().cloned(),
            MOCK_EXPLANATION,
            SuggestedFix::new(MOCK_FIX, Some(MOCK_LANGUAGE)),
            MOCK_REASONING,
            Confidence::new(MOCK_CONFIDENCE)?,
        ))
    }
}
