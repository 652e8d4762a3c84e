/*!
 * Mock translator for testing.
 *
 * Simulates different service behaviors without any network traffic:
 * - `MockTranslator::working()` - always succeeds, bracketing the input
 * - `MockTranslator::identity()` - always succeeds, echoing the input
 * - `MockTranslator::intermittent(n)` - fails every nth request
 * - `MockTranslator::failing()` - always fails with an error
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::TranslationError;
use crate::translate::Translator;

/// Behavior mode for the mock translator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, wrapping the input in a `[target]` marker
    Working,
    /// Always succeeds, returning the input unchanged
    Identity,
    /// Fails every nth request (1-based)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Always succeeds with an empty string
    Empty,
}

/// Mock translator for testing passthrough and controller behavior
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Source language code
    source_language: String,
    /// Target language code
    target_language: String,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            source_language: "en".to_string(),
            target_language: "ar".to_string(),
        }
    }

    /// Create a working mock that brackets input with the target language
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that returns its input unchanged
    pub fn identity() -> Self {
        Self::new(MockBehavior::Identity)
    }

    /// Create an intermittently failing mock
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty translations
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Number of translate calls made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate_line(&self, line: &str) -> Result<String, TranslationError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;

        match self.behavior {
            MockBehavior::Working => Ok(format!("[{}] {}", self.target_language, line)),
            MockBehavior::Identity => Ok(line.to_string()),
            MockBehavior::Intermittent { fail_every } if fail_every > 0 && count % fail_every == 0 => {
                Err(TranslationError::RequestFailed(format!(
                    "Simulated failure on request {}",
                    count
                )))
            }
            MockBehavior::Intermittent { .. } => Ok(format!("[{}] {}", self.target_language, line)),
            MockBehavior::Failing => Err(TranslationError::RequestFailed(
                "Simulated failure".to_string(),
            )),
            MockBehavior::Empty => Ok(String::new()),
        }
    }

    async fn test_connection(&self) -> Result<(), TranslationError> {
        match self.behavior {
            MockBehavior::Failing => Err(TranslationError::RequestFailed(
                "Simulated connection failure".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn language_pair(&self) -> (&str, &str) {
        (&self.source_language, &self.target_language)
    }
}
