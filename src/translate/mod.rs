/*!
 * Translation collaborators.
 *
 * This module defines the interface the rest of the application uses to
 * translate single subtitle lines, plus the concrete clients:
 * - `google`: HTTP client for a Google-translate style endpoint
 * - `mock`: configurable fake for tests
 * - `passthrough`: line-by-line SRT translation filter
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::TranslationError;

/// Common trait for translation services
///
/// A translator holds a fixed source/target language pair and translates one
/// line at a time. Implementations own their retry and timeout behavior; the
/// passthrough filter only sees success or failure per line.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate a single line of text
    async fn translate_line(&self, line: &str) -> Result<String, TranslationError>;

    /// Test the connection to the translation service
    async fn test_connection(&self) -> Result<(), TranslationError>;

    /// The fixed (source, target) language pair of this translator
    fn language_pair(&self) -> (&str, &str);
}

pub mod google;
pub mod mock;
pub mod passthrough;
