/*!
 * Mock transcriber for testing.
 *
 * Returns canned segments (or canned failures) without running any process.
 */

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::TranscriptionError;
use crate::srt::TranscriptSegment;
use crate::transcribe::Transcriber;

/// Mock transcriber for controller and pipeline tests
#[derive(Debug)]
pub struct MockTranscriber {
    /// Segments to return on every call
    segments: Vec<TranscriptSegment>,
    /// Whether every call should fail
    failing: bool,
    /// Number of transcribe calls made so far
    call_count: Arc<AtomicUsize>,
}

impl MockTranscriber {
    /// Create a mock that returns the given segments on every call
    pub fn with_segments(segments: Vec<TranscriptSegment>) -> Self {
        Self {
            segments,
            failing: false,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock that returns no segments (nothing transcribed)
    pub fn empty() -> Self {
        Self::with_segments(Vec::new())
    }

    /// Create a mock that always fails
    pub fn failing() -> Self {
        Self {
            segments: Vec::new(),
            failing: true,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of transcribe calls made so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, media_path: &Path) -> Result<Vec<TranscriptSegment>, TranscriptionError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(TranscriptionError::ProcessFailed(format!(
                "Simulated failure for {:?}",
                media_path
            )));
        }
        Ok(self.segments.clone())
    }
}
