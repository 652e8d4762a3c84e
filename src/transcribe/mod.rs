/*!
 * Speech-recognition collaborators.
 *
 * The transcriber is an explicitly constructed handle: built once at batch
 * start, passed into the controller, and reused across every file of the run.
 * Concrete implementations:
 * - `whisper_cli`: drives a local whisper executable
 * - `mock`: canned segments for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;

use crate::errors::TranscriptionError;
use crate::srt::TranscriptSegment;

/// Common trait for speech-recognition services
#[async_trait]
pub trait Transcriber: Send + Sync + Debug {
    /// Transcribe a media file into an ordered sequence of timed segments
    ///
    /// Implementations accept video as well as audio inputs and handle any
    /// audio extraction themselves. An empty result means nothing was
    /// transcribed; that is a legitimate outcome, not an error.
    async fn transcribe(&self, media_path: &Path) -> Result<Vec<TranscriptSegment>, TranscriptionError>;
}

pub mod mock;
pub mod whisper_cli;
