use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

use crate::errors::TranscriptionError;
use crate::media;
use crate::srt::TranscriptSegment;
use crate::transcribe::Transcriber;

/// Transcriber backed by a local whisper executable
///
/// Extracts the audio track into a temporary WAV, then runs `whisper` as a
/// subprocess with JSON output and reads the segment list back from the
/// result file. The model is loaded by the subprocess on every call; reuse of
/// the loaded model across files is whisper's own concern.
#[derive(Debug)]
pub struct WhisperCli {
    /// Name or path of the whisper executable
    binary: String,
    /// Model size to load
    model: String,
    /// Spoken language hint (ISO 639-1)
    language: String,
    /// Per-file timeout in seconds
    timeout_secs: u64,
}

/// Top-level whisper JSON output
#[derive(Debug, Deserialize)]
struct WhisperOutput {
    /// Timed transcript segments
    segments: Vec<WhisperSegment>,
}

/// One segment of the whisper JSON output
#[derive(Debug, Deserialize)]
struct WhisperSegment {
    /// Segment start in seconds
    start: f64,
    /// Segment end in seconds
    end: f64,
    /// Transcribed text
    text: String,
}

impl WhisperCli {
    /// Create a new whisper handle
    pub fn new(binary: String, model: String, language: String, timeout_secs: u64) -> Self {
        WhisperCli {
            binary,
            model,
            language,
            timeout_secs,
        }
    }
}

#[async_trait]
impl Transcriber for WhisperCli {
    async fn transcribe(&self, media_path: &Path) -> Result<Vec<TranscriptSegment>, TranscriptionError> {
        if !media_path.exists() {
            return Err(TranscriptionError::MissingMedia(media_path.to_path_buf()));
        }

        let work_dir = tempfile::tempdir()
            .map_err(|e| TranscriptionError::ProcessFailed(e.to_string()))?;

        let stem = media_path
            .file_stem()
            .ok_or_else(|| TranscriptionError::ParseError("Media path has no file stem".to_string()))?
            .to_string_lossy()
            .to_string();
        let audio_path = work_dir.path().join(format!("{}.wav", stem));

        media::extract_audio(media_path, audio_path.as_path()).await?;

        debug!("Transcribing {:?} with model '{}'", media_path, self.model);

        // Whisper writes <stem>.json into the output directory
        let whisper_future = Command::new(&self.binary)
            .args([
                audio_path.to_str().unwrap_or_default(),
                "--model", &self.model,
                "--language", &self.language,
                "--output_format", "json",
                "--output_dir", work_dir.path().to_str().unwrap_or_default(),
            ])
            .output();

        let timeout_duration = Duration::from_secs(self.timeout_secs);
        let result = tokio::select! {
            result = whisper_future => {
                result.map_err(|e| TranscriptionError::ProcessFailed(
                    format!("Failed to execute whisper command: {}", e)
                ))?
            },
            _ = tokio::time::sleep(timeout_duration) => {
                return Err(TranscriptionError::Timeout(self.timeout_secs));
            }
        };

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(TranscriptionError::ProcessFailed(stderr.trim().to_string()));
        }

        let json_path = work_dir.path().join(format!("{}.json", stem));

        let json = std::fs::read_to_string(&json_path)
            .map_err(|e| TranscriptionError::ParseError(
                format!("Missing whisper output {:?}: {}", json_path, e)
            ))?;

        let parsed: WhisperOutput = serde_json::from_str(&json)
            .map_err(|e| TranscriptionError::ParseError(e.to_string()))?;

        let mut segments = Vec::with_capacity(parsed.segments.len());
        for raw in parsed.segments {
            match TranscriptSegment::new_validated(raw.start, raw.end, raw.text) {
                Ok(segment) => segments.push(segment),
                Err(e) => warn!("Skipping invalid transcript segment: {}", e),
            }
        }

        Ok(segments)
    }
}
