use std::fmt;
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use log::warn;

use crate::errors::SubtitleError;

// @module: SRT segment model, timecode formatting and line classification

/// A single timed transcript span produced by the transcription service
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    // @field: Start of the spoken span in seconds
    pub start: f64,

    // @field: End of the spoken span in seconds
    pub end: f64,

    // @field: Spoken text, kept verbatim
    pub text: String,
}

impl TranscriptSegment {
    /// Creates a new segment without validation - used by tests and trusted callers
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        TranscriptSegment {
            start,
            end,
            text: text.into(),
        }
    }

    // @creates: Validated transcript segment
    // @validates: Non-negative start, end >= start, non-empty text
    pub fn new_validated(start: f64, end: f64, text: String) -> Result<Self, SubtitleError> {
        if start < 0.0 || !start.is_finite() {
            return Err(SubtitleError::NegativeStart(start));
        }
        if end < start || !end.is_finite() {
            return Err(SubtitleError::InvalidTimeRange { start, end });
        }
        if text.trim().is_empty() {
            return Err(SubtitleError::EmptyText);
        }
        Ok(TranscriptSegment { start, end, text })
    }

    /// Start of the span as an SRT timestamp
    pub fn format_start(&self) -> String {
        format_srt_time(self.start)
    }

    /// End of the span as an SRT timestamp
    pub fn format_end(&self) -> String {
        format_srt_time(self.end)
    }
}

/// Format a non-negative time in seconds as an SRT timestamp (`HH:MM:SS,mmm`).
///
/// Every unit is truncated, never rounded: `1.9995` formats as `00:00:01,999`.
/// Hours are zero-padded to two digits; durations of 100 hours or more widen
/// the hour field (`100:00:00,000`) instead of truncating it.
pub fn format_srt_time(t: f64) -> String {
    let t = t.max(0.0);
    let hours = (t / 3600.0).floor() as u64;
    let minutes = ((t % 3600.0) / 60.0).floor() as u64;
    let seconds = (t % 60.0).floor() as u64;
    let millis = ((t % 1.0) * 1000.0).floor() as u64;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Serialize an ordered sequence of segments into SRT text.
///
/// Each segment becomes one cue of exactly four lines: a 1-based index, the
/// timing line, the segment text verbatim, and a blank separator. An empty
/// sequence yields an empty string; whether that gets persisted is the
/// caller's call (the batch controller skips files with no segments).
pub fn encode_segments(segments: &[TranscriptSegment]) -> String {
    let mut out_of_order = 0;
    for pair in segments.windows(2) {
        if pair[1].start < pair[0].start {
            out_of_order += 1;
        }
    }
    if out_of_order > 0 {
        warn!("Encoding {} segment(s) with out-of-order start times", out_of_order);
    }

    let mut document = String::new();
    for (i, segment) in segments.iter().enumerate() {
        document.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            segment.format_start(),
            segment.format_end(),
            segment.text
        ));
    }
    document
}

/// Write segments to an SRT file, UTF-8 encoded.
///
/// The whole document is built in memory and written with a single call, so a
/// storage failure never leaves a half-written subtitle file behind.
pub fn write_srt<P: AsRef<Path>>(segments: &[TranscriptSegment], path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let document = encode_segments(segments);
    fs::write(path, document)
        .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

    Ok(())
}

/// Classification of one raw line of an SRT file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace-only cue separator
    Blank,
    /// Cue sequence number, all decimal digits
    Index,
    /// Timing line containing `-->`
    Timing,
    /// Translatable subtitle text
    Text,
}

/// Classify a single SRT line.
///
/// Stateless and total: every possible line maps to exactly one class, with
/// or without a trailing newline. The blank check runs before the digit check
/// so an all-whitespace line is never misread as text.
pub fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        LineKind::Blank
    } else if trimmed.chars().all(|c| c.is_ascii_digit()) {
        LineKind::Index
    } else if line.contains("-->") {
        LineKind::Timing
    } else {
        LineKind::Text
    }
}

impl fmt::Display for TranscriptSegment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} --> {}: {}", self.format_start(), self.format_end(), self.text.trim())
    }
}
