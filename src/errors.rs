/*!
 * Error types for the subdub application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or encoding subtitles
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A segment ends before it starts
    #[error("Invalid time range: end {end}s is before start {start}s")]
    InvalidTimeRange {
        /// Segment start in seconds
        start: f64,
        /// Segment end in seconds
        end: f64,
    },

    /// A segment has a negative start time
    #[error("Negative start time: {0}s")]
    NegativeStart(f64),

    /// A segment has no usable text
    #[error("Empty segment text")]
    EmptyText,
}

/// Errors that can occur when talking to the translation service
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error when making an API request fails
    #[error("Translation request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse translation response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("Translation API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// The service answered but the result is unusable
    #[error("Translation service returned an empty result")]
    EmptyResult,
}

/// Errors that can occur while transcribing audio
#[derive(Error, Debug)]
pub enum TranscriptionError {
    /// The media file to transcribe is missing
    #[error("Input media not found: {0}")]
    MissingMedia(PathBuf),

    /// The audio track could not be extracted from the input media
    #[error("Audio extraction failed: {0}")]
    ExtractionFailed(#[from] MediaError),

    /// The transcription process could not be run or exited with failure
    #[error("Transcription process failed: {0}")]
    ProcessFailed(String),

    /// The transcription process ran past its deadline
    #[error("Transcription timed out after {0}s")]
    Timeout(u64),

    /// The transcription output could not be understood
    #[error("Failed to parse transcription output: {0}")]
    ParseError(String),
}

/// Errors that can occur while synthesizing speech
#[derive(Error, Debug)]
pub enum SynthesisError {
    /// Error when making an API request fails
    #[error("Speech synthesis request failed: {0}")]
    RequestFailed(String),

    /// Error returned by the API itself
    #[error("Speech synthesis API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// The synthesized audio could not be written out
    #[error("Failed to write synthesized audio: {0}")]
    WriteFailed(String),
}

/// Errors that can occur when driving ffmpeg/ffprobe
#[derive(Error, Debug)]
pub enum MediaError {
    /// The input media file is missing
    #[error("Media file not found: {0}")]
    MissingInput(PathBuf),

    /// An ffmpeg invocation failed
    #[error("ffmpeg failed: {0}")]
    FfmpegFailed(String),

    /// An ffprobe invocation failed
    #[error("ffprobe failed: {0}")]
    FfprobeFailed(String),

    /// A media subprocess ran past its deadline
    #[error("Media command timed out after {0}s")]
    Timeout(u64),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from transcription
    #[error("Transcription error: {0}")]
    Transcription(#[from] TranscriptionError),

    /// Error from speech synthesis
    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    /// Error from media processing
    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
