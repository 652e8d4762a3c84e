/*!
 * # subdub - batch video subtitling and dubbing
 *
 * A Rust library for batch-processing folders of video files: extract the
 * audio track, transcribe speech into timed segments, write SRT subtitle
 * files, machine-translate them, and optionally synthesize translated speech
 * and mux it back over the original video as a dubbed version.
 *
 * ## Features
 *
 * - SRT serialization with exact truncating timecode formatting
 * - Line-by-line SRT translation that preserves structural lines byte-for-byte
 * - Pluggable collaborators for transcription, translation and speech synthesis
 * - ffmpeg-based audio extraction and dub muxing
 * - Batch folder processing with per-file skip/continue policy
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `srt`: Segment model, timecode formatting, encoder and line classifier
 * - `translate`: Translation trait, HTTP client, mock, and the passthrough filter
 * - `transcribe`: Transcription trait, whisper subprocess driver, mock
 * - `tts`: Speech synthesis trait and clients
 * - `media`: ffmpeg/ffprobe wrappers for extraction, probing and muxing
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod media;
pub mod srt;
pub mod transcribe;
pub mod translate;
pub mod tts;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, PipelineMode};
pub use errors::{AppError, SubtitleError, TranscriptionError, TranslationError};
pub use srt::{LineKind, TranscriptSegment, classify_line, format_srt_time};
pub use translate::passthrough::{TranslationFallback, translate_srt_file};
