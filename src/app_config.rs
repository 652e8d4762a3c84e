use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::translate::passthrough::TranslationFallback;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    pub source_language: String,

    /// Target language code (ISO)
    pub target_language: String,

    /// Transcription config
    #[serde(default)]
    pub transcription: TranscriptionConfig,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Speech synthesis config (dubbing mode)
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Speech recognition settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranscriptionConfig {
    /// Name or path of the whisper executable
    #[serde(default = "default_whisper_binary")]
    pub binary: String,

    /// Model size to load (tiny, base, small, medium, large)
    #[serde(default = "default_whisper_model")]
    pub model: String,

    /// Per-file transcription timeout in seconds
    #[serde(default = "default_transcription_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            binary: default_whisper_binary(),
            model: default_whisper_model(),
            timeout_secs: default_transcription_timeout_secs(),
        }
    }
}

/// Translation service settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Service endpoint URL
    #[serde(default = "default_translation_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub timeout_secs: u64,

    /// What to do when a single line fails to translate
    #[serde(default)]
    pub fallback: TranslationFallback,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_translation_endpoint(),
            timeout_secs: default_request_timeout_secs(),
            fallback: TranslationFallback::default(),
        }
    }
}

/// Speech synthesis settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SynthesisConfig {
    /// Service endpoint URL
    #[serde(default = "default_synthesis_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_synthesis_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            endpoint: default_synthesis_endpoint(),
            timeout_secs: default_synthesis_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_whisper_binary() -> String {
    "whisper".to_string()
}

fn default_whisper_model() -> String {
    "base".to_string()
}

fn default_transcription_timeout_secs() -> u64 {
    600
}

fn default_translation_endpoint() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_synthesis_endpoint() -> String {
    "http://localhost:5002/api/tts".to_string()
}

fn default_synthesis_timeout_secs() -> u64 {
    120
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Both languages must resolve to ISO 639-1 codes for the services
        let _source = crate::language_utils::normalize_to_part1(&self.source_language)?;
        let _target = crate::language_utils::normalize_to_part1(&self.target_language)?;

        if self.translation.endpoint.trim().is_empty() {
            return Err(anyhow::anyhow!("Translation endpoint must not be empty"));
        }
        if self.transcription.binary.trim().is_empty() {
            return Err(anyhow::anyhow!("Transcription binary must not be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "en".to_string(),
            target_language: "ar".to_string(),
            transcription: TranscriptionConfig::default(),
            translation: TranslationConfig::default(),
            synthesis: SynthesisConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
