/*!
 * Speech-synthesis collaborators (dubbing mode).
 *
 * Takes the flattened translated transcript and renders it to an audio file
 * that the media module then muxes over the original video.
 */

use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::errors::SynthesisError;

/// Common trait for speech-synthesis services
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + Debug {
    /// Render text to speech in the given language, writing audio to `output`
    async fn synthesize(&self, text: &str, language: &str, output: &Path) -> Result<(), SynthesisError>;
}

/// HTTP text-to-speech client
///
/// Posts the text to a TTS endpoint (Coqui-style `api/tts` by default) and
/// writes the returned audio bytes straight to the output path.
#[derive(Debug)]
pub struct HttpSynthesizer {
    /// Endpoint URL
    endpoint: String,
    /// HTTP client for making requests
    client: Client,
}

impl HttpSynthesizer {
    /// Create a new client
    pub fn new(endpoint: String, timeout_secs: u64) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SynthesisError::RequestFailed(e.to_string()))?;

        Ok(HttpSynthesizer { endpoint, client })
    }
}

#[async_trait]
impl SpeechSynthesizer for HttpSynthesizer {
    async fn synthesize(&self, text: &str, language: &str, output: &Path) -> Result<(), SynthesisError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("text", text), ("language_id", language)])
            .send()
            .await
            .map_err(|e| SynthesisError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SynthesisError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::RequestFailed(e.to_string()))?;

        std::fs::write(output, &audio).map_err(|e| SynthesisError::WriteFailed(e.to_string()))?;

        Ok(())
    }
}

/// Mock synthesizer for tests; writes a placeholder file and records calls
#[derive(Debug)]
pub struct MockSynthesizer {
    /// Whether every call should fail
    failing: bool,
    /// Number of synthesize calls made so far
    call_count: Arc<AtomicUsize>,
    /// Text passed to the most recent synthesize call
    last_text: Arc<Mutex<String>>,
}

impl MockSynthesizer {
    /// Create a working mock
    pub fn working() -> Self {
        Self {
            failing: false,
            call_count: Arc::new(AtomicUsize::new(0)),
            last_text: Arc::new(Mutex::new(String::new())),
        }
    }

    /// Create a failing mock
    pub fn failing() -> Self {
        Self {
            failing: true,
            call_count: Arc::new(AtomicUsize::new(0)),
            last_text: Arc::new(Mutex::new(String::new())),
        }
    }

    /// Number of synthesize calls made so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Text passed to the most recent synthesize call, empty if none yet
    pub fn last_text(&self) -> String {
        self.last_text.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, text: &str, _language: &str, output: &Path) -> Result<(), SynthesisError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_text.lock() {
            *last = text.to_string();
        }
        if self.failing {
            return Err(SynthesisError::RequestFailed("Simulated failure".to_string()));
        }
        std::fs::write(output, text.as_bytes())
            .map_err(|e| SynthesisError::WriteFailed(e.to_string()))?;
        Ok(())
    }
}
