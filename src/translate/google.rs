use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::errors::TranslationError;
use crate::translate::Translator;

/// Client for the public Google translate endpoint
///
/// Uses the `translate_a/single` JSON interface: one GET per line with the
/// source and target language as query parameters. No API key is required.
#[derive(Debug)]
pub struct GoogleTranslate {
    /// Endpoint URL
    endpoint: String,
    /// HTTP client for making requests
    client: Client,
    /// Source language code (ISO 639-1)
    source_language: String,
    /// Target language code (ISO 639-1)
    target_language: String,
}

impl GoogleTranslate {
    /// Create a new client for a fixed language pair
    pub fn new(
        endpoint: String,
        source_language: String,
        target_language: String,
        timeout_secs: u64,
    ) -> Result<Self, TranslationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| TranslationError::RequestFailed(e.to_string()))?;

        Ok(GoogleTranslate {
            endpoint,
            client,
            source_language,
            target_language,
        })
    }

    /// Pull the translated text out of the nested-array response
    ///
    /// The endpoint answers with `[[["<translated>","<original>",...],...],...]`;
    /// long inputs are split over several inner arrays that concatenate back
    /// into the full translation.
    fn extract_translation(body: &Value) -> Result<String, TranslationError> {
        let sentences = body
            .get(0)
            .and_then(|v| v.as_array())
            .ok_or_else(|| TranslationError::ParseError("Missing sentence array".to_string()))?;

        let mut translated = String::new();
        for sentence in sentences {
            if let Some(part) = sentence.get(0).and_then(|v| v.as_str()) {
                translated.push_str(part);
            }
        }

        if translated.trim().is_empty() {
            return Err(TranslationError::EmptyResult);
        }
        Ok(translated)
    }
}

#[async_trait]
impl Translator for GoogleTranslate {
    async fn translate_line(&self, line: &str) -> Result<String, TranslationError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", self.source_language.as_str()),
                ("tl", self.target_language.as_str()),
                ("dt", "t"),
                ("q", line),
            ])
            .send()
            .await
            .map_err(|e| TranslationError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TranslationError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TranslationError::ParseError(e.to_string()))?;

        Self::extract_translation(&body)
    }

    async fn test_connection(&self) -> Result<(), TranslationError> {
        self.translate_line("hello").await.map(|_| ())
    }

    fn language_pair(&self) -> (&str, &str) {
        (&self.source_language, &self.target_language)
    }
}
