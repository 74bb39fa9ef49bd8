// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! [`ImageAnalyzer`] backed by the Google Generative Language API
//! (`models/{model}:generateContent`).
//!
//! The image is sent inline as base64 next to the configured prompt; the
//! text parts of the first candidate are joined and returned.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{AnalysisError, ImageAnalyzer};
use crate::config::AnalysisConfig;

/// Gemini client. Cheap to clone; the HTTP connection pool is shared.
#[derive(Debug, Clone)]
pub struct GeminiAnalyzer {
    client: Client,
    base_url: String,
    model: String,
    prompt: String,
    api_key: String,
}

impl GeminiAnalyzer {
    /// Build a client from configuration.
    ///
    /// # Errors
    /// [`AnalysisError::MissingApiKey`] if no key is configured.
    pub fn new(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(AnalysisError::MissingApiKey)?
            .to_string();

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("phasm-lsb/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            prompt: config.prompt.clone(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    fn request_body(&self, image_bytes: &[u8]) -> serde_json::Value {
        json!({
            "contents": [{
                "parts": [
                    { "text": self.prompt },
                    {
                        "inline_data": {
                            "mime_type": mime_type(image_bytes),
                            "data": STANDARD.encode(image_bytes),
                        }
                    }
                ]
            }]
        })
    }
}

impl ImageAnalyzer for GeminiAnalyzer {
    async fn analyze(&self, image_bytes: &[u8]) -> Result<String, AnalysisError> {
        let body = self.request_body(image_bytes);
        debug!(model = %self.model, image_len = image_bytes.len(), "requesting image analysis");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Status { status: status.as_u16(), body });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        extract_text(parsed).ok_or(AnalysisError::EmptyResponse)
    }
}

/// MIME type of the container, falling back to a generic binary type.
fn mime_type(image_bytes: &[u8]) -> &'static str {
    image::guess_format(image_bytes)
        .map(|f| f.to_mime_type())
        .unwrap_or("application/octet-stream")
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Join the text parts of the first candidate. `None` if there is no text.
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
