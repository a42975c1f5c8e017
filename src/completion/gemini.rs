use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use super::{CompletionBackend, CompletionError, CompletionResult};

/// Backend adapter for the Google Gemini REST API (generateContent).
pub struct GeminiClient {
    model: String,
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(
        model: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            model: model.into(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            http,
        })
    }

    fn generate_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{}/v1beta/models/{}:generateContent", base, self.model)
    }

    /// Extract the generated text from a generateContent response. A
    /// well-formed response with no text parts yields an empty string.
    fn extract_text(json: &Value) -> String {
        let Some(parts) = json
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array())
        else {
            return String::new();
        };

        parts
            .iter()
            .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
            .collect::<Vec<_>>()
            .join("")
    }

    fn extract_error_message(json: &Value) -> Option<String> {
        let e = json.get("error")?;
        let msg = e.get("message").and_then(|v| v.as_str()).unwrap_or("");
        let status = e.get("status").and_then(|v| v.as_str()).unwrap_or("");

        let mut parts: Vec<String> = Vec::new();
        if !status.is_empty() {
            parts.push(status.to_string());
        }
        if !msg.is_empty() {
            parts.push(msg.to_string());
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(": "))
        }
    }
}

#[async_trait]
impl CompletionBackend for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> CompletionResult<String> {
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }],
        });

        let resp = self
            .http
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Network {
                message: e.to_string(),
            })?;

        let status = resp.status().as_u16();
        let bytes = resp.bytes().await.map_err(|e| CompletionError::Network {
            message: e.to_string(),
        })?;
        let parsed: Value =
            serde_json::from_slice(&bytes).map_err(|e| CompletionError::InvalidResponse {
                message: e.to_string(),
            })?;

        if !(200..300).contains(&status) {
            let message = Self::extract_error_message(&parsed)
                .unwrap_or_else(|| "no error detail".to_string());
            return Err(CompletionError::UpstreamStatus { status, message });
        }

        Ok(Self::extract_text(&parsed))
    }
}
