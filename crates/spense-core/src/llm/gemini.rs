//! Gemini-backed structured extraction.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ModelError;
use crate::models::config::ModelConfig;

/// Fixed instruction sent alongside the receipt text.
const EXTRACTION_PROMPT: &str = "\
Extract data from this receipt text. Return ONLY a valid JSON object.
Required fields:
  - store_name (string)
  - bill_purchase_date (string, prefer YYYY-MM-DD)
  - total_cost (number)
  - tax_amount (number)
  - items: list of { name, price, category }
If tax not present, use 0.";

/// Trait for language-model structured extraction.
///
/// Implementations send receipt text to a model and return the raw textual
/// response verbatim. Parsing and validation happen downstream.
#[async_trait]
pub trait StructuredExtractor: Send + Sync {
    /// Ask the model for the structured-JSON rendition of `text`.
    async fn extract_structured(&self, text: &str) -> Result<String, ModelError>;
}

/// Structured extractor over the Gemini `generateContent` REST endpoint.
pub struct GeminiExtractor {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiExtractor {
    /// Build an extractor from model configuration and an API key.
    ///
    /// Every request carries the configured deadline, so a hung service
    /// call cannot stall a batch run indefinitely.
    pub fn new(config: &ModelConfig, api_key: impl Into<String>) -> Result<Self, ModelError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ModelError::Request(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.into(),
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        )
    }
}

#[async_trait]
impl StructuredExtractor for GeminiExtractor {
    async fn extract_structured(&self, text: &str) -> Result<String, ModelError> {
        info!("Requesting structured extraction from {}", self.model);

        let body = serde_json::json!({
            "contents": [{ "parts": [
                { "text": text },
                { "text": EXTRACTION_PROMPT }
            ]}]
        });

        let resp = self
            .http
            .post(self.url())
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ModelError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| ModelError::Request(e.to_string()))?;

        let raw = json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("")
            .to_string();

        debug!("Model returned {} bytes of text", raw.len());

        Ok(raw)
    }
}
