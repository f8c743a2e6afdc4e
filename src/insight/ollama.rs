use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::InsightBackend;
use crate::error::InsightError;

/// Model served by the local endpoint. Not configurable.
pub const MODEL: &str = "llama3.2:1b";

/// Locally hosted model behind Ollama's `/api/generate`.
pub struct OllamaBackend {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaBackend {
    pub fn new(base_url: &str) -> Result<Self, InsightError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl InsightBackend for OllamaBackend {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn complete(&self, prompt: &str) -> Result<String, InsightError> {
        let body = serde_json::json!({
            "model": MODEL,
            "prompt": prompt,
            "stream": false,
        });

        let resp = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(InsightError::Api { status, message });
        }

        let data: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| InsightError::Malformed(e.to_string()))?;
        Ok(data.response)
    }
}
