use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::InsightBackend;
use crate::error::InsightError;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MODEL: &str = "claude-haiku-4-5-20251001";
const MAX_TOKENS: u32 = 256;

/// Hosted model behind the Anthropic Messages API.
pub struct AnthropicBackend {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl AnthropicBackend {
    pub fn new(api_key: Option<&str>) -> Result<Self, InsightError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: Option<&str>, base_url: &str) -> Result<Self, InsightError> {
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(InsightError::MissingApiKey)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl InsightBackend for AnthropicBackend {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn complete(&self, prompt: &str) -> Result<String, InsightError> {
        let body = serde_json::json!({
            "model": MODEL,
            "max_tokens": MAX_TOKENS,
            "messages": [{
                "role": "user",
                "content": prompt,
            }]
        });

        let resp = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(InsightError::Api { status, message });
        }

        let data: MessagesResponse = resp
            .json()
            .await
            .map_err(|e| InsightError::Malformed(e.to_string()))?;

        data.content
            .into_iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text)
            .ok_or(InsightError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;

    #[test]
    fn missing_key_fails_construction() {
        assert!(matches!(
            AnthropicBackend::new(None),
            Err(InsightError::MissingApiKey)
        ));
        assert!(matches!(
            AnthropicBackend::new(Some("  ")),
            Err(InsightError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn extracts_first_text_block() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/messages")
                    .header("x-api-key", "test-key")
                    .header("anthropic-version", ANTHROPIC_VERSION);
                then.status(200).json_body(json!({
                    "id": "msg_1",
                    "type": "message",
                    "role": "assistant",
                    "content": [
                        {"type": "text", "text": "🤔 That sounds like a full day."}
                    ],
                    "stop_reason": "end_turn"
                }));
            })
            .await;

        let backend =
            AnthropicBackend::with_base_url(Some("test-key"), &server.base_url()).unwrap();
        let text = backend.complete("analyze").await.unwrap();
        assert_eq!(text, "🤔 That sounds like a full day.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn api_error_message_is_surfaced() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages");
                then.status(401).json_body(json!({
                    "type": "error",
                    "error": {"type": "authentication_error", "message": "invalid x-api-key"}
                }));
            })
            .await;

        let backend = AnthropicBackend::with_base_url(Some("bad"), &server.base_url()).unwrap();
        match backend.complete("hi").await {
            Err(InsightError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid x-api-key");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn no_text_block_is_empty_response() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages");
                then.status(200).json_body(json!({"content": []}));
            })
            .await;

        let backend = AnthropicBackend::with_base_url(Some("k"), &server.base_url()).unwrap();
        assert!(matches!(
            backend.complete("hi").await,
            Err(InsightError::EmptyResponse)
        ));
    }
}
