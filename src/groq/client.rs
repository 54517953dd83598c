//! HTTP client for the Groq API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::error::GroqError;
use super::models::{ChatRequest, ChatResponse};

/// Seam between the pipeline and the hosted model API.
///
/// The production implementation is [`GroqClient`]; tests substitute a
/// scripted provider so pipeline and server behaviour can be exercised
/// without network access.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send one chat-completion request and return the parsed response
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, GroqError>;
}

/// Groq API client
pub struct GroqClient {
    /// HTTP client
    client: Client,
    /// API key for authentication
    api_key: String,
}

impl GroqClient {
    /// Groq chat-completions URL (OpenAI-compatible)
    const API_URL: &'static str = "https://api.groq.com/openai/v1/chat/completions";

    /// Create a new Groq client with the given API key and request timeout.
    ///
    /// The timeout covers the whole request; without it a hung upstream
    /// call would block its request task indefinitely.
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, GroqError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_key })
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, GroqError> {
        let response = self
            .client
            .post(Self::API_URL)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(GroqError::RateLimited { retry_after_seconds: retry_after });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(GroqError::ApiError {
                status: 401,
                message: "Invalid API key".to_string(),
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GroqError::ApiError { status: status.as_u16(), message });
        }

        let body = response.text().await?;
        let chat_response: ChatResponse = serde_json::from_str(&body)?;
        Ok(chat_response)
    }
}

#[async_trait]
impl ChatProvider for GroqClient {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, GroqError> {
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = GroqClient::new("gsk_test_key".to_string(), Duration::from_secs(30)).unwrap();
        assert_eq!(client.api_key, "gsk_test_key");
    }
}
