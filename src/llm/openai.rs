// src/llm/openai.rs

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::env;
use std::time::Duration;
use tracing::debug;

use super::{ChatProvider, Completion, CompletionRequest, ProviderError};

#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    api_base: String,
}

impl OpenAiClient {
    /// Reads `OPENAI_API_KEY` from the environment. The request timeout is
    /// baked into the reqwest client; there is no retry logic here.
    pub fn new(api_base: &str, timeout: Duration) -> anyhow::Result<Self> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY not set"))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            client,
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl ChatProvider for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ProviderError> {
        let messages: Vec<Value> = request
            .turns
            .iter()
            .map(|t| json!({ "role": t.role.as_str(), "content": t.content }))
            .collect();

        let payload = json!({
            "model": request.model,
            "messages": messages,
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
            "presence_penalty": request.presence_penalty,
            "frequency_penalty": request.frequency_penalty,
            "user": request.user,
        });

        debug!(
            model = %request.model,
            turns = request.turns.len(),
            "submitting chat completion"
        );

        let response = self
            .client
            .post(self.endpoint("chat/completions"))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::Other(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(classify_status(status, body));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Other(format!("invalid response body: {e}")))?;

        // Normalize the provider envelope into one internal shape right here.
        let text = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| ProviderError::Other("response missing message content".to_string()))?
            .to_string();

        let tokens_used = body["usage"]["total_tokens"].as_u64().unwrap_or(0) as u32;

        Ok(Completion { text, tokens_used })
    }
}

fn classify_status(status: StatusCode, body: String) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED => ProviderError::Auth,
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited,
        StatusCode::BAD_REQUEST => ProviderError::BadRequest,
        _ => ProviderError::Other(format!("provider returned {status}: {body}")),
    }
}
