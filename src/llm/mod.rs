//! Model provider abstraction.
//!
//! The orchestrator talks to one trait; the OpenAI-compatible client lives
//! behind it, and tests substitute a mock. Provider responses are normalized
//! into a single internal shape at this boundary.

pub mod openai;

pub use openai::OpenAiClient;

use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    System,
    User,
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::System => "system",
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

/// One role-tagged entry of the composed prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: TurnRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: TurnRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: TurnRole::Assistant, content: content.into() }
    }
}

/// Everything the provider needs for one completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub turns: Vec<Turn>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
    /// Caller identifier forwarded to the provider for abuse tracking.
    pub user: String,
}

/// Normalized provider result, independent of the wire envelope.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub tokens_used: u32,
}

/// Provider failures, classified from the reported status so the caller can
/// map them onto the request-level taxonomy. No automatic retry happens at
/// this layer.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider authentication failed")]
    Auth,
    #[error("provider rate limit exceeded")]
    RateLimited,
    #[error("provider rejected the request")]
    BadRequest,
    #[error("provider request failed: {0}")]
    Other(String),
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ProviderError>;
}
