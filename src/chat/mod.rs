//! Conversation orchestration.
//!
//! One request flows through: resolve conversation → load history → build
//! profile → compose prompt → annotate history → enhance message → submit →
//! persist → respond. Every step is sequential because each consumes the
//! previous step's output; the provider call and the database writes are the
//! only suspension points.

pub mod annotate;
pub mod budget;
pub mod enhance;
pub mod prompt;
pub mod rules;

use std::sync::Arc;
use std::time::Instant;

use serde_json::json;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::llm::{ChatProvider, CompletionRequest, Turn};
use crate::persona::{PersonaDefinition, PersonaRegistry};
use crate::profile::{build_profile, UserProfile};
use crate::store::types::{Conversation, Role};
use crate::store::{ConversationStore, MessageStore};

const PRESENCE_PENALTY: f32 = 0.6;
const FREQUENCY_PENALTY: f32 = 0.5;

/// Pipeline bounds, normally taken from the app config.
#[derive(Debug, Clone)]
pub struct ChatLimits {
    /// History turns loaded per request.
    pub history_messages: i64,
    /// User messages analyzed for the profile.
    pub profile_messages: i64,
    /// Composed-prompt cap in estimated tokens.
    pub prompt_token_budget: usize,
}

impl Default for ChatLimits {
    fn default() -> Self {
        Self {
            history_messages: 20,
            profile_messages: 100,
            prompt_token_budget: 24_000,
        }
    }
}

/// Inbound chat parameters, already shape-validated by the HTTP layer.
#[derive(Debug, Clone)]
pub struct SendMessage {
    pub message: String,
    pub persona: String,
    pub conversation_id: Option<String>,
}

/// What one successful exchange produced.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub response: String,
    pub persona: String,
    pub persona_name: String,
    pub conversation_id: Option<String>,
    pub tokens_used: u32,
    pub response_time_ms: u64,
}

pub struct ChatService {
    conversations: ConversationStore,
    messages: MessageStore,
    personas: Arc<PersonaRegistry>,
    provider: Arc<dyn ChatProvider>,
    limits: ChatLimits,
}

impl ChatService {
    pub fn new(
        conversations: ConversationStore,
        messages: MessageStore,
        personas: Arc<PersonaRegistry>,
        provider: Arc<dyn ChatProvider>,
        limits: ChatLimits,
    ) -> Self {
        Self {
            conversations,
            messages,
            personas,
            provider,
            limits,
        }
    }

    /// Handle one chat exchange end to end.
    ///
    /// Anonymous callers (no user id) get a stateless exchange: no
    /// conversation, no history, nothing persisted. Upstream failures abort
    /// before persistence, so a failed call never leaves a partial message
    /// pair behind.
    pub async fn send_message(
        &self,
        user_id: Option<&str>,
        input: SendMessage,
    ) -> AppResult<ChatOutcome> {
        // Persona validation precedes everything, including conversation
        // resolution.
        let persona = self
            .personas
            .resolve(&input.persona)
            .ok_or_else(|| AppError::validation("Invalid persona specified"))?;

        let started = Instant::now();

        let conversation = self.resolve_conversation(user_id, &input).await?;

        let history = match &conversation {
            Some(conv) => self
                .messages
                .recent_for_conversation(&conv.id, self.limits.history_messages)
                .await?,
            None => Vec::new(),
        };

        let profile = match user_id {
            Some(uid) => self.build_user_profile(uid).await,
            None => None,
        };

        if let Some(p) = &profile {
            info!(
                user_id = user_id.unwrap_or("anonymous"),
                name = p.name.as_deref().unwrap_or("-"),
                analyzed = p.total_messages,
                conversations = p.conversation_count,
                "user profile built"
            );
        }

        let system_prompt = prompt::compose_system_prompt(&persona.prompt, profile.as_ref());
        let mut annotated = annotate::annotate_history(&history);
        let enhanced = enhance::enhance_message(&input.message, profile.as_ref(), &history);

        let dropped = budget::enforce_budget(
            &system_prompt,
            &mut annotated,
            &enhanced,
            self.limits.prompt_token_budget,
        );
        if dropped > 0 {
            warn!(dropped, "trimmed oldest history turns to fit prompt budget");
        }

        let mut turns = Vec::with_capacity(annotated.len() + 2);
        turns.push(Turn::system(system_prompt));
        turns.extend(annotated);
        turns.push(Turn::user(enhanced));

        let completion = self
            .provider
            .complete(CompletionRequest {
                model: persona.model.clone(),
                turns,
                temperature: persona.temperature,
                max_tokens: persona.max_tokens,
                presence_penalty: PRESENCE_PENALTY,
                frequency_penalty: FREQUENCY_PENALTY,
                user: user_id.unwrap_or("anonymous").to_string(),
            })
            .await?;

        let response_time_ms = started.elapsed().as_millis() as u64;

        if let Some(conv) = &conversation {
            self.persist_exchange(conv, &input.message, &completion.text, persona, response_time_ms, completion.tokens_used)
                .await?;
        }

        info!(
            persona = %persona.id,
            conversation_id = conversation.as_ref().map(|c| c.id.as_str()).unwrap_or("-"),
            tokens_used = completion.tokens_used,
            response_time_ms,
            "chat message processed"
        );

        Ok(ChatOutcome {
            response: completion.text,
            persona: persona.id.to_string(),
            persona_name: persona.name.to_string(),
            conversation_id: conversation.map(|c| c.id),
            tokens_used: completion.tokens_used,
            response_time_ms,
        })
    }

    /// Reuse a conversation by id (must be active and owned), lazily create
    /// one for authenticated first messages, or proceed without one for
    /// anonymous callers.
    async fn resolve_conversation(
        &self,
        user_id: Option<&str>,
        input: &SendMessage,
    ) -> AppResult<Option<Conversation>> {
        match (&input.conversation_id, user_id) {
            (Some(id), Some(uid)) => {
                let conv = self
                    .conversations
                    .find_active(id, uid)
                    .await?
                    .ok_or_else(|| AppError::not_found("Conversation not found"))?;
                Ok(Some(conv))
            }
            // A conversation id without an identity can never be owned.
            (Some(_), None) => Err(AppError::not_found("Conversation not found")),
            (None, Some(uid)) => {
                let title = ConversationStore::title_from_message(&input.message);
                let conv = self
                    .conversations
                    .create(uid, &input.persona, &title)
                    .await?;
                Ok(Some(conv))
            }
            (None, None) => Ok(None),
        }
    }

    /// Build the profile fresh every request from the bounded analysis
    /// window. Failures degrade to no profile; they never block delivery.
    async fn build_user_profile(&self, user_id: &str) -> Option<UserProfile> {
        let window = match self
            .messages
            .recent_user_messages(user_id, self.limits.profile_messages)
            .await
        {
            Ok(window) => window,
            Err(e) => {
                warn!("profile window fetch failed: {:?}", e);
                return None;
            }
        };

        let conversation_count = match self.conversations.count_active(user_id).await {
            Ok(count) => count as usize,
            Err(e) => {
                warn!("conversation count failed: {:?}", e);
                return None;
            }
        };

        Some(build_profile(&window, conversation_count))
    }

    /// Store both sides of the exchange as immutable rows, then refresh the
    /// conversation's denormalized metadata.
    async fn persist_exchange(
        &self,
        conversation: &Conversation,
        user_message: &str,
        assistant_response: &str,
        persona: &PersonaDefinition,
        response_time_ms: u64,
        tokens_used: u32,
    ) -> AppResult<()> {
        self.messages
            .create(
                &conversation.id,
                Role::User,
                user_message,
                None,
                &json!({ "model": persona.model }),
            )
            .await?;

        self.messages
            .create(
                &conversation.id,
                Role::Assistant,
                assistant_response,
                Some(persona.id.as_str()),
                &json!({
                    "tokensUsed": tokens_used,
                    "responseTime": response_time_ms,
                    "model": persona.model,
                    "temperature": persona.temperature,
                }),
            )
            .await?;

        self.conversations
            .refresh_metadata(&conversation.id, persona.id.as_str())
            .await?;

        Ok(())
    }
}
