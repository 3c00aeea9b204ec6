// src/server/handlers/chat.rs
//! Chat endpoint plus the persona listing the frontend uses to render
//! the picker.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::MaybeUser;
use crate::chat::SendMessage;
use crate::error::{AppError, AppResult};
use crate::server::AppState;

const MESSAGE_MAX_CHARS: usize = 4000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub persona: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatResponseData {
    response: String,
    persona: String,
    persona_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    conversation_id: Option<String>,
    tokens_used: u32,
    response_time: u64,
    timestamp: String,
}

pub async fn send_message(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<Value>> {
    let message = body.message.trim().to_string();
    if message.is_empty() || message.chars().count() > MESSAGE_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "Message must be between 1 and {} characters",
            MESSAGE_MAX_CHARS
        )));
    }

    if let Some(id) = body.conversation_id.as_deref() {
        if Uuid::parse_str(id).is_err() {
            return Err(AppError::Validation(
                "conversationId must be a valid UUID".into(),
            ));
        }
    }

    let outcome = state
        .chat
        .send_message(
            user.as_ref().map(|u| u.id.as_str()),
            SendMessage {
                message,
                persona: body.persona,
                conversation_id: body.conversation_id,
            },
        )
        .await?;

    let data = ChatResponseData {
        response: outcome.response,
        persona: outcome.persona,
        persona_name: outcome.persona_name,
        conversation_id: outcome.conversation_id,
        tokens_used: outcome.tokens_used,
        response_time: outcome.response_time_ms,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    Ok(Json(json!({ "status": "success", "data": data })))
}

pub async fn list_personas(State(state): State<Arc<AppState>>) -> Json<Value> {
    let personas: Vec<Value> = state
        .personas
        .all()
        .iter()
        .map(|p| {
            json!({
                "id": p.id.as_str(),
                "name": p.name,
                "description": p.description,
            })
        })
        .collect();

    Json(json!({ "status": "success", "data": { "personas": personas } }))
}
