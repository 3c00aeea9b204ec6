// src/server/handlers/conversations.rs
//! Conversation CRUD. Every route here requires an authenticated user;
//! rows are always scoped to the caller so one user can never read or
//! touch another's history.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::RequireUser;
use crate::error::{AppError, AppResult};
use crate::server::AppState;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;
const TITLE_MAX_CHARS: usize = 120;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    page: Option<i64>,
    #[serde(default)]
    limit: Option<i64>,
    #[serde(default)]
    persona: Option<String>,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    RequireUser(user): RequireUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Value>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = (page - 1) * limit;

    if let Some(persona) = query.persona.as_deref() {
        if state.personas.resolve(persona).is_none() {
            return Err(AppError::Validation("Invalid persona specified".into()));
        }
    }

    let (conversations, total) = state
        .conversations
        .list_active(&user.id, query.persona.as_deref(), limit, offset)
        .await?;

    let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };

    Ok(Json(json!({
        "status": "success",
        "data": {
            "conversations": conversations,
            "pagination": {
                "currentPage": page,
                "totalPages": total_pages,
                "totalItems": total,
                "itemsPerPage": limit,
            },
        },
    })))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    persona: Option<String>,
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    RequireUser(user): RequireUser,
    Json(body): Json<CreateBody>,
) -> AppResult<Json<Value>> {
    let persona = body.persona.as_deref().unwrap_or("hitesh");
    if state.personas.resolve(persona).is_none() {
        return Err(AppError::Validation("Invalid persona specified".into()));
    }

    let title = body.title.as_deref().map(str::trim).unwrap_or("");
    let title = if title.is_empty() { "New Conversation" } else { title };
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "Title must be at most {} characters",
            TITLE_MAX_CHARS
        )));
    }

    let conversation = state.conversations.create(&user.id, persona, title).await?;

    Ok(Json(json!({
        "status": "success",
        "data": { "conversation": conversation },
    })))
}

pub async fn get_one(
    State(state): State<Arc<AppState>>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let conversation = state
        .conversations
        .find_active(&id, &user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Conversation not found".into()))?;

    let messages = state.messages.list_for_conversation(&conversation.id).await?;

    Ok(Json(json!({
        "status": "success",
        "data": { "conversation": conversation, "messages": messages },
    })))
}

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    persona: Option<String>,
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateBody>,
) -> AppResult<Json<Value>> {
    if body.title.is_none() && body.persona.is_none() {
        return Err(AppError::Validation("Nothing to update".into()));
    }

    if let Some(title) = body.title.as_deref() {
        let trimmed = title.trim();
        if trimmed.is_empty() || trimmed.chars().count() > TITLE_MAX_CHARS {
            return Err(AppError::Validation(format!(
                "Title must be between 1 and {} characters",
                TITLE_MAX_CHARS
            )));
        }
    }

    if let Some(persona) = body.persona.as_deref() {
        if state.personas.resolve(persona).is_none() {
            return Err(AppError::Validation("Invalid persona specified".into()));
        }
    }

    let conversation = state
        .conversations
        .update(
            &id,
            &user.id,
            body.title.as_deref().map(str::trim),
            body.persona.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Conversation not found".into()))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "conversation": conversation },
    })))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let removed = state.conversations.deactivate(&id, &user.id).await?;
    if !removed {
        return Err(AppError::NotFound("Conversation not found".into()));
    }

    Ok(Json(json!({
        "status": "success",
        "data": { "message": "Conversation deleted" },
    })))
}
