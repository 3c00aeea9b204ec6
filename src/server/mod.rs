// src/server/mod.rs
// Router assembly and shared application state.

pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::chat::ChatService;
use crate::persona::PersonaRegistry;
use crate::store::{ConversationStore, MessageStore};

/// Shared, read-only application state. Everything in here is either a
/// connection pool or immutable after startup, so requests never lock.
pub struct AppState {
    pub chat: ChatService,
    pub conversations: ConversationStore,
    pub messages: MessageStore,
    pub personas: Arc<PersonaRegistry>,
    pub pool: SqlitePool,
}

pub fn build_router(state: Arc<AppState>, cors_origin: &str) -> Router {
    let cors = match cors_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => CorsLayer::permissive(),
    };

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/personas", get(handlers::chat::list_personas))
        .route("/api/chat", post(handlers::chat::send_message))
        .route(
            "/api/conversations",
            get(handlers::conversations::list).post(handlers::conversations::create),
        )
        .route(
            "/api/conversations/{id}",
            get(handlers::conversations::get_one)
                .patch(handlers::conversations::update)
                .delete(handlers::conversations::remove),
        )
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(90)))
        .layer(cors)
        .with_state(state)
}
