// src/main.rs

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use gurukul_backend::chat::{ChatLimits, ChatService};
use gurukul_backend::config::CONFIG;
use gurukul_backend::llm::openai::OpenAiClient;
use gurukul_backend::persona::PersonaRegistry;
use gurukul_backend::server::{build_router, AppState};
use gurukul_backend::store::{self, ConversationStore, MessageStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(CONFIG.log_level.clone())),
        )
        .init();

    info!("Starting Gurukul backend");

    let pool = store::create_pool(&CONFIG.database_url, CONFIG.sqlite_max_connections).await?;
    store::run_migrations(&pool).await?;
    info!("Database ready at {}", CONFIG.database_url);

    let personas = Arc::new(PersonaRegistry::load(&CONFIG.persona_data_dir));
    let provider = Arc::new(OpenAiClient::new(
        &CONFIG.openai_base_url,
        Duration::from_secs(CONFIG.openai_timeout_secs),
    )?);

    let conversations = ConversationStore::new(pool.clone());
    let messages = MessageStore::new(pool.clone());

    let chat = ChatService::new(
        conversations.clone(),
        messages.clone(),
        personas.clone(),
        provider,
        ChatLimits {
            history_messages: CONFIG.history_message_cap,
            profile_messages: CONFIG.profile_message_cap,
            prompt_token_budget: CONFIG.prompt_token_budget,
        },
    );

    let state = Arc::new(AppState {
        chat,
        conversations,
        messages,
        personas,
        pool,
    });

    let app = build_router(state, &CONFIG.cors_origin);

    let bind_address = CONFIG.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
