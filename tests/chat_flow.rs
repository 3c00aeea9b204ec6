// tests/chat_flow.rs
//! End-to-end exercises of the chat pipeline against an in-memory
//! database and a scripted provider.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sqlx::SqlitePool;

use gurukul_backend::chat::{ChatLimits, ChatService, SendMessage};
use gurukul_backend::error::AppError;
use gurukul_backend::llm::{ChatProvider, Completion, CompletionRequest, ProviderError, TurnRole};
use gurukul_backend::persona::PersonaRegistry;
use gurukul_backend::store::{ConversationStore, MessageStore};

/// Scripted provider. Records every request it receives so tests can
/// inspect the composed prompt.
struct MockProvider {
    reply: String,
    fail: Option<fn() -> ProviderError>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            fail: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn failing(make: fn() -> ProviderError) -> Arc<Self> {
        Arc::new(Self {
            reply: String::new(),
            fail: Some(make),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn last_request(&self) -> CompletionRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ProviderError> {
        self.requests.lock().unwrap().push(request);
        if let Some(make) = self.fail {
            return Err(make());
        }
        Ok(Completion {
            text: self.reply.clone(),
            tokens_used: 42,
        })
    }
}

async fn test_pool() -> SqlitePool {
    let pool = SqlitePool::connect(":memory:").await.unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

fn service(pool: &SqlitePool, provider: Arc<dyn ChatProvider>) -> ChatService {
    ChatService::new(
        ConversationStore::new(pool.clone()),
        MessageStore::new(pool.clone()),
        Arc::new(PersonaRegistry::load("does-not-exist")),
        provider,
        ChatLimits::default(),
    )
}

async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {}", table);
    sqlx::query_scalar(&sql).fetch_one(pool).await.unwrap()
}

#[tokio::test]
async fn first_message_creates_conversation_and_persists_exchange() {
    let pool = test_pool().await;
    let provider = MockProvider::replying("Haanji! Chai ready hai?");
    let chat = service(&pool, provider.clone());

    let outcome = chat
        .send_message(
            Some("user-1"),
            SendMessage {
                message: "Hi, my name is Rahul and I want to learn javascript".into(),
                persona: "hitesh".into(),
                conversation_id: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(outcome.response, "Haanji! Chai ready hai?");
    assert_eq!(outcome.persona, "hitesh");
    assert_eq!(outcome.tokens_used, 42);
    let conversation_id = outcome.conversation_id.expect("conversation created");

    assert_eq!(count_rows(&pool, "conversations").await, 1);

    let messages = MessageStore::new(pool.clone())
        .list_for_conversation(&conversation_id)
        .await
        .unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, "user");
    assert_eq!(messages[1].role, "assistant");
    assert_eq!(messages[1].persona.as_deref(), Some("hitesh"));
}

#[tokio::test]
async fn anonymous_chat_is_stateless() {
    let pool = test_pool().await;
    let provider = MockProvider::replying("Hey everyone!");
    let chat = service(&pool, provider.clone());

    let outcome = chat
        .send_message(
            None,
            SendMessage {
                message: "What is docker?".into(),
                persona: "piyush".into(),
                conversation_id: None,
            },
        )
        .await
        .unwrap();

    assert!(outcome.conversation_id.is_none());
    assert_eq!(count_rows(&pool, "conversations").await, 0);
    assert_eq!(count_rows(&pool, "messages").await, 0);

    // Anonymous callers still get the "anonymous" identity upstream.
    assert_eq!(provider.last_request().user, "anonymous");
}

#[tokio::test]
async fn invalid_persona_rejected_before_any_writes() {
    let pool = test_pool().await;
    let provider = MockProvider::replying("unused");
    let chat = service(&pool, provider.clone());

    let err = chat
        .send_message(
            Some("user-1"),
            SendMessage {
                message: "hello".into(),
                persona: "unknown".into(),
                conversation_id: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(count_rows(&pool, "conversations").await, 0);
    assert!(provider.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn provider_rate_limit_persists_no_messages() {
    let pool = test_pool().await;
    let provider = MockProvider::failing(|| ProviderError::RateLimited);
    let chat = service(&pool, provider.clone());

    let err = chat
        .send_message(
            Some("user-1"),
            SendMessage {
                message: "hello there".into(),
                persona: "hitesh".into(),
                conversation_id: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UpstreamRateLimit));
    // The conversation shell may exist, but no partial message pair does.
    assert_eq!(count_rows(&pool, "messages").await, 0);
}

#[tokio::test]
async fn second_message_carries_annotated_history_and_profile() {
    let pool = test_pool().await;
    let provider = MockProvider::replying("Closures capture their environment.");
    let chat = service(&pool, provider.clone());

    let first = chat
        .send_message(
            Some("user-2"),
            SendMessage {
                message: "My name is Priya, what are closures in javascript?".into(),
                persona: "hitesh".into(),
                conversation_id: None,
            },
        )
        .await
        .unwrap();
    let conversation_id = first.conversation_id.unwrap();

    chat.send_message(
        Some("user-2"),
        SendMessage {
            message: "I am confused, can you explain again?".into(),
            persona: "hitesh".into(),
            conversation_id: Some(conversation_id.clone()),
        },
    )
    .await
    .unwrap();

    let request = provider.last_request();

    // System prompt carries the extracted profile.
    let system = &request.turns[0];
    assert_eq!(system.role, TurnRole::System);
    assert!(system.content.contains("CURRENT USER CONTEXT"));
    assert!(system.content.contains("Priya"));
    assert!(system.content.contains("javascript"));

    // Prior exchange is replayed with complexity annotations.
    let history_user = request
        .turns
        .iter()
        .find(|t| t.role == TurnRole::User && t.content.contains("closures"))
        .expect("history user turn present");
    assert!(history_user.content.contains("[User message complexity:"));

    // Current message arrives last, enhanced rather than raw.
    let current = request.turns.last().unwrap();
    assert_eq!(current.role, TurnRole::User);
    assert!(current.content.contains("I am confused"));

    // A third turn sees the confusion retroactively marked on the
    // assistant reply that preceded it.
    chat.send_message(
        Some("user-2"),
        SendMessage {
            message: "Thanks, also what about arrow functions?".into(),
            persona: "hitesh".into(),
            conversation_id: Some(conversation_id),
        },
    )
    .await
    .unwrap();

    let request = provider.last_request();
    let assistant = request
        .turns
        .iter()
        .find(|t| t.role == TurnRole::Assistant)
        .expect("history assistant turn present");
    assert!(assistant
        .content
        .contains("[Note: User may need further clarification on this topic]"));
    let current = request.turns.last().unwrap();
    assert!(current
        .content
        .contains("[This appears to be a follow-up question to previous discussion]"));
}

#[tokio::test]
async fn foreign_conversation_id_is_not_found() {
    let pool = test_pool().await;
    let provider = MockProvider::replying("hello");
    let chat = service(&pool, provider.clone());

    let owner = chat
        .send_message(
            Some("owner"),
            SendMessage {
                message: "start a thread".into(),
                persona: "piyush".into(),
                conversation_id: None,
            },
        )
        .await
        .unwrap();

    let err = chat
        .send_message(
            Some("intruder"),
            SendMessage {
                message: "let me in".into(),
                persona: "piyush".into(),
                conversation_id: owner.conversation_id,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}
