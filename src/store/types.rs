// src/store/types.rs
// Persisted entities. Rows carry Unix-second timestamps and JSON metadata
// blobs; the row structs map 1:1 onto the schema and convert into the
// domain types the rest of the crate uses.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            "system" => Ok(Role::System),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub user_id: String,
    pub persona: String,
    pub title: String,
    pub is_active: bool,
    pub metadata: Value,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ConversationRow {
    pub id: String,
    pub user_id: String,
    pub persona: String,
    pub title: String,
    pub is_active: bool,
    pub metadata: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<ConversationRow> for Conversation {
    fn from(r: ConversationRow) -> Self {
        Conversation {
            id: r.id,
            user_id: r.user_id,
            persona: r.persona,
            title: r.title,
            is_active: r.is_active,
            metadata: serde_json::from_str(&r.metadata).unwrap_or_else(|_| Value::Object(Default::default())),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub role: String,
    pub content: String,
    pub persona: Option<String>,
    pub metadata: Value,
    pub created_at: i64,
}

impl Message {
    pub fn role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MessageRow {
    pub id: String,
    pub conversation_id: String,
    pub role: String,
    pub content: String,
    pub persona: Option<String>,
    pub metadata: String,
    pub created_at: i64,
}

impl From<MessageRow> for Message {
    fn from(r: MessageRow) -> Self {
        Message {
            id: r.id,
            conversation_id: r.conversation_id,
            role: r.role,
            content: r.content,
            persona: r.persona,
            metadata: serde_json::from_str(&r.metadata).unwrap_or_else(|_| Value::Object(Default::default())),
            created_at: r.created_at,
        }
    }
}
