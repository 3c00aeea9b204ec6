// src/store/messages.rs
// Append-only message storage. Nothing here mutates content after insert;
// per-request annotations never touch these rows.

use anyhow::{Context, Result};
use serde_json::Value;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::types::{Message, MessageRow, Role};

#[derive(Clone)]
pub struct MessageStore {
    pool: SqlitePool,
}

impl MessageStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        conversation_id: &str,
        role: Role,
        content: &str,
        persona: Option<&str>,
        metadata: &Value,
    ) -> Result<Message> {
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().timestamp();
        let metadata_json = metadata.to_string();

        sqlx::query(
            r#"
            INSERT INTO messages (id, conversation_id, role, content, persona, metadata, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(conversation_id)
        .bind(role.as_str())
        .bind(content)
        .bind(persona)
        .bind(&metadata_json)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create message")?;

        Ok(Message {
            id,
            conversation_id: conversation_id.to_string(),
            role: role.as_str().to_string(),
            content: content.to_string(),
            persona: persona.map(String::from),
            metadata: metadata.clone(),
            created_at: now,
        })
    }

    /// The most recent `limit` messages of a conversation, returned in
    /// chronological order (fetched newest-first, then reversed).
    pub async fn recent_for_conversation(
        &self,
        conversation_id: &str,
        limit: i64,
    ) -> Result<Vec<Message>> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, conversation_id, role, content, persona, metadata, created_at
            FROM messages
            WHERE conversation_id = ?
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?
            "#,
        )
        .bind(conversation_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch recent messages")?;

        let mut messages: Vec<Message> = rows.into_iter().map(Message::from).collect();
        messages.reverse();
        Ok(messages)
    }

    /// Full chronological transcript of a conversation.
    pub async fn list_for_conversation(&self, conversation_id: &str) -> Result<Vec<Message>> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, conversation_id, role, content, persona, metadata, created_at
            FROM messages
            WHERE conversation_id = ?
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list messages")?;

        Ok(rows.into_iter().map(Message::from).collect())
    }

    /// The analysis window for profile extraction: the user's most recent
    /// user-role messages across all their active conversations, newest
    /// first.
    pub async fn recent_user_messages(&self, user_id: &str, limit: i64) -> Result<Vec<Message>> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT m.id, m.conversation_id, m.role, m.content, m.persona, m.metadata, m.created_at
            FROM messages m
            JOIN conversations c ON c.id = m.conversation_id
            WHERE c.user_id = ? AND c.is_active = 1 AND m.role = 'user'
            ORDER BY m.created_at DESC, m.rowid DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch user message window")?;

        Ok(rows.into_iter().map(Message::from).collect())
    }
}
