// src/store/conversations.rs

use anyhow::{Context, Result};
use serde_json::json;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::types::{Conversation, ConversationRow};

/// Title shown in conversation lists, derived from the first message.
const TITLE_PREFIX_LEN: usize = 50;

#[derive(Clone)]
pub struct ConversationStore {
    pool: SqlitePool,
}

impl ConversationStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Derive a list title from the opening message.
    pub fn title_from_message(message: &str) -> String {
        let prefix: String = message.chars().take(TITLE_PREFIX_LEN).collect();
        if message.chars().count() > TITLE_PREFIX_LEN {
            format!("{prefix}...")
        } else {
            prefix
        }
    }

    pub async fn create(&self, user_id: &str, persona: &str, title: &str) -> Result<Conversation> {
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().timestamp();

        sqlx::query(
            r#"
            INSERT INTO conversations (id, user_id, persona, title, is_active, metadata, created_at, updated_at)
            VALUES (?, ?, ?, ?, 1, '{}', ?, ?)
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(persona)
        .bind(title)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create conversation")?;

        self.find_active(&id, user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Conversation vanished after insert"))
    }

    /// Fetch a conversation only if it is active and owned by the caller.
    pub async fn find_active(&self, id: &str, user_id: &str) -> Result<Option<Conversation>> {
        let row = sqlx::query_as::<_, ConversationRow>(
            r#"
            SELECT id, user_id, persona, title, is_active, metadata, created_at, updated_at
            FROM conversations
            WHERE id = ? AND user_id = ? AND is_active = 1
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch conversation")?;

        Ok(row.map(Conversation::from))
    }

    pub async fn list_active(
        &self,
        user_id: &str,
        persona: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Conversation>, i64)> {
        let rows = sqlx::query_as::<_, ConversationRow>(
            r#"
            SELECT id, user_id, persona, title, is_active, metadata, created_at, updated_at
            FROM conversations
            WHERE user_id = ? AND is_active = 1
              AND (? IS NULL OR persona = ?)
            ORDER BY updated_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(user_id)
        .bind(persona)
        .bind(persona)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list conversations")?;

        let (total,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM conversations
            WHERE user_id = ? AND is_active = 1
              AND (? IS NULL OR persona = ?)
            "#,
        )
        .bind(user_id)
        .bind(persona)
        .bind(persona)
        .fetch_one(&self.pool)
        .await
        .context("Failed to count conversations")?;

        Ok((rows.into_iter().map(Conversation::from).collect(), total))
    }

    pub async fn count_active(&self, user_id: &str) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM conversations WHERE user_id = ? AND is_active = 1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to count conversations")?;
        Ok(count)
    }

    /// Update title and/or persona on an owned, active conversation.
    pub async fn update(
        &self,
        id: &str,
        user_id: &str,
        title: Option<&str>,
        persona: Option<&str>,
    ) -> Result<Option<Conversation>> {
        let now = chrono::Utc::now().timestamp();
        let result = sqlx::query(
            r#"
            UPDATE conversations
            SET title = COALESCE(?, title),
                persona = COALESCE(?, persona),
                updated_at = ?
            WHERE id = ? AND user_id = ? AND is_active = 1
            "#,
        )
        .bind(title)
        .bind(persona)
        .bind(now)
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .context("Failed to update conversation")?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_active(id, user_id).await
    }

    /// Soft delete. Rows and their messages stay in place; only the active
    /// flag flips.
    pub async fn deactivate(&self, id: &str, user_id: &str) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();
        let result = sqlx::query(
            r#"
            UPDATE conversations
            SET is_active = 0, updated_at = ?
            WHERE id = ? AND user_id = ? AND is_active = 1
            "#,
        )
        .bind(now)
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .context("Failed to deactivate conversation")?;

        Ok(result.rows_affected() > 0)
    }

    /// Recompute denormalized metadata after a message exchange lands.
    pub async fn refresh_metadata(&self, id: &str, persona: &str) -> Result<()> {
        let (message_count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM messages WHERE conversation_id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .context("Failed to count messages")?;

        let metadata = json!({
            "messageCount": message_count,
            "lastPersona": persona,
        })
        .to_string();

        let now = chrono::Utc::now().timestamp();
        sqlx::query("UPDATE conversations SET metadata = ?, updated_at = ? WHERE id = ?")
            .bind(&metadata)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to refresh conversation metadata")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_truncation() {
        let short = ConversationStore::title_from_message("What is closures?");
        assert_eq!(short, "What is closures?");

        let long_input = "x".repeat(80);
        let long = ConversationStore::title_from_message(&long_input);
        assert_eq!(long.chars().count(), 53);
        assert!(long.ends_with("..."));
    }
}
