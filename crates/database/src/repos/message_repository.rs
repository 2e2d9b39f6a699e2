//! Repository for message data access operations.

use sqlx::SqlitePool;
use tracing::debug;

use crate::entities::{ChatMessage, CreateMessageRequest};
use crate::types::{now_timestamp, DatabaseResult};

/// Repository for message database operations
#[derive(Clone)]
pub struct MessageRepository {
    pool: SqlitePool,
}

impl MessageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a message to a chat
    pub async fn create(&self, request: &CreateMessageRequest) -> DatabaseResult<ChatMessage> {
        let now = now_timestamp();

        let id = sqlx::query(
            "INSERT INTO messages (chat_id, sender, sender_role, content, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(request.chat_id)
        .bind(request.sender)
        .bind(&request.sender_role)
        .bind(&request.content)
        .bind(&now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        debug!(message_id = id, chat_id = request.chat_id, "stored message");

        Ok(ChatMessage {
            id,
            chat_id: request.chat_id,
            sender: request.sender,
            sender_role: request.sender_role.clone(),
            content: request.content.clone(),
            created_at: now,
        })
    }

    /// Messages of a chat, oldest first
    pub async fn list_for_chat(&self, chat_id: i64) -> DatabaseResult<Vec<ChatMessage>> {
        let messages = sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT id, chat_id, sender, sender_role, content, created_at
            FROM messages
            WHERE chat_id = ?
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::fixtures::seed_chat;
    use crate::test_support::create_test_database;

    #[tokio::test]
    async fn test_messages_are_returned_oldest_first() {
        let (pool, _temp_dir) = create_test_database().await;
        let (client_id, employee_id, chat_id) = seed_chat(&pool).await;
        let repo = MessageRepository::new(pool.clone());

        // Insert out of order to prove the query sorts by creation time.
        for (sender, content, created_at) in [
            (employee_id, "third", "2024-01-01T00:00:03.000000Z"),
            (client_id, "first", "2024-01-01T00:00:01.000000Z"),
            (client_id, "second", "2024-01-01T00:00:02.000000Z"),
        ] {
            sqlx::query(
                "INSERT INTO messages (chat_id, sender, sender_role, content, created_at) VALUES (?, ?, 'CLIENT', ?, ?)",
            )
            .bind(chat_id)
            .bind(sender)
            .bind(content)
            .bind(created_at)
            .execute(&pool)
            .await
            .unwrap();
        }

        let contents: Vec<String> = repo
            .list_for_chat(chat_id)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.content)
            .collect();

        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_create_returns_stored_row() {
        let (pool, _temp_dir) = create_test_database().await;
        let (client_id, _, chat_id) = seed_chat(&pool).await;
        let repo = MessageRepository::new(pool);

        let message = repo
            .create(&CreateMessageRequest {
                chat_id,
                sender: client_id,
                sender_role: "CLIENT".to_string(),
                content: "hello".to_string(),
            })
            .await
            .unwrap();

        let stored = repo.list_for_chat(chat_id).await.unwrap();
        assert_eq!(stored, vec![message]);
    }
}
