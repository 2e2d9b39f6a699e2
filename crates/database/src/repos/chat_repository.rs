//! Repository for chat data access operations.

use sqlx::SqlitePool;
use tracing::info;

use crate::entities::{Chat, ChatSummary, CreateChatRequest};
use crate::types::{now_timestamp, DatabaseResult};

const SUMMARY_SELECT: &str = r#"
    SELECT c.id, c.client_id, c.employee_id, c.service_item_id, c.created_at,
           s.name AS service_item_name,
           cl.name AS client_name, cl.email AS client_email,
           e.name AS employee_name, e.email AS employee_email
    FROM chats c
    JOIN clients cl ON cl.id = c.client_id
    JOIN employees e ON e.id = c.employee_id
    LEFT JOIN service_items s ON s.id = c.service_item_id
"#;

/// Repository for chat database operations
#[derive(Clone)]
pub struct ChatRepository {
    pool: SqlitePool,
}

impl ChatRepository {
    /// Create a new chat repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new chat between a client and an employee
    pub async fn create(&self, request: &CreateChatRequest) -> DatabaseResult<Chat> {
        let now = now_timestamp();

        let id = sqlx::query(
            "INSERT INTO chats (client_id, employee_id, service_item_id, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(request.client_id)
        .bind(request.employee_id)
        .bind(request.service_item_id)
        .bind(&now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        info!(
            chat_id = id,
            client_id = request.client_id,
            employee_id = request.employee_id,
            "created new chat"
        );

        Ok(Chat {
            id,
            client_id: request.client_id,
            employee_id: request.employee_id,
            service_item_id: request.service_item_id,
            created_at: now,
        })
    }

    /// Find chat by ID
    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Chat>> {
        let chat = sqlx::query_as::<_, Chat>(
            "SELECT id, client_id, employee_id, service_item_id, created_at FROM chats WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(chat)
    }

    /// Chats owned by a client, with service item and party details
    pub async fn list_for_client(&self, client_id: i64) -> DatabaseResult<Vec<ChatSummary>> {
        let query = format!("{SUMMARY_SELECT} WHERE c.client_id = ? ORDER BY c.id ASC");
        let chats = sqlx::query_as::<_, ChatSummary>(&query)
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(chats)
    }

    /// Chats assigned to an employee, with service item and party details
    pub async fn list_for_employee(&self, employee_id: i64) -> DatabaseResult<Vec<ChatSummary>> {
        let query = format!("{SUMMARY_SELECT} WHERE c.employee_id = ? ORDER BY c.id ASC");
        let chats = sqlx::query_as::<_, ChatSummary>(&query)
            .bind(employee_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(chats)
    }

    /// Every chat in the system
    pub async fn list_all(&self) -> DatabaseResult<Vec<ChatSummary>> {
        let query = format!("{SUMMARY_SELECT} ORDER BY c.id ASC");
        let chats = sqlx::query_as::<_, ChatSummary>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(chats)
    }

    /// Chats where the id appears on either side
    pub async fn list_by_participant(&self, user_id: i64) -> DatabaseResult<Vec<Chat>> {
        let chats = sqlx::query_as::<_, Chat>(
            r#"
            SELECT id, client_id, employee_id, service_item_id, created_at
            FROM chats
            WHERE client_id = ? OR employee_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(chats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::fixtures::seed_chat;
    use crate::repos::ServiceItemRepository;
    use crate::test_support::create_test_database;
    use crate::types::DatabaseError;

    #[tokio::test]
    async fn test_find_by_id() {
        let (pool, _temp_dir) = create_test_database().await;
        let (client_id, employee_id, chat_id) = seed_chat(&pool).await;
        let repo = ChatRepository::new(pool);

        let chat = repo.find_by_id(chat_id).await.unwrap().unwrap();
        assert_eq!(chat.client_id, client_id);
        assert_eq!(chat.employee_id, employee_id);
        assert!(repo.find_by_id(chat_id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_summaries_include_party_details() {
        let (pool, _temp_dir) = create_test_database().await;
        let (client_id, employee_id, _) = seed_chat(&pool).await;
        let item = ServiceItemRepository::new(pool.clone())
            .create("Visa application")
            .await
            .unwrap();
        let repo = ChatRepository::new(pool);
        repo.create(&CreateChatRequest {
            client_id,
            employee_id,
            service_item_id: Some(item.id),
        })
        .await
        .unwrap();

        let for_client = repo.list_for_client(client_id).await.unwrap();
        assert_eq!(for_client.len(), 2);
        assert_eq!(for_client[0].employee().name, "Employee One");
        assert_eq!(for_client[0].service_item_name, None);
        assert_eq!(
            for_client[1].service_item_name.as_deref(),
            Some("Visa application")
        );

        let for_employee = repo.list_for_employee(employee_id).await.unwrap();
        assert_eq!(for_employee.len(), 2);
        assert_eq!(for_employee[0].client().email, "client1@example.com");

        assert_eq!(repo.list_all().await.unwrap().len(), 2);
        assert!(repo.list_for_client(employee_id + 50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_by_participant_matches_either_side() {
        let (pool, _temp_dir) = create_test_database().await;
        let (client_id, employee_id, chat_id) = seed_chat(&pool).await;
        let repo = ChatRepository::new(pool);

        let by_client = repo.list_by_participant(client_id).await.unwrap();
        let by_employee = repo.list_by_participant(employee_id).await.unwrap();

        assert_eq!(by_client.len(), 1);
        assert_eq!(by_client[0].id, chat_id);
        assert_eq!(by_employee.len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_client() {
        let (pool, _temp_dir) = create_test_database().await;
        let (_, employee_id, _) = seed_chat(&pool).await;
        let repo = ChatRepository::new(pool);

        let err = repo
            .create(&CreateChatRequest {
                client_id: 4_242,
                employee_id,
                service_item_id: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DatabaseError::ForeignKey(_)));
    }
}
