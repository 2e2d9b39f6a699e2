//! Repository for service item data access operations.

use sqlx::SqlitePool;

use crate::entities::ServiceItem;
use crate::types::{now_timestamp, DatabaseResult};

#[derive(Clone)]
pub struct ServiceItemRepository {
    pool: SqlitePool,
}

impl ServiceItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str) -> DatabaseResult<ServiceItem> {
        let now = now_timestamp();

        let id = sqlx::query("INSERT INTO service_items (name, created_at) VALUES (?, ?)")
            .bind(name)
            .bind(&now)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        Ok(ServiceItem {
            id,
            name: name.to_string(),
            created_at: now,
        })
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<ServiceItem>> {
        let item = sqlx::query_as::<_, ServiceItem>(
            "SELECT id, name, created_at FROM service_items WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }
}
